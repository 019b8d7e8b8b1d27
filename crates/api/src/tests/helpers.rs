// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use time::OffsetDateTime;
use time::macros::datetime;
use vast_audit::Cause;
use vast_domain::{HierarchyEdge, Role, User, UserId, UserStatus};
use vast_persistence::Persistence;

use crate::{
    AuthenticatedActor, ListTargetsRequest, ListTargetsResponse, OperatorRole,
    SaveTargetsRequest, SaveTargetsResponse, TargetUserInfo, list_targets, save_targets,
};

pub const NOW: OffsetDateTime = datetime!(2025-03-10 09:00 UTC);

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-1"), OperatorRole::Admin)
}

pub fn create_test_manager() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("manager-1"), OperatorRole::Manager)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-1"), String::from("API request"))
}

fn add_user(
    persistence: &mut Persistence,
    id: &str,
    name: &str,
    role: Role,
    atasan: Option<&str>,
) {
    persistence
        .upsert_user(&User::new(
            UserId::new(id).unwrap(),
            String::from(name),
            role,
            UserStatus::Active,
        ))
        .unwrap();
    persistence
        .set_hierarchy_edge(&HierarchyEdge {
            user_id: UserId::new(id).unwrap(),
            atasan_id: atasan.map(|a| UserId::new(a).unwrap()),
            area: Some(String::from("Jakarta Timur")),
            store_id: None,
        })
        .unwrap();
}

/// SPV Budi over sators Ani and Cici. Promotors Dedi and Eka report to the
/// sators; Fina reports to Budi directly, making Budi dual-role.
pub fn create_budi_area() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    add_user(&mut persistence, "spv-budi", "Budi", Role::Spv, None);
    add_user(&mut persistence, "sator-cici", "Cici", Role::Sator, Some("spv-budi"));
    add_user(&mut persistence, "sator-ani", "Ani", Role::Sator, Some("spv-budi"));
    add_user(&mut persistence, "p-dedi", "Dedi", Role::Promotor, Some("sator-ani"));
    add_user(&mut persistence, "p-eka", "Eka", Role::Promotor, Some("sator-cici"));
    add_user(&mut persistence, "p-fina", "Fina", Role::Promotor, Some("spv-budi"));
    persistence
}

pub fn list(
    persistence: &mut Persistence,
    tier: &str,
    month: u8,
    year: i32,
) -> Vec<TargetUserInfo> {
    let response: ListTargetsResponse = list_targets(
        persistence,
        &ListTargetsRequest {
            tier: String::from(tier),
            month,
            year,
        },
        &create_test_admin(),
    )
    .unwrap();
    response.rows
}

pub fn edit(rows: &mut [TargetUserInfo], id: &str, value: i64) {
    for row in rows.iter_mut().filter(|r| r.user_id == id) {
        row.new_target = value;
    }
}

pub fn save(
    persistence: &mut Persistence,
    rows: Vec<TargetUserInfo>,
    month: u8,
    year: i32,
) -> SaveTargetsResponse {
    save_targets(
        persistence,
        &SaveTargetsRequest { month, year, rows },
        &create_test_admin(),
        create_test_cause(),
        NOW,
    )
    .unwrap()
}

/// Stores Budi 100 (0 as sator), Ani 40, Cici 50, Dedi 40 and Eka 50 for
/// March 2025.
pub fn seed_march(persistence: &mut Persistence) {
    let mut spv: Vec<TargetUserInfo> = list(persistence, "spv", 3, 2025);
    edit(&mut spv, "spv-budi", 100);
    save(persistence, spv, 3, 2025);

    let mut sators: Vec<TargetUserInfo> = list(persistence, "sator", 3, 2025);
    edit(&mut sators, "sator-ani", 40);
    edit(&mut sators, "sator-cici", 50);
    edit(&mut sators, "spv-budi", 0);
    save(persistence, sators, 3, 2025);

    let mut promotors: Vec<TargetUserInfo> = list(persistence, "promotor", 3, 2025);
    edit(&mut promotors, "p-dedi", 40);
    edit(&mut promotors, "p-eka", 50);
    save(persistence, promotors, 3, 2025);
}
