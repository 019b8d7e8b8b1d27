// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;
use vast_audit::{Actor, Cause};
use vast_domain::{HierarchyEdge, Period, Role, User, UserId, UserStatus};

pub const NOW: OffsetDateTime = datetime!(2025-03-10 09:00 UTC);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-1"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn uid(value: &str) -> UserId {
    UserId::new(value).unwrap()
}

pub fn period(month: u8, year: i32) -> Period {
    Period::new(month, year).unwrap()
}

pub fn add_user(
    persistence: &mut Persistence,
    id: &str,
    name: &str,
    role: Role,
    atasan: Option<&str>,
) {
    persistence
        .upsert_user(&User::new(
            uid(id),
            String::from(name),
            role,
            UserStatus::Active,
        ))
        .unwrap();
    persistence
        .set_hierarchy_edge(&HierarchyEdge {
            user_id: uid(id),
            atasan_id: atasan.map(uid),
            area: Some(String::from("Jakarta Timur")),
            store_id: None,
        })
        .unwrap();
}

/// SPV Budi over sators Ani and Cici, with promotor Fina reporting to Budi
/// directly.
pub fn create_budi_area() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    add_user(&mut persistence, "mgr-1", "Maya", Role::Manager, None);
    add_user(&mut persistence, "spv-budi", "Budi", Role::Spv, Some("mgr-1"));
    add_user(&mut persistence, "sator-ani", "Ani", Role::Sator, Some("spv-budi"));
    add_user(&mut persistence, "sator-cici", "Cici", Role::Sator, Some("spv-budi"));
    add_user(&mut persistence, "p-dedi", "Dedi", Role::Promotor, Some("sator-ani"));
    add_user(&mut persistence, "p-eka", "Eka", Role::Promotor, Some("sator-cici"));
    add_user(&mut persistence, "p-fina", "Fina", Role::Promotor, Some("spv-budi"));
    persistence
}
