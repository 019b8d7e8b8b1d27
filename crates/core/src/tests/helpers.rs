// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AchievementFilter, HierarchyFilter, StoreError, TargetFilter, TargetStore, UserFilter,
};
use time::OffsetDateTime;
use time::macros::datetime;
use vast_audit::{Actor, AuditEvent, Cause};
use vast_domain::{
    Achievement, HierarchyEdge, Period, Role, Target, TargetRecord, TargetType, User, UserId,
    UserStatus,
};

pub const NOW: OffsetDateTime = datetime!(2025-03-10 09:00 UTC);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-1"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Monthly target planning"))
}

pub fn uid(value: &str) -> UserId {
    UserId::new(value).unwrap()
}

pub fn period(month: u8, year: i32) -> Period {
    Period::new(month, year).unwrap()
}

/// An in-memory `TargetStore` with failure injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub users: Vec<User>,
    pub edges: Vec<HierarchyEdge>,
    pub targets: Vec<TargetRecord>,
    pub achievements: Vec<Achievement>,
    pub audit_events: Vec<AuditEvent>,
    pub fail_fetch: Option<String>,
    pub fail_write: Option<String>,
    pub upsert_calls: usize,
}

impl MemoryStore {
    pub fn add_user(&mut self, id: &str, name: &str, role: Role, atasan: Option<&str>) {
        self.users
            .push(User::new(uid(id), String::from(name), role, UserStatus::Active));
        self.edges.push(HierarchyEdge {
            user_id: uid(id),
            atasan_id: atasan.map(uid),
            area: Some(String::from("Jakarta Timur")),
            store_id: None,
        });
    }

    pub fn deactivate(&mut self, id: &str) {
        for user in &mut self.users {
            if user.id == uid(id) {
                user.status = UserStatus::Inactive;
            }
        }
    }

    pub fn set_target(&mut self, id: &str, period: Period, target_type: TargetType, value: i64) {
        self.targets.retain(|t| {
            !(t.user_id == uid(id) && t.period == period && t.target_type == target_type)
        });
        self.targets.push(TargetRecord {
            user_id: uid(id),
            period,
            target_type,
            value,
            updated_by: String::from("seed"),
            updated_at: NOW,
        });
    }

    pub fn stored(&self, id: &str, period: Period, target_type: TargetType) -> Option<i64> {
        self.targets
            .iter()
            .find(|t| t.user_id == uid(id) && t.period == period && t.target_type == target_type)
            .map(|t| t.value)
    }

    fn check_fetch(&self) -> Result<(), StoreError> {
        self.fail_fetch
            .as_ref()
            .map_or(Ok(()), |m| Err(StoreError::Query(m.clone())))
    }
}

fn matches_ids(ids: Option<&Vec<UserId>>, id: &UserId) -> bool {
    ids.is_none_or(|ids| ids.contains(id))
}

impl TargetStore for MemoryStore {
    fn fetch_users(&mut self, filter: &UserFilter) -> Result<Vec<User>, StoreError> {
        self.check_fetch()?;
        Ok(self
            .users
            .iter()
            .filter(|u| filter.role.is_none_or(|r| u.role == r))
            .filter(|u| filter.status.is_none_or(|s| u.status == s))
            .cloned()
            .collect())
    }

    fn fetch_hierarchy_edges(
        &mut self,
        filter: &HierarchyFilter,
    ) -> Result<Vec<HierarchyEdge>, StoreError> {
        self.check_fetch()?;
        Ok(self
            .edges
            .iter()
            .filter(|e| matches_ids(filter.user_ids.as_ref(), &e.user_id))
            .filter(|e| {
                filter.supervisor_ids.as_ref().is_none_or(|ids| {
                    e.atasan_id.as_ref().is_some_and(|atasan| ids.contains(atasan))
                })
            })
            .filter(|e| {
                filter
                    .area
                    .as_ref()
                    .is_none_or(|area| e.area.as_ref() == Some(area))
            })
            .cloned()
            .collect())
    }

    fn fetch_targets(&mut self, filter: &TargetFilter) -> Result<Vec<Target>, StoreError> {
        self.check_fetch()?;
        Ok(self
            .targets
            .iter()
            .filter(|t| t.period == filter.period)
            .filter(|t| matches_ids(filter.user_ids.as_ref(), &t.user_id))
            .filter(|t| filter.target_type.is_none_or(|tt| t.target_type == tt))
            .map(TargetRecord::to_target)
            .collect())
    }

    fn fetch_achievements(
        &mut self,
        filter: &AchievementFilter,
    ) -> Result<Vec<Achievement>, StoreError> {
        self.check_fetch()?;
        Ok(self
            .achievements
            .iter()
            .filter(|a| a.period == filter.period)
            .filter(|a| matches_ids(filter.user_ids.as_ref(), &a.user_id))
            .cloned()
            .collect())
    }

    fn upsert_targets(
        &mut self,
        records: &[TargetRecord],
        audit_event: &AuditEvent,
    ) -> Result<i64, StoreError> {
        self.upsert_calls += 1;
        if let Some(message) = &self.fail_write {
            return Err(StoreError::Write(message.clone()));
        }
        for record in records {
            self.targets.retain(|t| {
                !(t.user_id == record.user_id
                    && t.period == record.period
                    && t.target_type == record.target_type)
            });
            self.targets.push(record.clone());
        }
        self.audit_events.push(audit_event.clone());
        Ok(i64::try_from(self.audit_events.len()).unwrap())
    }
}

/// SPV Budi supervises sators Ani and Cici and has promotor Fina reporting
/// to him directly. Targets are stored for March 2025.
///
/// Budi 100 against sators Ani 40 and Cici 50, so the SPV tier is short by
/// 10. Budi's own sator figure is 0.
pub fn budi_area() -> MemoryStore {
    let mut store = MemoryStore::default();
    store.add_user("mgr-1", "Maya", Role::Manager, None);
    store.add_user("spv-budi", "Budi", Role::Spv, Some("mgr-1"));
    store.add_user("sator-ani", "Ani", Role::Sator, Some("spv-budi"));
    store.add_user("sator-cici", "Cici", Role::Sator, Some("spv-budi"));
    store.add_user("p-dedi", "Dedi", Role::Promotor, Some("sator-ani"));
    store.add_user("p-eka", "Eka", Role::Promotor, Some("sator-cici"));
    store.add_user("p-fina", "Fina", Role::Promotor, Some("spv-budi"));

    let march: Period = period(3, 2025);
    store.set_target("spv-budi", march, TargetType::Primary, 100);
    store.set_target("spv-budi", march, TargetType::AsSator, 0);
    store.set_target("sator-ani", march, TargetType::Primary, 40);
    store.set_target("sator-cici", march, TargetType::Primary, 50);
    store.set_target("p-dedi", march, TargetType::Primary, 40);
    store.set_target("p-eka", march, TargetType::Primary, 50);
    store.set_target("p-fina", march, TargetType::Primary, 0);
    store
}
