// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage seam the engine reads from and writes through.

use vast_audit::AuditEvent;
use vast_domain::{
    Achievement, HierarchyEdge, Period, Role, Target, TargetRecord, TargetType, User, UserId,
    UserStatus,
};

/// Errors reported by a [`TargetStore`].
///
/// The message is surfaced to callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("query failed: {0}")]
    Query(String),
    #[error("write failed: {0}")]
    Write(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

impl UserFilter {
    /// Active users of one role.
    #[must_use]
    pub const fn active(role: Role) -> Self {
        Self {
            role: Some(role),
            status: Some(UserStatus::Active),
        }
    }
}

/// Edge filter. Every present criterion must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyFilter {
    pub user_ids: Option<Vec<UserId>>,
    pub supervisor_ids: Option<Vec<UserId>>,
    pub area: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFilter {
    /// `None` matches every user.
    pub user_ids: Option<Vec<UserId>>,
    pub period: Period,
    pub target_type: Option<TargetType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementFilter {
    pub user_ids: Option<Vec<UserId>>,
    pub period: Period,
}

/// Query and upsert access to users, hierarchy, targets and achievements.
pub trait TargetStore {
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn fetch_users(&mut self, filter: &UserFilter) -> Result<Vec<User>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn fetch_hierarchy_edges(
        &mut self,
        filter: &HierarchyFilter,
    ) -> Result<Vec<HierarchyEdge>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn fetch_targets(&mut self, filter: &TargetFilter) -> Result<Vec<Target>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn fetch_achievements(
        &mut self,
        filter: &AchievementFilter,
    ) -> Result<Vec<Achievement>, StoreError>;

    /// Upserts target records and appends the audit event describing them.
    ///
    /// Records conflict on `(user_id, period_month, period_year,
    /// target_type)` and overwrite the stored value. Either every record and
    /// the event are committed, or nothing is.
    ///
    /// Returns the persisted event id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. Nothing is committed in that case.
    fn upsert_targets(
        &mut self,
        records: &[TargetRecord],
        audit_event: &AuditEvent,
    ) -> Result<i64, StoreError>;
}
