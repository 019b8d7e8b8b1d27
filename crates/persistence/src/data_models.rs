// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion into domain values.

use diesel::prelude::*;
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use vast_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use vast_domain::{
    Achievement, HierarchyEdge, Period, Role, Target, TargetType, User, UserId, UserStatus,
};

use crate::diesel_schema::{audit_events, hierarchy, monthly_achievements, targets, users};
use crate::error::PersistenceError;

fn reconstruction<E: std::fmt::Display>(err: E) -> PersistenceError {
    PersistenceError::ReconstructionError(err.to_string())
}

/// Rebuilds a period from its stored columns.
pub fn period_from_columns(month: i32, year: i32) -> Result<Period, PersistenceError> {
    let month: u8 = u8::try_from(month).map_err(reconstruction)?;
    Period::new(month, year).map_err(reconstruction)
}

/// Formats a timestamp for a TEXT column.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(reconstruction)
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub user_id: String,
    pub name: String,
    pub role: String,
    pub status: String,
}

impl TryFrom<UserRow> for User {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self::new(
            UserId::new(&row.user_id).map_err(reconstruction)?,
            row.name,
            Role::from_str(&row.role).map_err(reconstruction)?,
            UserStatus::from_str(&row.status).map_err(reconstruction)?,
        ))
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = hierarchy)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HierarchyRow {
    pub user_id: String,
    pub atasan_id: Option<String>,
    pub area: Option<String>,
    pub store_id: Option<i64>,
}

impl TryFrom<HierarchyRow> for HierarchyEdge {
    type Error = PersistenceError;

    fn try_from(row: HierarchyRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::new(&row.user_id).map_err(reconstruction)?,
            atasan_id: row
                .atasan_id
                .as_deref()
                .map(UserId::new)
                .transpose()
                .map_err(reconstruction)?,
            area: row.area,
            store_id: row.store_id,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = targets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TargetRow {
    pub user_id: String,
    pub period_month: i32,
    pub period_year: i32,
    pub target_type: String,
    pub value: i64,
}

impl TryFrom<TargetRow> for Target {
    type Error = PersistenceError;

    fn try_from(row: TargetRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::new(&row.user_id).map_err(reconstruction)?,
            period: period_from_columns(row.period_month, row.period_year)?,
            target_type: TargetType::from_str(&row.target_type).map_err(reconstruction)?,
            value: row.value,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = monthly_achievements)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AchievementRow {
    pub user_id: String,
    pub period_month: i32,
    pub period_year: i32,
    pub approved: i64,
    pub rejected: i64,
    pub pending: i64,
}

impl TryFrom<AchievementRow> for Achievement {
    type Error = PersistenceError;

    fn try_from(row: AchievementRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::new(&row.user_id).map_err(reconstruction)?,
            period: period_from_columns(row.period_month, row.period_year)?,
            approved: row.approved,
            rejected: row.rejected,
            pending: row.pending,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditEventRow {
    pub event_id: i64,
    pub period_month: i32,
    pub period_year: i32,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub occurred_at: String,
}

impl TryFrom<AuditEventRow> for AuditEvent {
    type Error = PersistenceError;

    fn try_from(row: AuditEventRow) -> Result<Self, Self::Error> {
        let actor: Actor = serde_json::from_str(&row.actor_json)?;
        let cause: Cause = serde_json::from_str(&row.cause_json)?;
        let action: Action = serde_json::from_str(&row.action_json)?;
        let before: StateSnapshot = serde_json::from_str(&row.before_snapshot_json)?;
        let after: StateSnapshot = serde_json::from_str(&row.after_snapshot_json)?;

        Ok(Self::new(
            period_from_columns(row.period_month, row.period_year)?,
            actor,
            cause,
            action,
            before,
            after,
            parse_timestamp(&row.occurred_at)?,
        )
        .with_event_id(row.event_id))
    }
}
