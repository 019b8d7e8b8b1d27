// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writes for the data the engine only reads: users, their place in the
//! hierarchy, and monthly application counts.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;
use vast_domain::{Achievement, HierarchyEdge, User, UserId};

use crate::diesel_schema::{hierarchy, monthly_achievements, users};
use crate::error::PersistenceError;

/// Inserts a user, or updates name, role and status of an existing one.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_user(conn: &mut SqliteConnection, user: &User) -> Result<(), PersistenceError> {
    diesel::insert_into(users::table)
        .values((
            users::user_id.eq(user.id.as_str()),
            users::name.eq(user.name.as_str()),
            users::role.eq(user.role.as_str()),
            users::status.eq(user.status.as_str()),
        ))
        .on_conflict(users::user_id)
        .do_update()
        .set((
            users::name.eq(user.name.as_str()),
            users::role.eq(user.role.as_str()),
            users::status.eq(user.status.as_str()),
        ))
        .execute(conn)?;
    debug!(user_id = %user.id, role = %user.role, "Upserted user");
    Ok(())
}

/// Sets the hierarchy edge of a user, replacing any previous edge.
///
/// # Errors
///
/// Returns an error if the user does not exist or the write fails.
pub fn set_hierarchy_edge(
    conn: &mut SqliteConnection,
    edge: &HierarchyEdge,
) -> Result<(), PersistenceError> {
    let atasan_id: Option<&str> = edge.atasan_id.as_ref().map(UserId::as_str);
    diesel::insert_into(hierarchy::table)
        .values((
            hierarchy::user_id.eq(edge.user_id.as_str()),
            hierarchy::atasan_id.eq(atasan_id),
            hierarchy::area.eq(edge.area.as_deref()),
            hierarchy::store_id.eq(edge.store_id),
        ))
        .on_conflict(hierarchy::user_id)
        .do_update()
        .set((
            hierarchy::atasan_id.eq(atasan_id),
            hierarchy::area.eq(edge.area.as_deref()),
            hierarchy::store_id.eq(edge.store_id),
        ))
        .execute(conn)?;
    Ok(())
}

/// Records the application counts of a user for a period, replacing
/// earlier counts.
///
/// # Errors
///
/// Returns an error if the user does not exist or the write fails.
pub fn record_achievement(
    conn: &mut SqliteConnection,
    achievement: &Achievement,
) -> Result<(), PersistenceError> {
    diesel::insert_into(monthly_achievements::table)
        .values((
            monthly_achievements::user_id.eq(achievement.user_id.as_str()),
            monthly_achievements::period_month.eq(i32::from(achievement.period.month())),
            monthly_achievements::period_year.eq(achievement.period.year()),
            monthly_achievements::approved.eq(achievement.approved),
            monthly_achievements::rejected.eq(achievement.rejected),
            monthly_achievements::pending.eq(achievement.pending),
        ))
        .on_conflict((
            monthly_achievements::user_id,
            monthly_achievements::period_month,
            monthly_achievements::period_year,
        ))
        .do_update()
        .set((
            monthly_achievements::approved.eq(achievement.approved),
            monthly_achievements::rejected.eq(achievement.rejected),
            monthly_achievements::pending.eq(achievement.pending),
        ))
        .execute(conn)?;
    Ok(())
}
