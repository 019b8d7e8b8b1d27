// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use tracing::debug;
use vast_domain::{Achievement, Target};
use vast_finance::{AchievementFilter, TargetFilter};

use crate::data_models::{AchievementRow, TargetRow};
use crate::diesel_schema::{monthly_achievements, targets};
use crate::error::PersistenceError;
use crate::queries::id_strings;

/// Lists the stored targets of one period.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn fetch_targets(
    conn: &mut SqliteConnection,
    filter: &TargetFilter,
) -> Result<Vec<Target>, PersistenceError> {
    let mut query: targets::BoxedQuery<'_, Sqlite> = targets::table
        .filter(targets::period_month.eq(i32::from(filter.period.month())))
        .filter(targets::period_year.eq(filter.period.year()))
        .into_boxed();
    if let Some(user_ids) = &filter.user_ids {
        query = query.filter(targets::user_id.eq_any(id_strings(user_ids)));
    }
    if let Some(target_type) = filter.target_type {
        query = query.filter(targets::target_type.eq(target_type.as_str()));
    }

    let rows: Vec<TargetRow> = query
        .order((targets::user_id.asc(), targets::target_type.asc()))
        .select(TargetRow::as_select())
        .load(conn)?;
    debug!(count = rows.len(), period = %filter.period, "Fetched targets");

    rows.into_iter().map(Target::try_from).collect()
}

/// Lists the monthly achievement counts of one period.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn fetch_achievements(
    conn: &mut SqliteConnection,
    filter: &AchievementFilter,
) -> Result<Vec<Achievement>, PersistenceError> {
    let mut query: monthly_achievements::BoxedQuery<'_, Sqlite> = monthly_achievements::table
        .filter(monthly_achievements::period_month.eq(i32::from(filter.period.month())))
        .filter(monthly_achievements::period_year.eq(filter.period.year()))
        .into_boxed();
    if let Some(user_ids) = &filter.user_ids {
        query = query.filter(monthly_achievements::user_id.eq_any(id_strings(user_ids)));
    }

    let rows: Vec<AchievementRow> = query
        .order(monthly_achievements::user_id.asc())
        .select(AchievementRow::as_select())
        .load(conn)?;

    rows.into_iter().map(Achievement::try_from).collect()
}
