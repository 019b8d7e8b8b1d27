// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use tracing::debug;
use vast_domain::{HierarchyEdge, User};
use vast_finance::{HierarchyFilter, UserFilter};

use crate::data_models::{HierarchyRow, UserRow};
use crate::diesel_schema::{hierarchy, users};
use crate::error::PersistenceError;
use crate::queries::id_strings;

/// Lists users matching the filter, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn fetch_users(
    conn: &mut SqliteConnection,
    filter: &UserFilter,
) -> Result<Vec<User>, PersistenceError> {
    let mut query: users::BoxedQuery<'_, Sqlite> = users::table.into_boxed();
    if let Some(role) = filter.role {
        query = query.filter(users::role.eq(role.as_str()));
    }
    if let Some(status) = filter.status {
        query = query.filter(users::status.eq(status.as_str()));
    }

    let rows: Vec<UserRow> = query
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)?;
    debug!(count = rows.len(), role = ?filter.role, "Fetched users");

    rows.into_iter().map(User::try_from).collect()
}

/// Lists hierarchy edges matching every criterion of the filter.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn fetch_hierarchy_edges(
    conn: &mut SqliteConnection,
    filter: &HierarchyFilter,
) -> Result<Vec<HierarchyEdge>, PersistenceError> {
    let mut query: hierarchy::BoxedQuery<'_, Sqlite> = hierarchy::table.into_boxed();
    if let Some(user_ids) = &filter.user_ids {
        query = query.filter(hierarchy::user_id.eq_any(id_strings(user_ids)));
    }
    if let Some(supervisor_ids) = &filter.supervisor_ids {
        query = query.filter(hierarchy::atasan_id.eq_any(id_strings(supervisor_ids)));
    }
    if let Some(area) = &filter.area {
        query = query.filter(hierarchy::area.eq(area.clone()));
    }

    let rows: Vec<HierarchyRow> = query
        .order(hierarchy::user_id.asc())
        .select(HierarchyRow::as_select())
        .load(conn)?;
    debug!(count = rows.len(), "Fetched hierarchy edges");

    rows.into_iter().map(HierarchyEdge::try_from).collect()
}
