// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for VAST Finance.
//!
//! A Diesel `SQLite` store for users, hierarchy edges, targets, monthly
//! achievements and the audit trail. [`Persistence`] implements the
//! engine's [`TargetStore`] seam.
//!
//! ## Testing
//!
//! Every `new_in_memory()` call opens its own shared-cache in-memory
//! database, so tests never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use vast_audit::AuditEvent;
use vast_domain::{Achievement, HierarchyEdge, Period, Target, TargetRecord, User};
use vast_finance::{
    AchievementFilter, HierarchyFilter, StoreError, TargetFilter, TargetStore, UserFilter,
};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Diesel `SQLite` persistence adapter.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:vast_memdb_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection =
            backend::sqlite::initialize_database(&shared_memory_url, false)?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database
    /// in WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = backend::sqlite::initialize_database(path_str, true)?;
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Directory
    // ========================================================================

    /// Inserts or updates a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_user(&mut self, user: &User) -> Result<(), PersistenceError> {
        mutations::upsert_user(&mut self.conn, user)
    }

    /// Sets a user's supervisor, area and store.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is unknown or the write fails.
    pub fn set_hierarchy_edge(&mut self, edge: &HierarchyEdge) -> Result<(), PersistenceError> {
        mutations::set_hierarchy_edge(&mut self.conn, edge)
    }

    /// Records a user's monthly application counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is unknown or the write fails.
    pub fn record_achievement(
        &mut self,
        achievement: &Achievement,
    ) -> Result<(), PersistenceError> {
        mutations::record_achievement(&mut self.conn, achievement)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Persists a standalone audit event.
    ///
    /// Target saves persist their event through [`TargetStore::upsert_targets`].
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::persist_audit_event(&mut self.conn, event)
    }

    /// Retrieves the audit events of a period, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn get_audit_timeline(
        &mut self,
        period: Period,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::get_audit_timeline(&mut self.conn, period)
    }
}

impl TargetStore for Persistence {
    fn fetch_users(&mut self, filter: &UserFilter) -> Result<Vec<User>, StoreError> {
        queries::fetch_users(&mut self.conn, filter).map_err(PersistenceError::into_query_error)
    }

    fn fetch_hierarchy_edges(
        &mut self,
        filter: &HierarchyFilter,
    ) -> Result<Vec<HierarchyEdge>, StoreError> {
        queries::fetch_hierarchy_edges(&mut self.conn, filter)
            .map_err(PersistenceError::into_query_error)
    }

    fn fetch_targets(&mut self, filter: &TargetFilter) -> Result<Vec<Target>, StoreError> {
        queries::fetch_targets(&mut self.conn, filter).map_err(PersistenceError::into_query_error)
    }

    fn fetch_achievements(
        &mut self,
        filter: &AchievementFilter,
    ) -> Result<Vec<Achievement>, StoreError> {
        queries::fetch_achievements(&mut self.conn, filter)
            .map_err(PersistenceError::into_query_error)
    }

    fn upsert_targets(
        &mut self,
        records: &[TargetRecord],
        audit_event: &AuditEvent,
    ) -> Result<i64, StoreError> {
        mutations::upsert_targets(&mut self.conn, records, audit_event)
            .map_err(PersistenceError::into_write_error)
    }
}
