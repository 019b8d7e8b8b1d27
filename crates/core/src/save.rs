// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{CoreError, write_failed};
use crate::store::TargetStore;
use serde::Serialize;
use std::collections::HashMap;
use time::OffsetDateTime;
use vast_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use vast_domain::{
    Period, Role, TargetRecord, TargetType, TargetUser, UserId, plan_target_upserts,
};

/// Message returned when no row was edited.
pub const NOTHING_TO_SAVE: &str = "Tidak ada perubahan target untuk disimpan";

/// The outcome of a bulk save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveResult {
    /// Number of upserted target records.
    pub saved_count: usize,
    pub message: String,
    /// The persisted event, absent when nothing was written.
    pub audit_event: Option<AuditEvent>,
}

#[derive(Serialize)]
struct SnapshotEntry<'a> {
    user_id: &'a str,
    target_type: TargetType,
    value: i64,
}

fn snapshot<'a, I>(entries: I) -> Result<StateSnapshot, CoreError>
where
    I: Iterator<Item = SnapshotEntry<'a>>,
{
    let entries: Vec<SnapshotEntry<'a>> = entries.collect();
    serde_json::to_string(&entries)
        .map(StateSnapshot::new)
        .map_err(|e| CoreError::WriteFailed {
            message: e.to_string(),
        })
}

/// Stored values the submitted rows were loaded with, keyed by user and type.
fn current_values(rows: &[TargetUser]) -> HashMap<(&UserId, TargetType), i64> {
    let mut values: HashMap<(&UserId, TargetType), i64> = HashMap::new();
    for row in rows {
        values.insert((&row.user_id, row.target_type), row.current_target);
        if row.role == Role::Spv && row.target_type == TargetType::Primary {
            values.insert(
                (&row.user_id, TargetType::AsSator),
                row.current_target_as_sator.unwrap_or(0),
            );
        }
    }
    values
}

/// Saves the edited targets of a period.
///
/// Only changed figures are written. A non-empty save upserts every record
/// and appends one audit event in a single store transaction.
///
/// # Arguments
///
/// * `store` - The storage collaborator
/// * `rows` - The rows as edited by the admin
/// * `period` - The period the targets belong to
/// * `actor` - The acting admin
/// * `cause` - The request that triggered the save
/// * `now` - The write timestamp
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if an edited target is negative or a
/// dual-role row carries conflicting edits, and `CoreError::WriteFailed` if
/// the store rejects the batch.
pub fn save_targets<S: TargetStore + ?Sized>(
    store: &mut S,
    rows: &[TargetUser],
    period: Period,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<SaveResult, CoreError> {
    let records: Vec<TargetRecord> = plan_target_upserts(rows, period, &actor.id, now)?;
    if records.is_empty() {
        return Ok(SaveResult {
            saved_count: 0,
            message: String::from(NOTHING_TO_SAVE),
            audit_event: None,
        });
    }

    let current: HashMap<(&UserId, TargetType), i64> = current_values(rows);
    let before: StateSnapshot = snapshot(records.iter().map(|r| SnapshotEntry {
        user_id: r.user_id.as_str(),
        target_type: r.target_type,
        value: current
            .get(&(&r.user_id, r.target_type))
            .copied()
            .unwrap_or(0),
    }))?;
    let after: StateSnapshot = snapshot(records.iter().map(|r| SnapshotEntry {
        user_id: r.user_id.as_str(),
        target_type: r.target_type,
        value: r.value,
    }))?;

    let audit_event: AuditEvent = AuditEvent::new(
        period,
        actor,
        cause,
        Action::save_targets(records.len()),
        before,
        after,
        now,
    );
    let event_id: i64 = store
        .upsert_targets(&records, &audit_event)
        .map_err(write_failed)?;

    Ok(SaveResult {
        saved_count: records.len(),
        message: format!("Berhasil menyimpan {} target", records.len()),
        audit_event: Some(audit_event.with_event_id(event_id)),
    })
}
