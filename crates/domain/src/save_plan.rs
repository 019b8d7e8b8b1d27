// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::period::Period;
use crate::types::{Role, TargetRecord, TargetType, TargetUser};
use time::OffsetDateTime;

/// Turns edited `TargetUser` rows into upsert records.
///
/// Only changed figures produce a record. Each row yields a record of its
/// own `target_type` when `new_target` differs from `current_target`. An SPV
/// row viewed through its primary figure also yields an `as_sator` record
/// when its as-sator pair differs.
///
/// In the sator view a dual-role row's main figure and its as-sator pair
/// name the same stored value, so an edit to either one produces a single
/// `as_sator` record.
///
/// # Arguments
///
/// * `rows` - The rows submitted by the admin
/// * `period` - The period the targets belong to
/// * `updated_by` - The acting admin's id
/// * `now` - The write timestamp
///
/// # Errors
///
/// Returns an error if any changed figure is negative, or if a sator-view
/// row edits its main figure and its as-sator pair to different values.
/// No records are produced in either case.
pub fn plan_target_upserts(
    rows: &[TargetUser],
    period: Period,
    updated_by: &str,
    now: OffsetDateTime,
) -> Result<Vec<TargetRecord>, DomainError> {
    let mut records: Vec<TargetRecord> = Vec::new();

    for row in rows.iter().filter(|row| row.is_edited()) {
        if row.target_type == TargetType::AsSator {
            if let Some(value) = sator_view_edit(row)? {
                records.push(record_for(
                    row,
                    period,
                    TargetType::AsSator,
                    value,
                    updated_by,
                    now,
                )?);
            }
            continue;
        }

        if row.new_target != row.current_target {
            records.push(record_for(
                row,
                period,
                row.target_type,
                row.new_target,
                updated_by,
                now,
            )?);
        }

        if row.role == Role::Spv && row.new_target_as_sator != row.current_target_as_sator {
            if let Some(value) = row.new_target_as_sator {
                records.push(record_for(
                    row,
                    period,
                    TargetType::AsSator,
                    value,
                    updated_by,
                    now,
                )?);
            }
        }
    }

    Ok(records)
}

/// Resolves the single `as_sator` value edited on a sator-view row.
fn sator_view_edit(row: &TargetUser) -> Result<Option<i64>, DomainError> {
    let main: Option<i64> = (row.new_target != row.current_target).then_some(row.new_target);
    let pair: Option<i64> = row
        .new_target_as_sator
        .filter(|_| row.new_target_as_sator != row.current_target_as_sator);

    match (main, pair) {
        (Some(new_target), Some(new_target_as_sator)) if new_target != new_target_as_sator => {
            Err(DomainError::ConflictingAsSatorEdit {
                user_id: row.user_id.clone(),
                new_target,
                new_target_as_sator,
            })
        }
        (main, pair) => Ok(main.or(pair)),
    }
}

fn record_for(
    row: &TargetUser,
    period: Period,
    target_type: TargetType,
    value: i64,
    updated_by: &str,
    now: OffsetDateTime,
) -> Result<TargetRecord, DomainError> {
    if value < 0 {
        return Err(DomainError::NegativeTarget {
            user_id: row.user_id.clone(),
            value,
        });
    }
    Ok(TargetRecord {
        user_id: row.user_id.clone(),
        period,
        target_type,
        value,
        updated_by: updated_by.to_string(),
        updated_at: now,
    })
}
