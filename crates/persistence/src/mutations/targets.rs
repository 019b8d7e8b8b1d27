// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;
use vast_audit::AuditEvent;
use vast_domain::TargetRecord;

use crate::data_models::format_timestamp;
use crate::diesel_schema::targets;
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;

/// Upserts target records and appends their audit event in one transaction.
///
/// Rows conflict on `(user_id, period_month, period_year, target_type)`; a
/// conflicting row has its value and attribution overwritten.
///
/// # Returns
///
/// The ID of the persisted audit event.
///
/// # Errors
///
/// Returns an error if any statement fails. The transaction is rolled back
/// and nothing is written.
pub fn upsert_targets(
    conn: &mut SqliteConnection,
    records: &[TargetRecord],
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        for record in records {
            let updated_at: String = format_timestamp(record.updated_at)?;
            diesel::insert_into(targets::table)
                .values((
                    targets::user_id.eq(record.user_id.as_str()),
                    targets::period_month.eq(i32::from(record.period.month())),
                    targets::period_year.eq(record.period.year()),
                    targets::target_type.eq(record.target_type.as_str()),
                    targets::value.eq(record.value),
                    targets::updated_by.eq(record.updated_by.as_str()),
                    targets::updated_at.eq(updated_at.as_str()),
                ))
                .on_conflict((
                    targets::user_id,
                    targets::period_month,
                    targets::period_year,
                    targets::target_type,
                ))
                .do_update()
                .set((
                    targets::value.eq(record.value),
                    targets::updated_by.eq(record.updated_by.as_str()),
                    targets::updated_at.eq(updated_at.as_str()),
                ))
                .execute(conn)?;
        }

        let event_id: i64 = persist_audit_event(conn, event)?;
        info!(
            count = records.len(),
            period = %event.period,
            event_id,
            "Upserted targets"
        );
        Ok(event_id)
    })
}
