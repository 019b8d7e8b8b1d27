// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use vast_audit::AuditEvent;
use vast_domain::Period;

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Retrieves every audit event of a period, oldest first.
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    period: Period,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    tracing::debug!(%period, "Retrieving audit timeline");

    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::period_month.eq(i32::from(period.month())))
        .filter(audit_events::period_year.eq(period.year()))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load(conn)?;

    rows.into_iter().map(AuditEvent::try_from).collect()
}
