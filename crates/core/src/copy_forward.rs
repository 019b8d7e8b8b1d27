// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{CoreError, fetch_failed};
use crate::store::{TargetFilter, TargetStore};
use vast_domain::{CopyForwardPlan, CopyScope, Period, Target, evaluate_copy_forward};

/// The rows a copy-forward found in the previous period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyForwardResult {
    pub previous: Period,
    /// Reports how many non-zero targets were found.
    pub message: String,
    /// Every stored row of the previous period within scope, zeros included.
    /// Still keyed to `previous`.
    pub rows: Vec<Target>,
}

/// Fetches the previous period's targets to seed `period`.
///
/// Nothing is written. Callers re-key the rows with
/// [`vast_domain::rekey_targets`] and save them.
///
/// # Arguments
///
/// * `store` - The storage collaborator
/// * `period` - The period being seeded
/// * `scope` - Which stored target types to copy
///
/// # Errors
///
/// Returns `CoreError::CopyForwardRefused` if the previous period has no rows
/// or only zero-valued rows, `CoreError::NoPreviousPeriod` if `period` is the
/// first supported one, and `CoreError::FetchFailed` if the query fails.
pub fn copy_previous_targets<S: TargetStore + ?Sized>(
    store: &mut S,
    period: Period,
    scope: CopyScope,
) -> Result<CopyForwardResult, CoreError> {
    let previous: Period = period
        .previous()
        .ok_or(CoreError::NoPreviousPeriod { period })?;
    let rows: Vec<Target> = store
        .fetch_targets(&TargetFilter {
            user_ids: None,
            period: previous,
            target_type: scope.target_type(),
        })
        .map_err(fetch_failed)?;

    let plan: CopyForwardPlan = evaluate_copy_forward(previous, rows);
    let message: String = plan.message();
    match plan {
        CopyForwardPlan::NoData { previous } | CopyForwardPlan::AllZero { previous } => {
            Err(CoreError::CopyForwardRefused { previous, message })
        }
        CopyForwardPlan::Ready { previous, rows, .. } => Ok(CopyForwardResult {
            previous,
            message,
            rows,
        }),
    }
}
