// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hierarchical target sufficiency validation.
//!
//! The targets of a node's direct children must add up to at least the
//! node's own target. Validation is advisory: it reports problems but never
//! blocks a save.

use crate::types::{TargetUser, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The outcome of validating a set of proposed targets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty.
    pub is_valid: bool,
    /// One user-facing message per violated node.
    pub errors: Vec<String>,
    /// Soft findings. Nothing produces warnings yet.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Sums `new_target` of the given rows per supervisor. Totals saturate.
fn sum_by_atasan(rows: &[TargetUser]) -> HashMap<&UserId, i64> {
    let mut totals: HashMap<&UserId, i64> = HashMap::new();
    for row in rows {
        if let Some(atasan_id) = &row.atasan_id {
            let total: &mut i64 = totals.entry(atasan_id).or_insert(0);
            *total = total.saturating_add(row.new_target);
        }
    }
    totals
}

/// Validates proposed targets across the three tiers.
///
/// For every SPV, the sator-tier targets it supervises plus its own dual-role
/// sator target must cover the SPV target. For every sator-tier entry
/// (dual-role SPVs included), the targets of promotors reporting to it must
/// cover its target. A positive target with no children always fails.
///
/// # Arguments
///
/// * `spvs` - The spv tier rows
/// * `sators` - The sator tier rows, dual-role SPVs included
/// * `promotors` - The promotor tier rows
#[must_use]
pub fn validate_target_hierarchy(
    spvs: &[TargetUser],
    sators: &[TargetUser],
    promotors: &[TargetUser],
) -> ValidationResult {
    let mut errors: Vec<String> = Vec::new();

    let sator_totals: HashMap<&UserId, i64> = sum_by_atasan(sators);
    // The dual-role entry is the SPV itself, so it is matched by id rather
    // than through the supervisor grouping.
    let own_sator_targets: HashMap<&UserId, i64> = sators
        .iter()
        .filter(|row| row.is_dual_role)
        .map(|row| (&row.user_id, row.new_target))
        .collect();

    for spv in spvs {
        let total: i64 = sator_totals
            .get(&spv.user_id)
            .copied()
            .unwrap_or(0)
            .saturating_add(own_sator_targets.get(&spv.user_id).copied().unwrap_or(0));
        if total < spv.new_target {
            errors.push(format!(
                "Target SPV {} ({}) melebihi total target Sator ({})",
                spv.name, spv.new_target, total
            ));
        }
    }

    let promotor_totals: HashMap<&UserId, i64> = sum_by_atasan(promotors);
    for sator in sators {
        let total: i64 = promotor_totals.get(&sator.user_id).copied().unwrap_or(0);
        if total < sator.new_target {
            let label: &str = if sator.is_dual_role {
                "SPV (sebagai Sator)"
            } else {
                "Sator"
            };
            errors.push(format!(
                "Target {} {} ({}) melebihi total target Promotor ({})",
                label, sator.name, sator.new_target, total
            ));
        }
    }

    ValidationResult::from_findings(errors, Vec::new())
}
