// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Copy-forward of targets from the preceding period.

use crate::period::Period;
use crate::types::{Target, TargetType};
use serde::{Deserialize, Serialize};

/// Which stored target types take part in a copy-forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyScope {
    /// Every stored row, whatever its type.
    #[default]
    AllTypes,
    /// Only `primary` rows; dual-role `as_sator` figures are left behind.
    PrimaryOnly,
}

impl CopyScope {
    /// Returns the target type filter to fetch with, if any.
    #[must_use]
    pub const fn target_type(&self) -> Option<TargetType> {
        match self {
            Self::AllTypes => None,
            Self::PrimaryOnly => Some(TargetType::Primary),
        }
    }
}

/// What a copy-forward would do with the previous period's rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyForwardPlan {
    /// The previous period has no stored rows.
    NoData { previous: Period },
    /// Every stored row is zero.
    AllZero { previous: Period },
    /// At least one row carries a value.
    Ready {
        previous: Period,
        /// Rows with a non-zero value.
        non_zero_count: usize,
        /// Every fetched row, zeros included.
        rows: Vec<Target>,
    },
}

impl CopyForwardPlan {
    /// Returns the user-facing message for this plan.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NoData { previous } => {
                format!("Tidak ada data target pada periode {previous} untuk disalin")
            }
            Self::AllZero { previous } => {
                format!("Semua target pada periode {previous} bernilai 0, tidak ada yang disalin")
            }
            Self::Ready {
                previous,
                non_zero_count,
                ..
            } => format!("Berhasil menyalin {non_zero_count} target dari periode {previous}"),
        }
    }
}

/// Decides whether the previous period's rows can seed a new period.
///
/// # Arguments
///
/// * `previous` - The period the rows were fetched for
/// * `rows` - The stored rows of that period
#[must_use]
pub fn evaluate_copy_forward(previous: Period, rows: Vec<Target>) -> CopyForwardPlan {
    if rows.is_empty() {
        return CopyForwardPlan::NoData { previous };
    }
    let non_zero_count: usize = rows.iter().filter(|t| t.value != 0).count();
    if non_zero_count == 0 {
        return CopyForwardPlan::AllZero { previous };
    }
    CopyForwardPlan::Ready {
        previous,
        non_zero_count,
        rows,
    }
}

/// Re-keys copied rows into the target period.
#[must_use]
pub fn rekey_targets(rows: &[Target], period: Period) -> Vec<Target> {
    rows.iter()
        .map(|t| Target {
            period,
            ..t.clone()
        })
        .collect()
}
