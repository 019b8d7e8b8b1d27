// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly achievement rollup.
//!
//! Promotor application counts are summed up the hierarchy along the same
//! edges the validator uses: promotors into their sator-tier supervisor,
//! sator-tier entries into their SPV, and a dual-role SPV's own sator figure
//! into the SPV.

use crate::types::{Achievement, Role, TargetUser, Tier, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::AddAssign;

/// Application counts for one user or subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tally {
    pub approved: i64,
    pub rejected: i64,
    pub pending: i64,
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        self.approved = self.approved.saturating_add(rhs.approved);
        self.rejected = self.rejected.saturating_add(rhs.rejected);
        self.pending = self.pending.saturating_add(rhs.pending);
    }
}

impl From<&Achievement> for Tally {
    fn from(achievement: &Achievement) -> Self {
        Self {
            approved: achievement.approved,
            rejected: achievement.rejected,
            pending: achievement.pending,
        }
    }
}

/// One row of a rollup view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupRow {
    pub user_id: UserId,
    pub name: String,
    pub role: Role,
    pub is_dual_role: bool,
    pub target: i64,
    pub tally: Tally,
    /// `approved * 100 / target`, floored. `None` when the target is 0.
    pub achievement_percent: Option<i64>,
}

/// The three tier views of one period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierLists {
    pub spv: Vec<TargetUser>,
    pub sator: Vec<TargetUser>,
    pub promotor: Vec<TargetUser>,
}

impl TierLists {
    /// Returns the rows of one tier.
    #[must_use]
    pub fn tier(&self, tier: Tier) -> &[TargetUser] {
        match tier {
            Tier::Spv => &self.spv,
            Tier::Sator => &self.sator,
            Tier::Promotor => &self.promotor,
        }
    }
}

fn percent(approved: i64, target: i64) -> Option<i64> {
    (target > 0).then(|| approved.saturating_mul(100) / target)
}

fn group_by_atasan(
    rows: &[TargetUser],
    tallies: &HashMap<UserId, Tally>,
) -> HashMap<UserId, Tally> {
    let mut grouped: HashMap<UserId, Tally> = HashMap::new();
    for row in rows {
        if let Some(atasan_id) = &row.atasan_id {
            let tally: Tally = tallies.get(&row.user_id).copied().unwrap_or_default();
            *grouped.entry(atasan_id.clone()).or_default() += tally;
        }
    }
    grouped
}

/// Rolls achievements up to the requested tier.
///
/// Targets are taken from each row's `current_target`.
///
/// # Arguments
///
/// * `tier` - The tier to report
/// * `lists` - All three tier views of the period
/// * `achievements` - Stored per-user counts of the period
#[must_use]
pub fn rollup_achievements(
    tier: Tier,
    lists: &TierLists,
    achievements: &[Achievement],
) -> Vec<RollupRow> {
    let mut promotor_tallies: HashMap<UserId, Tally> = HashMap::new();
    for achievement in achievements {
        *promotor_tallies
            .entry(achievement.user_id.clone())
            .or_default() += Tally::from(achievement);
    }

    let sator_tallies: HashMap<UserId, Tally> =
        group_by_atasan(&lists.promotor, &promotor_tallies);

    let mut spv_tallies: HashMap<UserId, Tally> = group_by_atasan(&lists.sator, &sator_tallies);
    for dual in lists.sator.iter().filter(|row| row.is_dual_role) {
        let own: Tally = sator_tallies.get(&dual.user_id).copied().unwrap_or_default();
        *spv_tallies.entry(dual.user_id.clone()).or_default() += own;
    }

    let tallies: &HashMap<UserId, Tally> = match tier {
        Tier::Spv => &spv_tallies,
        Tier::Sator => &sator_tallies,
        Tier::Promotor => &promotor_tallies,
    };

    lists
        .tier(tier)
        .iter()
        .map(|row| {
            let tally: Tally = tallies.get(&row.user_id).copied().unwrap_or_default();
            RollupRow {
                user_id: row.user_id.clone(),
                name: row.name.clone(),
                role: row.role,
                is_dual_role: row.is_dual_role,
                target: row.current_target,
                tally,
                achievement_percent: percent(tally.approved, row.current_target),
            }
        })
        .collect()
}
