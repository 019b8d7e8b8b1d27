// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{CoreError, fetch_failed};
use crate::list::build_tier_lists;
use crate::store::{AchievementFilter, TargetStore};
use vast_domain::{Achievement, Period, RollupRow, Tier, TierLists, UserId, rollup_achievements};

/// Rolls a period's achievements up to one tier.
///
/// # Errors
///
/// Returns `CoreError::FetchFailed` if any query fails.
pub fn rollup_tier<S: TargetStore + ?Sized>(
    store: &mut S,
    tier: Tier,
    period: Period,
) -> Result<Vec<RollupRow>, CoreError> {
    let lists: TierLists = build_tier_lists(store, period)?;
    let promotor_ids: Vec<UserId> = lists.promotor.iter().map(|r| r.user_id.clone()).collect();

    let achievements: Vec<Achievement> = if promotor_ids.is_empty() {
        Vec::new()
    } else {
        store
            .fetch_achievements(&AchievementFilter {
                user_ids: Some(promotor_ids),
                period,
            })
            .map_err(fetch_failed)?
    };

    Ok(rollup_achievements(tier, &lists, &achievements))
}
