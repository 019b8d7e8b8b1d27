// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assembly of `TargetUser` projections for a tier view.

use crate::membership::Membership;
use crate::types::{HierarchyEdge, Role, Target, TargetType, TargetUser, Tier, User, UserId};
use std::collections::HashMap;

/// Stored target values for one period, keyed by user and type.
#[derive(Debug, Clone, Default)]
pub struct TargetBook {
    values: HashMap<(UserId, TargetType), i64>,
}

impl TargetBook {
    /// Indexes stored targets. Later rows win on a duplicate key.
    #[must_use]
    pub fn new(targets: &[Target]) -> Self {
        let values = targets
            .iter()
            .map(|t| ((t.user_id.clone(), t.target_type), t.value))
            .collect();
        Self { values }
    }

    /// Returns the stored value of the given type, if any.
    #[must_use]
    pub fn get(&self, user_id: &UserId, target_type: TargetType) -> Option<i64> {
        self.values.get(&(user_id.clone(), target_type)).copied()
    }
}

/// Selects the users that belong to a tier view.
///
/// The sator tier holds every active sator plus every active dual-role SPV.
/// The other tiers hold the active users of the matching role.
#[must_use]
pub fn select_tier_members<'a>(
    tier: Tier,
    candidates: &'a [User],
    memberships: &HashMap<UserId, Membership>,
) -> Vec<&'a User> {
    candidates
        .iter()
        .filter(|user| user.is_active())
        .filter(|user| {
            if user.role == tier.role() {
                return true;
            }
            tier == Tier::Sator
                && user.role == Role::Spv
                && memberships
                    .get(&user.id)
                    .is_some_and(Membership::is_dual_role)
        })
        .collect()
}

/// Builds the sorted `TargetUser` rows for a tier view.
///
/// # Arguments
///
/// * `tier` - The tier being viewed
/// * `members` - The users selected for the tier (see [`select_tier_members`])
/// * `memberships` - Dual-role memberships resolved for this request
/// * `edges` - Hierarchy edges of the members
/// * `book` - Stored targets for the period
#[must_use]
pub fn assemble_target_list(
    tier: Tier,
    members: &[&User],
    memberships: &HashMap<UserId, Membership>,
    edges: &[HierarchyEdge],
    book: &TargetBook,
) -> Vec<TargetUser> {
    let edges_by_user: HashMap<&UserId, &HierarchyEdge> =
        edges.iter().map(|edge| (&edge.user_id, edge)).collect();

    let mut rows: Vec<TargetUser> = members
        .iter()
        .map(|user| {
            let edge: Option<&&HierarchyEdge> = edges_by_user.get(&user.id);
            let is_dual_role: bool = memberships
                .get(&user.id)
                .is_some_and(Membership::is_dual_role);
            let primary: Option<i64> = book.get(&user.id, TargetType::Primary);
            let as_sator: Option<i64> = book.get(&user.id, TargetType::AsSator);

            let viewed_as_sator: bool = tier == Tier::Sator && user.role == Role::Spv;
            let (target_type, current_target) = if viewed_as_sator {
                (TargetType::AsSator, as_sator.or(primary).unwrap_or(0))
            } else {
                (TargetType::Primary, primary.unwrap_or(0))
            };

            // In the sator view the pair and the main figure are the same
            // stored value, fallback included.
            let current_target_as_sator: Option<i64> = if viewed_as_sator {
                Some(current_target)
            } else {
                (user.role == Role::Spv).then(|| as_sator.unwrap_or(0))
            };

            TargetUser {
                user_id: user.id.clone(),
                name: user.name.clone(),
                role: user.role,
                atasan_id: edge.and_then(|e| e.atasan_id.clone()),
                area: edge.and_then(|e| e.area.clone()),
                target_type,
                is_dual_role,
                current_target,
                new_target: current_target,
                current_target_as_sator,
                new_target_as_sator: current_target_as_sator,
            }
        })
        .collect();

    sort_by_name(&mut rows);
    rows
}

/// Sorts rows by name, case-insensitively, with the user id as tie breaker.
fn sort_by_name(rows: &mut [TargetUser]) {
    rows.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
}
