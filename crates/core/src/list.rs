// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{CoreError, fetch_failed};
use crate::store::{HierarchyFilter, TargetFilter, TargetStore, UserFilter};
use std::collections::HashMap;
use vast_domain::{
    HierarchyEdge, Membership, Period, Role, Target, TargetBook, TargetUser, Tier, TierLists,
    User, UserId, assemble_target_list, resolve_memberships, select_tier_members,
};

/// Builds the editable target list of one tier for a period.
///
/// The sator tier includes every dual-role SPV. Rows are sorted by name.
///
/// # Arguments
///
/// * `store` - The storage collaborator
/// * `tier` - The tier to list
/// * `period` - The target period
///
/// # Errors
///
/// Returns `CoreError::FetchFailed` if any query fails. No partial list is
/// returned.
pub fn build_target_list<S: TargetStore + ?Sized>(
    store: &mut S,
    tier: Tier,
    period: Period,
) -> Result<Vec<TargetUser>, CoreError> {
    let mut candidates: Vec<User> = store
        .fetch_users(&UserFilter::active(tier.role()))
        .map_err(fetch_failed)?;
    if tier == Tier::Sator {
        candidates.extend(
            store
                .fetch_users(&UserFilter::active(Role::Spv))
                .map_err(fetch_failed)?,
        );
    }

    let memberships: HashMap<UserId, Membership> = if tier == Tier::Promotor {
        resolve_memberships(&candidates, &[], &[])
    } else {
        resolve_spv_memberships(store, &candidates)?
    };

    let members: Vec<&User> = select_tier_members(tier, &candidates, &memberships);
    if members.is_empty() {
        return Ok(Vec::new());
    }

    let member_ids: Vec<UserId> = members.iter().map(|u| u.id.clone()).collect();
    let edges: Vec<HierarchyEdge> = store
        .fetch_hierarchy_edges(&HierarchyFilter {
            user_ids: Some(member_ids.clone()),
            ..HierarchyFilter::default()
        })
        .map_err(fetch_failed)?;
    let targets: Vec<Target> = store
        .fetch_targets(&TargetFilter {
            user_ids: Some(member_ids),
            period,
            target_type: None,
        })
        .map_err(fetch_failed)?;

    Ok(assemble_target_list(
        tier,
        &members,
        &memberships,
        &edges,
        &TargetBook::new(&targets),
    ))
}

/// Resolves dual-role memberships from the promotors reporting to SPVs.
fn resolve_spv_memberships<S: TargetStore + ?Sized>(
    store: &mut S,
    users: &[User],
) -> Result<HashMap<UserId, Membership>, CoreError> {
    let spv_ids: Vec<UserId> = users
        .iter()
        .filter(|u| u.role == Role::Spv)
        .map(|u| u.id.clone())
        .collect();
    if spv_ids.is_empty() {
        return Ok(resolve_memberships(users, &[], &[]));
    }

    let promotors: Vec<User> = store
        .fetch_users(&UserFilter::active(Role::Promotor))
        .map_err(fetch_failed)?;
    let edges: Vec<HierarchyEdge> = store
        .fetch_hierarchy_edges(&HierarchyFilter {
            supervisor_ids: Some(spv_ids),
            ..HierarchyFilter::default()
        })
        .map_err(fetch_failed)?;

    Ok(resolve_memberships(users, &promotors, &edges))
}

/// Builds the target lists of all three tiers for a period.
///
/// # Errors
///
/// Returns `CoreError::FetchFailed` if any query fails.
pub fn build_tier_lists<S: TargetStore + ?Sized>(
    store: &mut S,
    period: Period,
) -> Result<TierLists, CoreError> {
    Ok(TierLists {
        spv: build_target_list(store, Tier::Spv, period)?,
        sator: build_target_list(store, Tier::Sator, period)?,
        promotor: build_target_list(store, Tier::Promotor, period)?,
    })
}
