// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dual-role membership resolution.
//!
//! In small areas an SPV also coordinates stores directly, so promotors may
//! report straight to the SPV. Such an SPV carries the Sator capability and
//! appears in the sator tier alongside regular sators.

use crate::types::{HierarchyEdge, Role, User, UserId};
use std::collections::{HashMap, HashSet};

/// The secondary capability of an SPV acting as a Sator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SatorCapability {
    /// Number of active promotors reporting directly to the SPV.
    pub promotor_count: usize,
}

/// A user's roles for one request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub primary_role: Role,
    pub secondary_capability: Option<SatorCapability>,
}

impl Membership {
    /// Returns whether this user is an SPV acting as a Sator.
    #[must_use]
    pub const fn is_dual_role(&self) -> bool {
        matches!(self.primary_role, Role::Spv) && self.secondary_capability.is_some()
    }
}

/// Resolves memberships for a set of users.
///
/// An active SPV gains the Sator capability iff at least one active promotor
/// has a hierarchy edge pointing directly at them. Every other user gets a
/// membership with no secondary capability.
///
/// # Arguments
///
/// * `users` - The users to resolve
/// * `promotors` - Promotor candidates (inactive ones are ignored)
/// * `edges` - Hierarchy edges of the promotors
#[must_use]
pub fn resolve_memberships(
    users: &[User],
    promotors: &[User],
    edges: &[HierarchyEdge],
) -> HashMap<UserId, Membership> {
    let active_promotors: HashSet<&UserId> = promotors
        .iter()
        .filter(|p| p.role == Role::Promotor && p.is_active())
        .map(|p| &p.id)
        .collect();

    let mut direct_promotors: HashMap<&UserId, usize> = HashMap::new();
    for edge in edges {
        if !active_promotors.contains(&edge.user_id) {
            continue;
        }
        if let Some(atasan_id) = &edge.atasan_id {
            *direct_promotors.entry(atasan_id).or_insert(0) += 1;
        }
    }

    users
        .iter()
        .map(|user| {
            let secondary_capability: Option<SatorCapability> =
                if user.role == Role::Spv && user.is_active() {
                    direct_promotors
                        .get(&user.id)
                        .map(|&promotor_count| SatorCapability { promotor_count })
                } else {
                    None
                };
            (
                user.id.clone(),
                Membership {
                    primary_role: user.role,
                    secondary_capability,
                },
            )
        })
        .collect()
}
