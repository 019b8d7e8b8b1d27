// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod copy_forward;
mod error;
mod membership;
mod period;
mod rollup;
mod save_plan;
mod target_list;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use copy_forward::{CopyForwardPlan, CopyScope, evaluate_copy_forward, rekey_targets};
pub use error::DomainError;
pub use membership::{Membership, SatorCapability, resolve_memberships};
pub use period::{MAX_YEAR, MIN_YEAR, Period};
pub use rollup::{RollupRow, Tally, TierLists, rollup_achievements};
pub use save_plan::plan_target_upserts;
pub use target_list::{TargetBook, assemble_target_list, select_tier_members};

// Re-export public types
pub use types::{
    Achievement, HierarchyEdge, Role, Target, TargetRecord, TargetType, TargetUser, Tier, User,
    UserId, UserStatus,
};
pub use validation::{ValidationResult, validate_target_hierarchy};
