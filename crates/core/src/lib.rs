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

//! The VAST Finance target engine.
//!
//! Each operation reads a snapshot through a [`TargetStore`], computes in
//! memory and, for saves, issues one batch write. Periods and timestamps are
//! always supplied by the caller.

mod copy_forward;
mod error;
mod list;
mod rollup;
mod save;
mod store;

#[cfg(test)]
mod tests;

pub use copy_forward::{CopyForwardResult, copy_previous_targets};
pub use error::CoreError;
pub use list::{build_target_list, build_tier_lists};
pub use rollup::rollup_tier;
pub use save::{NOTHING_TO_SAVE, SaveResult, save_targets};
pub use store::{
    AchievementFilter, HierarchyFilter, StoreError, TargetFilter, TargetStore, UserFilter,
};
