// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `directory`: users and hierarchy edges
//! - `targets`: stored targets and monthly achievements
//! - `audit`: audit timeline

pub mod audit;
pub mod directory;
pub mod targets;

pub use audit::get_audit_timeline;
pub use directory::{fetch_hierarchy_edges, fetch_users};
pub use targets::{fetch_achievements, fetch_targets};

use vast_domain::UserId;

/// Converts user ids into bind values for an `IN` clause.
pub fn id_strings(ids: &[UserId]) -> Vec<String> {
    ids.iter().map(|id| id.as_str().to_string()).collect()
}
