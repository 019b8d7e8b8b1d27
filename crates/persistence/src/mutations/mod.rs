// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `directory`: users, hierarchy edges and achievement counts
//! - `targets`: transactional target upserts
//! - `audit`: audit event persistence

pub mod audit;
pub mod directory;
pub mod targets;

pub use audit::persist_audit_event;
pub use directory::{record_achievement, set_hierarchy_edge, upsert_user};
pub use targets::upsert_targets;
