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
#![allow(clippy::multiple_crate_versions)]

//! API boundary for the VAST Finance target engine.
//!
//! Handlers authorize the acting operator, turn DTOs into domain values,
//! call the engine and translate every lower-layer error into [`ApiError`].

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, OperatorRole, authenticate_stub};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    audit_timeline, copy_previous, current_period, list_targets, rollup, save_targets,
    validate_targets,
};
pub use request_response::{
    AuditEventInfo, AuditTimelineRequest, AuditTimelineResponse, CopyPreviousRequest,
    CopyPreviousResponse, CurrentPeriodResponse, ListTargetsRequest, ListTargetsResponse,
    PeriodInfo, RollupRequest, RollupResponse, RollupRowInfo, SaveTargetsRequest,
    SaveTargetsResponse, TargetInfo, TargetUserInfo, ValidateTargetsRequest,
    ValidateTargetsResponse, target_users_from_info,
};
