// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! DTOs carry plain strings and numbers. Conversion into domain types happens
//! here so that handlers only ever see validated values.

use vast_domain::{
    DomainError, Period, Role, RollupRow, Target, TargetType, TargetUser, UserId,
    ValidationResult,
};

/// A month/year pair as shown to API clients.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PeriodInfo {
    /// Month, 1-12.
    pub month: u8,
    /// Four-digit year.
    pub year: i32,
    /// `MM/YYYY` label.
    pub label: String,
}

impl From<Period> for PeriodInfo {
    fn from(period: Period) -> Self {
        Self {
            month: period.month(),
            year: period.year(),
            label: period.to_string(),
        }
    }
}

/// API response for the current business period.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CurrentPeriodResponse {
    pub period: PeriodInfo,
    /// The IANA time zone the period was computed in.
    pub timezone: String,
}

/// One row of a target list as exchanged with API clients.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TargetUserInfo {
    pub user_id: String,
    pub name: String,
    /// Stored role: `promotor`, `sator` or `spv`.
    pub role: String,
    pub atasan_id: Option<String>,
    pub area: Option<String>,
    /// `primary` or `as_sator`.
    pub target_type: String,
    pub is_dual_role: bool,
    pub current_target: i64,
    pub new_target: i64,
    #[serde(default)]
    pub current_target_as_sator: Option<i64>,
    #[serde(default)]
    pub new_target_as_sator: Option<i64>,
}

impl From<&TargetUser> for TargetUserInfo {
    fn from(row: &TargetUser) -> Self {
        Self {
            user_id: row.user_id.to_string(),
            name: row.name.clone(),
            role: String::from(row.role.as_str()),
            atasan_id: row.atasan_id.as_ref().map(ToString::to_string),
            area: row.area.clone(),
            target_type: String::from(row.target_type.as_str()),
            is_dual_role: row.is_dual_role,
            current_target: row.current_target,
            new_target: row.new_target,
            current_target_as_sator: row.current_target_as_sator,
            new_target_as_sator: row.new_target_as_sator,
        }
    }
}

impl TryFrom<&TargetUserInfo> for TargetUser {
    type Error = DomainError;

    fn try_from(info: &TargetUserInfo) -> Result<Self, Self::Error> {
        let atasan_id: Option<UserId> = info
            .atasan_id
            .as_deref()
            .map(UserId::new)
            .transpose()?;
        Ok(Self {
            user_id: UserId::new(&info.user_id)?,
            name: info.name.clone(),
            role: info.role.parse::<Role>()?,
            atasan_id,
            area: info.area.clone(),
            target_type: info.target_type.parse::<TargetType>()?,
            is_dual_role: info.is_dual_role,
            current_target: info.current_target,
            new_target: info.new_target,
            current_target_as_sator: info.current_target_as_sator,
            new_target_as_sator: info.new_target_as_sator,
        })
    }
}

/// Converts a batch of client rows into domain rows.
///
/// # Errors
///
/// Returns the first conversion failure.
pub fn target_users_from_info(rows: &[TargetUserInfo]) -> Result<Vec<TargetUser>, DomainError> {
    rows.iter().map(TargetUser::try_from).collect()
}

/// One stored target figure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TargetInfo {
    pub user_id: String,
    pub period: PeriodInfo,
    pub target_type: String,
    pub value: i64,
}

impl From<&Target> for TargetInfo {
    fn from(target: &Target) -> Self {
        Self {
            user_id: target.user_id.to_string(),
            period: PeriodInfo::from(target.period),
            target_type: String::from(target.target_type.as_str()),
            value: target.value,
        }
    }
}

/// API request for one tier's target list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListTargetsRequest {
    /// `spv`, `sator` or `promotor`.
    pub tier: String,
    pub month: u8,
    pub year: i32,
}

/// API response containing one tier's target list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListTargetsResponse {
    pub period: PeriodInfo,
    pub tier: String,
    pub rows: Vec<TargetUserInfo>,
    /// Advisory text, set when the tier has no active members.
    pub message: Option<String>,
}

/// API request to validate proposed targets across the three tiers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValidateTargetsRequest {
    #[serde(default)]
    pub spv: Vec<TargetUserInfo>,
    #[serde(default)]
    pub sator: Vec<TargetUserInfo>,
    #[serde(default)]
    pub promotor: Vec<TargetUserInfo>,
}

/// API response for a validation run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValidateTargetsResponse {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl From<ValidationResult> for ValidateTargetsResponse {
    fn from(result: ValidationResult) -> Self {
        Self {
            is_valid: result.is_valid,
            errors: result.errors,
            warnings: result.warnings,
        }
    }
}

/// API request to copy the previous period's targets into a period.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CopyPreviousRequest {
    /// The period being filled.
    pub month: u8,
    pub year: i32,
    /// Copy only `primary` rows, leaving dual-role `as_sator` figures behind.
    #[serde(default)]
    pub primary_only: bool,
}

/// API response for a successful copy-forward.
///
/// Nothing is written; `targets` are re-keyed into the requested period for
/// the client to review and save.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CopyPreviousResponse {
    pub period: PeriodInfo,
    pub previous: PeriodInfo,
    pub message: String,
    pub targets: Vec<TargetInfo>,
}

/// API request to save edited targets.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SaveTargetsRequest {
    pub month: u8,
    pub year: i32,
    pub rows: Vec<TargetUserInfo>,
}

/// API response for a save.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SaveTargetsResponse {
    pub saved_count: usize,
    pub message: String,
    /// The audit event id, absent when nothing was written.
    pub event_id: Option<i64>,
}

/// API request for an achievement rollup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RollupRequest {
    pub tier: String,
    pub month: u8,
    pub year: i32,
}

/// One rollup row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RollupRowInfo {
    pub user_id: String,
    pub name: String,
    pub role: String,
    pub is_dual_role: bool,
    pub target: i64,
    /// Approved applications.
    pub actual: i64,
    pub rejected: i64,
    pub pending: i64,
    pub achievement_percent: Option<i64>,
}

impl From<&RollupRow> for RollupRowInfo {
    fn from(row: &RollupRow) -> Self {
        Self {
            user_id: row.user_id.to_string(),
            name: row.name.clone(),
            role: String::from(row.role.as_str()),
            is_dual_role: row.is_dual_role,
            target: row.target,
            actual: row.tally.approved,
            rejected: row.tally.rejected,
            pending: row.tally.pending,
            achievement_percent: row.achievement_percent,
        }
    }
}

/// API response for an achievement rollup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RollupResponse {
    pub period: PeriodInfo,
    pub tier: String,
    pub rows: Vec<RollupRowInfo>,
}

/// API request for a period's audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditTimelineRequest {
    pub month: u8,
    pub year: i32,
}

/// One audit event as shown to API clients.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    pub event_id: Option<i64>,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action: String,
    pub details: Option<String>,
    pub before: String,
    pub after: String,
    /// RFC 3339 timestamp.
    pub occurred_at: String,
}

/// API response for a period's audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditTimelineResponse {
    pub period: PeriodInfo,
    pub events: Vec<AuditEventInfo>,
}
