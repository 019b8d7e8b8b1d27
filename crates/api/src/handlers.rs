// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for read-only and state-changing target operations.

use chrono_tz::Tz;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use vast_audit::{AuditEvent, Cause};
use vast_domain::{
    CopyScope, Period, RollupRow, Target, TargetUser, Tier, rekey_targets,
    validate_target_hierarchy,
};
use vast_finance::{
    CopyForwardResult, SaveResult, build_target_list, copy_previous_targets, rollup_tier,
    save_targets as save_targets_impl,
};
use vast_persistence::Persistence;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AuditEventInfo, AuditTimelineRequest, AuditTimelineResponse, CopyPreviousRequest,
    CopyPreviousResponse, CurrentPeriodResponse, ListTargetsRequest, ListTargetsResponse,
    PeriodInfo, RollupRequest, RollupResponse, RollupRowInfo, SaveTargetsRequest,
    SaveTargetsResponse, TargetInfo, TargetUserInfo, ValidateTargetsRequest,
    ValidateTargetsResponse, target_users_from_info,
};

/// Parses and range-checks a requested period.
fn parse_period(month: u8, year: i32) -> Result<Period, ApiError> {
    Period::new(month, year).map_err(translate_domain_error)
}

fn parse_tier(tier: &str) -> Result<Tier, ApiError> {
    tier.parse::<Tier>().map_err(translate_domain_error)
}

/// Returns the business period containing `now` in the given time zone.
///
/// # Errors
///
/// Returns an error if `now` cannot be mapped onto a supported period.
pub fn current_period(now: OffsetDateTime, tz: Tz) -> Result<CurrentPeriodResponse, ApiError> {
    let period: Period = Period::current_in(now, tz).map_err(translate_domain_error)?;
    Ok(CurrentPeriodResponse {
        period: PeriodInfo::from(period),
        timezone: String::from(tz.name()),
    })
}

/// Lists one tier's users with their stored targets for a period.
///
/// Read-only. Any authenticated operator may list targets.
///
/// # Errors
///
/// Returns an error if:
/// - The tier or period is invalid
/// - Loading users, hierarchy or targets fails
pub fn list_targets(
    persistence: &mut Persistence,
    request: &ListTargetsRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListTargetsResponse, ApiError> {
    AuthorizationService::authorize_read(authenticated_actor)?;
    let tier: Tier = parse_tier(&request.tier)?;
    let period: Period = parse_period(request.month, request.year)?;

    let rows: Vec<TargetUser> =
        build_target_list(persistence, tier, period).map_err(translate_core_error)?;
    tracing::debug!(%tier, %period, count = rows.len(), "Built target list");

    let message: Option<String> = rows
        .is_empty()
        .then(|| format!("Tidak ada pengguna aktif pada tier {tier}"));

    Ok(ListTargetsResponse {
        period: PeriodInfo::from(period),
        tier: String::from(tier.as_str()),
        rows: rows.iter().map(TargetUserInfo::from).collect(),
        message,
    })
}

/// Validates proposed targets across the three tiers.
///
/// Validation is advisory and never writes. A failed check is reported in
/// the response, not as an error.
///
/// # Errors
///
/// Returns an error if a submitted row cannot be interpreted.
pub fn validate_targets(
    request: &ValidateTargetsRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ValidateTargetsResponse, ApiError> {
    AuthorizationService::authorize_read(authenticated_actor)?;
    let spvs: Vec<TargetUser> =
        target_users_from_info(&request.spv).map_err(translate_domain_error)?;
    let sators: Vec<TargetUser> =
        target_users_from_info(&request.sator).map_err(translate_domain_error)?;
    let promotors: Vec<TargetUser> =
        target_users_from_info(&request.promotor).map_err(translate_domain_error)?;

    let response: ValidateTargetsResponse =
        validate_target_hierarchy(&spvs, &sators, &promotors).into();
    tracing::debug!(
        is_valid = response.is_valid,
        error_count = response.errors.len(),
        "Validated target hierarchy"
    );
    Ok(response)
}

/// Copies the preceding period's stored targets into the requested period.
///
/// Nothing is persisted. The returned targets are re-keyed into the
/// requested period for the admin to review and save.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The period is invalid
/// - The previous period has no usable targets
/// - Loading targets fails
pub fn copy_previous(
    persistence: &mut Persistence,
    request: &CopyPreviousRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CopyPreviousResponse, ApiError> {
    AuthorizationService::authorize_copy_previous(authenticated_actor)?;
    let period: Period = parse_period(request.month, request.year)?;
    let scope: CopyScope = if request.primary_only {
        CopyScope::PrimaryOnly
    } else {
        CopyScope::AllTypes
    };

    let result: CopyForwardResult =
        copy_previous_targets(persistence, period, scope).map_err(|e| {
            tracing::info!(%period, error = %e, "Copy-forward refused");
            translate_core_error(e)
        })?;
    let targets: Vec<Target> = rekey_targets(&result.rows, period);
    tracing::info!(
        %period,
        previous = %result.previous,
        count = targets.len(),
        actor = %authenticated_actor.id,
        "Copied previous targets"
    );

    Ok(CopyPreviousResponse {
        period: PeriodInfo::from(period),
        previous: PeriodInfo::from(result.previous),
        message: result.message,
        targets: targets.iter().map(TargetInfo::from).collect(),
    })
}

/// Saves the edited targets of a period.
///
/// Only changed figures are written. A non-empty save is recorded in the
/// audit trail under the acting admin.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The period and edited rows
/// * `authenticated_actor` - The operator performing the save
/// * `cause` - The request that triggered the save
/// * `now` - The write timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The period or a row is invalid
/// - A target is negative
/// - The write fails
pub fn save_targets(
    persistence: &mut Persistence,
    request: &SaveTargetsRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<SaveTargetsResponse, ApiError> {
    AuthorizationService::authorize_save_targets(authenticated_actor)?;
    let period: Period = parse_period(request.month, request.year)?;
    let rows: Vec<TargetUser> =
        target_users_from_info(&request.rows).map_err(translate_domain_error)?;

    let result: SaveResult = save_targets_impl(
        persistence,
        &rows,
        period,
        authenticated_actor.to_audit_actor(),
        cause,
        now,
    )
    .map_err(|e| {
        tracing::error!(%period, error = %e, "Target save failed");
        translate_core_error(e)
    })?;

    let event_id: Option<i64> = result.audit_event.as_ref().and_then(|e| e.event_id);
    tracing::info!(
        %period,
        saved = result.saved_count,
        event_id = ?event_id,
        actor = %authenticated_actor.id,
        "Saved targets"
    );

    Ok(SaveTargetsResponse {
        saved_count: result.saved_count,
        message: result.message,
        event_id,
    })
}

/// Rolls a period's approved applications up to one tier.
///
/// # Errors
///
/// Returns an error if the tier or period is invalid or loading fails.
pub fn rollup(
    persistence: &mut Persistence,
    request: &RollupRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<RollupResponse, ApiError> {
    AuthorizationService::authorize_read(authenticated_actor)?;
    let tier: Tier = parse_tier(&request.tier)?;
    let period: Period = parse_period(request.month, request.year)?;

    let rows: Vec<RollupRow> =
        rollup_tier(persistence, tier, period).map_err(translate_core_error)?;

    Ok(RollupResponse {
        period: PeriodInfo::from(period),
        tier: String::from(tier.as_str()),
        rows: rows.iter().map(RollupRowInfo::from).collect(),
    })
}

fn audit_event_info(event: &AuditEvent) -> Result<AuditEventInfo, ApiError> {
    let occurred_at: String =
        event
            .occurred_at
            .format(&Rfc3339)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to format audit timestamp: {e}"),
            })?;
    Ok(AuditEventInfo {
        event_id: event.event_id,
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action: event.action.name.clone(),
        details: event.action.details.clone(),
        before: event.before.data.clone(),
        after: event.after.data.clone(),
        occurred_at,
    })
}

/// Lists the audit events recorded for a period, oldest first.
///
/// # Errors
///
/// Returns an error if the period is invalid or events cannot be loaded.
pub fn audit_timeline(
    persistence: &mut Persistence,
    request: &AuditTimelineRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<AuditTimelineResponse, ApiError> {
    AuthorizationService::authorize_read(authenticated_actor)?;
    let period: Period = parse_period(request.month, request.year)?;

    let events: Vec<AuditEvent> = persistence
        .get_audit_timeline(period)
        .map_err(translate_persistence_error)?;

    Ok(AuditTimelineResponse {
        period: PeriodInfo::from(period),
        events: events
            .iter()
            .map(audit_event_info)
            .collect::<Result<Vec<AuditEventInfo>, ApiError>>()?,
    })
}
