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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono_tz::Tz;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use vast_api::{
    ApiError, AuditTimelineRequest, AuditTimelineResponse, AuthenticatedActor,
    CopyPreviousRequest, CopyPreviousResponse, CurrentPeriodResponse, ListTargetsRequest,
    ListTargetsResponse, RollupRequest, RollupResponse, SaveTargetsRequest, SaveTargetsResponse,
    TargetUserInfo, ValidateTargetsRequest, ValidateTargetsResponse, audit_timeline,
    authenticate_stub, copy_previous, current_period, list_targets, rollup, save_targets,
    validate_targets,
};
use vast_audit::Cause;
use vast_persistence::Persistence;

/// VAST Finance target server - HTTP server for the target engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// IANA time zone used to decide the current business month
    #[arg(short, long, default_value = "Asia/Jakarta")]
    timezone: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer. Diesel connections are not shared, so every
    /// request takes the lock for the duration of its store calls.
    persistence: Arc<Mutex<Persistence>>,
    /// Business time zone for the current period.
    timezone: Tz,
}

/// Query parameters identifying the caller on read endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct TierQuery {
    actor_id: String,
    actor_role: String,
    tier: String,
    month: u8,
    year: i32,
}

/// Query parameters for period-scoped read endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct PeriodQuery {
    actor_id: String,
    actor_role: String,
    month: u8,
    year: i32,
}

/// API request for validating proposed targets.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ValidateTargetsApiRequest {
    actor_id: String,
    actor_role: String,
    #[serde(default)]
    spv: Vec<TargetUserInfo>,
    #[serde(default)]
    sator: Vec<TargetUserInfo>,
    #[serde(default)]
    promotor: Vec<TargetUserInfo>,
}

/// API request for copying the previous period's targets.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CopyPreviousApiRequest {
    actor_id: String,
    actor_role: String,
    month: u8,
    year: i32,
    #[serde(default)]
    primary_only: bool,
}

/// API request for saving edited targets.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SaveTargetsApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    month: u8,
    year: i32,
    rows: Vec<TargetUserInfo>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Authenticates the caller named in a request.
fn authenticate(actor_id: &str, actor_role: &str) -> Result<AuthenticatedActor, HttpError> {
    authenticate_stub(actor_id, actor_role).map_err(|e| {
        warn!(actor_id = %actor_id, error = %e, "Authentication failed");
        HttpError::from(ApiError::from(e))
    })
}

/// Handler for GET `/period/current` endpoint.
#[allow(clippy::unused_async)]
async fn handle_current_period(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<CurrentPeriodResponse>, HttpError> {
    let response: CurrentPeriodResponse =
        current_period(OffsetDateTime::now_utc(), app_state.timezone)?;
    Ok(Json(response))
}

/// Handler for GET `/targets` endpoint.
///
/// Returns one tier's target list for a period.
async fn handle_list_targets(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<TierQuery>,
) -> Result<Json<ListTargetsResponse>, HttpError> {
    info!(
        actor_id = %params.actor_id,
        tier = %params.tier,
        month = params.month,
        year = params.year,
        "Handling list_targets request"
    );
    let actor: AuthenticatedActor = authenticate(&params.actor_id, &params.actor_role)?;
    let request: ListTargetsRequest = ListTargetsRequest {
        tier: params.tier,
        month: params.month,
        year: params.year,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ListTargetsResponse = list_targets(&mut persistence, &request, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/targets/validate` endpoint.
///
/// Validation never touches storage.
#[allow(clippy::unused_async)]
async fn handle_validate_targets(
    Json(req): Json<ValidateTargetsApiRequest>,
) -> Result<Json<ValidateTargetsResponse>, HttpError> {
    info!(actor_id = %req.actor_id, "Handling validate_targets request");
    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;
    let request: ValidateTargetsRequest = ValidateTargetsRequest {
        spv: req.spv,
        sator: req.sator,
        promotor: req.promotor,
    };
    let response: ValidateTargetsResponse = validate_targets(&request, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/targets/copy_previous` endpoint.
async fn handle_copy_previous(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CopyPreviousApiRequest>,
) -> Result<Json<CopyPreviousResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        month = req.month,
        year = req.year,
        primary_only = req.primary_only,
        "Handling copy_previous request"
    );
    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;
    let request: CopyPreviousRequest = CopyPreviousRequest {
        month: req.month,
        year: req.year,
        primary_only: req.primary_only,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CopyPreviousResponse = copy_previous(&mut persistence, &request, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/targets/save` endpoint.
async fn handle_save_targets(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SaveTargetsApiRequest>,
) -> Result<Json<SaveTargetsResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        month = req.month,
        year = req.year,
        rows = req.rows.len(),
        "Handling save_targets request"
    );
    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.actor_role)?;
    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let request: SaveTargetsRequest = SaveTargetsRequest {
        month: req.month,
        year: req.year,
        rows: req.rows,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: SaveTargetsResponse = save_targets(
        &mut persistence,
        &request,
        &actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/targets/rollup` endpoint.
async fn handle_rollup(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<TierQuery>,
) -> Result<Json<RollupResponse>, HttpError> {
    info!(
        actor_id = %params.actor_id,
        tier = %params.tier,
        month = params.month,
        year = params.year,
        "Handling rollup request"
    );
    let actor: AuthenticatedActor = authenticate(&params.actor_id, &params.actor_role)?;
    let request: RollupRequest = RollupRequest {
        tier: params.tier,
        month: params.month,
        year: params.year,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: RollupResponse = rollup(&mut persistence, &request, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/audit/timeline` endpoint.
///
/// Returns the audit events of one period, oldest first.
async fn handle_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    info!(
        actor_id = %params.actor_id,
        month = params.month,
        year = params.year,
        "Handling audit_timeline request"
    );
    let actor: AuthenticatedActor = authenticate(&params.actor_id, &params.actor_role)?;
    let request: AuditTimelineRequest = AuditTimelineRequest {
        month: params.month,
        year: params.year,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: AuditTimelineResponse = audit_timeline(&mut persistence, &request, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/period/current", get(handle_current_period))
        .route("/targets", get(handle_list_targets))
        .route("/targets/validate", post(handle_validate_targets))
        .route("/targets/copy_previous", post(handle_copy_previous))
        .route("/targets/save", post(handle_save_targets))
        .route("/targets/rollup", get(handle_rollup))
        .route("/audit/timeline", get(handle_audit_timeline))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing VAST Finance target server");

    let timezone: Tz = args
        .timezone
        .parse::<Tz>()
        .map_err(|e| format!("Invalid time zone '{}': {e}", args.timezone))?;
    info!(timezone = %timezone.name(), "Using business time zone");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        timezone,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
