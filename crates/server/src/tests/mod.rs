// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use tower::ServiceExt;
use vast_domain::{HierarchyEdge, Role, User, UserId, UserStatus};

fn add_user(
    persistence: &mut Persistence,
    id: &str,
    name: &str,
    role: Role,
    atasan: Option<&str>,
) {
    persistence
        .upsert_user(&User::new(
            UserId::new(id).unwrap(),
            String::from(name),
            role,
            UserStatus::Active,
        ))
        .unwrap();
    persistence
        .set_hierarchy_edge(&HierarchyEdge {
            user_id: UserId::new(id).unwrap(),
            atasan_id: atasan.map(|a| UserId::new(a).unwrap()),
            area: Some(String::from("Jakarta Timur")),
            store_id: None,
        })
        .unwrap();
}

/// Helper to create test app state with a seeded in-memory database.
fn create_test_app_state() -> AppState {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    add_user(&mut persistence, "spv-budi", "Budi", Role::Spv, None);
    add_user(&mut persistence, "sator-ani", "Ani", Role::Sator, Some("spv-budi"));
    add_user(&mut persistence, "sator-cici", "Cici", Role::Sator, Some("spv-budi"));
    add_user(&mut persistence, "p-dedi", "Dedi", Role::Promotor, Some("sator-ani"));
    add_user(&mut persistence, "p-fina", "Fina", Role::Promotor, Some("spv-budi"));
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        timezone: chrono_tz::Asia::Jakarta,
    }
}

async fn get_json(app: Router, uri: &str) -> (HttpStatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status: HttpStatusCode = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (HttpStatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status: HttpStatusCode = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn list(app: Router, role: &str, tier: &str) -> ListTargetsResponse {
    let uri: String =
        format!("/targets?actor_id=op-1&actor_role={role}&tier={tier}&month=3&year=2025");
    let (status, body) = get_json(app, &uri).await;
    assert_eq!(status, HttpStatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

fn save_request(role: &str, rows: Vec<TargetUserInfo>) -> SaveTargetsApiRequest {
    SaveTargetsApiRequest {
        actor_id: String::from("admin1"),
        actor_role: String::from(role),
        cause_id: String::from("req-1"),
        cause_description: String::from("Monthly target entry"),
        month: 3,
        year: 2025,
        rows,
    }
}

fn with_target(mut rows: Vec<TargetUserInfo>, id: &str, value: i64) -> Vec<TargetUserInfo> {
    for row in rows.iter_mut().filter(|r| r.user_id == id) {
        row.new_target = value;
    }
    rows
}

#[tokio::test]
async fn test_current_period_reports_time_zone() {
    let app: Router = build_router(create_test_app_state());
    let (status, body) = get_json(app, "/period/current").await;
    assert_eq!(status, HttpStatusCode::OK);

    let response: CurrentPeriodResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.timezone, "Asia/Jakarta");
    assert!((1..=12).contains(&response.period.month));
}

#[tokio::test]
async fn test_list_sator_tier_includes_dual_role_spv() {
    let app: Router = build_router(create_test_app_state());
    let response: ListTargetsResponse = list(app, "manager", "sator").await;

    let names: Vec<&str> = response.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ani", "Budi", "Cici"]);
    assert!(response.rows[1].is_dual_role);
    assert_eq!(response.period.label, "03/2025");
}

#[tokio::test]
async fn test_invalid_tier_returns_bad_request() {
    let app: Router = build_router(create_test_app_state());
    let (status, _) = get_json(
        app,
        "/targets?actor_id=op-1&actor_role=admin&tier=region&month=3&year=2025",
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_role_returns_unauthorized() {
    let app: Router = build_router(create_test_app_state());
    let (status, body) = get_json(
        app,
        "/targets?actor_id=op-1&actor_role=cashier&tier=spv&month=3&year=2025",
    )
    .await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.error);
}

#[tokio::test]
async fn test_save_as_manager_is_forbidden_and_writes_nothing() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state);

    let rows: Vec<TargetUserInfo> = list(app.clone(), "admin", "promotor").await.rows;
    let rows: Vec<TargetUserInfo> = with_target(rows, "p-dedi", 10);
    let (status, _) = post_json(app.clone(), "/targets/save", &save_request("manager", rows)).await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);

    let after: ListTargetsResponse = list(app, "admin", "promotor").await;
    assert!(after.rows.iter().all(|r| r.current_target == 0));
}

#[tokio::test]
async fn test_save_then_validate_and_audit() {
    let app: Router = build_router(create_test_app_state());

    let spv: Vec<TargetUserInfo> = list(app.clone(), "admin", "spv").await.rows;
    let spv: Vec<TargetUserInfo> = with_target(spv, "spv-budi", 100);
    let (status, body) = post_json(app.clone(), "/targets/save", &save_request("admin", spv)).await;
    assert_eq!(status, HttpStatusCode::OK);
    let saved: SaveTargetsResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(saved.saved_count, 1);
    assert!(saved.event_id.is_some());

    let sators: Vec<TargetUserInfo> = list(app.clone(), "admin", "sator").await.rows;
    let sators: Vec<TargetUserInfo> = with_target(sators, "sator-ani", 40);
    let sators: Vec<TargetUserInfo> = with_target(sators, "sator-cici", 50);
    let sators: Vec<TargetUserInfo> = with_target(sators, "spv-budi", 0);
    let (status, _) = post_json(app.clone(), "/targets/save", &save_request("admin", sators)).await;
    assert_eq!(status, HttpStatusCode::OK);

    let request: ValidateTargetsApiRequest = ValidateTargetsApiRequest {
        actor_id: String::from("op-1"),
        actor_role: String::from("manager"),
        spv: list(app.clone(), "manager", "spv").await.rows,
        sator: list(app.clone(), "manager", "sator").await.rows,
        promotor: list(app.clone(), "manager", "promotor").await.rows,
    };
    let (status, body) = post_json(app.clone(), "/targets/validate", &request).await;
    assert_eq!(status, HttpStatusCode::OK);
    let validation: ValidateTargetsResponse = serde_json::from_slice(&body).unwrap();
    assert!(!validation.is_valid);
    assert!(
        validation
            .errors
            .contains(&String::from("Target SPV Budi (100) melebihi total target Sator (90)"))
    );

    let (status, body) = get_json(
        app,
        "/audit/timeline?actor_id=op-1&actor_role=manager&month=3&year=2025",
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let timeline: AuditTimelineResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(timeline.events.len(), 2);
    assert_eq!(timeline.events[0].actor_id, "admin1");
    assert_eq!(timeline.events[0].cause_id, "req-1");
}

#[tokio::test]
async fn test_copy_previous_without_data_is_unprocessable() {
    let app: Router = build_router(create_test_app_state());
    let request: CopyPreviousApiRequest = CopyPreviousApiRequest {
        actor_id: String::from("admin1"),
        actor_role: String::from("admin"),
        month: 4,
        year: 2025,
        primary_only: false,
    };
    let (status, body) = post_json(app, "/targets/copy_previous", &request).await;
    assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert!(error.message.contains("Tidak ada data target pada periode 03/2025"));
}

#[tokio::test]
async fn test_rollup_returns_rows_for_tier() {
    let app: Router = build_router(create_test_app_state());
    let (status, body) = get_json(
        app,
        "/targets/rollup?actor_id=op-1&actor_role=manager&tier=sator&month=3&year=2025",
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let response: RollupResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.rows.len(), 3);
    assert!(response.rows.iter().all(|r| r.actual == 0));
}
