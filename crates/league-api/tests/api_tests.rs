//! Integration tests for the league API endpoints.
//!
//! Tests drive the Axum `Router` directly via `tower::ServiceExt` without
//! starting a TCP server, backed by the in-memory store.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use league_api::{AppState, build_router};
use league_core::{FixedScoring, InMemoryStore, League, LeagueOptions};
use league_types::Team;
use serde_json::{Value, json};
use tower::ServiceExt;

fn router_with(store: InMemoryStore, scoring: FixedScoring) -> Router {
    let league = League::with_scoring(store, scoring, LeagueOptions::default()).unwrap();
    build_router(Arc::new(AppState::new(league, "Test League")))
}

/// Every simulated match ends 2-1 to the home side.
fn router() -> Router {
    router_with(InMemoryStore::new(), FixedScoring::new(2, 1))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

/// Decimal fields serialize as strings; compare them ignoring trailing zeros.
fn decimal_str(value: &Value) -> &str {
    let s = value.as_str().unwrap();
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

async fn initialized() -> Router {
    let router = router();
    let (status, _) = send(&router, "POST", "/api/league/init", None).await;
    assert_eq!(status, StatusCode::OK);
    router
}

#[tokio::test]
async fn index_returns_html() {
    let response = router()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn index_escapes_team_and_league_names() {
    let options = LeagueOptions {
        roster: vec![
            Team::new("<b>Lions</b>", 90),
            Team::new("Tigers & Co", 80),
        ],
        ..LeagueOptions::default()
    };
    let league =
        League::with_scoring(InMemoryStore::new(), FixedScoring::new(1, 0), options).unwrap();
    league.init().await.unwrap();
    let router = build_router(Arc::new(AppState::new(league, "<i>Cup</i>")));

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(html.contains("&lt;b&gt;Lions&lt;/b&gt;"));
    assert!(html.contains("Tigers &amp; Co"));
    assert!(html.contains("&lt;i&gt;Cup&lt;/i&gt;"));
    assert!(!html.contains("<b>Lions"));
    assert!(!html.contains("<i>Cup"));
}

#[tokio::test]
async fn info_describes_schedule() {
    let router = initialized().await;
    let (status, body) = send(&router, "GET", "/api/info", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Test League");
    assert_eq!(body["scheme"], "double");
    assert_eq!(body["teams"], 4);
    assert_eq!(body["max_week"], 6);
}

#[tokio::test]
async fn mutations_before_init_conflict() {
    let router = router();
    let (status, body) = send(&router, "POST", "/api/league/next-week", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    let (status, _) = send(&router, "GET", "/api/league-stats", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&router, "GET", "/api/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "uninitialized");
}

#[tokio::test]
async fn init_then_empty_table() {
    let router = initialized().await;
    let (status, body) = send(&router, "GET", "/api/standings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["week"], 0);
    assert_eq!(body["standings"].as_array().unwrap().len(), 4);
    assert_eq!(body["standings"][0]["points"], 0);
}

#[tokio::test]
async fn next_week_plays_scheduled_pairs() {
    let router = initialized().await;
    let (status, body) = send(&router, "POST", "/api/league/next-week", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["week"], 1);

    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["team1"], "Lions");
    assert_eq!(matches[0]["team2"], "Tigers");
    assert_eq!(matches[0]["score1"], 2);
    assert_eq!(matches[0]["score2"], 1);
    assert_eq!(body["standings"][0]["points"], 3);
}

#[tokio::test]
async fn play_all_then_complete_message() {
    let router = initialized().await;
    let (status, body) = send(&router, "POST", "/api/league/play-all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weeks"].as_array().unwrap().len(), 6);
    assert!(body["champion"].is_string());

    let (status, body) = send(&router, "POST", "/api/league/next-week", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "League is complete");
    assert_eq!(body["week"], 6);

    let (_, status_body) = send(&router, "GET", "/api/status", None).await;
    assert_eq!(status_body["phase"], "completed");
}

#[tokio::test]
async fn matches_and_single_match() {
    let router = initialized().await;
    send(&router, "POST", "/api/league/next-week", None).await;

    let (status, body) = send(&router, "GET", "/api/matches", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matches"].as_array().unwrap().len(), 2);
    assert_eq!(body["stats"]["total_goals"], 6);
    assert_eq!(decimal_str(&body["stats"]["average_goals_per_match"]), "3");

    let (status, body) = send(&router, "GET", "/api/matches/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["home_team"], "Bears");

    let (status, body) = send(&router, "GET", "/api/matches/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn edit_by_teams_maps_orientation() {
    let router = initialized().await;
    send(&router, "POST", "/api/league/next-week", None).await;

    let edit = json!({"week": 1, "team1": "Tigers", "team2": "Lions", "score1": 4, "score2": 0});
    let (status, body) = send(&router, "POST", "/api/matches/edit", Some(edit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match"]["home_team"], "Lions");
    assert_eq!(body["match"]["home_goals"], 0);
    assert_eq!(body["match"]["away_goals"], 4);
    assert_eq!(body["standings"][0]["name"], "Tigers");
}

#[tokio::test]
async fn edit_by_id_and_rejections() {
    let router = initialized().await;
    send(&router, "POST", "/api/league/next-week", None).await;

    let (status, body) = send(
        &router,
        "PUT",
        "/api/matches/0",
        Some(json!({"home_goals": 1, "away_goals": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match"]["home_goals"], 1);

    let (status, body) = send(
        &router,
        "PUT",
        "/api/matches/0",
        Some(json!({"home_goals": -2, "away_goals": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, _) = send(
        &router,
        "POST",
        "/api/matches/edit",
        Some(json!({"week": 5, "team1": "Lions", "team2": "Tigers", "score1": 1, "score2": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_failure_is_service_unavailable() {
    let store = InMemoryStore::new();
    let router = router_with(store.clone(), FixedScoring::new(1, 0));
    send(&router, "POST", "/api/league/init", None).await;

    store.fail_writes(true);
    let (status, body) = send(&router, "POST", "/api/league/next-week", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], 503);

    let (_, body) = send(&router, "GET", "/api/status", None).await;
    assert_eq!(body["week"], 0);
}

#[tokio::test]
async fn fixtures_shrink_and_reset_restores() {
    let router = initialized().await;
    let (_, body) = send(&router, "GET", "/api/fixtures", None).await;
    assert_eq!(body["fixtures"].as_array().unwrap().len(), 12);

    send(&router, "POST", "/api/league/next-week", None).await;
    let (_, body) = send(&router, "GET", "/api/fixtures", None).await;
    assert_eq!(body["current_week"], 1);
    assert_eq!(body["fixtures"].as_array().unwrap().len(), 10);
    assert_eq!(body["fixtures"][0]["week"], 2);

    let (status, body) = send(&router, "POST", "/api/league/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"]["week"], 0);
    let (_, body) = send(&router, "GET", "/api/matches", None).await;
    assert!(body["matches"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn analytics_endpoints() {
    let router = initialized().await;
    send(&router, "POST", "/api/league/next-week", None).await;
    send(&router, "POST", "/api/league/next-week", None).await;

    let (status, body) = send(&router, "GET", "/api/teams/Lions/analysis", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team"], "Lions");
    assert_eq!(body["current_position"], 1);
    assert_eq!(decimal_str(&body["advanced_stats"]["win_rate"]), "100");
    assert_eq!(body["advanced_stats"]["current_form"], "not_enough_matches");

    let (status, _) = send(&router, "GET", "/api/teams/Eagles/analysis", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&router, "GET", "/api/league-stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["league_overview"]["total_teams"], 4);
    assert_eq!(body["league_overview"]["league_leader"], "Lions");
    assert_eq!(body["competition_status"], "Season In Progress");

    let (status, body) = send(&router, "GET", "/api/head-to-head/Tigers/Lions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matches_played"], 1);
    assert_eq!(body["team2_wins"], 1);
    assert_eq!(body["summary"], "Lions leads the head-to-head record");

    let (status, _) = send(&router, "GET", "/api/head-to-head/Lions/Eagles", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&router, "GET", "/api/head-to-head/Lions/Lions", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn export_wraps_history() {
    let router = initialized().await;
    send(&router, "POST", "/api/league/next-week", None).await;

    let (status, body) = send(&router, "GET", "/api/export/matches", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["season"], 1);
    assert!(body["generated_at"].is_string());
    let rows = body["matches"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["home_team"], "Lions");
    assert_eq!(rows[0]["home_goals"], 2);
}
