//! Axum router construction.
//!
//! Assembles every route into a single [`Router`] with CORS and request
//! tracing. The dashboard is served from another origin, so CORS allows any
//! origin.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use league_core::{LeagueStore, ScoringStrategy};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete router for a league.
///
/// See [`handlers`] for the route table.
pub fn build_router<S, M>(state: Arc<AppState<S, M>>) -> Router
where
    S: LeagueStore + 'static,
    M: ScoringStrategy + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index::<S, M>))
        .route("/api/info", get(handlers::info::<S, M>))
        .route("/api/status", get(handlers::status::<S, M>))
        // Lifecycle
        .route("/api/league/init", post(handlers::init_league::<S, M>))
        .route("/api/league/next-week", post(handlers::next_week::<S, M>))
        .route("/api/league/play-all", post(handlers::play_all::<S, M>))
        .route("/api/league/reset", post(handlers::reset_league::<S, M>))
        // Table, matches, fixtures
        .route("/api/standings", get(handlers::standings::<S, M>))
        .route("/api/matches", get(handlers::list_matches::<S, M>))
        .route("/api/matches/edit", post(handlers::edit_match::<S, M>))
        .route(
            "/api/matches/{id}",
            get(handlers::get_match::<S, M>).put(handlers::edit_match_by_id::<S, M>),
        )
        .route("/api/fixtures", get(handlers::fixtures::<S, M>))
        // Analytics
        .route(
            "/api/teams/{name}/analysis",
            get(handlers::team_analysis::<S, M>),
        )
        .route("/api/league-stats", get(handlers::league_stats::<S, M>))
        .route(
            "/api/head-to-head/{team1}/{team2}",
            get(handlers::head_to_head::<S, M>),
        )
        .route("/api/export/matches", get(handlers::export_matches::<S, M>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
