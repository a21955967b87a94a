//! REST endpoint handlers.
//!
//! Every handler is generic over the store `S` and scoring strategy `M` of
//! the league it serves; the router instantiates them once.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | HTML status page |
//! | `GET` | `/api/info` | League name, version and schedule shape |
//! | `GET` | `/api/status` | Lifecycle phase and week |
//! | `POST` | `/api/league/init` | Load or seed the league |
//! | `POST` | `/api/league/next-week` | Play one week |
//! | `POST` | `/api/league/play-all` | Play the rest of the season |
//! | `POST` | `/api/league/reset` | Clear results |
//! | `GET` | `/api/standings` | League table |
//! | `GET` | `/api/matches` | Match log and totals |
//! | `GET` | `/api/matches/{id}` | Single match |
//! | `PUT` | `/api/matches/{id}` | Edit a result by id |
//! | `POST` | `/api/matches/edit` | Edit a result by week and teams |
//! | `GET` | `/api/fixtures` | Remaining fixtures |
//! | `GET` | `/api/teams/{name}/analysis` | Team analysis |
//! | `GET` | `/api/league-stats` | League overview |
//! | `GET` | `/api/head-to-head/{team1}/{team2}` | Head-to-head record |
//! | `GET` | `/api/export/matches` | Match history for predictions |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use league_core::{LeagueStore, ScoringStrategy, WeekOutcome, analysis};
use league_types::{LeaguePhase, MatchId, PredictionInput};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

type AppResult<T> = Result<T, ApiError>;

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /api/matches/edit`.
///
/// `score1` belongs to `team1` whichever side it played on.
#[derive(Debug, Deserialize)]
pub struct EditByTeamsRequest {
    /// Week of the match (1-based).
    pub week: u32,
    /// First team.
    pub team1: String,
    /// Second team.
    pub team2: String,
    /// Goals of `team1`.
    pub score1: i64,
    /// Goals of `team2`.
    pub score2: i64,
}

/// Body of `PUT /api/matches/{id}`.
#[derive(Debug, Deserialize)]
pub struct EditByIdRequest {
    /// New home goals.
    pub home_goals: i64,
    /// New away goals.
    pub away_goals: i64,
}

const fn phase_label(phase: LeaguePhase) -> &'static str {
    match phase {
        LeaguePhase::Uninitialized => "Not Initialized",
        LeaguePhase::Active => "Season In Progress",
        LeaguePhase::Completed => "Season Complete",
    }
}

/// Escape text for use inside HTML element content and attribute values.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// ---------------------------------------------------------------------------
// GET / -- status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page with the current week, the table and links to
/// the JSON endpoints.
pub async fn index<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
) -> impl IntoResponse {
    let snapshot = state.league.snapshot().await;

    let rows: String = snapshot
        .standings()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                i.saturating_add(1),
                escape_html(&s.name),
                s.record.played,
                s.record.won,
                s.record.drawn,
                s.record.lost,
                s.record.points
            )
        })
        .collect();

    let name = escape_html(&state.name);
    let phase = phase_label(snapshot.phase());
    let week = snapshot.week;
    let max_week = snapshot.max_week;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{name}</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        table {{ border-collapse: collapse; margin: 1rem 0; }}
        td, th {{ border: 1px solid #30363d; padding: 0.3rem 0.8rem; text-align: right; }}
        td:nth-child(2), th:nth-child(2) {{ text-align: left; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        .status {{ color: #3fb950; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>{name}</h1>
    <p class="subtitle">League simulator API</p>
    <p>Status: <span class="status">{phase}</span> (week {week} of {max_week})</p>
    <table>
        <tr><th>#</th><th>Team</th><th>P</th><th>W</th><th>D</th><th>L</th><th>Pts</th></tr>
        {rows}
    </table>
    <ul>
        <li>GET <a href="/api/standings">/api/standings</a></li>
        <li>GET <a href="/api/matches">/api/matches</a></li>
        <li>GET <a href="/api/fixtures">/api/fixtures</a></li>
        <li>GET <a href="/api/league-stats">/api/league-stats</a></li>
        <li>GET <a href="/api/export/matches">/api/export/matches</a></li>
        <li>POST /api/league/init</li>
        <li>POST /api/league/next-week</li>
        <li>POST /api/league/play-all</li>
        <li>POST /api/league/reset</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// Info and lifecycle
// ---------------------------------------------------------------------------

/// `GET /api/info`
pub async fn info<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
) -> impl IntoResponse {
    let status = state.league.status().await;
    Json(json!({
        "name": state.name,
        "version": env!("CARGO_PKG_VERSION"),
        "season": state.league.season(),
        "scheme": state.league.scheme(),
        "teams": status.teams,
        "max_week": status.max_week,
    }))
}

/// `GET /api/status`
pub async fn status<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
) -> impl IntoResponse {
    Json(state.league.status().await)
}

/// `POST /api/league/init`
pub async fn init_league<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
) -> AppResult<impl IntoResponse> {
    let status = state.league.init().await?;
    Ok(Json(json!({
        "message": "League initialized",
        "status": status,
    })))
}

/// `POST /api/league/next-week`
///
/// Once the season is complete this still answers `200` with the final
/// table and a message.
pub async fn next_week<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
) -> AppResult<impl IntoResponse> {
    let tabled = state.league.play_next_week_tabled().await?;

    let body = match tabled.value {
        WeekOutcome::Played { week, matches } => json!({
            "week": week,
            "matches": matches,
            "standings": tabled.standings,
        }),
        WeekOutcome::Complete => json!({
            "message": "League is complete",
            "week": tabled.week,
            "standings": tabled.standings,
        }),
    };
    Ok(Json(body))
}

/// `POST /api/league/play-all`
pub async fn play_all<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
) -> AppResult<impl IntoResponse> {
    let tabled = state.league.play_all_tabled().await?;
    let standings = tabled.standings;
    let champion = standings.first().map(|s| s.name.clone());

    let weeks: Vec<serde_json::Value> = tabled
        .value
        .into_iter()
        .map(|r| {
            json!({
                "week": r.week,
                "matches": r.matches,
                "standings": r.standings,
            })
        })
        .collect();

    Ok(Json(json!({
        "message": "All remaining weeks played",
        "weeks": weeks,
        "final_standings": standings,
        "champion": champion,
    })))
}

/// `POST /api/league/reset`
pub async fn reset_league<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
) -> AppResult<impl IntoResponse> {
    let status = state.league.reset().await?;
    Ok(Json(json!({
        "message": "League reset",
        "status": status,
    })))
}

// ---------------------------------------------------------------------------
// Table, matches and fixtures
// ---------------------------------------------------------------------------

/// `GET /api/standings`
pub async fn standings<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
) -> impl IntoResponse {
    let snapshot = state.league.snapshot().await;
    Json(json!({
        "week": snapshot.week,
        "status": phase_label(snapshot.phase()),
        "standings": snapshot.standings(),
    }))
}

/// `GET /api/matches`
pub async fn list_matches<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
) -> impl IntoResponse {
    let matches = state.league.matches().await;
    let stats = analysis::match_log_stats(&matches);
    Json(json!({
        "matches": matches,
        "stats": stats,
    }))
}

/// `GET /api/matches/{id}`
pub async fn get_match<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
    Path(id): Path<u64>,
) -> AppResult<impl IntoResponse> {
    let m = state.league.match_by_id(MatchId::new(id)).await?;
    Ok(Json(m))
}

/// `PUT /api/matches/{id}`
pub async fn edit_match_by_id<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
    Path(id): Path<u64>,
    Json(body): Json<EditByIdRequest>,
) -> AppResult<impl IntoResponse> {
    let edited = state
        .league
        .edit_match_result_by_id_tabled(MatchId::new(id), body.home_goals, body.away_goals)
        .await?;
    Ok(Json(json!({
        "message": "Match result updated",
        "match": edited.value,
        "standings": edited.standings,
    })))
}

/// `POST /api/matches/edit`
pub async fn edit_match<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
    Json(body): Json<EditByTeamsRequest>,
) -> AppResult<impl IntoResponse> {
    let edited = state
        .league
        .edit_match_result_tabled(body.week, &body.team1, &body.team2, body.score1, body.score2)
        .await?;
    Ok(Json(json!({
        "message": "Match result updated",
        "match": edited.value,
        "standings": edited.standings,
    })))
}

/// `GET /api/fixtures`
pub async fn fixtures<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
) -> impl IntoResponse {
    let status = state.league.status().await;
    Json(json!({
        "current_week": status.week,
        "fixtures": state.league.future_fixtures().await,
    }))
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// `GET /api/teams/{name}/analysis`
pub async fn team_analysis<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.league.snapshot().await;
    let table = snapshot.standings();
    analysis::team_analysis(&name, &table, &snapshot.matches)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("team {name}")))
}

/// `GET /api/league-stats`
pub async fn league_stats<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.league.snapshot().await;
    let table = snapshot.standings();
    let overview = analysis::league_stats(&table, &snapshot.matches, snapshot.week)
        .ok_or(league_core::LeagueError::NotInitialized)?;

    Ok(Json(json!({
        "league_overview": overview,
        "standings": table,
        "competition_status": phase_label(snapshot.phase()),
    })))
}

/// `GET /api/head-to-head/{team1}/{team2}`
pub async fn head_to_head<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
    Path((team1, team2)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    if team1 == team2 {
        return Err(ApiError::InvalidRequest(format!(
            "head-to-head needs two different teams, got {team1} twice"
        )));
    }

    let snapshot = state.league.snapshot().await;
    for name in [&team1, &team2] {
        if !snapshot.teams.iter().any(|t| &t.name == name) {
            return Err(ApiError::NotFound(format!("team {name}")));
        }
    }

    Ok(Json(analysis::head_to_head(
        &team1,
        &team2,
        &snapshot.matches,
    )))
}

/// `GET /api/export/matches`
pub async fn export_matches<S: LeagueStore, M: ScoringStrategy>(
    State(state): State<Arc<AppState<S, M>>>,
) -> impl IntoResponse {
    Json(PredictionInput {
        season: state.league.season(),
        generated_at: chrono::Utc::now(),
        matches: state.league.prediction_input().await,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<script>"x" & 'y'</script>"#),
            "&lt;script&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape_html("Lions"), "Lions");
    }
}
