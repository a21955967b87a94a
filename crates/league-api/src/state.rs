//! Shared application state for the API server.

use league_core::{League, LeagueStore, ScoringStrategy, StrengthScoring};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. The league serializes its own mutations, so the state needs no
/// further locking.
pub struct AppState<S, M = StrengthScoring> {
    /// The league engine.
    pub league: League<S, M>,
    /// Display name of the league.
    pub name: String,
}

impl<S: LeagueStore, M: ScoringStrategy> AppState<S, M> {
    /// Wrap a league.
    pub fn new(league: League<S, M>, name: impl Into<String>) -> Self {
        Self {
            league,
            name: name.into(),
        }
    }
}
