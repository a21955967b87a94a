//! Shared type definitions for the league simulator.
//!
//! This crate is the single source of truth for the data types that cross
//! crate boundaries: the persisted entities, the derived table rows and the
//! analytics views. Types flow downstream to `TypeScript` via `ts-rs` for the
//! dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Numeric match identity
//! - [`enums`] -- Outcomes, lifecycle phase, schedule scheme, form
//! - [`structs`] -- Teams, matches, standings, views and analytics

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Form, LeaguePhase, Outcome, RoundRobinScheme};
pub use ids::MatchId;
pub use structs::{
    AdvancedStats, FixtureView, HeadToHead, HistoricalMatch, LeagueOverview, LeagueStatus, Match,
    MatchLogStats, MatchView, PredictionInput, Record, Standing, Team, TeamAnalysis,
};

#[cfg(test)]
mod tests {
    //! Binding generation for the dashboard.

    #[test]
    fn export_bindings() {
        // ts-rs writes the bindings into `bindings/` relative to the crate
        // root when `export_all` is called.
        use ts_rs::TS;

        let _ = crate::ids::MatchId::export_all();

        let _ = crate::enums::Outcome::export_all();
        let _ = crate::enums::LeaguePhase::export_all();
        let _ = crate::enums::RoundRobinScheme::export_all();
        let _ = crate::enums::Form::export_all();

        let _ = crate::structs::Record::export_all();
        let _ = crate::structs::Team::export_all();
        let _ = crate::structs::Match::export_all();
        let _ = crate::structs::Standing::export_all();
        let _ = crate::structs::MatchView::export_all();
        let _ = crate::structs::FixtureView::export_all();
        let _ = crate::structs::LeagueStatus::export_all();
        let _ = crate::structs::HistoricalMatch::export_all();
        let _ = crate::structs::PredictionInput::export_all();
        let _ = crate::structs::MatchLogStats::export_all();
        let _ = crate::structs::AdvancedStats::export_all();
        let _ = crate::structs::TeamAnalysis::export_all();
        let _ = crate::structs::LeagueOverview::export_all();
        let _ = crate::structs::HeadToHead::export_all();
    }
}
