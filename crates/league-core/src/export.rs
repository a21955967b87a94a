//! Match history in the shape the prediction service consumes.

use league_types::{HistoricalMatch, Match};

/// Convert the played part of the match log into historical rows.
///
/// Rows keep log order and are stamped with `season`.
pub fn prediction_input(season: u32, matches: &[Match]) -> Vec<HistoricalMatch> {
    matches
        .iter()
        .filter(|m| m.played)
        .map(|m| HistoricalMatch {
            season,
            week: m.week,
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            home_goals: m.home_goals,
            away_goals: m.away_goals,
        })
        .collect()
}
