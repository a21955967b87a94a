//! Full recalculation of team aggregates from the match log.
//!
//! The aggregates on [`Team`] are a cache. After an edit the engine throws
//! the cache away and replays the whole log, which is the only way to undo a
//! result that was applied incrementally weeks earlier.
//!
//! [`verify_consistency`] checks the same property without mutating: for
//! every team, the cached record must equal the replayed one.

use std::collections::HashMap;

use league_types::{Match, Record, Team};

use crate::error::LeagueError;
use crate::standings::replay_records;

/// The result of comparing cached aggregates against a replay of the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Consistency {
    /// Every team's cached record equals the replay.
    Consistent,
    /// One or more teams drifted.
    Drift(Vec<TeamDrift>),
}

impl Consistency {
    /// Whether no drift was found.
    pub const fn is_consistent(&self) -> bool {
        matches!(self, Self::Consistent)
    }
}

/// A team whose cached record disagrees with the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDrift {
    /// Team name.
    pub team: String,
    /// Record cached on the team.
    pub cached: Record,
    /// Record produced by replaying the log.
    pub expected: Record,
}

/// Check that every match in the log names rostered teams.
///
/// # Errors
///
/// Returns [`LeagueError::UnknownTeam`] for the first name that is not on
/// the roster.
pub fn check_references(teams: &[Team], matches: &[Match]) -> Result<(), LeagueError> {
    for m in matches {
        for name in [&m.home_team, &m.away_team] {
            if !teams.iter().any(|t| &t.name == name) {
                return Err(LeagueError::UnknownTeam { name: name.clone() });
            }
        }
    }
    Ok(())
}

/// Check references, then replay the log through the shared replay loop.
fn replay<'a>(teams: &'a [Team], matches: &[Match]) -> Result<HashMap<&'a str, Record>, LeagueError> {
    check_references(teams, matches)?;
    Ok(replay_records(teams, matches))
}

/// Zero every team's aggregates and replay the full log into them.
///
/// Strengths and roster order are untouched. On error the teams are left
/// exactly as they were.
///
/// # Errors
///
/// Returns [`LeagueError::UnknownTeam`] if the log names a team that is not
/// on the roster.
pub fn rebuild_aggregates(teams: &mut [Team], matches: &[Match]) -> Result<(), LeagueError> {
    let rebuilt: Vec<Record> = {
        let records = replay(teams, matches)?;
        teams
            .iter()
            .map(|t| records.get(t.name.as_str()).copied().unwrap_or(Record::ZERO))
            .collect()
    };

    for (team, record) in teams.iter_mut().zip(rebuilt) {
        team.record = record;
    }
    Ok(())
}

/// Compare cached aggregates against a replay of the log.
///
/// # Errors
///
/// Returns [`LeagueError::UnknownTeam`] if the log names a team that is not
/// on the roster.
pub fn verify_consistency(teams: &[Team], matches: &[Match]) -> Result<Consistency, LeagueError> {
    let records = replay(teams, matches)?;

    let drift: Vec<TeamDrift> = teams
        .iter()
        .filter_map(|team| {
            let expected = records
                .get(team.name.as_str())
                .copied()
                .unwrap_or(Record::ZERO);
            (team.record != expected).then(|| TeamDrift {
                team: team.name.clone(),
                cached: team.record,
                expected,
            })
        })
        .collect();

    if drift.is_empty() {
        Ok(Consistency::Consistent)
    } else {
        Ok(Consistency::Drift(drift))
    }
}
