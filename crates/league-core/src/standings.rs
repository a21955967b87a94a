//! The league table, derived from the roster and the match log.
//!
//! Standings are never stored. Every call replays the played matches from a
//! zeroed record per roster team, which keeps the table trivially consistent
//! with the log after edits and resets.

use std::cmp::Ordering;
use std::collections::HashMap;

use league_types::{Match, Record, Standing, Team};

/// Compute the sorted league table.
///
/// Unplayed matches are skipped. Matches naming a team outside the roster
/// contribute nothing; the engine rejects such logs when they are loaded.
///
/// Rows are ordered by points, goal difference and goals scored (all
/// descending), then by team name ascending so the order is total.
pub fn compute_standings(teams: &[Team], matches: &[Match]) -> Vec<Standing> {
    let records = replay_records(teams, matches);

    let mut table: Vec<Standing> = teams
        .iter()
        .map(|team| {
            let record = records
                .get(team.name.as_str())
                .copied()
                .unwrap_or(Record::ZERO);
            Standing {
                name: team.name.clone(),
                record,
                goal_diff: record.goal_diff(),
            }
        })
        .collect();

    table.sort_by(table_order);
    table
}

/// Replay every played match into a fresh record per roster team, keyed by
/// name. Matches naming a team outside the roster are skipped.
///
/// This is the one replay loop: the table and the aggregate rebuild both go
/// through it.
pub(crate) fn replay_records<'a>(teams: &'a [Team], matches: &[Match]) -> HashMap<&'a str, Record> {
    let mut records: HashMap<&str, Record> = teams
        .iter()
        .map(|team| (team.name.as_str(), Record::ZERO))
        .collect();

    for m in matches.iter().filter(|m| m.played) {
        if let Some(home) = records.get_mut(m.home_team.as_str()) {
            home.add_result(m.home_goals, m.away_goals);
        }
        if let Some(away) = records.get_mut(m.away_team.as_str()) {
            away.add_result(m.away_goals, m.home_goals);
        }
    }
    records
}

/// Table ordering: better rows compare as `Less`.
pub fn table_order(a: &Standing, b: &Standing) -> Ordering {
    b.record
        .points
        .cmp(&a.record.points)
        .then_with(|| b.goal_diff.cmp(&a.goal_diff))
        .then_with(|| b.record.goals_for.cmp(&a.record.goals_for))
        .then_with(|| a.name.cmp(&b.name))
}

/// 1-based table position of `name`, if it is in the table.
pub fn position_of(table: &[Standing], name: &str) -> Option<u32> {
    table
        .iter()
        .position(|row| row.name == name)
        .and_then(|index| u32::try_from(index).ok())
        .map(|index| index.saturating_add(1))
}
