//! Read-only analytics over the standings table and the match log.
//!
//! Every function here is pure. Ratios use [`Decimal`] rounded to two
//! places so the API never serializes binary floating-point noise.

use league_types::{
    AdvancedStats, Form, HeadToHead, LeagueOverview, Match, MatchLogStats, Outcome, Standing,
    TeamAnalysis,
};
use rust_decimal::Decimal;

use crate::standings::position_of;

/// Number of recent matches that determine [`Form`].
pub const FORM_WINDOW: usize = 3;

/// `numerator / denominator` rounded to two places, zero when the
/// denominator is zero.
fn ratio(numerator: u32, denominator: u32) -> Decimal {
    Decimal::from(numerator)
        .checked_div(Decimal::from(denominator))
        .unwrap_or(Decimal::ZERO)
        .round_dp(2)
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Totals and averages over the played matches of the log.
pub fn match_log_stats(matches: &[Match]) -> MatchLogStats {
    let played: Vec<&Match> = matches.iter().filter(|m| m.played).collect();
    let total_matches = count_u32(played.len());
    let total_goals = played
        .iter()
        .fold(0_u32, |acc, m| acc.saturating_add(m.total_goals()));
    let highest_scoring_match = played.iter().map(|m| m.total_goals()).max().unwrap_or(0);

    MatchLogStats {
        total_matches,
        total_goals,
        average_goals_per_match: ratio(total_goals, total_matches),
        highest_scoring_match,
    }
}

/// Form label from a team's matches in log order.
///
/// Only the last [`FORM_WINDOW`] matches count.
pub fn current_form(team: &str, team_matches: &[&Match]) -> Form {
    let Some(start) = team_matches.len().checked_sub(FORM_WINDOW) else {
        return Form::NotEnoughMatches;
    };

    let (wins, draws) = team_matches
        .iter()
        .skip(start)
        .filter_map(|m| m.outcome_for(team))
        .fold((0_u32, 0_u32), |(w, d), outcome| match outcome {
            Outcome::Win => (w.saturating_add(1), d),
            Outcome::Draw => (w, d.saturating_add(1)),
            Outcome::Loss => (w, d),
        });

    if wins >= 2 {
        Form::Excellent
    } else if wins == 1 && draws >= 1 {
        Form::Good
    } else if draws >= 2 {
        Form::Average
    } else {
        Form::Poor
    }
}

/// Position, rate statistics, form and match list for one team.
///
/// Returns `None` if the team is not in the table.
pub fn team_analysis(name: &str, standings: &[Standing], matches: &[Match]) -> Option<TeamAnalysis> {
    let row = standings.iter().find(|s| s.name == name)?;
    let current_position = position_of(standings, name)?;

    let team_matches: Vec<&Match> = matches
        .iter()
        .filter(|m| m.played && m.involves(name))
        .collect();

    let record = &row.record;
    let advanced_stats = AdvancedStats {
        win_rate: ratio(record.won.saturating_mul(100), record.played),
        points_per_game: ratio(record.points, record.played),
        goals_per_game: ratio(record.goals_for, record.played),
        goals_conceded_per_game: ratio(record.goals_against, record.played),
        current_form: current_form(name, &team_matches),
    };

    Some(TeamAnalysis {
        team: name.to_owned(),
        current_position,
        performance_summary: row.clone(),
        advanced_stats,
        matches_played: team_matches.into_iter().cloned().collect(),
    })
}

/// League-wide overview.
///
/// Ties for highest-scoring team and best defense go to the team higher in
/// the table. Returns `None` for an empty table.
pub fn league_stats(standings: &[Standing], matches: &[Match], week: u32) -> Option<LeagueOverview> {
    let leader = standings.first()?;

    // `max_by_key` keeps the last maximum, so scan in reverse table order.
    let highest_scoring = standings
        .iter()
        .rev()
        .max_by_key(|s| s.record.goals_for)
        .unwrap_or(leader);
    let best_defense = standings
        .iter()
        .min_by_key(|s| s.record.goals_against)
        .unwrap_or(leader);

    let log = match_log_stats(matches);

    Some(LeagueOverview {
        total_teams: count_u32(standings.len()),
        matches_played: log.total_matches,
        total_goals: log.total_goals,
        average_goals_per_match: log.average_goals_per_match,
        current_week: week,
        league_leader: leader.name.clone(),
        highest_scoring_team: highest_scoring.name.clone(),
        best_defense: best_defense.name.clone(),
    })
}

/// Record of the matches between `team1` and `team2`, from `team1`'s side.
pub fn head_to_head(team1: &str, team2: &str, matches: &[Match]) -> HeadToHead {
    let between: Vec<Match> = matches
        .iter()
        .filter(|m| m.played && m.is_between(team1, team2))
        .cloned()
        .collect();

    let (mut team1_wins, mut team2_wins, mut draws) = (0_u32, 0_u32, 0_u32);
    for outcome in between.iter().filter_map(|m| m.outcome_for(team1)) {
        match outcome {
            Outcome::Win => team1_wins = team1_wins.saturating_add(1),
            Outcome::Loss => team2_wins = team2_wins.saturating_add(1),
            Outcome::Draw => draws = draws.saturating_add(1),
        }
    }

    let summary = if between.is_empty() {
        "No matches played between these teams yet".to_owned()
    } else if team1_wins > team2_wins {
        format!("{team1} leads the head-to-head record")
    } else if team2_wins > team1_wins {
        format!("{team2} leads the head-to-head record")
    } else {
        "Even head-to-head record".to_owned()
    };

    HeadToHead {
        team1: team1.to_owned(),
        team2: team2.to_owned(),
        matches_played: count_u32(between.len()),
        team1_wins,
        team2_wins,
        draws,
        matches: between,
        summary,
    }
}
