//! Core entity structs for the league simulator.
//!
//! [`Team`] and [`Match`] are the persisted entities. [`Standing`] and the
//! view/analytics structs are derived on demand and never stored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Form, LeaguePhase, Outcome};
use crate::ids::MatchId;

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Cumulative results counters shared by [`Team`] and [`Standing`].
///
/// [`Record::add_result`] is the single scoring rule of the league. The
/// incremental path (a week being played), the full recalculation and the
/// standings aggregation all go through it, so the three can never disagree
/// on how a scoreline turns into points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Record {
    /// Matches played.
    pub played: u32,
    /// Matches won.
    pub won: u32,
    /// Matches drawn.
    pub drawn: u32,
    /// Matches lost.
    pub lost: u32,
    /// Goals scored.
    pub goals_for: u32,
    /// Goals conceded.
    pub goals_against: u32,
    /// League points (`3 * won + drawn`).
    pub points: u32,
}

impl Record {
    /// An all-zero record.
    pub const ZERO: Self = Self {
        played: 0,
        won: 0,
        drawn: 0,
        lost: 0,
        goals_for: 0,
        goals_against: 0,
        points: 0,
    };

    /// Apply one played match from this side's perspective.
    ///
    /// Returns the outcome for this side.
    pub const fn add_result(&mut self, goals_for: u32, goals_against: u32) -> Outcome {
        let outcome = Outcome::from_goals(goals_for, goals_against);
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(goals_for);
        self.goals_against = self.goals_against.saturating_add(goals_against);
        match outcome {
            Outcome::Win => self.won = self.won.saturating_add(1),
            Outcome::Draw => self.drawn = self.drawn.saturating_add(1),
            Outcome::Loss => self.lost = self.lost.saturating_add(1),
        }
        self.points = self.points.saturating_add(outcome.points());
        outcome
    }

    /// Goals scored minus goals conceded.
    pub fn goal_diff(&self) -> i64 {
        i64::from(self.goals_for).saturating_sub(i64::from(self.goals_against))
    }

    /// Zero every counter.
    pub const fn clear(&mut self) {
        *self = Self::ZERO;
    }

    /// Whether every counter is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// A roster entry: identity, strength rating and cached aggregates.
///
/// The aggregates are a cache of what replaying the match log would
/// produce; the match log is the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Team {
    /// Unique team name (the roster key).
    pub name: String,
    /// Strength rating driving the goal distribution.
    pub strength: u32,
    /// Cached cumulative results.
    #[serde(flatten)]
    pub record: Record,
}

impl Team {
    /// Create a team with zeroed aggregates.
    pub fn new(name: impl Into<String>, strength: u32) -> Self {
        Self {
            name: name.into(),
            strength,
            record: Record::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// A match in the league's log.
///
/// Created when a week is played; afterwards only the goal counts change,
/// and only through an explicit edit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Match {
    /// Position of the match in the log.
    pub id: MatchId,
    /// Week the match belongs to (1-based).
    pub week: u32,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Goals scored by the home team.
    pub home_goals: u32,
    /// Goals scored by the away team.
    pub away_goals: u32,
    /// Whether the match has been played.
    pub played: bool,
}

impl Match {
    /// Whether `team` took part in this match.
    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    /// Whether this match was between `a` and `b`, in either orientation.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.home_team == a && self.away_team == b) || (self.home_team == b && self.away_team == a)
    }

    /// Goals scored and conceded by `team`, if it played in this match.
    pub fn goals_of(&self, team: &str) -> Option<(u32, u32)> {
        if self.home_team == team {
            Some((self.home_goals, self.away_goals))
        } else if self.away_team == team {
            Some((self.away_goals, self.home_goals))
        } else {
            None
        }
    }

    /// Outcome for `team`, if it played in this match.
    pub fn outcome_for(&self, team: &str) -> Option<Outcome> {
        self.goals_of(team)
            .map(|(scored, conceded)| Outcome::from_goals(scored, conceded))
    }

    /// Total goals in the match.
    pub const fn total_goals(&self) -> u32 {
        self.home_goals.saturating_add(self.away_goals)
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// A row of the league table. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Standing {
    /// Team name.
    pub name: String,
    /// Cumulative results.
    #[serde(flatten)]
    pub record: Record,
    /// Goals scored minus goals conceded.
    #[ts(type = "number")]
    pub goal_diff: i64,
}

/// A just-played match as reported by a week advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MatchView {
    /// Week the match belongs to (1-based).
    pub week: u32,
    /// Home team name.
    pub team1: String,
    /// Away team name.
    pub team2: String,
    /// Home goals.
    pub score1: u32,
    /// Away goals.
    pub score2: u32,
}

impl From<&Match> for MatchView {
    fn from(m: &Match) -> Self {
        Self {
            week: m.week,
            team1: m.home_team.clone(),
            team2: m.away_team.clone(),
            score1: m.home_goals,
            score2: m.away_goals,
        }
    }
}

/// An unplayed fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FixtureView {
    /// Week the fixture belongs to (1-based).
    pub week: u32,
    /// Home team name.
    pub team1: String,
    /// Away team name.
    pub team2: String,
}

/// Summary of a league's position in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LeagueStatus {
    /// Lifecycle phase.
    pub phase: LeaguePhase,
    /// Weeks played so far.
    pub week: u32,
    /// Number of weeks in the schedule.
    pub max_week: u32,
    /// Roster size.
    pub teams: u32,
    /// Matches in the log.
    pub matches_played: u32,
}

// ---------------------------------------------------------------------------
// Prediction collaborator input
// ---------------------------------------------------------------------------

/// One row of the match history handed to the prediction collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HistoricalMatch {
    /// Season the match was played in.
    pub season: u32,
    /// Week within the season (1-based).
    pub week: u32,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Home goals.
    pub home_goals: u32,
    /// Away goals.
    pub away_goals: u32,
}

/// Envelope around the exported match history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PredictionInput {
    /// Season the rows belong to.
    pub season: u32,
    /// When the export was produced.
    pub generated_at: DateTime<Utc>,
    /// Played matches in log order.
    pub matches: Vec<HistoricalMatch>,
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// Aggregate numbers over the whole match log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MatchLogStats {
    /// Number of matches in the log.
    pub total_matches: u32,
    /// Goals across all matches.
    pub total_goals: u32,
    /// Mean goals per match, two decimal places.
    #[ts(as = "String")]
    pub average_goals_per_match: Decimal,
    /// Highest total goals in a single match.
    pub highest_scoring_match: u32,
}

/// Rate statistics for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AdvancedStats {
    /// Percentage of matches won.
    #[ts(as = "String")]
    pub win_rate: Decimal,
    /// Points per match.
    #[ts(as = "String")]
    pub points_per_game: Decimal,
    /// Goals scored per match.
    #[ts(as = "String")]
    pub goals_per_game: Decimal,
    /// Goals conceded per match.
    #[ts(as = "String")]
    pub goals_conceded_per_game: Decimal,
    /// Form over the last three matches.
    pub current_form: Form,
}

/// Performance breakdown for a single team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TeamAnalysis {
    /// Team name.
    pub team: String,
    /// 1-based position in the table.
    pub current_position: u32,
    /// The team's table row.
    pub performance_summary: Standing,
    /// Rate statistics.
    pub advanced_stats: AdvancedStats,
    /// Every match the team has played, in log order.
    pub matches_played: Vec<Match>,
}

/// League-wide overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LeagueOverview {
    /// Roster size.
    pub total_teams: u32,
    /// Matches in the log.
    pub matches_played: u32,
    /// Goals across all teams.
    pub total_goals: u32,
    /// Mean goals per match, two decimal places.
    #[ts(as = "String")]
    pub average_goals_per_match: Decimal,
    /// Weeks played so far.
    pub current_week: u32,
    /// Team at the top of the table.
    pub league_leader: String,
    /// Team with the most goals scored.
    pub highest_scoring_team: String,
    /// Team with the fewest goals conceded.
    pub best_defense: String,
}

/// Head-to-head record between two teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HeadToHead {
    /// First team as requested.
    pub team1: String,
    /// Second team as requested.
    pub team2: String,
    /// Matches between the two.
    pub matches_played: u32,
    /// Wins for `team1`.
    pub team1_wins: u32,
    /// Wins for `team2`.
    pub team2_wins: u32,
    /// Drawn matches.
    pub draws: u32,
    /// The matches, in log order.
    pub matches: Vec<Match>,
    /// One-line summary of who leads.
    pub summary: String,
}
