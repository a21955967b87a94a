//! Enumeration types for the league simulator.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Result of a match from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Outcome {
    /// This side scored strictly more goals.
    Win,
    /// Both sides scored the same number of goals.
    Draw,
    /// This side scored strictly fewer goals.
    Loss,
}

impl Outcome {
    /// Classify a scoreline from the perspective of the side that scored
    /// `goals_for`.
    pub const fn from_goals(goals_for: u32, goals_against: u32) -> Self {
        if goals_for > goals_against {
            Self::Win
        } else if goals_for < goals_against {
            Self::Loss
        } else {
            Self::Draw
        }
    }

    /// League points awarded for this outcome (3 / 1 / 0).
    pub const fn points(self) -> u32 {
        match self {
            Self::Win => 3,
            Self::Draw => 1,
            Self::Loss => 0,
        }
    }
}

/// Lifecycle phase of a league.
///
/// `Uninitialized -> Active -> Completed`. A reset returns a league to
/// `Active` at week 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LeaguePhase {
    /// The roster and match log have not been loaded yet.
    Uninitialized,
    /// Weeks remain to be played.
    Active,
    /// Every scheduled week has been played.
    Completed,
}

/// Round-robin scheme used to build the season schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RoundRobinScheme {
    /// Every pair meets once: `N - 1` weeks.
    Single,
    /// Every pair meets twice with home and away swapped: `2 (N - 1)` weeks.
    #[default]
    Double,
}

/// Recent form label derived from a team's last three matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Form {
    /// Two or more wins.
    Excellent,
    /// One win and at least one draw.
    Good,
    /// Two or more draws.
    Average,
    /// Anything else.
    Poor,
    /// Fewer than three matches played.
    NotEnoughMatches,
}
