//! Error types for the league engine.

use crate::fixtures::ScheduleError;
use crate::store::StoreError;

/// Errors returned by [`League`](crate::league::League) operations.
///
/// Every failing operation leaves the in-memory league exactly as it was
/// before the call.
#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    /// The request was malformed (negative goals, same team twice, ...).
    #[error("invalid request: {reason}")]
    Validation {
        /// What was wrong with the request.
        reason: String,
    },

    /// The addressed match or team does not exist.
    #[error("not found: {what}")]
    NotFound {
        /// Description of what was looked up.
        what: String,
    },

    /// A store call failed. Nothing was committed in memory.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),

    /// The match log names a team that is not on the roster.
    #[error("match log references unknown team {name}")]
    UnknownTeam {
        /// The unrecognized team name.
        name: String,
    },

    /// A mutating operation was called before `init`.
    #[error("league has not been initialized")]
    NotInitialized,

    /// The roster cannot be scheduled.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// The supplied configuration is unusable.
    #[error("invalid league configuration: {reason}")]
    Config {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl LeagueError {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}
