//! League simulation and standings engine.
//!
//! This crate owns the algorithmic core of the league simulator:
//!
//! - [`fixtures`] -- Deterministic round-robin schedule generation
//! - [`simulator`] -- Pluggable scoreline generation from strength ratings
//! - [`standings`] -- The league table derived from the match log
//! - [`recalc`] -- Full aggregate rebuild and consistency verification
//! - [`league`] -- The week-advancing state machine behind one lock
//! - [`analysis`] -- Team, league and head-to-head analytics
//! - [`export`] -- Match history for the prediction service
//! - [`store`] -- The persistence contract and an in-memory store
//! - [`config`] -- YAML configuration with environment overrides
//! - [`error`] -- Engine error type

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod fixtures;
pub mod league;
pub mod recalc;
pub mod simulator;
pub mod standings;
pub mod store;

pub use config::{ConfigError, LeagueConfig};
pub use error::LeagueError;
pub use fixtures::{Pairing, Schedule, ScheduleError};
pub use league::{League, LeagueOptions, LeagueSnapshot, Tabled, WeekOutcome, WeekReport};
pub use recalc::{Consistency, TeamDrift};
pub use simulator::{DEFAULT_GOAL_DIVISOR, FixedScoring, Score, ScoringStrategy, StrengthScoring};
pub use standings::compute_standings;
pub use store::{InMemoryStore, LeagueStore, StoreError};
