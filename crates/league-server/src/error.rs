//! Error types for the league server binary.
//!
//! [`ServerError`] wraps every failure mode of startup and serving so that
//! `main` can propagate with `?`.

/// Top-level error for the league server binary.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: league_core::ConfigError,
    },

    /// Building or initializing the league failed.
    #[error("league error: {source}")]
    League {
        /// The underlying league error.
        #[from]
        source: league_core::LeagueError,
    },

    /// Connecting to Dragonfly failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying database error.
        #[from]
        source: league_db::DbError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("api error: {source}")]
    Api {
        /// The underlying API server error.
        #[from]
        source: league_api::ServerError,
    },
}
