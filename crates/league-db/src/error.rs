//! Error types for the data layer.
//!
//! Everything surfaces as [`DbError`], which converts into the engine's
//! [`StoreError`] at the [`LeagueStore`](league_core::LeagueStore) boundary.

use league_core::StoreError;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `Dragonfly`/Redis operation failed.
    #[error("Dragonfly error: {0}")]
    Dragonfly(#[from] fred::error::Error),

    /// A value could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored value could not be decoded.
    #[error("Undecodable value at {key}: {source}")]
    Decode {
        /// Key holding the value.
        key: String,
        /// The decoder error.
        source: serde_json::Error,
    },

    /// A key was not found in `Dragonfly`.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Decode { key, source } => Self::Corrupt {
                key,
                message: source.to_string(),
            },
            DbError::KeyNotFound(key) => Self::Corrupt {
                key,
                message: "referenced key is missing".to_owned(),
            },
            other => Self::Backend {
                message: other.to_string(),
            },
        }
    }
}
