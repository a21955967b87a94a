//! Configuration loading and typed config structures for the league simulator.
//!
//! The canonical configuration lives in `league-config.yaml` next to the
//! server binary. Every section is optional; missing sections and fields fall
//! back to the canonical league: four teams, double round-robin, goal divisor
//! 15.

use std::collections::BTreeSet;
use std::path::Path;

use league_types::RoundRobinScheme;
use serde::Deserialize;

use crate::simulator::DEFAULT_GOAL_DIVISOR;

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "league-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an unusable league.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level league configuration.
///
/// Mirrors the structure of `league-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LeagueConfig {
    /// Competition settings (name, season, schedule, scoring, seed).
    #[serde(default)]
    pub league: LeagueSettings,

    /// Default roster seeded when the store holds no teams.
    #[serde(default)]
    pub roster: RosterConfig,

    /// Store and API endpoints.
    #[serde(default)]
    pub infrastructure: InfrastructureConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LeagueConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `DRAGONFLY_URL` overrides `infrastructure.dragonfly_url`
    /// - `LEAGUE_API_PORT` overrides `infrastructure.api_port`
    /// - `LEAGUE_SEED` overrides `league.seed`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, apply environment overrides
    /// and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply the environment overrides listed on [`Self::from_file`].
    pub fn apply_env_overrides(&mut self) {
        self.infrastructure.apply_env_overrides();
        if let Ok(val) = std::env::var("LEAGUE_SEED") {
            match val.parse::<u64>() {
                Ok(seed) => self.league.seed = Some(seed),
                Err(e) => tracing::warn!(value = %val, error = %e, "ignoring invalid LEAGUE_SEED"),
            }
        }
    }

    /// Check that the configuration describes a playable league.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the roster is empty or odd-sized,
    /// has duplicate names or zero strengths, or the goal divisor is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let teams = &self.roster.teams;
        if teams.len() < 2 || teams.len() % 2 != 0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "roster must contain an even number of teams (at least 2), got {}",
                    teams.len()
                ),
            });
        }

        let mut seen = BTreeSet::new();
        for team in teams {
            if team.name.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    reason: "team names must not be empty".to_owned(),
                });
            }
            if !seen.insert(team.name.as_str()) {
                return Err(ConfigError::Invalid {
                    reason: format!("duplicate team name: {}", team.name),
                });
            }
            if team.strength == 0 {
                return Err(ConfigError::Invalid {
                    reason: format!("team {} must have a positive strength", team.name),
                });
            }
        }

        if self.league.goal_divisor == 0 {
            return Err(ConfigError::Invalid {
                reason: "goal_divisor must be at least 1".to_owned(),
            });
        }

        Ok(())
    }
}

/// Competition-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeagueSettings {
    /// Human-readable league name.
    #[serde(default = "default_league_name")]
    pub name: String,

    /// Season number stamped on exported match history.
    #[serde(default = "default_season")]
    pub season: u32,

    /// Single or double round-robin.
    #[serde(default)]
    pub scheme: RoundRobinScheme,

    /// Divisor `D` of the goal distribution `[0, strength / D]`.
    #[serde(default = "default_goal_divisor")]
    pub goal_divisor: u32,

    /// Seed for the match RNG. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            name: default_league_name(),
            season: default_season(),
            scheme: RoundRobinScheme::default(),
            goal_divisor: default_goal_divisor(),
            seed: None,
        }
    }
}

/// Roster seeded into an empty store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterConfig {
    /// Teams in schedule order.
    #[serde(default = "default_teams")]
    pub teams: Vec<TeamSeed>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            teams: default_teams(),
        }
    }
}

/// One entry of the default roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamSeed {
    /// Team name.
    pub name: String,
    /// Strength rating.
    pub strength: u32,
}

/// Store and API endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InfrastructureConfig {
    /// `Dragonfly` URL. `None` keeps league state in memory.
    #[serde(default)]
    pub dragonfly_url: Option<String>,

    /// Address the HTTP API binds to.
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// Port the HTTP API listens on.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

impl InfrastructureConfig {
    /// Apply `DRAGONFLY_URL` and `LEAGUE_API_PORT` overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DRAGONFLY_URL") {
            self.dragonfly_url = Some(val);
        }
        if let Ok(val) = std::env::var("LEAGUE_API_PORT") {
            match val.parse::<u16>() {
                Ok(port) => self.api_port = port,
                Err(e) => {
                    tracing::warn!(value = %val, error = %e, "ignoring invalid LEAGUE_API_PORT");
                }
            }
        }
    }
}

impl Default for InfrastructureConfig {
    fn default() -> Self {
        Self {
            dragonfly_url: None,
            api_host: default_api_host(),
            api_port: default_api_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_league_name() -> String {
    "Football League".to_owned()
}

const fn default_season() -> u32 {
    1
}

const fn default_goal_divisor() -> u32 {
    DEFAULT_GOAL_DIVISOR
}

fn default_teams() -> Vec<TeamSeed> {
    [("Lions", 90), ("Tigers", 80), ("Bears", 70), ("Wolves", 60)]
        .into_iter()
        .map(|(name, strength)| TeamSeed {
            name: name.to_owned(),
            strength,
        })
        .collect()
}

fn default_api_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_api_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}
