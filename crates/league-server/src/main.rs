//! League simulator server.
//!
//! Wires configuration, structured logging, the store and the HTTP API.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `league-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (`RUST_LOG` wins over `logging.level`)
//! 3. Pick the store: Dragonfly when `dragonfly_url` is set, memory otherwise
//! 4. Build the league and load or seed its state
//! 5. Serve the API until `Ctrl-C`

mod error;

use std::path::Path;
use std::sync::Arc;

use league_api::{AppState, ServerConfig};
use league_core::config::LoggingConfig;
use league_core::{InMemoryStore, League, LeagueConfig, LeagueStore};
use league_db::DragonflyStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, store connection, league
/// initialization or the HTTP server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging is not up yet, so config errors surface through main's return.
    let config = load_config()?;
    init_logging(&config.logging);

    info!(
        league = config.league.name,
        season = config.league.season,
        teams = config.roster.teams.len(),
        scheme = ?config.league.scheme,
        goal_divisor = config.league.goal_divisor,
        seeded = config.league.seed.is_some(),
        "Configuration loaded"
    );

    match config.infrastructure.dragonfly_url.clone() {
        Some(url) => {
            let store = DragonflyStore::connect(&url).await.map_err(ServerError::from)?;
            info!("Using Dragonfly store");
            run(&config, store).await?;
        }
        None => {
            warn!("No dragonfly_url configured, league state will not survive a restart");
            run(&config, InMemoryStore::new()).await?;
        }
    }

    Ok(())
}

/// Build the league over `store`, load its state and serve it.
async fn run<S: LeagueStore + 'static>(config: &LeagueConfig, store: S) -> Result<(), ServerError> {
    let league = League::from_config(config, store)?;
    let status = league.init().await?;
    info!(
        week = status.week,
        max_week = status.max_week,
        matches_played = status.matches_played,
        "League ready"
    );

    let state = Arc::new(AppState::new(league, config.league.name.clone()));
    let server_config = ServerConfig::from(&config.infrastructure);
    league_api::start_server(&server_config, state).await?;
    Ok(())
}

/// Load `league-config.yaml` from the working directory, or defaults with
/// environment overrides when it does not exist.
fn load_config() -> Result<LeagueConfig, ServerError> {
    let config_path = Path::new(league_core::config::DEFAULT_CONFIG_FILE);
    if config_path.exists() {
        Ok(LeagueConfig::from_file(config_path)?)
    } else {
        let mut config = LeagueConfig::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
