//! The league's persistence contract on top of `Dragonfly`.
//!
//! # Key Patterns
//!
//! | Pattern | Type | Description |
//! |---------|------|-------------|
//! | `{ns}:roster` | List | Team names in roster order |
//! | `{ns}:team:{name}` | JSON | Full [`Team`] including aggregates |
//! | `{ns}:matches` | List | JSON [`Match`] rows in log order |
//!
//! The namespace defaults to `league`, so a single-league deployment uses
//! `league:roster`, `league:team:Lions` and `league:matches`.

use league_core::{LeagueStore, StoreError};
use league_types::{Match, Record, Team};

use crate::dragonfly::DragonflyPool;
use crate::error::DbError;

/// Default key namespace.
pub const DEFAULT_NAMESPACE: &str = "league";

/// Key builder for one league namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keys {
    namespace: String,
}

impl Keys {
    /// Keys under `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// The roster list key.
    pub fn roster(&self) -> String {
        format!("{}:roster", self.namespace)
    }

    /// The JSON key of one team.
    pub fn team(&self, name: &str) -> String {
        format!("{}:team:{name}", self.namespace)
    }

    /// The match log list key.
    pub fn matches(&self) -> String {
        format!("{}:matches", self.namespace)
    }
}

impl Default for Keys {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

/// [`LeagueStore`] backed by a `Dragonfly` instance.
#[derive(Clone)]
pub struct DragonflyStore {
    pool: DragonflyPool,
    keys: Keys,
}

impl DragonflyStore {
    /// Wrap an open pool, using the default namespace.
    pub fn new(pool: DragonflyPool) -> Self {
        Self::with_keys(pool, Keys::default())
    }

    /// Wrap an open pool with explicit keys.
    pub const fn with_keys(pool: DragonflyPool, keys: Keys) -> Self {
        Self { pool, keys }
    }

    /// Connect to `url` and use the default namespace.
    ///
    /// # Errors
    ///
    /// As for [`DragonflyPool::connect`].
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        Ok(Self::new(DragonflyPool::connect(url).await?))
    }

    /// Delete every key of this namespace.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if any read or delete fails.
    pub async fn purge(&self) -> Result<(), DbError> {
        let roster_key = self.keys.roster();
        for name in self.pool.list_strs(&roster_key).await? {
            self.pool.delete(&self.keys.team(&name)).await?;
        }
        self.pool.delete(&roster_key).await?;
        self.pool.delete(&self.keys.matches()).await?;
        tracing::warn!(namespace = %self.keys.namespace, "purged league keys");
        Ok(())
    }

    async fn roster_names(&self) -> Result<Vec<String>, DbError> {
        self.pool.list_strs(&self.keys.roster()).await
    }

    async fn put_team(&self, team: &Team, roster: &[String]) -> Result<bool, DbError> {
        self.pool.set_json(&self.keys.team(&team.name), team).await?;
        if roster.iter().any(|n| n == &team.name) {
            return Ok(false);
        }
        self.pool.push_str(&self.keys.roster(), &team.name).await?;
        Ok(true)
    }

    async fn zero_team(&self, name: &str) -> Result<(), DbError> {
        let key = self.keys.team(name);
        let mut team: Team = self.pool.get_json(&key).await?;
        team.record = Record::ZERO;
        self.pool.set_json(&key, &team).await
    }

    async fn load_teams_inner(&self) -> Result<Vec<Team>, DbError> {
        let mut teams = Vec::new();
        for name in self.roster_names().await? {
            teams.push(self.pool.get_json(&self.keys.team(&name)).await?);
        }
        Ok(teams)
    }

    async fn save_teams_inner(&self, teams: &[Team]) -> Result<(), DbError> {
        let mut roster = self.roster_names().await?;
        for team in teams {
            if self.put_team(team, &roster).await? {
                roster.push(team.name.clone());
            }
        }
        Ok(())
    }

    async fn update_match_inner(&self, m: &Match) -> Result<(), DbError> {
        let key = self.keys.matches();
        let log: Vec<Match> = self.pool.list_json(&key).await?;
        let (position, mut stored) = log
            .into_iter()
            .enumerate()
            .find(|(_, s)| {
                s.week == m.week && s.home_team == m.home_team && s.away_team == m.away_team
            })
            .ok_or_else(|| {
                DbError::KeyNotFound(format!(
                    "{key}[week {} {} v {}]",
                    m.week, m.home_team, m.away_team
                ))
            })?;
        let index = i64::try_from(position)
            .map_err(|e| DbError::Config(format!("match log index out of range: {e}")))?;

        stored.home_goals = m.home_goals;
        stored.away_goals = m.away_goals;
        stored.played = m.played;
        self.pool.set_list_json(&key, index, &stored).await
    }

    async fn save_match_inner(&self, m: &Match) -> Result<(), DbError> {
        let key = self.keys.matches();
        let log: Vec<Match> = self.pool.list_json(&key).await?;
        match log.iter().position(|s| s.id == m.id) {
            Some(position) => {
                let index = i64::try_from(position)
                    .map_err(|e| DbError::Config(format!("match log index out of range: {e}")))?;
                tracing::debug!(id = %m.id, "replacing stored match with same id");
                self.pool.set_list_json(&key, index, m).await
            }
            None => self.pool.push_json(&key, m).await,
        }
    }

    async fn reset_all_inner(&self) -> Result<(), DbError> {
        for name in self.roster_names().await? {
            self.zero_team(&name).await?;
        }
        Ok(())
    }
}

impl LeagueStore for DragonflyStore {
    async fn load_teams(&self) -> Result<Vec<Team>, StoreError> {
        Ok(self.load_teams_inner().await?)
    }

    async fn save_team(&self, team: &Team) -> Result<(), StoreError> {
        let roster = self.roster_names().await?;
        self.put_team(team, &roster).await?;
        Ok(())
    }

    async fn save_teams(&self, teams: &[Team]) -> Result<(), StoreError> {
        Ok(self.save_teams_inner(teams).await?)
    }

    async fn load_matches(&self) -> Result<Vec<Match>, StoreError> {
        Ok(self.pool.list_json(&self.keys.matches()).await?)
    }

    async fn save_match(&self, m: &Match) -> Result<(), StoreError> {
        Ok(self.save_match_inner(m).await?)
    }

    async fn update_match(&self, m: &Match) -> Result<(), StoreError> {
        Ok(self.update_match_inner(m).await?)
    }

    async fn clear_matches(&self) -> Result<(), StoreError> {
        Ok(self.pool.delete(&self.keys.matches()).await?)
    }

    async fn reset_all_team_stats(&self) -> Result<(), StoreError> {
        Ok(self.reset_all_inner().await?)
    }

    async fn reset_team_stats(&self, name: &str) -> Result<(), StoreError> {
        Ok(self.zero_team(name).await?)
    }
}
