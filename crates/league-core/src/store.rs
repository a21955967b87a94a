//! Persistence contract for league state, and an in-memory implementation.
//!
//! The engine never assumes durability: it awaits each call, propagates
//! failures and only commits its own state once the store has accepted
//! every write of an operation.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use league_types::{Match, Record, Team};
use tokio::sync::Mutex;

/// Errors reported by a [`LeagueStore`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backend rejected or failed the call.
    #[error("store backend error: {message}")]
    Backend {
        /// Backend-supplied description.
        message: String,
    },

    /// A stored value could not be decoded.
    #[error("corrupt value at {key}: {message}")]
    Corrupt {
        /// Key of the unreadable value.
        key: String,
        /// Decoder error.
        message: String,
    },
}

/// Operations the engine needs from its persistence collaborator.
///
/// `update_match` is keyed by week, home team and away team. `save_match`
/// is keyed by match id, so saving the same match twice leaves one row.
/// Matches are returned by `load_matches` in the order they were first
/// saved.
pub trait LeagueStore: Send + Sync {
    /// Load the roster in roster order. An empty roster means a fresh store.
    fn load_teams(&self) -> impl Future<Output = Result<Vec<Team>, StoreError>> + Send;

    /// Insert or replace one team.
    fn save_team(&self, team: &Team) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Insert or replace every given team, keeping their order as the roster
    /// order.
    fn save_teams(&self, teams: &[Team]) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Load the match log in log order.
    fn load_matches(&self) -> impl Future<Output = Result<Vec<Match>, StoreError>> + Send;

    /// Append a match to the log, or replace the stored match with the same
    /// id.
    fn save_match(&self, m: &Match) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Replace the goals of the match with the same week, home and away team.
    fn update_match(&self, m: &Match) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Remove every match.
    fn clear_matches(&self) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Zero the aggregates of every team, keeping names and strengths.
    fn reset_all_team_stats(&self) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Zero the aggregates of one team.
    fn reset_team_stats(&self, name: &str)
    -> impl Future<Output = Result<(), StoreError>> + Send;
}

impl<T: LeagueStore> LeagueStore for Arc<T> {
    fn load_teams(&self) -> impl Future<Output = Result<Vec<Team>, StoreError>> + Send {
        T::load_teams(self)
    }

    fn save_team(&self, team: &Team) -> impl Future<Output = Result<(), StoreError>> + Send {
        T::save_team(self, team)
    }

    fn save_teams(&self, teams: &[Team]) -> impl Future<Output = Result<(), StoreError>> + Send {
        T::save_teams(self, teams)
    }

    fn load_matches(&self) -> impl Future<Output = Result<Vec<Match>, StoreError>> + Send {
        T::load_matches(self)
    }

    fn save_match(&self, m: &Match) -> impl Future<Output = Result<(), StoreError>> + Send {
        T::save_match(self, m)
    }

    fn update_match(&self, m: &Match) -> impl Future<Output = Result<(), StoreError>> + Send {
        T::update_match(self, m)
    }

    fn clear_matches(&self) -> impl Future<Output = Result<(), StoreError>> + Send {
        T::clear_matches(self)
    }

    fn reset_all_team_stats(&self) -> impl Future<Output = Result<(), StoreError>> + Send {
        T::reset_all_team_stats(self)
    }

    fn reset_team_stats(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        T::reset_team_stats(self, name)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    teams: Vec<Team>,
    matches: Vec<Match>,
}

/// A process-local store.
///
/// Clones share the same state, so a test can keep a handle while the
/// league owns another. Writes can be made to fail on demand with
/// [`InMemoryStore::fail_writes`], or after a number of successful writes
/// with [`InMemoryStore::fail_after_writes`].
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
    fail_writes: Arc<AtomicBool>,
    write_budget: Arc<AtomicUsize>,
}

const UNLIMITED_WRITES: usize = usize::MAX;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_state(Vec::new(), Vec::new())
    }
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a roster and match log.
    pub fn with_state(teams: Vec<Team>, matches: Vec<Match>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState { teams, matches })),
            fail_writes: Arc::new(AtomicBool::new(false)),
            write_budget: Arc::new(AtomicUsize::new(UNLIMITED_WRITES)),
        }
    }

    /// Make every subsequent write fail, or succeed again. Either way any
    /// budget set by [`InMemoryStore::fail_after_writes`] is cleared.
    pub fn fail_writes(&self, fail: bool) {
        self.write_budget.store(UNLIMITED_WRITES, Ordering::SeqCst);
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Accept the next `writes` writes, then fail every write after them.
    pub fn fail_after_writes(&self, writes: usize) {
        self.fail_writes.store(false, Ordering::SeqCst);
        self.write_budget
            .store(writes.min(UNLIMITED_WRITES.saturating_sub(1)), Ordering::SeqCst);
    }

    /// Current roster snapshot.
    pub async fn teams(&self) -> Vec<Team> {
        self.state.lock().await.teams.clone()
    }

    /// Current match log snapshot.
    pub async fn matches(&self) -> Vec<Match> {
        self.state.lock().await.matches.clone()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend {
                message: "writes disabled".to_owned(),
            });
        }
        self.write_budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                UNLIMITED_WRITES => Some(left),
                0 => None,
                _ => Some(left.saturating_sub(1)),
            })
            .map(|_| ())
            .map_err(|left| StoreError::Backend {
                message: format!("write budget exhausted ({left} left)"),
            })
    }
}

fn upsert(teams: &mut Vec<Team>, team: &Team) {
    match teams.iter_mut().find(|t| t.name == team.name) {
        Some(existing) => existing.clone_from(team),
        None => teams.push(team.clone()),
    }
}

impl LeagueStore for InMemoryStore {
    async fn load_teams(&self) -> Result<Vec<Team>, StoreError> {
        Ok(self.teams().await)
    }

    async fn save_team(&self, team: &Team) -> Result<(), StoreError> {
        self.check_writable()?;
        upsert(&mut self.state.lock().await.teams, team);
        Ok(())
    }

    async fn save_teams(&self, teams: &[Team]) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut state = self.state.lock().await;
        for team in teams {
            upsert(&mut state.teams, team);
        }
        Ok(())
    }

    async fn load_matches(&self) -> Result<Vec<Match>, StoreError> {
        Ok(self.matches().await)
    }

    async fn save_match(&self, m: &Match) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut state = self.state.lock().await;
        match state.matches.iter_mut().find(|s| s.id == m.id) {
            Some(existing) => existing.clone_from(m),
            None => state.matches.push(m.clone()),
        }
        Ok(())
    }

    async fn update_match(&self, m: &Match) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut state = self.state.lock().await;
        let stored = state
            .matches
            .iter_mut()
            .find(|s| s.week == m.week && s.home_team == m.home_team && s.away_team == m.away_team)
            .ok_or_else(|| StoreError::Backend {
                message: format!(
                    "no match in week {} between {} and {}",
                    m.week, m.home_team, m.away_team
                ),
            })?;
        stored.home_goals = m.home_goals;
        stored.away_goals = m.away_goals;
        stored.played = m.played;
        Ok(())
    }

    async fn clear_matches(&self) -> Result<(), StoreError> {
        self.check_writable()?;
        self.state.lock().await.matches.clear();
        Ok(())
    }

    async fn reset_all_team_stats(&self) -> Result<(), StoreError> {
        self.check_writable()?;
        for team in &mut self.state.lock().await.teams {
            team.record = Record::ZERO;
        }
        Ok(())
    }

    async fn reset_team_stats(&self, name: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        if let Some(team) = self
            .state
            .lock()
            .await
            .teams
            .iter_mut()
            .find(|t| t.name == name)
        {
            team.record = Record::ZERO;
        }
        Ok(())
    }
}
