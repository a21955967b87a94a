//! The league state machine.
//!
//! [`League`] owns the roster, the match log, the current week and the
//! random source behind a single [`RwLock`]. Reads share the lock; every
//! mutation holds the write lock for its whole duration, store calls
//! included, so two callers can never play the same week twice.
//!
//! Mutations stage their changes on copies of the state, push them to the
//! store, and only then swap the copies in. A failed store call therefore
//! leaves memory exactly as it was before the operation.
//!
//! Store writes are ordered so an interrupted operation is repaired rather
//! than half-applied. A week saves its matches (upserted by id) before the
//! teams, so a retry overwrites the same rows, and on restart `init` sets
//! aside a trailing week the store holds only part of and rebuilds team
//! aggregates that lag behind the log. Edits and resets write team
//! aggregates before touching the log, so the log only ever changes as the
//! last step.
//!
//! Lifecycle:
//!
//! ```text
//! Uninitialized --init--> Active(week < max) --play--> Completed(week = max)
//!                            ^                             |
//!                            +------------reset------------+
//! ```

use std::collections::BTreeSet;

use league_types::{
    FixtureView, HistoricalMatch, LeaguePhase, LeagueStatus, Match, MatchId, MatchView,
    RoundRobinScheme, Standing, Team,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::RwLock;

use crate::config::LeagueConfig;
use crate::error::LeagueError;
use crate::export;
use crate::fixtures::{Pairing, Schedule};
use crate::recalc::{self, Consistency};
use crate::simulator::{ScoringStrategy, StrengthScoring};
use crate::standings::compute_standings;
use crate::store::LeagueStore;

/// Construction parameters for a [`League`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueOptions {
    /// Roster seeded into an empty store.
    pub roster: Vec<Team>,
    /// Single or double round-robin.
    pub scheme: RoundRobinScheme,
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Season number stamped on exported history.
    pub season: u32,
}

impl LeagueOptions {
    /// Derive options from a loaded configuration.
    pub fn from_config(config: &LeagueConfig) -> Self {
        Self {
            roster: config
                .roster
                .teams
                .iter()
                .map(|seed| Team::new(seed.name.clone(), seed.strength))
                .collect(),
            scheme: config.league.scheme,
            seed: config.league.seed,
            season: config.league.season,
        }
    }
}

impl Default for LeagueOptions {
    fn default() -> Self {
        Self::from_config(&LeagueConfig::default())
    }
}

/// Result of a week-advance request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekOutcome {
    /// A week was played.
    Played {
        /// The 1-based week that was just played.
        week: u32,
        /// The matches of that week.
        matches: Vec<MatchView>,
    },
    /// Every scheduled week has already been played. Nothing changed.
    Complete,
}

/// One week of a [`League::play_all`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekReport {
    /// The 1-based week.
    pub week: u32,
    /// The matches of that week.
    pub matches: Vec<MatchView>,
    /// The table after the week.
    pub standings: Vec<Standing>,
}

/// The result of a mutation together with the table as it stood when the
/// mutation released the write lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tabled<T> {
    /// What the mutation returned.
    pub value: T,
    /// Weeks played after the mutation.
    pub week: u32,
    /// The standings after the mutation.
    pub standings: Vec<Standing>,
}

impl<T> Tabled<T> {
    fn of(value: T, inner: &LeagueInner) -> Self {
        Self {
            value,
            week: inner.week,
            standings: compute_standings(&inner.teams, &inner.matches),
        }
    }
}

/// A consistent copy of league state, taken under one read lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueSnapshot {
    /// Roster with cached aggregates.
    pub teams: Vec<Team>,
    /// Match log.
    pub matches: Vec<Match>,
    /// Weeks played.
    pub week: u32,
    /// Schedule length in weeks.
    pub max_week: u32,
    /// Whether `init` has run.
    pub initialized: bool,
}

impl LeagueSnapshot {
    /// The standings table for this snapshot.
    pub fn standings(&self) -> Vec<Standing> {
        compute_standings(&self.teams, &self.matches)
    }

    /// Lifecycle phase of this snapshot.
    pub const fn phase(&self) -> LeaguePhase {
        phase_of(self.initialized, self.week, self.max_week)
    }
}

struct LeagueInner {
    teams: Vec<Team>,
    matches: Vec<Match>,
    week: u32,
    schedule: Schedule,
    initialized: bool,
    rng: StdRng,
}

impl LeagueInner {
    fn max_week(&self) -> u32 {
        u32::try_from(self.schedule.len()).unwrap_or(u32::MAX)
    }

    fn ensure_initialized(&self) -> Result<(), LeagueError> {
        if self.initialized {
            Ok(())
        } else {
            Err(LeagueError::NotInitialized)
        }
    }
}

/// A round-robin league backed by a [`LeagueStore`].
pub struct League<S, M = StrengthScoring> {
    store: S,
    scoring: M,
    scheme: RoundRobinScheme,
    default_roster: Vec<Team>,
    season: u32,
    inner: RwLock<LeagueInner>,
}

impl<S: LeagueStore> League<S, StrengthScoring> {
    /// Create a league with the default scoring strategy.
    ///
    /// # Errors
    ///
    /// Returns [`LeagueError::Schedule`] or [`LeagueError::Config`] if the
    /// roster cannot be scheduled.
    pub fn new(store: S, options: LeagueOptions) -> Result<Self, LeagueError> {
        Self::with_scoring(store, StrengthScoring::default(), options)
    }

    /// Create a league from a loaded configuration.
    ///
    /// # Errors
    ///
    /// As for [`League::new`].
    pub fn from_config(config: &LeagueConfig, store: S) -> Result<Self, LeagueError> {
        Self::with_scoring(
            store,
            StrengthScoring::new(config.league.goal_divisor),
            LeagueOptions::from_config(config),
        )
    }
}

impl<S: LeagueStore, M: ScoringStrategy> League<S, M> {
    /// Create a league with an explicit scoring strategy.
    ///
    /// The league starts `Uninitialized`; call [`League::init`] before
    /// playing.
    ///
    /// # Errors
    ///
    /// Returns [`LeagueError::Schedule`] if the roster size is odd or below
    /// two, or [`LeagueError::Config`] if team names repeat.
    pub fn with_scoring(store: S, scoring: M, options: LeagueOptions) -> Result<Self, LeagueError> {
        check_unique_names(&options.roster)?;
        let schedule = Schedule::generate(options.roster.len(), options.scheme)?;
        let rng = options
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        Ok(Self {
            store,
            scoring,
            scheme: options.scheme,
            default_roster: options.roster,
            season: options.season,
            inner: RwLock::new(LeagueInner {
                teams: Vec::new(),
                matches: Vec::new(),
                week: 0,
                schedule,
                initialized: false,
                rng,
            }),
        })
    }

    /// The store this league writes to.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Season number stamped on exported history.
    pub const fn season(&self) -> u32 {
        self.season
    }

    /// Round-robin scheme in use.
    pub const fn scheme(&self) -> RoundRobinScheme {
        self.scheme
    }

    /// Load (or seed) the roster and match log.
    ///
    /// An empty store is seeded with the configured roster. The current week
    /// becomes the highest week among played matches, clamped to the
    /// schedule length. Cached aggregates that disagree with the log are
    /// rebuilt and written back. Calling `init` again reloads from the store.
    ///
    /// # Errors
    ///
    /// [`LeagueError::Persistence`] on store failure,
    /// [`LeagueError::UnknownTeam`] if the log names a team not on the
    /// roster, [`LeagueError::Schedule`] if the stored roster cannot be
    /// scheduled.
    pub async fn init(&self) -> Result<LeagueStatus, LeagueError> {
        let mut inner = self.inner.write().await;

        let mut teams = self.store.load_teams().await?;
        if teams.is_empty() {
            teams.clone_from(&self.default_roster);
            self.store.save_teams(&teams).await?;
            tracing::info!(teams = teams.len(), "seeded default roster");
        }
        check_unique_names(&teams)?;
        let schedule = Schedule::generate(teams.len(), self.scheme)?;

        let mut matches = self.store.load_matches().await?;
        let set_aside = drop_incomplete_week(&mut matches, &schedule);
        if set_aside > 0 {
            tracing::warn!(
                matches = set_aside,
                "last stored week is incomplete, it will be replayed"
            );
        }
        if let Consistency::Drift(drift) = recalc::verify_consistency(&teams, &matches)? {
            for d in &drift {
                tracing::warn!(
                    team = %d.team,
                    cached_points = d.cached.points,
                    expected_points = d.expected.points,
                    "team aggregates drifted from match log"
                );
            }
            recalc::rebuild_aggregates(&mut teams, &matches)?;
            self.store.reset_all_team_stats().await?;
            self.store.save_teams(&teams).await?;
            tracing::info!(teams = drift.len(), "repaired drifted aggregates");
        }

        let max_week = u32::try_from(schedule.len()).unwrap_or(u32::MAX);
        let week = matches
            .iter()
            .filter(|m| m.played)
            .map(|m| m.week)
            .max()
            .unwrap_or(0)
            .min(max_week);

        inner.teams = teams;
        inner.matches = matches;
        inner.week = week;
        inner.schedule = schedule;
        inner.initialized = true;

        tracing::info!(
            week,
            max_week,
            teams = inner.teams.len(),
            matches = inner.matches.len(),
            "league initialized"
        );
        Ok(status_of(&inner))
    }

    /// Play the next scheduled week.
    ///
    /// Returns [`WeekOutcome::Complete`] without touching anything once the
    /// schedule is exhausted.
    ///
    /// # Errors
    ///
    /// [`LeagueError::NotInitialized`] before `init`,
    /// [`LeagueError::Persistence`] if any store write fails (nothing is
    /// committed in that case).
    pub async fn play_next_week(&self) -> Result<WeekOutcome, LeagueError> {
        Ok(self.play_next_week_tabled().await?.value)
    }

    /// [`League::play_next_week`], returning the table after the week from
    /// the same lock.
    ///
    /// # Errors
    ///
    /// As for [`League::play_next_week`].
    pub async fn play_next_week_tabled(&self) -> Result<Tabled<WeekOutcome>, LeagueError> {
        let mut inner = self.inner.write().await;
        inner.ensure_initialized()?;
        let outcome = self.play_week_locked(&mut inner).await?;
        Ok(Tabled::of(outcome, &inner))
    }

    /// Play every remaining week.
    ///
    /// Each week commits on its own; if a store write fails partway, the
    /// weeks before it stay played and the error is returned.
    ///
    /// # Errors
    ///
    /// As for [`League::play_next_week`].
    pub async fn play_all(&self) -> Result<Vec<WeekReport>, LeagueError> {
        Ok(self.play_all_tabled().await?.value)
    }

    /// [`League::play_all`], returning the final table from the same lock.
    ///
    /// # Errors
    ///
    /// As for [`League::play_next_week`].
    pub async fn play_all_tabled(&self) -> Result<Tabled<Vec<WeekReport>>, LeagueError> {
        let mut inner = self.inner.write().await;
        inner.ensure_initialized()?;

        let mut reports = Vec::new();
        while let WeekOutcome::Played { week, matches } = self.play_week_locked(&mut inner).await? {
            reports.push(WeekReport {
                week,
                matches,
                standings: compute_standings(&inner.teams, &inner.matches),
            });
        }
        tracing::info!(weeks = reports.len(), "played remaining season");
        Ok(Tabled::of(reports, &inner))
    }

    async fn play_week_locked(&self, inner: &mut LeagueInner) -> Result<WeekOutcome, LeagueError> {
        if inner.week >= inner.max_week() {
            tracing::debug!(week = inner.week, "season complete, nothing to play");
            return Ok(WeekOutcome::Complete);
        }

        let week_number = inner.week.saturating_add(1);
        let pairings: Vec<Pairing> = inner
            .schedule
            .week(usize::try_from(inner.week).unwrap_or(usize::MAX))
            .to_vec();

        let mut teams = inner.teams.clone();
        let mut rng = inner.rng.clone();
        let mut played = Vec::with_capacity(pairings.len());

        for pairing in pairings {
            let home = roster_entry(&teams, pairing.home)?;
            let away = roster_entry(&teams, pairing.away)?;
            let score = self.scoring.simulate(home.strength, away.strength, &mut rng);

            let m = Match {
                id: next_match_id(inner.matches.len().saturating_add(played.len())),
                week: week_number,
                home_team: home.name.clone(),
                away_team: away.name.clone(),
                home_goals: score.home,
                away_goals: score.away,
                played: true,
            };
            tracing::debug!(
                week = week_number,
                home = %m.home_team,
                away = %m.away_team,
                home_goals = m.home_goals,
                away_goals = m.away_goals,
                "match simulated"
            );

            for (index, scored, conceded) in [
                (pairing.home, score.home, score.away),
                (pairing.away, score.away, score.home),
            ] {
                teams
                    .get_mut(index)
                    .ok_or_else(|| LeagueError::not_found(format!("roster index {index}")))?
                    .record
                    .add_result(scored, conceded);
            }
            played.push(m);
        }

        // Matches before teams: a retry upserts the same ids, and init
        // rebuilds teams that lag behind the log.
        for m in &played {
            self.store.save_match(m).await?;
        }
        self.store.save_teams(&teams).await?;

        let views: Vec<MatchView> = played.iter().map(MatchView::from).collect();
        inner.teams = teams;
        inner.matches.extend(played);
        inner.week = week_number;
        inner.rng = rng;

        tracing::info!(week = week_number, matches = views.len(), "week played");
        Ok(WeekOutcome::Played {
            week: week_number,
            matches: views,
        })
    }

    /// Current standings, recomputed from the match log.
    ///
    /// Empty before `init`.
    pub async fn standings(&self) -> Vec<Standing> {
        let inner = self.inner.read().await;
        compute_standings(&inner.teams, &inner.matches)
    }

    /// The match log in log order.
    pub async fn matches(&self) -> Vec<Match> {
        self.inner.read().await.matches.clone()
    }

    /// Look up one match by identity.
    ///
    /// # Errors
    ///
    /// [`LeagueError::NotFound`] if no match has this id.
    pub async fn match_by_id(&self, id: MatchId) -> Result<Match, LeagueError> {
        self.inner
            .read()
            .await
            .matches
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| LeagueError::not_found(format!("match {id}")))
    }

    /// The roster with cached aggregates, in roster order.
    pub async fn teams(&self) -> Vec<Team> {
        self.inner.read().await.teams.clone()
    }

    /// Lifecycle summary.
    pub async fn status(&self) -> LeagueStatus {
        status_of(&*self.inner.read().await)
    }

    /// Copy of the whole state under one read lock.
    pub async fn snapshot(&self) -> LeagueSnapshot {
        let inner = self.inner.read().await;
        LeagueSnapshot {
            teams: inner.teams.clone(),
            matches: inner.matches.clone(),
            week: inner.week,
            max_week: inner.max_week(),
            initialized: inner.initialized,
        }
    }

    /// Fixtures of the weeks not yet played, by team name.
    ///
    /// Empty before `init` and once the season is complete.
    pub async fn future_fixtures(&self) -> Vec<FixtureView> {
        let inner = self.inner.read().await;
        if !inner.initialized {
            return Vec::new();
        }

        let teams = &inner.teams;
        let start = usize::try_from(inner.week).unwrap_or(usize::MAX);
        inner
            .schedule
            .weeks_from(start)
            .flat_map(|(index, pairings)| {
                let week = u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1);
                pairings.iter().filter_map(move |p| {
                    let home = teams.get(p.home)?;
                    let away = teams.get(p.away)?;
                    Some(FixtureView {
                        week,
                        team1: home.name.clone(),
                        team2: away.name.clone(),
                    })
                })
            })
            .collect()
    }

    /// Overwrite the result of the match `team_a` and `team_b` played in
    /// `week`, then rebuild every team's aggregates from the log.
    ///
    /// The teams may be given in either order: `score_a` is always the goals
    /// of `team_a`, whether it played at home or away.
    ///
    /// # Errors
    ///
    /// [`LeagueError::Validation`] for negative or oversized goals or the
    /// same team twice, [`LeagueError::NotFound`] if no such match exists,
    /// [`LeagueError::NotInitialized`] before `init`,
    /// [`LeagueError::Persistence`] if the store rejects the change.
    pub async fn edit_match_result(
        &self,
        week: u32,
        team_a: &str,
        team_b: &str,
        score_a: i64,
        score_b: i64,
    ) -> Result<Match, LeagueError> {
        self.edit_match_result_tabled(week, team_a, team_b, score_a, score_b)
            .await
            .map(|edited| edited.value)
    }

    /// [`League::edit_match_result`], returning the rebuilt table from the
    /// same lock.
    ///
    /// # Errors
    ///
    /// As for [`League::edit_match_result`].
    pub async fn edit_match_result_tabled(
        &self,
        week: u32,
        team_a: &str,
        team_b: &str,
        score_a: i64,
        score_b: i64,
    ) -> Result<Tabled<Match>, LeagueError> {
        let goals_a = goal_count(score_a)?;
        let goals_b = goal_count(score_b)?;
        if team_a == team_b {
            return Err(LeagueError::validation(format!(
                "a team cannot play itself: {team_a}"
            )));
        }

        let mut inner = self.inner.write().await;
        inner.ensure_initialized()?;

        let Some(index) = inner
            .matches
            .iter()
            .position(|m| m.week == week && m.is_between(team_a, team_b))
        else {
            tracing::warn!(week, team_a, team_b, "edit rejected: no such match");
            return Err(LeagueError::not_found(format!(
                "match between {team_a} and {team_b} in week {week}"
            )));
        };

        let stored_home_is_a = inner
            .matches
            .get(index)
            .is_some_and(|m| m.home_team == team_a);
        let (home_goals, away_goals) = if stored_home_is_a {
            (goals_a, goals_b)
        } else {
            (goals_b, goals_a)
        };

        let updated = self
            .apply_edit(&mut inner, index, home_goals, away_goals)
            .await?;
        Ok(Tabled::of(updated, &inner))
    }

    /// Overwrite the result of the match with identity `id`, then rebuild
    /// every team's aggregates from the log.
    ///
    /// # Errors
    ///
    /// As for [`League::edit_match_result`].
    pub async fn edit_match_result_by_id(
        &self,
        id: MatchId,
        home_goals: i64,
        away_goals: i64,
    ) -> Result<Match, LeagueError> {
        self.edit_match_result_by_id_tabled(id, home_goals, away_goals)
            .await
            .map(|edited| edited.value)
    }

    /// [`League::edit_match_result_by_id`], returning the rebuilt table from
    /// the same lock.
    ///
    /// # Errors
    ///
    /// As for [`League::edit_match_result`].
    pub async fn edit_match_result_by_id_tabled(
        &self,
        id: MatchId,
        home_goals: i64,
        away_goals: i64,
    ) -> Result<Tabled<Match>, LeagueError> {
        let home_goals = goal_count(home_goals)?;
        let away_goals = goal_count(away_goals)?;

        let mut inner = self.inner.write().await;
        inner.ensure_initialized()?;

        let Some(index) = inner.matches.iter().position(|m| m.id == id) else {
            tracing::warn!(%id, "edit rejected: no such match");
            return Err(LeagueError::not_found(format!("match {id}")));
        };

        let updated = self
            .apply_edit(&mut inner, index, home_goals, away_goals)
            .await?;
        Ok(Tabled::of(updated, &inner))
    }

    async fn apply_edit(
        &self,
        inner: &mut LeagueInner,
        index: usize,
        home_goals: u32,
        away_goals: u32,
    ) -> Result<Match, LeagueError> {
        let mut matches = inner.matches.clone();
        let updated = {
            let m = matches
                .get_mut(index)
                .ok_or_else(|| LeagueError::not_found(format!("match at position {index}")))?;
            m.home_goals = home_goals;
            m.away_goals = away_goals;
            m.played = true;
            m.clone()
        };

        let mut teams = inner.teams.clone();
        recalc::rebuild_aggregates(&mut teams, &matches)?;

        // Teams first, the log last. Until the log changes, init repairs any
        // team rows written here back to the old result.
        self.store.reset_all_team_stats().await?;
        self.store.save_teams(&teams).await?;
        if let Err(e) = self.store.update_match(&updated).await {
            self.restore_teams(&inner.teams).await;
            return Err(e.into());
        }

        inner.matches = matches;
        inner.teams = teams;

        tracing::info!(
            id = %updated.id,
            week = updated.week,
            home = %updated.home_team,
            away = %updated.away_team,
            home_goals,
            away_goals,
            "match result edited, aggregates rebuilt"
        );
        Ok(updated)
    }

    /// Put back team rows after a failed edit. If this fails too, the next
    /// `init` rebuilds them from the unchanged log.
    async fn restore_teams(&self, teams: &[Team]) {
        if let Err(e) = self.store.save_teams(teams).await {
            tracing::warn!(error = %e, "could not restore team aggregates after failed edit");
        }
    }

    /// Clear the match log, zero every team's aggregates and return to week
    /// 0. Strengths are kept; the random source is not reseeded.
    ///
    /// # Errors
    ///
    /// [`LeagueError::NotInitialized`] before `init`,
    /// [`LeagueError::Persistence`] if the store rejects the change.
    pub async fn reset(&self) -> Result<LeagueStatus, LeagueError> {
        let mut inner = self.inner.write().await;
        inner.ensure_initialized()?;

        let mut teams = inner.teams.clone();
        for team in &mut teams {
            team.record.clear();
        }

        // Zeroed teams over an intact log are repaired by init; a cleared log
        // is the commit point.
        self.store.reset_all_team_stats().await?;
        self.store.clear_matches().await?;

        inner.teams = teams;
        inner.matches.clear();
        inner.week = 0;

        tracing::info!("league reset");
        Ok(status_of(&inner))
    }

    /// The played match log as prediction-service input rows.
    pub async fn prediction_input(&self) -> Vec<HistoricalMatch> {
        export::prediction_input(self.season, &self.inner.read().await.matches)
    }
}

const fn phase_of(initialized: bool, week: u32, max_week: u32) -> LeaguePhase {
    if !initialized {
        LeaguePhase::Uninitialized
    } else if week >= max_week {
        LeaguePhase::Completed
    } else {
        LeaguePhase::Active
    }
}

fn status_of(inner: &LeagueInner) -> LeagueStatus {
    let max_week = inner.max_week();
    LeagueStatus {
        phase: phase_of(inner.initialized, inner.week, max_week),
        week: inner.week,
        max_week,
        teams: u32::try_from(inner.teams.len()).unwrap_or(u32::MAX),
        matches_played: u32::try_from(inner.matches.iter().filter(|m| m.played).count())
            .unwrap_or(u32::MAX),
    }
}

/// Id the next appended match receives: its position in the log.
fn next_match_id(position: usize) -> MatchId {
    MatchId::new(u64::try_from(position).unwrap_or(u64::MAX))
}

/// Remove the rows of the last played week if the store holds fewer of them
/// than the schedule has pairings for that week. Returns how many rows were
/// removed.
fn drop_incomplete_week(matches: &mut Vec<Match>, schedule: &Schedule) -> usize {
    let Some(last) = matches.iter().filter(|m| m.played).map(|m| m.week).max() else {
        return 0;
    };
    let index = usize::try_from(last.saturating_sub(1)).unwrap_or(usize::MAX);
    let expected = schedule.week(index).len();
    let stored = matches.iter().filter(|m| m.week == last).count();
    if stored >= expected {
        return 0;
    }

    let before = matches.len();
    matches.retain(|m| m.week != last);
    before.saturating_sub(matches.len())
}

fn roster_entry(teams: &[Team], index: usize) -> Result<&Team, LeagueError> {
    teams
        .get(index)
        .ok_or_else(|| LeagueError::not_found(format!("roster index {index}")))
}

fn goal_count(goals: i64) -> Result<u32, LeagueError> {
    if goals < 0 {
        return Err(LeagueError::validation(format!(
            "goal counts must be non-negative, got {goals}"
        )));
    }
    u32::try_from(goals)
        .map_err(|e| LeagueError::validation(format!("goal count {goals} is out of range: {e}")))
}

fn check_unique_names(teams: &[Team]) -> Result<(), LeagueError> {
    let mut seen = BTreeSet::new();
    for team in teams {
        if !seen.insert(team.name.as_str()) {
            return Err(LeagueError::Config {
                reason: format!("duplicate team name: {}", team.name),
            });
        }
    }
    Ok(())
}
