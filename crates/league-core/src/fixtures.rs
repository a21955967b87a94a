//! Deterministic round-robin fixture generation.
//!
//! Schedules are built with the circle method: team 0 stays fixed while the
//! remaining indices rotate one step per round. In round `r` team 0 meets the
//! first rotated index and the rest pair up outside-in. First-leg pairings put
//! the lower index at home; a double round-robin replays the first leg in the
//! same week order with home and away swapped.
//!
//! For four teams this yields:
//!
//! ```text
//! week 1: 0-1 2-3    week 4: 1-0 3-2
//! week 2: 0-2 1-3    week 5: 2-0 3-1
//! week 3: 0-3 1-2    week 6: 3-0 2-1
//! ```
//!
//! No randomness is involved: the same team count and scheme always produce
//! the same schedule.

use league_types::RoundRobinScheme;

/// Errors that can occur when building a schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// Round-robin pairing needs an even number of teams, at least two.
    #[error("round-robin schedule needs an even team count of at least 2, got {count}")]
    InvalidTeamCount {
        /// The rejected team count.
        count: usize,
    },
}

/// One fixture of a week: indices into the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pairing {
    /// Roster index of the home team.
    pub home: usize,
    /// Roster index of the away team.
    pub away: usize,
}

impl Pairing {
    /// The same fixture with home and away swapped.
    pub const fn reversed(self) -> Self {
        Self {
            home: self.away,
            away: self.home,
        }
    }

    /// The pair as `(lower, higher)` index, ignoring orientation.
    pub const fn unordered(self) -> (usize, usize) {
        if self.home <= self.away {
            (self.home, self.away)
        } else {
            (self.away, self.home)
        }
    }
}

/// A complete season schedule: an ordered list of weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    team_count: usize,
    scheme: RoundRobinScheme,
    weeks: Vec<Vec<Pairing>>,
}

impl Schedule {
    /// Build the schedule for `team_count` teams under `scheme`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidTeamCount`] if `team_count` is odd or
    /// below 2.
    pub fn generate(team_count: usize, scheme: RoundRobinScheme) -> Result<Self, ScheduleError> {
        if team_count < 2 || team_count % 2 != 0 {
            return Err(ScheduleError::InvalidTeamCount { count: team_count });
        }

        let first_leg = first_leg(team_count);
        let weeks = match scheme {
            RoundRobinScheme::Single => first_leg,
            RoundRobinScheme::Double => {
                let second_leg: Vec<Vec<Pairing>> = first_leg
                    .iter()
                    .map(|week| week.iter().map(|p| p.reversed()).collect())
                    .collect();
                first_leg.into_iter().chain(second_leg).collect()
            }
        };

        Ok(Self {
            team_count,
            scheme,
            weeks,
        })
    }

    /// Pairings for the 0-based week `index`.
    ///
    /// Returns an empty slice past the end of the schedule, which callers
    /// treat as "no more fixtures".
    pub fn week(&self, index: usize) -> &[Pairing] {
        self.weeks.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of weeks in the schedule.
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    /// Whether the schedule has no weeks.
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Number of teams the schedule was built for.
    pub const fn team_count(&self) -> usize {
        self.team_count
    }

    /// The scheme the schedule was built with.
    pub const fn scheme(&self) -> RoundRobinScheme {
        self.scheme
    }

    /// Iterate over `(0-based week index, pairings)` from `start` onwards.
    pub fn weeks_from(&self, start: usize) -> impl Iterator<Item = (usize, &[Pairing])> {
        self.weeks
            .iter()
            .enumerate()
            .skip(start)
            .map(|(index, week)| (index, week.as_slice()))
    }
}

/// Build the `team_count - 1` weeks of a single round-robin.
fn first_leg(team_count: usize) -> Vec<Vec<Pairing>> {
    let others: Vec<usize> = (1..team_count).collect();
    let rounds = others.len();

    (0..rounds)
        .map(|round| {
            let rotated: Vec<usize> = others
                .iter()
                .cycle()
                .skip(round)
                .take(rounds)
                .copied()
                .collect();

            let mut week = Vec::with_capacity(team_count / 2);
            if let Some(&first) = rotated.first() {
                week.push(oriented(0, first));
            }
            let tail = rotated.get(1..).unwrap_or_default();
            week.extend(
                tail.iter()
                    .zip(tail.iter().rev())
                    .take(tail.len() / 2)
                    .map(|(&a, &b)| oriented(a, b)),
            );
            week
        })
        .collect()
}

/// First-leg orientation: the lower index plays at home.
const fn oriented(a: usize, b: usize) -> Pairing {
    if a <= b {
        Pairing { home: a, away: b }
    } else {
        Pairing { home: b, away: a }
    }
}
