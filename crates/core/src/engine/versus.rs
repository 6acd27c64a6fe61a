//! Head-to-head versus engine.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{EngineError, Matchup};
use crate::tmdb::Movie;

/// Outcome of a completed versus run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VersusOutcome {
    Actor1,
    Actor2,
    Tie,
}

/// State of a head-to-head comparison between two actors' movie pools.
///
/// A single round holds every pair. `movie1` of each pair always belongs
/// to actor 1 and `movie2` to actor 2; that fixed assignment is what makes
/// win attribution possible with a plain id comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VersusState {
    /// All pairs, formed once at initialization.
    pub matchups: Vec<Matchup>,
    /// Index of the pair awaiting a pick.
    pub current_match: usize,
    /// Wins attributed to actor 1 so far.
    pub actor1_wins: u32,
    /// Wins attributed to actor 2 so far.
    pub actor2_wins: u32,
    /// True once every pair has been decided.
    pub complete: bool,
}

impl VersusState {
    /// Pair up two actors' movie lists after independent shuffles.
    ///
    /// Both lists need at least 2 movies. Pairing is positional up to the
    /// shorter length; surplus movies from the longer list are discarded.
    /// Shuffling only exists to avoid positional bias (top-ranked vs
    /// top-ranked every time); no reproducibility is promised.
    pub fn new(movies_a: &[Movie], movies_b: &[Movie]) -> Result<Self, EngineError> {
        Self::new_with_rng(movies_a, movies_b, &mut rand::rng())
    }

    /// Like [`VersusState::new`] but with a caller-supplied RNG, for
    /// deterministic tests.
    pub fn new_with_rng<R: Rng + ?Sized>(
        movies_a: &[Movie],
        movies_b: &[Movie],
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let got = movies_a.len().min(movies_b.len());
        if got < 2 {
            return Err(EngineError::InsufficientData { got });
        }

        let mut shuffled_a = movies_a.to_vec();
        let mut shuffled_b = movies_b.to_vec();
        shuffled_a.shuffle(rng);
        shuffled_b.shuffle(rng);

        let pair_count = shuffled_a.len().min(shuffled_b.len());
        let matchups = shuffled_a
            .into_iter()
            .zip(shuffled_b)
            .take(pair_count)
            .map(|(a, b)| Matchup::new(a, b))
            .collect();

        Ok(Self {
            matchups,
            current_match: 0,
            actor1_wins: 0,
            actor2_wins: 0,
            complete: false,
        })
    }

    /// The pair awaiting a pick, or None once complete.
    pub fn current_matchup(&self) -> Option<&Matchup> {
        if self.complete {
            return None;
        }
        self.matchups.get(self.current_match)
    }

    /// Number of pairs decided so far.
    pub fn decided(&self) -> u32 {
        self.actor1_wins + self.actor2_wins
    }

    /// Outcome, available only once every pair is decided.
    pub fn outcome(&self) -> Option<VersusOutcome> {
        if !self.complete {
            return None;
        }
        Some(if self.actor1_wins > self.actor2_wins {
            VersusOutcome::Actor1
        } else if self.actor2_wins > self.actor1_wins {
            VersusOutcome::Actor2
        } else {
            VersusOutcome::Tie
        })
    }

    /// Attribute the pick to the owning actor and advance.
    ///
    /// Returns the successor state. Fails with
    /// [`EngineError::InvalidSelection`] when `winner` is neither movie of
    /// the current pair or when the run already completed.
    pub fn pick_winner(&self, winner: &Movie) -> Result<Self, EngineError> {
        let matchup = self.current_matchup().ok_or(EngineError::InvalidSelection)?;
        if !matchup.contains(winner.id) {
            return Err(EngineError::InvalidSelection);
        }

        let mut matchups = self.matchups.clone();
        matchups[self.current_match] = matchup.with_winner(winner.clone());

        let actor1_win = winner.id == matchup.movie1.id;
        let last = self.current_match + 1 >= self.matchups.len();

        Ok(Self {
            matchups,
            current_match: if last {
                self.current_match
            } else {
                self.current_match + 1
            },
            actor1_wins: self.actor1_wins + u32::from(actor1_win),
            actor2_wins: self.actor2_wins + u32::from(!actor1_win),
            complete: last,
        })
    }
}
