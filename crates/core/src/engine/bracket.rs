//! Single-elimination bracket engine.

use serde::{Deserialize, Serialize};

use super::{pad_to_supported_size, pair_adjacent, round_label, EngineError, Matchup};
use crate::tmdb::Movie;

/// Full state of a single-elimination tournament.
///
/// State machine: `Active(current_round, current_match)` until a round
/// completes with exactly one winner, then `Terminal(champion)`. The only
/// transition is [`BracketState::pick_winner`], which is rejected once the
/// champion is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BracketState {
    /// Rounds played so far; each round is an ordered list of matchups.
    pub rounds: Vec<Vec<Matchup>>,
    /// Index of the round in progress.
    pub current_round: usize,
    /// Index of the undecided matchup within the current round.
    pub current_match: usize,
    /// Winners accumulated for the round in progress.
    pub winners: Vec<Movie>,
    /// The final winner, set only when exactly one winner remains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion: Option<Movie>,
}

impl BracketState {
    /// Build round 0 from a ranked movie list.
    ///
    /// The list is truncated to the largest supported bracket size
    /// (32, 16, 8, 4 or 2) that fits; this drops the lowest-ranked tail
    /// instead of seeding byes. Fails with
    /// [`EngineError::InsufficientData`] for fewer than 2 movies.
    pub fn new(movies: &[Movie]) -> Result<Self, EngineError> {
        let bracket_movies = pad_to_supported_size(movies)?;
        Ok(Self {
            rounds: vec![pair_adjacent(&bracket_movies)],
            current_round: 0,
            current_match: 0,
            winners: Vec::new(),
            champion: None,
        })
    }

    /// The matchup awaiting a pick, or None once the champion is set.
    pub fn current_matchup(&self) -> Option<&Matchup> {
        if self.is_terminal() {
            return None;
        }
        self.rounds.get(self.current_round)?.get(self.current_match)
    }

    /// True once the champion is decided; no further picks are accepted.
    pub fn is_terminal(&self) -> bool {
        self.champion.is_some()
    }

    /// Display label for the round in progress.
    pub fn round_label(&self) -> String {
        let count = self
            .rounds
            .get(self.current_round)
            .map(|r| r.len())
            .unwrap_or(0);
        round_label(count)
    }

    /// Record the user's pick for the current matchup and advance.
    ///
    /// Returns the successor state. Fails with
    /// [`EngineError::InvalidSelection`] when `winner` is neither movie of
    /// the current matchup or when the tournament is already over.
    pub fn pick_winner(&self, winner: &Movie) -> Result<Self, EngineError> {
        let matchup = self.current_matchup().ok_or(EngineError::InvalidSelection)?;
        if !matchup.contains(winner.id) {
            return Err(EngineError::InvalidSelection);
        }

        let round_len = self.rounds[self.current_round].len();

        let mut rounds = self.rounds.clone();
        rounds[self.current_round][self.current_match] = matchup.with_winner(winner.clone());

        let mut winners = self.winners.clone();
        winners.push(winner.clone());

        if self.current_match + 1 < round_len {
            // More matchups in this round.
            return Ok(Self {
                rounds,
                current_round: self.current_round,
                current_match: self.current_match + 1,
                winners,
                champion: None,
            });
        }

        if winners.len() == 1 {
            // Round complete with a single winner: tournament over.
            return Ok(Self {
                rounds,
                current_round: self.current_round,
                current_match: self.current_match,
                winners,
                champion: Some(winner.clone()),
            });
        }

        // Pair this round's winners into the next round.
        rounds.push(pair_adjacent(&winners));
        Ok(Self {
            rounds,
            current_round: self.current_round + 1,
            current_match: 0,
            winners: Vec::new(),
            champion: None,
        })
    }
}
