//! Tournament engines.
//!
//! Two state machines share one matchup shape: the single-elimination
//! [`BracketState`] and the head-to-head [`VersusState`]. Both are pure
//! value types; `pick_winner` returns a new state instead of mutating,
//! so the presentation layer can observe transitions explicitly.

mod bracket;
mod types;
mod versus;

pub use bracket::BracketState;
pub use types::Matchup;
pub use versus::{VersusOutcome, VersusState};

use thiserror::Error;

use crate::tmdb::Movie;

/// Supported bracket sizes, largest first.
const BRACKET_SIZES: [usize; 5] = [32, 16, 8, 4, 2];

/// Errors produced by the engines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Fewer than 2 movies available for a bracket or versus leg.
    #[error("Not enough movies to run a tournament (need at least 2, got {got})")]
    InsufficientData { got: usize },

    /// A pick that matches neither movie of the current matchup, or a pick
    /// after the tournament already ended. Indicates a caller bug.
    #[error("Selection does not match either movie of the current matchup")]
    InvalidSelection,
}

/// Largest supported bracket size that fits `len`, or None below 2.
///
/// Lowest-ranked entries beyond the cutoff are dropped rather than given
/// byes; the fetch already ranks movies, so the tail is the least popular.
pub fn bracket_size(len: usize) -> Option<usize> {
    BRACKET_SIZES.iter().copied().find(|&size| len >= size)
}

/// Truncate a ranked movie list to its supported bracket prefix.
pub fn pad_to_supported_size(movies: &[Movie]) -> Result<Vec<Movie>, EngineError> {
    let size = bracket_size(movies.len()).ok_or(EngineError::InsufficientData {
        got: movies.len(),
    })?;
    Ok(movies[..size].to_vec())
}

/// Pair adjacent movies: 0 vs 1, 2 vs 3, and so on.
/// A trailing unpaired movie is dropped.
pub(crate) fn pair_adjacent(movies: &[Movie]) -> Vec<Matchup> {
    movies
        .chunks_exact(2)
        .map(|pair| Matchup::new(pair[0].clone(), pair[1].clone()))
        .collect()
}

/// Display label for a round with the given matchup count.
pub fn round_label(matchup_count: usize) -> String {
    match matchup_count {
        16 => "Round of 32".to_string(),
        8 => "Round of 16".to_string(),
        4 => "Quarterfinals".to_string(),
        2 => "Semifinals".to_string(),
        1 => "Final".to_string(),
        n => format!("Round of {}", n * 2),
    }
}
