//! Tournament sessions.
//!
//! A session ties one tournament run together: the single fetch-then-compute
//! step against the movie source, followed by synchronous picks until the
//! engine reaches its terminal state. Sessions live only in memory and are
//! discarded when the caller backs out.

mod store;
mod types;

pub use store::SessionStore;
pub use types::{Session, SessionMode, SessionParams, SessionPhase};

use thiserror::Error;

use crate::engine::EngineError;
use crate::tmdb::TmdbError;

/// Errors surfaced at the session boundary.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Fewer than 2 movies available for a bracket or versus leg.
    #[error("Not enough movies found (need at least 2, got {got})")]
    InsufficientData { got: usize },

    /// A pick that matches neither movie of the current matchup, or a pick
    /// while the session is not running a tournament.
    #[error("Selection does not match either movie of the current matchup")]
    InvalidSelection,

    /// The movie source call failed or returned malformed data.
    #[error("Failed to load movies: {0}")]
    Fetch(#[from] TmdbError),

    /// The fetch step exceeded the configured timeout.
    #[error("Fetching movies timed out")]
    FetchTimeout,

    /// Unknown session ID.
    #[error("Session not found: {0}")]
    NotFound(String),
}

impl From<EngineError> for SessionError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::InsufficientData { got } => SessionError::InsufficientData { got },
            EngineError::InvalidSelection => SessionError::InvalidSelection,
        }
    }
}
