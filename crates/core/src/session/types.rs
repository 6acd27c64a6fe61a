//! Session state and the fetch-then-compute step.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{info, warn};

use super::SessionError;
use crate::engine::{pad_to_supported_size, BracketState, VersusState};
use crate::tmdb::{Actor, Movie, MovieSource};

/// What the session was asked to run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SessionMode {
    /// One actor, single-elimination bracket.
    Single { actor_id: u32 },
    /// Two actors, head-to-head tally.
    Versus { actor1_id: u32, actor2_id: u32 },
}

/// Where the session currently stands.
///
/// Fetch failures are converted here into a displayable `Failed` phase;
/// no failure is fatal to the process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionPhase {
    /// The fetch step is still in flight.
    Loading,

    /// Single-actor bracket in progress (or finished with a champion).
    Bracket {
        actor_name: String,
        /// The padded prefix actually competing, for display.
        all_movies: Vec<Movie>,
        state: BracketState,
    },

    /// Versus run in progress (or complete with final tallies).
    Versus {
        actor1_name: String,
        actor2_name: String,
        state: VersusState,
    },

    /// The fetch step failed; `message` is user-displayable.
    Failed { message: String },
}

impl SessionPhase {
    /// Returns the phase type as a string (for logging and filtering).
    pub fn phase_type(&self) -> &'static str {
        match self {
            SessionPhase::Loading => "loading",
            SessionPhase::Bracket { .. } => "bracket",
            SessionPhase::Versus { .. } => "versus",
            SessionPhase::Failed { .. } => "failed",
        }
    }
}

/// Fetch parameters, taken from [`crate::config::TournamentConfig`].
#[derive(Debug, Clone, Copy)]
pub struct SessionParams {
    pub movies_per_actor: usize,
    pub fetch_timeout: Duration,
}

/// One tournament run, from fetch to champion/tally.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Unique identifier (UUID).
    pub id: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Requested mode.
    pub mode: SessionMode,
    /// Current phase.
    pub phase: SessionPhase,
}

impl Session {
    /// Create a session in the `Loading` phase.
    pub fn new(mode: SessionMode) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            mode,
            phase: SessionPhase::Loading,
        }
    }

    /// Run the fetch step and swap the resulting phase into the session.
    ///
    /// The whole step runs under one timeout; expiry and every fetch error
    /// land in a `Failed` phase rather than propagating. If the session was
    /// abandoned meanwhile, the caller simply dropped its handle and the
    /// written phase goes nowhere.
    pub async fn load(
        session: Arc<RwLock<Session>>,
        source: Arc<dyn MovieSource>,
        params: SessionParams,
    ) {
        let (id, mode) = {
            let s = session.read().await;
            (s.id.clone(), s.mode)
        };

        let phase = match timeout(params.fetch_timeout, build_phase(&*source, mode, params)).await
        {
            Ok(Ok(phase)) => phase,
            Ok(Err(e)) => {
                warn!("Session {}: fetch failed: {}", id, e);
                SessionPhase::Failed {
                    message: e.to_string(),
                }
            }
            Err(_) => {
                warn!("Session {}: fetch timed out", id);
                SessionPhase::Failed {
                    message: SessionError::FetchTimeout.to_string(),
                }
            }
        };

        info!("Session {}: entering phase '{}'", id, phase.phase_type());
        session.write().await.phase = phase;
    }

    /// Record the user's pick for the current matchup.
    ///
    /// Pure state swap; never suspends. Callers must hold the session's
    /// write half, which enforces the single-writer discipline.
    pub fn pick(&mut self, winner_id: u32) -> Result<(), SessionError> {
        match &self.phase {
            SessionPhase::Bracket {
                actor_name,
                all_movies,
                state,
            } => {
                let winner = contender(state.current_matchup(), winner_id)?;
                let next = state.pick_winner(&winner)?;
                self.phase = SessionPhase::Bracket {
                    actor_name: actor_name.clone(),
                    all_movies: all_movies.clone(),
                    state: next,
                };
                Ok(())
            }
            SessionPhase::Versus {
                actor1_name,
                actor2_name,
                state,
            } => {
                let winner = contender(state.current_matchup(), winner_id)?;
                let next = state.pick_winner(&winner)?;
                self.phase = SessionPhase::Versus {
                    actor1_name: actor1_name.clone(),
                    actor2_name: actor2_name.clone(),
                    state: next,
                };
                Ok(())
            }
            // No tournament to pick in.
            SessionPhase::Loading | SessionPhase::Failed { .. } => {
                Err(SessionError::InvalidSelection)
            }
        }
    }
}

/// Resolve a winner ID against the pending matchup.
fn contender(
    matchup: Option<&crate::engine::Matchup>,
    winner_id: u32,
) -> Result<Movie, SessionError> {
    let matchup = matchup.ok_or(SessionError::InvalidSelection)?;
    if matchup.movie1.id == winner_id {
        Ok(matchup.movie1.clone())
    } else if matchup.movie2.id == winner_id {
        Ok(matchup.movie2.clone())
    } else {
        Err(SessionError::InvalidSelection)
    }
}

/// The fetch-then-compute step, shared by both modes.
async fn build_phase(
    source: &dyn MovieSource,
    mode: SessionMode,
    params: SessionParams,
) -> Result<SessionPhase, SessionError> {
    match mode {
        SessionMode::Single { actor_id } => {
            let movies = source
                .get_top_movies(actor_id, params.movies_per_actor)
                .await?;
            if movies.len() < 2 {
                return Err(SessionError::InsufficientData { got: movies.len() });
            }

            let all_movies = pad_to_supported_size(&movies)?;
            let state = BracketState::new(&all_movies)?;
            let actor_name = actor_name_or_placeholder(source, actor_id).await;

            Ok(SessionPhase::Bracket {
                actor_name,
                all_movies,
                state,
            })
        }
        SessionMode::Versus {
            actor1_id,
            actor2_id,
        } => {
            let actor1_name = actor_name_or_placeholder(source, actor1_id).await;
            let actor2_name = actor_name_or_placeholder(source, actor2_id).await;

            let movies1 = source
                .get_top_movies(actor1_id, params.movies_per_actor)
                .await?;
            let movies2 = source
                .get_top_movies(actor2_id, params.movies_per_actor)
                .await?;

            let state = VersusState::new(&movies1, &movies2)?;

            Ok(SessionPhase::Versus {
                actor1_name,
                actor2_name,
                state,
            })
        }
    }
}

/// Display name lookup; a failure here only degrades to a placeholder.
async fn actor_name_or_placeholder(source: &dyn MovieSource, actor_id: u32) -> String {
    match source.get_actor_name(actor_id).await {
        Ok(name) => name,
        Err(e) => {
            warn!("Falling back to placeholder name for {}: {}", actor_id, e);
            Actor::placeholder_name(actor_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockMovieSource};
    use crate::tmdb::TmdbError;

    fn params() -> SessionParams {
        SessionParams {
            movies_per_actor: 32,
            fetch_timeout: Duration::from_secs(5),
        }
    }

    async fn loaded_session(mode: SessionMode, source: Arc<MockMovieSource>) -> Session {
        let session = Arc::new(RwLock::new(Session::new(mode)));
        Session::load(Arc::clone(&session), source, params()).await;
        let loaded = session.read().await.clone();
        loaded
    }

    #[tokio::test]
    async fn test_new_session_is_loading() {
        let session = Session::new(SessionMode::Single { actor_id: 1 });
        assert_eq!(session.phase, SessionPhase::Loading);
        assert_eq!(session.phase.phase_type(), "loading");
    }

    #[tokio::test]
    async fn test_single_mode_builds_bracket() {
        let source = Arc::new(MockMovieSource::new());
        source.set_actor(1, "Tom Hanks", fixtures::movies(5)).await;

        let session = loaded_session(SessionMode::Single { actor_id: 1 }, source).await;
        match &session.phase {
            SessionPhase::Bracket {
                actor_name,
                all_movies,
                state,
            } => {
                assert_eq!(actor_name, "Tom Hanks");
                // 5 movies pad down to 4.
                assert_eq!(all_movies.len(), 4);
                assert_eq!(state.rounds[0].len(), 2);
            }
            other => panic!("Expected Bracket phase, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_single_mode_too_few_movies_fails_displayably() {
        let source = Arc::new(MockMovieSource::new());
        source.set_actor(1, "Obscure", fixtures::movies(1)).await;

        let session = loaded_session(SessionMode::Single { actor_id: 1 }, source).await;
        match &session.phase {
            SessionPhase::Failed { message } => {
                assert!(message.contains("at least 2"), "message: {}", message);
            }
            other => panic!("Expected Failed phase, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_error_becomes_failed_phase() {
        let source = Arc::new(MockMovieSource::new());
        source
            .set_next_error(TmdbError::ApiError {
                status: 500,
                message: "boom".to_string(),
            })
            .await;

        let session = loaded_session(SessionMode::Single { actor_id: 1 }, source).await;
        assert!(matches!(session.phase, SessionPhase::Failed { .. }));
    }

    #[tokio::test]
    async fn test_versus_mode_builds_pairs_and_names() {
        let source = Arc::new(MockMovieSource::new());
        source
            .set_actor(1, "Actor One", fixtures::movies_from(100, 4))
            .await;
        source
            .set_actor(2, "Actor Two", fixtures::movies_from(200, 6))
            .await;

        let session = loaded_session(
            SessionMode::Versus {
                actor1_id: 1,
                actor2_id: 2,
            },
            source,
        )
        .await;
        match &session.phase {
            SessionPhase::Versus {
                actor1_name,
                actor2_name,
                state,
            } => {
                assert_eq!(actor1_name, "Actor One");
                assert_eq!(actor2_name, "Actor Two");
                assert_eq!(state.matchups.len(), 4);
            }
            other => panic!("Expected Versus phase, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_versus_name_lookup_falls_back_to_placeholder() {
        let source = Arc::new(MockMovieSource::new());
        // Movies present but no name registered for actor 2.
        source
            .set_actor(1, "Known", fixtures::movies_from(100, 3))
            .await;
        source
            .set_movies_only(2, fixtures::movies_from(200, 3))
            .await;

        let session = loaded_session(
            SessionMode::Versus {
                actor1_id: 1,
                actor2_id: 2,
            },
            source,
        )
        .await;
        match &session.phase {
            SessionPhase::Versus { actor2_name, .. } => {
                assert_eq!(actor2_name, "Actor 2");
            }
            other => panic!("Expected Versus phase, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_timeout_becomes_failed_phase() {
        let source = Arc::new(MockMovieSource::new());
        source.set_actor(1, "Slow", fixtures::movies(4)).await;
        source.set_delay(Duration::from_secs(60)).await;

        let session = Arc::new(RwLock::new(Session::new(SessionMode::Single {
            actor_id: 1,
        })));
        let short = SessionParams {
            movies_per_actor: 32,
            fetch_timeout: Duration::from_millis(10),
        };
        Session::load(Arc::clone(&session), source, short).await;

        let session = session.read().await;
        match &session.phase {
            SessionPhase::Failed { message } => {
                assert!(message.contains("timed out"), "message: {}", message);
            }
            other => panic!("Expected Failed phase, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_pick_routes_to_bracket_engine() {
        let source = Arc::new(MockMovieSource::new());
        let movies = fixtures::movies(4);
        source.set_actor(1, "Solo", movies.clone()).await;

        let mut session = loaded_session(SessionMode::Single { actor_id: 1 }, source).await;
        session.pick(movies[0].id).unwrap();

        match &session.phase {
            SessionPhase::Bracket { state, .. } => {
                assert_eq!(state.current_match, 1);
                assert_eq!(state.winners.len(), 1);
            }
            other => panic!("Expected Bracket phase, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_pick_while_loading_is_rejected() {
        let mut session = Session::new(SessionMode::Single { actor_id: 1 });
        assert!(matches!(
            session.pick(42),
            Err(SessionError::InvalidSelection)
        ));
    }

    #[tokio::test]
    async fn test_pick_unknown_id_is_rejected_without_state_change() {
        let source = Arc::new(MockMovieSource::new());
        source.set_actor(1, "Solo", fixtures::movies(4)).await;

        let mut session = loaded_session(SessionMode::Single { actor_id: 1 }, source).await;
        let before = session.phase.clone();
        assert!(matches!(
            session.pick(99_999),
            Err(SessionError::InvalidSelection)
        ));
        assert_eq!(session.phase, before);
    }
}
