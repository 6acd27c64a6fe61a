//! Session API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use faceoff_core::{
    Matchup, Session, SessionError, SessionMode, SessionPhase, VersusOutcome,
};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a session
#[derive(Debug, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CreateSessionBody {
    Single { actor_id: u32 },
    Versus { actor1_id: u32, actor2_id: u32 },
}

/// Request body for picking a matchup winner
#[derive(Debug, Deserialize)]
pub struct PickBody {
    pub winner_id: u32,
}

/// Progress counters for a running tournament
#[derive(Debug, Serialize)]
pub struct SessionProgress {
    /// Matchups already decided.
    pub decided: usize,
    /// Total matchups the tournament will resolve.
    pub total: usize,
}

/// Response for session operations
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub created_at: String,
    pub mode: SessionMode,
    pub phase: SessionPhase,
    /// Current matchup awaiting a pick, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_matchup: Option<Matchup>,
    /// Display label of the bracket round in play.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<SessionProgress>,
    /// Final outcome of a completed versus run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<VersusOutcome>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        let (current_matchup, round_label, progress, outcome) = match &session.phase {
            SessionPhase::Bracket {
                all_movies, state, ..
            } => {
                let decided: usize = state
                    .rounds
                    .iter()
                    .flatten()
                    .filter(|m| m.winner.is_some())
                    .count();
                (
                    state.current_matchup().cloned(),
                    Some(state.round_label()),
                    Some(SessionProgress {
                        decided,
                        // A field of n movies resolves in n - 1 matchups.
                        total: all_movies.len().saturating_sub(1),
                    }),
                    None,
                )
            }
            SessionPhase::Versus { state, .. } => (
                state.current_matchup().cloned(),
                None,
                Some(SessionProgress {
                    decided: state.decided() as usize,
                    total: state.matchups.len(),
                }),
                state.outcome(),
            ),
            SessionPhase::Loading | SessionPhase::Failed { .. } => (None, None, None, None),
        };

        Self {
            id: session.id.clone(),
            created_at: session.created_at.to_rfc3339(),
            mode: session.mode,
            phase: session.phase.clone(),
            current_matchup,
            round_label,
            progress,
            outcome,
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct SessionErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl ToString) -> (StatusCode, Json<SessionErrorResponse>) {
    (
        status,
        Json(SessionErrorResponse {
            error: error.to_string(),
        }),
    )
}

fn map_session_error(e: SessionError) -> (StatusCode, Json<SessionErrorResponse>) {
    let status = match e {
        SessionError::NotFound(_) => StatusCode::NOT_FOUND,
        SessionError::InvalidSelection => StatusCode::CONFLICT,
        SessionError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Fetch(_) | SessionError::FetchTimeout => StatusCode::BAD_GATEWAY,
    };
    error_response(status, e)
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a session and kick off its movie fetch in the background.
///
/// The response carries the `Loading` phase; clients poll
/// `GET /sessions/{id}` until the phase settles.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateSessionBody>,
) -> Result<(StatusCode, Json<SessionResponse>), impl IntoResponse> {
    let Some(source) = state.movie_source() else {
        return Err(error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "No movie source configured",
        ));
    };

    let mode = match body {
        CreateSessionBody::Single { actor_id } => SessionMode::Single { actor_id },
        CreateSessionBody::Versus {
            actor1_id,
            actor2_id,
        } => SessionMode::Versus {
            actor1_id,
            actor2_id,
        },
    };

    let session = state.sessions().create(mode).await;
    let response = SessionResponse::from(&*session.read().await);

    tokio::spawn(Session::load(
        Arc::clone(&session),
        Arc::clone(source),
        state.session_params(),
    ));

    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a session by ID
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, (StatusCode, Json<SessionErrorResponse>)> {
    let session = state
        .sessions()
        .get(&id)
        .await
        .map_err(map_session_error)?;
    let response = SessionResponse::from(&*session.read().await);
    Ok(Json(response))
}

/// Record the user's pick for the session's current matchup
pub async fn pick_winner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<PickBody>,
) -> Result<Json<SessionResponse>, (StatusCode, Json<SessionErrorResponse>)> {
    let session = state
        .sessions()
        .get(&id)
        .await
        .map_err(map_session_error)?;

    let mut guard = session.write().await;
    guard.pick(body.winner_id).map_err(map_session_error)?;
    Ok(Json(SessionResponse::from(&*guard)))
}

/// Discard a session (the user backed out)
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<SessionErrorResponse>)> {
    state
        .sessions()
        .remove(&id)
        .await
        .map_err(map_session_error)?;
    Ok(StatusCode::NO_CONTENT)
}
