//! Actor lookup API handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use faceoff_core::Actor;

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for actor lookups
#[derive(Debug, Deserialize)]
pub struct ActorQueryParams {
    pub query: Option<String>,
}

/// Response for actor lookups
#[derive(Debug, Serialize)]
pub struct ActorListResponse {
    pub actors: Vec<Actor>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ActorErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// List or search the bundled preset actors.
///
/// Without a query the whole index is returned; with one, a
/// case-insensitive name/alias substring match.
pub async fn list_presets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActorQueryParams>,
) -> Json<ActorListResponse> {
    let actors = match params.query.as_deref() {
        Some(query) if !query.trim().is_empty() => state.presets().search(query),
        _ => state.presets().all(),
    };
    Json(ActorListResponse { actors })
}

/// Search for actors by name (disambiguation picker).
///
/// An unambiguous preset match short-circuits the TMDb round trip.
pub async fn search_actors(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActorQueryParams>,
) -> Result<Json<ActorListResponse>, impl IntoResponse> {
    let query = match params.query.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ActorErrorResponse {
                    error: "Missing or empty 'query' parameter".to_string(),
                }),
            ));
        }
    };

    if let Some(preset) = state.presets().exact_match(&query) {
        return Ok(Json(ActorListResponse {
            actors: vec![preset],
        }));
    }

    let Some(source) = state.movie_source() else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ActorErrorResponse {
                error: "No movie source configured".to_string(),
            }),
        ));
    };

    match source.search_actors(&query).await {
        Ok(actors) => Ok(Json(ActorListResponse { actors })),
        Err(e) => Err((
            StatusCode::BAD_GATEWAY,
            Json(ActorErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}
