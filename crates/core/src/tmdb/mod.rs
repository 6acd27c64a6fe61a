//! Movie source integration backed by TMDb.
//!
//! The engines never talk to the network themselves; they are handed
//! already-fetched movie lists. Everything network-facing lives behind the
//! [`MovieSource`] trait so sessions can be tested with a substitutable fake.

mod client;
mod types;

pub use client::{TmdbClient, TmdbConfig};
pub use types::{Actor, Movie};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when querying the movie source.
#[derive(Debug, Error)]
pub enum TmdbError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request exceeded the configured fetch timeout.
    #[error("Fetch timed out")]
    Timeout,

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Supplier of actors and their ranked filmographies.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Search for actors by name.
    async fn search_actors(&self, query: &str) -> Result<Vec<Actor>, TmdbError>;

    /// Get an actor's display name from their TMDb ID.
    async fn get_actor_name(&self, actor_id: u32) -> Result<String, TmdbError>;

    /// Fetch an actor's top movies, sorted descending by popularity score
    /// (vote_count * vote_average) and truncated to `limit`.
    async fn get_top_movies(&self, actor_id: u32, limit: usize) -> Result<Vec<Movie>, TmdbError>;
}
