//! Mock movie source for testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::tmdb::{Actor, Movie, MovieSource, TmdbError};

/// A recorded source query for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedSourceQuery {
    SearchActors { query: String },
    GetActorName { actor_id: u32 },
    GetTopMovies { actor_id: u32, limit: usize },
}

/// Mock implementation of the [`MovieSource`] trait.
///
/// Provides controllable behavior for testing:
/// - Configurable per-actor names and movie lists
/// - Query recording for assertions
/// - One-shot error injection and artificial delays
#[derive(Debug, Default)]
pub struct MockMovieSource {
    /// Actor display names by ID.
    names: Arc<RwLock<HashMap<u32, String>>>,
    /// Ranked movie lists by actor ID.
    movies: Arc<RwLock<HashMap<u32, Vec<Movie>>>>,
    /// Actors returned by name search.
    actors: Arc<RwLock<Vec<Actor>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedSourceQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<TmdbError>>>,
    /// Artificial delay before each operation (for timeout tests).
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockMovieSource {
    /// Create a new empty mock movie source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an actor with a name and a ranked movie list.
    pub async fn set_actor(&self, actor_id: u32, name: &str, movies: Vec<Movie>) {
        self.names.write().await.insert(actor_id, name.to_string());
        self.movies.write().await.insert(actor_id, movies);
    }

    /// Register only movies; name lookups for this actor will fail.
    pub async fn set_movies_only(&self, actor_id: u32, movies: Vec<Movie>) {
        self.movies.write().await.insert(actor_id, movies);
    }

    /// Set the actors returned by [`MovieSource::search_actors`].
    pub async fn set_search_results(&self, actors: Vec<Actor>) {
        *self.actors.write().await = actors;
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: TmdbError) {
        *self.next_error.write().await = Some(error);
    }

    /// Delay every operation, for exercising fetch timeouts.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedSourceQuery> {
        self.queries.read().await.clone()
    }

    async fn begin(&self, query: RecordedSourceQuery) -> Result<(), TmdbError> {
        if let Some(delay) = *self.delay.read().await {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        self.queries.write().await.push(query);
        Ok(())
    }
}

#[async_trait]
impl MovieSource for MockMovieSource {
    async fn search_actors(&self, query: &str) -> Result<Vec<Actor>, TmdbError> {
        self.begin(RecordedSourceQuery::SearchActors {
            query: query.to_string(),
        })
        .await?;

        let query_lower = query.to_lowercase();
        Ok(self
            .actors
            .read()
            .await
            .iter()
            .filter(|a| a.name.to_lowercase().contains(&query_lower))
            .cloned()
            .collect())
    }

    async fn get_actor_name(&self, actor_id: u32) -> Result<String, TmdbError> {
        self.begin(RecordedSourceQuery::GetActorName { actor_id })
            .await?;

        self.names
            .read()
            .await
            .get(&actor_id)
            .cloned()
            .ok_or_else(|| TmdbError::NotFound(format!("person ID {}", actor_id)))
    }

    async fn get_top_movies(&self, actor_id: u32, limit: usize) -> Result<Vec<Movie>, TmdbError> {
        self.begin(RecordedSourceQuery::GetTopMovies { actor_id, limit })
            .await?;

        let movies = self
            .movies
            .read()
            .await
            .get(&actor_id)
            .cloned()
            .ok_or_else(|| TmdbError::NotFound(format!("movie credits for person {}", actor_id)))?;

        Ok(movies.into_iter().take(limit).collect())
    }
}
