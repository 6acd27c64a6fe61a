//! In-memory session store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::types::{Session, SessionMode};
use super::SessionError;

/// Holds all live sessions, keyed by ID.
///
/// Each session sits behind its own lock; picks take the write half, so a
/// session only ever has one writer. Nothing is persisted; sessions die
/// with the process.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<RwLock<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session in the `Loading` phase and register it.
    pub async fn create(&self, mode: SessionMode) -> Arc<RwLock<Session>> {
        let session = Arc::new(RwLock::new(Session::new(mode)));
        let id = session.read().await.id.clone();
        self.sessions.write().await.insert(id, Arc::clone(&session));
        session
    }

    /// Look up a session by ID.
    pub async fn get(&self, id: &str) -> Result<Arc<RwLock<Session>>, SessionError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Discard a session (the user backed out). Any in-flight fetch keeps
    /// running against an orphaned handle and its result is never observed.
    pub async fn remove(&self, id: &str) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
