use std::sync::Arc;
use std::time::Duration;

use faceoff_core::{
    Config, MovieSource, PresetActorIndex, SanitizedConfig, SessionParams, SessionStore,
};

/// Shared application state
pub struct AppState {
    config: Config,
    movie_source: Option<Arc<dyn MovieSource>>,
    presets: &'static PresetActorIndex,
    sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, movie_source: Option<Arc<dyn MovieSource>>) -> Self {
        Self {
            config,
            movie_source,
            presets: PresetActorIndex::bundled(),
            sessions: SessionStore::new(),
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn movie_source(&self) -> Option<&Arc<dyn MovieSource>> {
        self.movie_source.as_ref()
    }

    pub fn presets(&self) -> &'static PresetActorIndex {
        self.presets
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn session_params(&self) -> SessionParams {
        let tournament = &self.config.tournament;
        SessionParams {
            movies_per_actor: tournament.movies_per_actor,
            fetch_timeout: Duration::from_secs(tournament.fetch_timeout_secs),
        }
    }
}
