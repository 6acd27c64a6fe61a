pub mod config;
pub mod engine;
pub mod presets;
pub mod session;
pub mod testing;
pub mod tmdb;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    ServerConfig, TournamentConfig,
};
pub use engine::{
    bracket_size, pad_to_supported_size, round_label, BracketState, EngineError, Matchup,
    VersusOutcome, VersusState,
};
pub use presets::PresetActorIndex;
pub use session::{
    Session, SessionError, SessionMode, SessionParams, SessionPhase, SessionStore,
};
pub use tmdb::{Actor, Movie, MovieSource, TmdbClient, TmdbConfig, TmdbError};
