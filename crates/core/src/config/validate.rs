use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - TMDb API key is non-empty when the section is present
/// - Tournament fetches at least 2 movies per actor
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if let Some(tmdb) = &config.tmdb {
        if tmdb.api_key.is_empty() {
            return Err(ConfigError::ValidationError(
                "tmdb.api_key cannot be empty".to_string(),
            ));
        }
    }

    // Brackets and versus legs both need at least one pair.
    if config.tournament.movies_per_actor < 2 {
        return Err(ConfigError::ValidationError(
            "tournament.movies_per_actor must be at least 2".to_string(),
        ));
    }

    Ok(())
}
