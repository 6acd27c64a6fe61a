use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::tmdb::TmdbConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    /// Movie source (required for anything beyond preset lookups).
    #[serde(default)]
    pub tmdb: Option<TmdbConfig>,
    #[serde(default)]
    pub tournament: TournamentConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Tournament configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TournamentConfig {
    /// How many top movies to fetch per actor (bracket and versus alike).
    #[serde(default = "default_movies_per_actor")]
    pub movies_per_actor: usize,
    /// Timeout applied around the whole fetch step of a session.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            movies_per_actor: default_movies_per_actor(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

fn default_movies_per_actor() -> usize {
    32
}

fn default_fetch_timeout() -> u64 {
    30
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<SanitizedTmdbConfig>,
    pub tournament: TournamentConfig,
}

/// Sanitized TMDb config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            tmdb: config.tmdb.as_ref().map(|t| SanitizedTmdbConfig {
                api_key_configured: !t.api_key.is_empty(),
                base_url: t.base_url.clone(),
                timeout_secs: t.timeout_secs,
            }),
            tournament: config.tournament.clone(),
        }
    }
}
