//! TMDb (The Movie Database) API client.
//!
//! TMDb requires an API key for access.
//! Rate limits are generous (around 40 requests per second).

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{Actor, Movie};
use super::{MovieSource, TmdbError};
use async_trait::async_trait;

/// TMDb API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDb API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Image base URL for posters/profile photos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// TMDb API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    #[allow(dead_code)]
    image_base_url: String,
}

impl TmdbClient {
    /// Create a new TMDb client.
    pub fn new(config: TmdbConfig) -> Result<Self, TmdbError> {
        if config.api_key.is_empty() {
            return Err(TmdbError::NotConfigured(
                "TMDb API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());

        let image_base_url = config
            .image_base_url
            .unwrap_or_else(|| "https://image.tmdb.org/t/p".to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
            image_base_url,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        extra_query: &[(&str, String)],
        what: &str,
    ) -> Result<T, TmdbError> {
        let mut request = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())]);
        for (k, v) in extra_query {
            request = request.query(&[(*k, v.as_str())]);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TmdbError::Timeout
            } else {
                TmdbError::HttpError(e)
            }
        })?;

        let status = response.status();
        if status == 401 {
            return Err(TmdbError::NotConfigured(
                "Invalid TMDb API key".to_string(),
            ));
        }
        if status == 404 {
            return Err(TmdbError::NotFound(what.to_string()));
        }
        if status == 429 {
            return Err(TmdbError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TmdbError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        response.json().await.map_err(|e| {
            TmdbError::ParseError(format!("Failed to parse {} response: {}", what, e))
        })
    }
}

#[async_trait]
impl MovieSource for TmdbClient {
    async fn search_actors(&self, query: &str) -> Result<Vec<Actor>, TmdbError> {
        let url = format!("{}/search/person", self.base_url);

        debug!("TMDb person search: query='{}'", query);

        let response: PersonSearchResponse = self
            .get_json(
                &url,
                &[("query", query.to_string())],
                "person search",
            )
            .await?;

        Ok(response.results.into_iter().map(|r| r.into()).collect())
    }

    async fn get_actor_name(&self, actor_id: u32) -> Result<String, TmdbError> {
        let url = format!("{}/person/{}", self.base_url, actor_id);

        debug!("TMDb get person: id={}", actor_id);

        let details: PersonDetailsResponse = self
            .get_json(&url, &[], &format!("person ID {}", actor_id))
            .await?;

        Ok(details.name)
    }

    async fn get_top_movies(&self, actor_id: u32, limit: usize) -> Result<Vec<Movie>, TmdbError> {
        let url = format!("{}/person/{}/movie_credits", self.base_url, actor_id);

        debug!("TMDb movie credits: person={}, limit={}", actor_id, limit);

        let response: MovieCreditsResponse = self
            .get_json(&url, &[], &format!("movie credits for person {}", actor_id))
            .await?;

        let mut movies: Vec<Movie> = response
            .cast
            .into_iter()
            .filter_map(Movie::from_cast_item)
            .collect();

        // Highest popularity score first.
        movies.sort_by(|a, b| {
            b.popularity
                .partial_cmp(&a.popularity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        movies.truncate(limit);

        Ok(movies)
    }
}

// ============================================================================
// TMDb API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct PersonSearchResponse {
    results: Vec<PersonResult>,
}

#[derive(Debug, Deserialize)]
struct PersonResult {
    id: u32,
    name: String,
    profile_path: Option<String>,
    #[serde(default)]
    known_for: Vec<KnownForItem>,
}

#[derive(Debug, Deserialize)]
struct KnownForItem {
    /// Movie title (absent for TV shows).
    title: Option<String>,
    /// "movie" or "tv".
    media_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PersonDetailsResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct MovieCreditsResponse {
    cast: Vec<CastItem>,
}

#[derive(Debug, Deserialize)]
struct CastItem {
    id: u32,
    title: Option<String>,
    poster_path: Option<String>,
    #[serde(default)]
    vote_count: u32,
    #[serde(default)]
    vote_average: f64,
    release_date: Option<String>,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<PersonResult> for Actor {
    fn from(r: PersonResult) -> Self {
        Self {
            id: r.id,
            name: r.name,
            profile_path: r.profile_path,
            // Known-for entries without a title are TV shows; skip them.
            known_for: r
                .known_for
                .into_iter()
                .filter(|k| k.media_type.as_deref() == Some("movie"))
                .filter_map(|k| k.title)
                .collect(),
        }
    }
}

impl Movie {
    fn from_cast_item(item: CastItem) -> Option<Self> {
        // Credits without a title are unusable for display.
        let title = item.title?;
        Some(Self {
            id: item.id,
            title,
            poster_path: item.poster_path,
            popularity: item.vote_count as f64 * item.vote_average,
            year: item
                .release_date
                .as_deref()
                .map(|d| d.chars().take(4).collect())
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_item_conversion() {
        let item = CastItem {
            id: 603,
            title: Some("The Matrix".to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            vote_count: 25_000,
            vote_average: 8.2,
            release_date: Some("1999-03-30".to_string()),
        };

        let movie = Movie::from_cast_item(item).unwrap();
        assert_eq!(movie.id, 603);
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.year, "1999");
        assert_eq!(movie.popularity, 25_000.0 * 8.2);
    }

    #[test]
    fn test_cast_item_without_title_is_dropped() {
        let item = CastItem {
            id: 1,
            title: None,
            poster_path: None,
            vote_count: 10,
            vote_average: 5.0,
            release_date: None,
        };

        assert!(Movie::from_cast_item(item).is_none());
    }

    #[test]
    fn test_cast_item_without_release_date_has_empty_year() {
        let item = CastItem {
            id: 2,
            title: Some("Untitled".to_string()),
            poster_path: None,
            vote_count: 0,
            vote_average: 0.0,
            release_date: None,
        };

        let movie = Movie::from_cast_item(item).unwrap();
        assert_eq!(movie.year, "");
        assert_eq!(movie.popularity, 0.0);
    }

    #[test]
    fn test_person_result_conversion_filters_tv() {
        let result = PersonResult {
            id: 500,
            name: "Tom Cruise".to_string(),
            profile_path: Some("/profile.jpg".to_string()),
            known_for: vec![
                KnownForItem {
                    title: Some("Top Gun".to_string()),
                    media_type: Some("movie".to_string()),
                },
                KnownForItem {
                    title: None,
                    media_type: Some("tv".to_string()),
                },
            ],
        };

        let actor: Actor = result.into();
        assert_eq!(actor.id, 500);
        assert_eq!(actor.known_for, vec!["Top Gun"]);
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let config = TmdbConfig {
            api_key: String::new(),
            base_url: None,
            image_base_url: None,
            timeout_secs: 30,
        };

        let result = TmdbClient::new(config);
        assert!(matches!(result, Err(TmdbError::NotConfigured(_))));
    }
}
