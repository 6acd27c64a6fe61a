//! Domain types produced by the movie source.

use serde::{Deserialize, Serialize};

/// A movie competing in a tournament.
///
/// Built once from a TMDb credit entry and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// TMDb movie ID.
    pub id: u32,
    /// Movie title.
    pub title: String,
    /// Poster path (relative to the TMDb image base URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    /// Popularity score used for seeding: vote_count * vote_average.
    /// Not TMDb's own popularity field.
    #[serde(default)]
    pub popularity: f64,
    /// Release year for display ("" when the release date is unknown).
    #[serde(default)]
    pub year: String,
}

/// An actor or actress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Actor {
    /// TMDb person ID.
    pub id: u32,
    /// Full name.
    pub name: String,
    /// Profile photo path (relative to the TMDb image base URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<String>,
    /// Titles the person is known for (movies only, used in disambiguation).
    #[serde(default)]
    pub known_for: Vec<String>,
}

impl Actor {
    /// Placeholder name used when the person lookup fails.
    pub fn placeholder_name(id: u32) -> String {
        format!("Actor {}", id)
    }
}
