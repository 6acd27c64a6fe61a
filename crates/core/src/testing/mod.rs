//! Testing utilities and mock implementations.
//!
//! Provides a mock movie source so sessions and the HTTP API can be
//! exercised end to end without touching TMDb.

mod mock_movie_source;

pub use mock_movie_source::{MockMovieSource, RecordedSourceQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::tmdb::{Actor, Movie};

    /// Create a test movie with reasonable defaults.
    pub fn movie(id: u32, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            popularity: 1000.0,
            year: "2020".to_string(),
        }
    }

    /// Create `count` movies with IDs 1..=count, ranked by descending
    /// popularity (movie 1 is the most popular).
    pub fn movies(count: usize) -> Vec<Movie> {
        movies_from(1, count)
    }

    /// Create `count` movies with IDs starting at `first_id`, ranked by
    /// descending popularity.
    pub fn movies_from(first_id: u32, count: usize) -> Vec<Movie> {
        (0..count as u32)
            .map(|i| {
                let id = first_id + i;
                Movie {
                    popularity: 10_000.0 - i as f64 * 100.0,
                    ..movie(id, &format!("Movie {}", id))
                }
            })
            .collect()
    }

    /// Create a test actor.
    pub fn actor(id: u32, name: &str) -> Actor {
        Actor {
            id,
            name: name.to_string(),
            profile_path: Some(format!("/profile-{}.jpg", id)),
            known_for: vec![format!("{}'s Best Movie", name)],
        }
    }
}
