//! Shared matchup type.

use serde::{Deserialize, Serialize};

use crate::tmdb::Movie;

/// One comparison between two movies, resolved by a single user pick.
///
/// Created when a round is formed; the winner is recorded exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Matchup {
    pub movie1: Movie,
    pub movie2: Movie,
    /// None until the user picks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Movie>,
}

impl Matchup {
    /// Create an undecided matchup.
    pub fn new(movie1: Movie, movie2: Movie) -> Self {
        Self {
            movie1,
            movie2,
            winner: None,
        }
    }

    /// Whether `id` identifies one of the two contenders.
    pub fn contains(&self, id: u32) -> bool {
        self.movie1.id == id || self.movie2.id == id
    }

    /// Copy of this matchup with the winner recorded.
    pub fn with_winner(&self, winner: Movie) -> Self {
        Self {
            movie1: self.movie1.clone(),
            movie2: self.movie2.clone(),
            winner: Some(winner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_contains() {
        let m = Matchup::new(fixtures::movie(1, "A"), fixtures::movie(2, "B"));
        assert!(m.contains(1));
        assert!(m.contains(2));
        assert!(!m.contains(3));
    }

    #[test]
    fn test_with_winner() {
        let a = fixtures::movie(1, "A");
        let m = Matchup::new(a.clone(), fixtures::movie(2, "B"));
        assert!(m.winner.is_none());

        let decided = m.with_winner(a.clone());
        assert_eq!(decided.winner, Some(a));
        // Original untouched.
        assert!(m.winner.is_none());
    }
}
