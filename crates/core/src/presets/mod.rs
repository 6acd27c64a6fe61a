//! Bundled index of well-known actors.
//!
//! Provides instant lookup for popular actors without an API call. When a
//! typed name matches a preset unambiguously, the disambiguation step can
//! be skipped entirely.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::tmdb::Actor;

/// Preset actors shipped with the binary, grouped by industry/category.
static BUNDLED: Lazy<PresetActorIndex> = Lazy::new(|| {
    PresetActorIndex::from_json(include_str!("../../assets/preset_actors.json"))
        .expect("bundled preset_actors.json is valid")
});

/// A single preset entry.
#[derive(Debug, Clone, Deserialize)]
struct PresetActor {
    id: u32,
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
}

impl PresetActor {
    fn matches(&self, lower_query: &str) -> bool {
        self.name.to_lowercase().contains(lower_query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_lowercase().contains(lower_query))
    }

    fn to_actor(&self) -> Actor {
        Actor {
            id: self.id,
            name: self.name.clone(),
            // Presets carry no profile photos or known-for titles.
            profile_path: None,
            known_for: Vec::new(),
        }
    }
}

/// In-memory index over the preset actor table.
#[derive(Debug)]
pub struct PresetActorIndex {
    // All categories flattened; category names only matter in the file.
    actors: Vec<PresetActor>,
}

impl PresetActorIndex {
    /// The index over the bundled table, parsed once.
    pub fn bundled() -> &'static PresetActorIndex {
        &BUNDLED
    }

    /// Parse an index from JSON (categories mapping to actor lists).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let categories: BTreeMap<String, Vec<PresetActor>> = serde_json::from_str(json)?;
        Ok(Self {
            actors: categories.into_values().flatten().collect(),
        })
    }

    /// Number of actors in the index.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// True when the index holds no actors.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Every actor in the index, in file order.
    pub fn all(&self) -> Vec<Actor> {
        self.actors.iter().map(PresetActor::to_actor).collect()
    }

    /// Actors whose name or any alias contains `query`, case-insensitive.
    /// Blank queries match nothing.
    pub fn search(&self, query: &str) -> Vec<Actor> {
        let lower_query = query.trim().to_lowercase();
        if lower_query.is_empty() {
            return Vec::new();
        }

        self.actors
            .iter()
            .filter(|preset| preset.matches(&lower_query))
            .map(PresetActor::to_actor)
            .collect()
    }

    /// Exact preset by TMDb ID.
    pub fn find_by_id(&self, id: u32) -> Option<Actor> {
        self.actors
            .iter()
            .find(|preset| preset.id == id)
            .map(PresetActor::to_actor)
    }

    /// The preset whose name equals `query` (case-insensitive), used to
    /// skip disambiguation on an unambiguous match.
    pub fn exact_match(&self, query: &str) -> Option<Actor> {
        let trimmed = query.trim();
        self.search(trimmed)
            .into_iter()
            .find(|actor| actor.name.eq_ignore_ascii_case(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_INDEX: &str = r#"
    {
        "hollywood_actors": [
            { "id": 500, "name": "Tom Cruise" },
            { "id": 31, "name": "Tom Hanks", "aliases": [] }
        ],
        "bollywood_actors": [
            { "id": 35742, "name": "Shah Rukh Khan", "aliases": ["SRK", "King Khan"] }
        ]
    }
    "#;

    #[test]
    fn test_bundled_index_loads() {
        let index = PresetActorIndex::bundled();
        assert!(!index.is_empty());
        assert!(index.find_by_id(500).is_some());
    }

    #[test]
    fn test_search_by_name_substring() {
        let index = PresetActorIndex::from_json(SMALL_INDEX).unwrap();
        let results = index.search("tom");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_search_by_alias() {
        let index = PresetActorIndex::from_json(SMALL_INDEX).unwrap();
        let results = index.search("srk");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Shah Rukh Khan");
        assert_eq!(results[0].id, 35742);
    }

    #[test]
    fn test_search_blank_query_matches_nothing() {
        let index = PresetActorIndex::from_json(SMALL_INDEX).unwrap();
        assert!(index.search("").is_empty());
        assert!(index.search("   ").is_empty());
    }

    #[test]
    fn test_exact_match_requires_full_name() {
        let index = PresetActorIndex::from_json(SMALL_INDEX).unwrap();
        assert!(index.exact_match("Tom").is_none());
        assert_eq!(index.exact_match("tom cruise").unwrap().id, 500);
        assert_eq!(index.exact_match("  Tom Cruise  ").unwrap().id, 500);
    }

    #[test]
    fn test_find_by_id() {
        let index = PresetActorIndex::from_json(SMALL_INDEX).unwrap();
        assert_eq!(index.find_by_id(31).unwrap().name, "Tom Hanks");
        assert!(index.find_by_id(9999).is_none());
    }
}
