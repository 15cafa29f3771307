//! The static content bundle the core runs against.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::dream::DreamRules;
use crate::entities::{Character, FactionsFile};
use crate::error::{RulesError, RulesResult};
use crate::lore::{Book, CodexEntry, CodexFile};
use crate::mechanics::Layer;
use crate::quests::{QuestFragment, QuestFragmentsFile};
use crate::strings::UiStrings;
use crate::world::{Location, LocationId, LocationsFile, PortalsFile};

/// A non-fatal problem found while loading content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentIssue {
    pub file: String,
    pub message: String,
}

impl ContentIssue {
    pub fn new(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

/// Every content file, merged into one bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentBundle {
    #[serde(default)]
    pub locations: LocationsFile,
    #[serde(default)]
    pub portals: PortalsFile,
    #[serde(default)]
    pub dream_rules: DreamRules,
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub codex: CodexFile,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub factions: FactionsFile,
    #[serde(default)]
    pub quests: QuestFragmentsFile,
    #[serde(default)]
    pub strings: UiStrings,
}

impl ContentBundle {
    /// Parse a bundle from its merged JSON form.
    pub fn from_json_str(json: &str) -> RulesResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> RulesResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.locations.iter().find(|loc| &loc.id == id)
    }

    pub fn has_location(&self, id: &LocationId) -> bool {
        self.location(id).is_some()
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Characters that appear in the given layer.
    pub fn characters_in(&self, layer: Layer) -> impl Iterator<Item = &Character> {
        self.characters.iter().filter(move |c| c.appears_in(layer))
    }

    pub fn codex_entries(&self) -> &[CodexEntry] {
        &self.codex.entries
    }

    /// Quest fragments gated on the given location.
    pub fn quests_at<'a>(
        &'a self,
        location: &'a LocationId,
    ) -> impl Iterator<Item = &'a QuestFragment> + 'a {
        self.quests
            .fragments
            .iter()
            .filter(move |fragment| fragment.triggers_at(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BUNDLE: &str = r#"{
        "locations": { "locations": [
            { "id": "library", "name": "Library", "neighbors": ["chapel"] },
            { "id": "chapel", "name": "Chapel", "type": "thin_place", "neighbors": ["library"] }
        ] },
        "dreamRules": { "slip": { "baseIntervalSec": 60 } },
        "books": [ { "id": "ledger", "title": "Ledger", "tags": ["moth"] } ],
        "codex": { "entries": [ { "id": "ledger", "title": "On Moths" } ] },
        "characters": [
            { "id": "keeper", "name": "Keeper", "layer": "waking" },
            { "id": "moth-queen", "name": "Moth Queen", "layer": "dream" }
        ],
        "quests": { "fragments": [
            { "id": "q1", "title": "Vespers", "conditions": { "location": "chapel" } }
        ] }
    }"#;

    #[test]
    fn test_bundle_lookups() {
        let bundle = ContentBundle::from_json_str(BUNDLE).unwrap();
        assert!(bundle.has_location(&"chapel".into()));
        assert!(!bundle.has_location(&"crypt".into()));
        assert_eq!(bundle.book("ledger").unwrap().title, "Ledger");
        assert!(bundle.book("missing").is_none());
        assert_eq!(bundle.character("keeper").unwrap().name, "Keeper");
        assert_eq!(bundle.codex_entries().len(), 1);
    }

    #[test]
    fn test_characters_in_layer() {
        let bundle = ContentBundle::from_json_str(BUNDLE).unwrap();
        let dreamers: Vec<_> = bundle.characters_in(Layer::Dream).map(|c| c.id.as_str()).collect();
        assert_eq!(dreamers, vec!["moth-queen"]);
    }

    #[test]
    fn test_quests_at() {
        let bundle = ContentBundle::from_json_str(BUNDLE).unwrap();
        let chapel = LocationId::from("chapel");
        let library = LocationId::from("library");
        assert_eq!(bundle.quests_at(&chapel).count(), 1);
        assert_eq!(bundle.quests_at(&library).count(), 0);
    }

    #[test]
    fn test_missing_sections_default() {
        let bundle = ContentBundle::from_json_str("{}").unwrap();
        assert!(bundle.locations.locations.is_empty());
        assert_eq!(bundle.dream_rules, DreamRules::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BUNDLE.as_bytes()).unwrap();
        let bundle = ContentBundle::from_file(file.path()).unwrap();
        assert_eq!(bundle.locations.locations.len(), 2);

        let err = ContentBundle::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, RulesError::Io { .. }));
    }

    #[test]
    fn test_issue_display() {
        let issue = ContentIssue::new("lore/books.json", "Book missing id or title");
        assert_eq!(issue.to_string(), "lore/books.json: Book missing id or title");
    }
}
