//! Lore: readable books and the codex entries they unlock.

use serde::{Deserialize, Serialize};

use crate::entities::SpawnRequest;

/// Tag used for seeded spawns when a book carries no tags.
pub const GENERAL_TAG: &str = "general";

/// Seed planted in the world when a book is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookSeed {
    #[serde(default)]
    pub spawn: Option<String>,
    #[serde(default)]
    pub motif: Option<String>,
    #[serde(default)]
    pub delay_slips: u32,
}

/// A book the player can find and read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub seed: Option<BookSeed>,
}

impl Book {
    /// Deferred spawn planted by this book's seed, tagged with its first tag.
    pub fn seeded_spawn(&self) -> Option<SpawnRequest> {
        let seed = self.seed.as_ref()?;
        let spawn = seed.spawn.as_ref()?;
        Some(SpawnRequest {
            tag: self
                .tags
                .first()
                .cloned()
                .unwrap_or_else(|| GENERAL_TAG.to_string()),
            spawn: spawn.clone(),
            delay_slips: seed.delay_slips,
        })
    }

    pub fn seeded_motif(&self) -> Option<&str> {
        self.seed.as_ref()?.motif.as_deref()
    }
}

/// An entry in the in-game codex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodexEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// `lore/codex.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CodexFile {
    pub entries: Vec<CodexEntry>,
}
