//! Characters, factions and the effect payloads attached to choices and quests.

mod character;
mod effects;

pub use character::*;
pub use effects::*;

use serde::{Deserialize, Serialize};

/// A faction the player can drift toward or away from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub alignment: String,
}

/// `npcs/factions.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FactionsFile {
    pub factions: Vec<Faction>,
}
