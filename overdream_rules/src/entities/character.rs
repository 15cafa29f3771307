//! Character and dialogue tree definitions.

use serde::{Deserialize, Serialize};

use super::ChoiceEffects;
use crate::mechanics::Layer;

/// A single selectable reply in a dialogue node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueChoice {
    pub text: String,
    #[serde(default)]
    pub effects: Option<ChoiceEffects>,
    /// Node to continue with. `None` ends the conversation.
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueNode {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub choices: Vec<DialogueChoice>,
}

/// A non-player character bound to one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub layer: Layer,
    #[serde(default)]
    pub dialogue: Vec<DialogueNode>,
}

impl Character {
    /// Index of the dialogue node with the given id.
    pub fn node_index(&self, node_id: &str) -> Option<usize> {
        self.dialogue.iter().position(|node| node.id == node_id)
    }

    pub fn node(&self, index: usize) -> Option<&DialogueNode> {
        self.dialogue.get(index)
    }

    pub fn appears_in(&self, layer: Layer) -> bool {
        self.layer == layer
    }
}
