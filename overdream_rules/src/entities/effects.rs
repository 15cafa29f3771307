//! Effect payloads carried by dialogue choices and quest fragments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request to add a spawn after a number of future slips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnRequest {
    pub tag: String,
    pub spawn: String,
    pub delay_slips: u32,
}

impl SpawnRequest {
    pub fn new(tag: impl Into<String>, spawn: impl Into<String>, delay_slips: u32) -> Self {
        Self {
            tag: tag.into(),
            spawn: spawn.into(),
            delay_slips,
        }
    }
}

/// Attribute changes applied when a dialogue choice is taken.
///
/// Style keys are axis names; unrecognised axes are ignored when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChoiceEffects {
    #[serde(default)]
    pub morality: Option<i32>,
    #[serde(default)]
    pub style: BTreeMap<String, f64>,
    #[serde(default)]
    pub diet: BTreeMap<String, f64>,
}

impl ChoiceEffects {
    pub fn is_empty(&self) -> bool {
        self.morality.is_none() && self.style.is_empty() && self.diet.is_empty()
    }
}

/// Effects applied when a quest fragment triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuestEffects {
    #[serde(default)]
    pub morality: Option<i32>,
    #[serde(default)]
    pub style: BTreeMap<String, f64>,
    #[serde(default)]
    pub queue_spawn: Option<SpawnRequest>,
}
