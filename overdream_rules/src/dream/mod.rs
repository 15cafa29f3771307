//! Dream rules: slip and intrusion tuning plus the declarative ecology rules.
//!
//! Each ecology rule pairs a [`Condition`] with one effect. The rule lists are
//! evaluated independently by the core; this module only describes them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::world::LocationId;

/// Tuning for the waking/dream tension cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlipRules {
    /// Seconds of waking time for tension to climb from 0 to 100.
    pub base_interval_sec: f64,
    #[serde(default)]
    pub tension_gain_per_action: f64,
    /// Location -> tension rate multiplier.
    #[serde(default)]
    pub thin_place_multipliers: HashMap<LocationId, f64>,
    /// Action name -> tension adjustment replacing the default gain.
    #[serde(default)]
    pub calm_actions: HashMap<String, f64>,
}

impl SlipRules {
    /// Tension rate multiplier for a location, 1 when it has no override.
    pub fn multiplier_for(&self, location: &LocationId) -> f64 {
        self.thin_place_multipliers
            .get(location)
            .copied()
            .unwrap_or(1.0)
    }

    pub fn calm_action(&self, action: &str) -> Option<f64> {
        self.calm_actions.get(action).copied()
    }
}

impl Default for SlipRules {
    fn default() -> Self {
        Self {
            base_interval_sec: 90.0,
            tension_gain_per_action: 5.0,
            thin_place_multipliers: HashMap::new(),
            calm_actions: HashMap::new(),
        }
    }
}

/// Tuning for meta-dream intrusions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrusionRules {
    pub instability_per_slip: f64,
    pub meta_dream_threshold: f64,
    pub cooldown_sec: f64,
}

impl Default for IntrusionRules {
    fn default() -> Self {
        Self {
            instability_per_slip: 10.0,
            meta_dream_threshold: 50.0,
            cooldown_sec: 30.0,
        }
    }
}

/// A conjunction of optional predicates over player attributes.
///
/// Absent predicates always pass. An empty condition matches every player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morality_min: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morality_max: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manipulative_min: Option<f64>,
    /// Every listed diet tag must carry a strictly positive weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_has: Option<Vec<String>>,
}

impl Condition {
    /// A condition with no predicates.
    pub fn always() -> Self {
        Self::default()
    }

    pub fn with_morality_min(mut self, min: i32) -> Self {
        self.morality_min = Some(min);
        self
    }

    pub fn with_morality_max(mut self, max: i32) -> Self {
        self.morality_max = Some(max);
        self
    }

    pub fn with_manipulative_min(mut self, min: f64) -> Self {
        self.manipulative_min = Some(min);
        self
    }

    pub fn with_diet(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.diet_has = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// Sets the dream palette. Singular: the last matching rule wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteRule {
    pub when: Condition,
    pub apply: String,
}

/// Adds entities to the dream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    pub when: Condition,
    pub add: Vec<String>,
}

/// Adds a music motif.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicRule {
    pub when: Condition,
    pub motif: String,
}

/// Adds a puzzle modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleRule {
    pub when: Condition,
    #[serde(rename = "mod")]
    pub modifier: String,
}

/// `world/dream_rules.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DreamRules {
    #[serde(default)]
    pub slip: SlipRules,
    #[serde(default)]
    pub intrusion: IntrusionRules,
    #[serde(default)]
    pub palettes: Vec<PaletteRule>,
    #[serde(default)]
    pub spawns: Vec<SpawnRule>,
    #[serde(default)]
    pub music: Vec<MusicRule>,
    #[serde(default)]
    pub puzzles: Vec<PuzzleRule>,
}
