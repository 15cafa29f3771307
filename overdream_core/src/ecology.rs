//! Ecology rule engine - maps player attributes to dream effects.
//!
//! Evaluation policy:
//! - every rule in every list is tested on its own, nothing short-circuits;
//! - `palette` is singular, so the last matching palette rule wins;
//! - spawns, music and puzzles accumulate across matching rules in rule
//!   order, duplicates included.

use overdream_rules::{Condition, DreamRules, EngineTuning};
use serde::{Deserialize, Serialize};

use crate::state::{GameState, PlayerState};
use crate::store::Store;

/// Effects produced by one ecology evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EcologyOutcome {
    pub palette: Option<String>,
    pub spawns: Vec<String>,
    pub music: Vec<String>,
    pub puzzles: Vec<String>,
}

/// Test a condition against the player. Absent predicates pass.
pub fn condition_matches(condition: &Condition, player: &PlayerState) -> bool {
    if let Some(min) = condition.morality_min {
        if player.morality() < min {
            return false;
        }
    }
    if let Some(max) = condition.morality_max {
        if player.morality() > max {
            return false;
        }
    }
    if let Some(min) = condition.manipulative_min {
        if player.style().manipulative < min {
            return false;
        }
    }
    if let Some(tags) = &condition.diet_has {
        if !tags.iter().all(|tag| player.diet().has(tag)) {
            return false;
        }
    }
    true
}

/// Evaluate every rule list against the player. Pure: reads only.
pub fn evaluate(rules: &DreamRules, player: &PlayerState) -> EcologyOutcome {
    let mut outcome = EcologyOutcome::default();

    for rule in &rules.palettes {
        if condition_matches(&rule.when, player) {
            outcome.palette = Some(rule.apply.clone());
        }
    }
    for rule in &rules.spawns {
        if condition_matches(&rule.when, player) {
            outcome.spawns.extend(rule.add.iter().cloned());
        }
    }
    for rule in &rules.music {
        if condition_matches(&rule.when, player) {
            outcome.music.push(rule.motif.clone());
        }
    }
    for rule in &rules.puzzles {
        if condition_matches(&rule.when, player) {
            outcome.puzzles.push(rule.modifier.clone());
        }
    }

    outcome
}

impl GameState {
    /// Evaluate the rules, fold in matured spawns and feed motifs back into the diet.
    pub(crate) fn apply_dream_ecology(
        &mut self,
        rules: &DreamRules,
        motif_feedback: f64,
    ) -> EcologyOutcome {
        let mut outcome = evaluate(rules, &self.player);
        outcome
            .spawns
            .extend(self.consume_spawn_queue().into_iter().map(|item| item.spawn));

        self.flags.last_ecology_hash = Some(serde_json::to_string(&outcome).unwrap_or_default());

        // Hearing a motif reinforces the diet tags that summon it.
        for motif in &outcome.music {
            self.player.adjust_diet(motif, motif_feedback);
        }

        tracing::debug!(
            palette = ?outcome.palette,
            spawns = outcome.spawns.len(),
            music = outcome.music.len(),
            puzzles = outcome.puzzles.len(),
            "Dream ecology applied"
        );
        outcome
    }
}

impl Store<GameState> {
    /// Run the ecology against the loaded dream rules. `None` before content loads.
    pub fn apply_dream_ecology(&mut self, tuning: &EngineTuning) -> Option<EcologyOutcome> {
        let content = self.state().content_handle()?;
        Some(self.mutate(|s| s.apply_dream_ecology(&content.dream_rules, tuning.motif_feedback)))
    }
}
