//! The player's attributes and the clamping rules that guard them.

use indexmap::IndexSet;
use overdream_rules::{LocationId, StyleAxis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MORALITY_MIN: i32 = -100;
pub const MORALITY_MAX: i32 = 100;
pub const TENSION_MAX: f64 = 100.0;

/// Location a new game starts in.
pub const STARTING_LOCATION: &str = "library";

/// Interaction style, each axis in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PlayStyle {
    pub cooperative: f64,
    pub manipulative: f64,
    pub withdrawn: f64,
}

impl PlayStyle {
    pub fn get(&self, axis: StyleAxis) -> f64 {
        match axis {
            StyleAxis::Cooperative => self.cooperative,
            StyleAxis::Manipulative => self.manipulative,
            StyleAxis::Withdrawn => self.withdrawn,
        }
    }

    fn slot(&mut self, axis: StyleAxis) -> &mut f64 {
        match axis {
            StyleAxis::Cooperative => &mut self.cooperative,
            StyleAxis::Manipulative => &mut self.manipulative,
            StyleAxis::Withdrawn => &mut self.withdrawn,
        }
    }

    pub(crate) fn bump(&mut self, axis: StyleAxis, delta: f64) {
        let slot = self.slot(axis);
        let next = *slot + delta;
        if !next.is_nan() {
            *slot = next.clamp(0.0, 1.0);
        }
    }

    /// Re-apply the [0, 1] bound to every axis.
    pub(crate) fn clamped(self) -> Self {
        let mut style = PlayStyle::default();
        for axis in StyleAxis::ALL {
            style.bump(axis, self.get(axis));
        }
        style
    }
}

/// Accumulated exposure to narrative motifs, keyed by tag.
///
/// Weights are unbounded and may go negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Diet(BTreeMap<String, f64>);

impl Diet {
    pub fn weight(&self, tag: &str) -> f64 {
        self.0.get(tag).copied().unwrap_or(0.0)
    }

    /// Whether the tag has a strictly positive weight.
    pub fn has(&self, tag: &str) -> bool {
        self.weight(tag) > 0.0
    }

    pub(crate) fn adjust(&mut self, tag: &str, delta: f64) {
        *self.0.entry(tag.to_string()).or_insert(0.0) += delta;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(tag, weight)| (tag.as_str(), *weight))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for Diet {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Mutable player state. Mutated only through the store's named operations.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub(crate) location: LocationId,
    pub(crate) morality: i32,
    pub(crate) style: PlayStyle,
    pub(crate) diet: Diet,
    pub(crate) lore_discovered: IndexSet<String>,
    pub(crate) codex_unlocked: IndexSet<String>,
    pub(crate) slip_tension: f64,
    pub(crate) instability: f64,
    pub(crate) slip_count: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            location: LocationId::from(STARTING_LOCATION),
            morality: 0,
            style: PlayStyle::default(),
            diet: Diet::default(),
            lore_discovered: IndexSet::new(),
            codex_unlocked: IndexSet::new(),
            slip_tension: 0.0,
            instability: 0.0,
            slip_count: 0,
        }
    }
}

impl PlayerState {
    pub fn location(&self) -> &LocationId {
        &self.location
    }

    pub fn morality(&self) -> i32 {
        self.morality
    }

    pub fn style(&self) -> &PlayStyle {
        &self.style
    }

    pub fn diet(&self) -> &Diet {
        &self.diet
    }

    /// Discovered book ids in discovery order.
    pub fn lore_discovered(&self) -> &IndexSet<String> {
        &self.lore_discovered
    }

    pub fn has_discovered(&self, book_id: &str) -> bool {
        self.lore_discovered.contains(book_id)
    }

    pub fn codex_unlocked(&self) -> &IndexSet<String> {
        &self.codex_unlocked
    }

    pub fn slip_tension(&self) -> f64 {
        self.slip_tension
    }

    pub fn instability(&self) -> f64 {
        self.instability
    }

    pub fn slip_count(&self) -> u32 {
        self.slip_count
    }

    pub(crate) fn apply_morality(&mut self, delta: i32) {
        self.morality = self
            .morality
            .saturating_add(delta)
            .clamp(MORALITY_MIN, MORALITY_MAX);
    }

    pub(crate) fn bump_style(&mut self, axis: StyleAxis, delta: f64) {
        self.style.bump(axis, delta);
    }

    pub(crate) fn adjust_diet(&mut self, tag: &str, delta: f64) {
        self.diet.adjust(tag, delta);
    }

    pub(crate) fn set_location(&mut self, location: LocationId) {
        self.location = location;
    }

    /// Returns `true` if the book was not known before.
    pub(crate) fn discover_lore(&mut self, book_id: &str) -> bool {
        self.lore_discovered.insert(book_id.to_string())
    }

    pub(crate) fn unlock_codex(&mut self, entry_id: &str) -> bool {
        self.codex_unlocked.insert(entry_id.to_string())
    }

    pub(crate) fn set_slip_tension(&mut self, value: f64) {
        if !value.is_nan() {
            self.slip_tension = value.clamp(0.0, TENSION_MAX);
        }
    }

    pub(crate) fn adjust_slip_tension(&mut self, delta: f64) {
        self.set_slip_tension(self.slip_tension + delta);
    }

    pub(crate) fn adjust_instability(&mut self, delta: f64) {
        let next = self.instability + delta;
        if !next.is_nan() {
            self.instability = next.max(0.0);
        }
    }

    pub(crate) fn increment_slip_count(&mut self) {
        self.slip_count = self.slip_count.saturating_add(1);
    }
}
