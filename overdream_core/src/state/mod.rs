//! Game state - the store root and the named operations that mutate it.
//!
//! Fields are crate-private. Writes go through the operations on
//! [`GameStore`], each of which performs its writes and then notifies
//! subscribers once.

mod flags;
mod player;

pub use flags::*;
pub use player::*;

use overdream_rules::{
    Book, ContentBundle, ContentIssue, Layer, Location, LocationId, SpawnRequest, StyleAxis,
};
use std::sync::Arc;

use crate::quests;
use crate::spawn_queue::SpawnQueueItem;
use crate::store::Store;

/// The store holding the single game state instance.
pub type GameStore = Store<GameState>;

/// Direction of travel through a location's neighbor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The first listed neighbor.
    Forward,
    /// The last listed neighbor.
    Back,
}

/// The conversation currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDialogue {
    pub character_id: String,
    pub node_index: usize,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) layer: Layer,
    /// Incremented on every layer change.
    pub(crate) layer_generation: u64,
    pub(crate) content: Option<Arc<ContentBundle>>,
    pub(crate) issues: Vec<ContentIssue>,
    pub(crate) player: PlayerState,
    pub(crate) flags: GameFlags,
    pub(crate) active_dialogue: Option<ActiveDialogue>,
    pub(crate) codex_focus: Option<String>,
    pub(crate) menu_visible: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            layer: Layer::Menu,
            layer_generation: 0,
            content: None,
            issues: Vec::new(),
            player: PlayerState::default(),
            flags: GameFlags::default(),
            active_dialogue: None,
            codex_focus: None,
            menu_visible: true,
        }
    }
}

impl GameState {
    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn layer_generation(&self) -> u64 {
        self.layer_generation
    }

    pub fn content(&self) -> Option<&ContentBundle> {
        self.content.as_deref()
    }

    /// Shared handle to the loaded content, if any.
    pub fn content_handle(&self) -> Option<Arc<ContentBundle>> {
        self.content.clone()
    }

    pub fn issues(&self) -> &[ContentIssue] {
        &self.issues
    }

    /// Content loaded with problems; UI should fall back to default strings.
    pub fn is_degraded(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn flags(&self) -> &GameFlags {
        &self.flags
    }

    pub fn active_dialogue(&self) -> Option<&ActiveDialogue> {
        self.active_dialogue.as_ref()
    }

    pub fn codex_focus(&self) -> Option<&str> {
        self.codex_focus.as_deref()
    }

    pub fn menu_visible(&self) -> bool {
        self.menu_visible
    }

    /// The content location the player stands in.
    pub fn current_location(&self) -> Option<&Location> {
        self.content()?.location(&self.player.location)
    }

    /// Fingerprint of the attributes that drive the ecology.
    pub fn ecology_fingerprint(&self) -> String {
        serde_json::json!({
            "morality": self.player.morality,
            "style": self.player.style,
            "diet": self.player.diet,
        })
        .to_string()
    }

    pub(crate) fn set_layer(&mut self, layer: Layer) {
        tracing::debug!(from = %self.layer, to = %layer, "Layer change");
        self.flags.last_layer = self.layer;
        self.layer = layer;
        self.layer_generation += 1;
    }

    pub(crate) fn reset_player(&mut self) {
        self.player = PlayerState::default();
        self.flags = GameFlags::default();
        self.active_dialogue = None;
        self.codex_focus = None;
    }

    pub(crate) fn queue_spawn(&mut self, request: SpawnRequest) -> SpawnQueueItem {
        let slip_count = self.player.slip_count;
        self.flags
            .pending_spawn_queue
            .enqueue(request, slip_count)
            .clone()
    }

    pub(crate) fn consume_spawn_queue(&mut self) -> Vec<SpawnQueueItem> {
        let slip_count = self.player.slip_count;
        self.flags.pending_spawn_queue.consume(slip_count)
    }

    pub(crate) fn unlock_lore(&mut self, book: &Book) {
        if self.player.discover_lore(&book.id) {
            tracing::debug!(book = %book.id, "Lore discovered");
        }
        if let Some(request) = book.seeded_spawn() {
            self.queue_spawn(request);
        }
        if let Some(motif) = book.seeded_motif() {
            self.player.adjust_diet(motif, 1.0);
        }
    }

    fn knows_location(&self, id: &LocationId) -> bool {
        self.content().is_some_and(|content| content.has_location(id))
    }
}

impl Store<GameState> {
    /// Install loaded content along with any non-fatal loading issues.
    pub fn set_content(&mut self, content: ContentBundle, issues: Vec<ContentIssue>) {
        for issue in &issues {
            tracing::warn!(file = %issue.file, "Content issue: {}", issue.message);
        }
        let content = Arc::new(content);
        self.mutate(|s| {
            s.content = Some(content);
            s.issues = issues;
        });
    }

    pub fn set_issues(&mut self, issues: Vec<ContentIssue>) {
        self.mutate(|s| s.issues = issues);
    }

    /// Restore player and flags to their new-game defaults.
    pub fn reset_player_state(&mut self) {
        self.mutate(GameState::reset_player);
    }

    /// Switch layers, remembering the previous one as `last_layer`.
    pub fn set_layer(&mut self, layer: Layer) {
        self.mutate(|s| s.set_layer(layer));
    }

    pub fn set_menu_visible(&mut self, visible: bool) {
        self.mutate(|s| s.menu_visible = visible);
    }

    pub fn apply_morality(&mut self, delta: i32) {
        self.mutate(|s| s.player.apply_morality(delta));
    }

    pub fn bump_style(&mut self, axis: StyleAxis, delta: f64) {
        self.mutate(|s| s.player.bump_style(axis, delta));
    }

    pub fn adjust_diet(&mut self, tag: &str, delta: f64) {
        self.mutate(|s| s.player.adjust_diet(tag, delta));
    }

    /// Move the player and fire quest fragments gated on the destination.
    ///
    /// Unknown locations, or any move before content has loaded, are ignored
    /// and return `false`.
    pub fn move_to_location(&mut self, location: impl Into<LocationId>) -> bool {
        let location = location.into();
        if !self.state().knows_location(&location) {
            tracing::debug!(location = %location, "Ignoring move to unknown location");
            return false;
        }
        self.mutate(|s| {
            s.player.set_location(location);
            quests::apply_location_triggers(s);
        });
        true
    }

    /// Move to the first (forward) or last (back) neighbor of the current location.
    pub fn step_location(&mut self, direction: Direction) -> bool {
        let target = self.state().current_location().and_then(|loc| match direction {
            Direction::Forward => loc.neighbors.first().cloned(),
            Direction::Back => loc.neighbors.last().cloned(),
        });
        match target {
            Some(target) => self.move_to_location(target),
            None => false,
        }
    }

    pub fn unlock_lore(&mut self, book: &Book) {
        self.mutate(|s| s.unlock_lore(book));
    }

    pub fn queue_spawn(&mut self, request: SpawnRequest) -> SpawnQueueItem {
        self.mutate(|s| s.queue_spawn(request))
    }

    /// Hand out every matured spawn exactly once.
    pub fn consume_spawn_queue(&mut self) -> Vec<SpawnQueueItem> {
        self.mutate(GameState::consume_spawn_queue)
    }

    pub fn set_slip_tension(&mut self, value: f64) {
        self.mutate(|s| s.player.set_slip_tension(value));
    }

    pub fn increment_slip_count(&mut self) {
        self.mutate(|s| s.player.increment_slip_count());
    }

    pub fn adjust_instability(&mut self, delta: f64) {
        self.mutate(|s| s.player.adjust_instability(delta));
    }

    pub fn record_ecology_hash(&mut self, hash: impl Into<String>) {
        let hash = hash.into();
        self.mutate(|s| s.flags.last_ecology_hash = Some(hash));
    }

    pub fn set_codex_focus(&mut self, entry_id: Option<String>) {
        self.mutate(|s| s.codex_focus = entry_id);
    }

    /// Menu "start": fresh player, straight into the waking layer.
    pub fn start_new_game(&mut self) {
        tracing::info!("Starting new game");
        self.mutate(|s| {
            s.reset_player();
            s.set_layer(Layer::Waking);
            s.menu_visible = false;
        });
    }

    /// Menu "continue": resume the layer that was active before the menu.
    ///
    /// Meta-dreams are transient, so resuming one lands in waking instead.
    pub fn continue_game(&mut self) {
        self.mutate(|s| {
            let resume = match s.flags.last_layer {
                Layer::Menu | Layer::Meta => Layer::Waking,
                layer => layer,
            };
            s.set_layer(resume);
            s.menu_visible = false;
        });
    }

    /// Open the menu, recording the current layer for "continue".
    pub fn open_menu(&mut self) {
        self.mutate(|s| {
            if s.layer != Layer::Menu {
                s.set_layer(Layer::Menu);
            }
            s.menu_visible = true;
        });
    }
}
