//! Save snapshots - a set-free copy of the player and flags.
//!
//! Sets are written as arrays in discovery order so saves stay readable
//! and diff cleanly.

use overdream_rules::{Layer, LocationId};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::spawn_queue::SpawnQueue;
use crate::state::{Diet, GameFlags, GameState, PlayStyle, PlayerState, MORALITY_MAX, MORALITY_MIN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStateSnapshot {
    pub location: LocationId,
    pub morality: i32,
    pub style: PlayStyle,
    #[serde(default)]
    pub diet: Diet,
    #[serde(default)]
    pub lore_discovered: Vec<String>,
    #[serde(default)]
    pub codex_unlocked: Vec<String>,
    pub slip_tension: f64,
    pub instability: f64,
    pub slip_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FlagsSnapshot {
    pub last_ecology_hash: Option<String>,
    #[serde(default)]
    pub pending_spawn_queue: SpawnQueue,
    #[serde(default)]
    pub last_layer: Layer,
}

/// The persisted part of [`GameState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub player: PlayerStateSnapshot,
    pub flags: FlagsSnapshot,
}

impl StateSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = state.player();
        let flags = state.flags();
        Self {
            player: PlayerStateSnapshot {
                location: player.location().clone(),
                morality: player.morality(),
                style: *player.style(),
                diet: player.diet().clone(),
                lore_discovered: player.lore_discovered().iter().cloned().collect(),
                codex_unlocked: player.codex_unlocked().iter().cloned().collect(),
                slip_tension: player.slip_tension(),
                instability: player.instability(),
                slip_count: player.slip_count(),
            },
            flags: FlagsSnapshot {
                last_ecology_hash: flags.last_ecology_hash().map(str::to_string),
                pending_spawn_queue: flags.pending_spawn_queue().clone(),
                last_layer: flags.last_layer(),
            },
        }
    }

    /// Rebuild live state. Out-of-range values from hand-edited saves are
    /// clamped back into range.
    pub fn restore(&self) -> (PlayerState, GameFlags) {
        let snapshot = &self.player;
        let mut player = PlayerState {
            location: snapshot.location.clone(),
            morality: snapshot.morality.clamp(MORALITY_MIN, MORALITY_MAX),
            style: snapshot.style.clamped(),
            diet: snapshot.diet.clone(),
            lore_discovered: snapshot.lore_discovered.iter().cloned().collect(),
            codex_unlocked: snapshot.codex_unlocked.iter().cloned().collect(),
            slip_count: snapshot.slip_count,
            ..PlayerState::default()
        };
        player.set_slip_tension(snapshot.slip_tension);
        player.adjust_instability(snapshot.instability);

        let flags = GameFlags {
            last_ecology_hash: self.flags.last_ecology_hash.clone(),
            pending_spawn_queue: self.flags.pending_spawn_queue.clone(),
            last_layer: self.flags.last_layer,
        };
        (player, flags)
    }
}

/// One save slot: a snapshot plus when it was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSlotData {
    #[serde(flatten)]
    pub state: StateSnapshot,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl SaveSlotData {
    pub fn new(state: StateSnapshot, timestamp: u64) -> Self {
        Self { state, timestamp }
    }

    /// Capture `state` stamped with the current wall-clock time.
    pub fn capture_now(state: &GameState) -> Self {
        Self::new(StateSnapshot::capture(state), now_millis())
    }
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

impl GameState {
    pub(crate) fn hydrate(&mut self, snapshot: &StateSnapshot) {
        let (player, flags) = snapshot.restore();
        self.player = player;
        self.flags = flags;
        self.active_dialogue = None;
        self.codex_focus = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::playing_store;
    use overdream_rules::{SpawnRequest, StyleAxis};

    #[test]
    fn test_round_trip_keeps_sets_and_scalars() {
        let mut store = playing_store();
        let content = store.state().content_handle().unwrap();
        store.unlock_lore(content.book("book-b").unwrap());
        store.unlock_lore(content.book("book-a").unwrap());
        store.apply_morality(-12);
        store.bump_style(StyleAxis::Withdrawn, 0.25);
        store.set_slip_tension(42.5);
        store.adjust_instability(7.0);
        store.increment_slip_count();
        store.queue_spawn(SpawnRequest::new("bell", "bell-ringer", 3));

        let snapshot = StateSnapshot::capture(store.state());
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: StateSnapshot = serde_json::from_str(&json).unwrap();
        let (player, flags) = parsed.restore();

        assert_eq!(&player, store.state().player());
        assert_eq!(&flags, store.state().flags());
        assert_eq!(
            snapshot.player.lore_discovered,
            vec!["book-b".to_string(), "book-a".to_string()]
        );
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let store = playing_store();
        let data = SaveSlotData::new(StateSnapshot::capture(store.state()), 1_700_000_000_000);
        let value = serde_json::to_value(&data).unwrap();

        assert_eq!(value["timestamp"], 1_700_000_000_000u64);
        assert!(value["player"]["loreDiscovered"].is_array());
        assert!(value["player"]["slipTension"].is_number());
        assert!(value["flags"]["lastEcologyHash"].is_null());
        assert_eq!(value["flags"]["lastLayer"], "menu");
        assert!(value["flags"]["pendingSpawnQueue"].is_array());
    }

    #[test]
    fn test_restore_clamps_out_of_range_values() {
        let json = r#"{
            "player": {
                "location": "garden", "morality": 400,
                "style": { "cooperative": 3.0, "manipulative": -1.0, "withdrawn": 0.5 },
                "diet": { "moth": -2.0 },
                "loreDiscovered": ["book-a", "book-a"], "codexUnlocked": [],
                "slipTension": 250.0, "instability": -8.0, "slipCount": 4
            },
            "flags": { "lastEcologyHash": null, "pendingSpawnQueue": [], "lastLayer": "dream" }
        }"#;
        let snapshot: StateSnapshot = serde_json::from_str(json).unwrap();
        let (player, flags) = snapshot.restore();

        assert_eq!(player.morality(), 100);
        assert_eq!(player.style().cooperative, 1.0);
        assert_eq!(player.style().manipulative, 0.0);
        assert_eq!(player.style().withdrawn, 0.5);
        assert_eq!(player.diet().weight("moth"), -2.0);
        assert_eq!(player.lore_discovered().len(), 1);
        assert_eq!(player.slip_tension(), 100.0);
        assert_eq!(player.instability(), 0.0);
        assert_eq!(player.slip_count(), 4);
        assert_eq!(flags.last_layer(), Layer::Dream);
    }

    #[test]
    fn test_hydrate_closes_dialogue() {
        let mut store = playing_store();
        store.mutate(|s| s.codex_focus = Some("book-a".into()));
        let snapshot = StateSnapshot::capture(store.state());
        store.mutate(|s| s.hydrate(&snapshot));
        assert!(store.state().codex_focus().is_none());
    }
}
