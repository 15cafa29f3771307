//! Shared fixtures for unit tests.

use overdream_rules::ContentBundle;

use crate::state::GameStore;

pub(crate) const SAMPLE_CONTENT: &str = r#"{
    "locations": { "locations": [
        { "id": "library", "name": "Library", "neighbors": ["chapel", "garden"] },
        { "id": "chapel", "name": "Chapel", "type": "thin_place", "neighbors": ["library"] },
        { "id": "garden", "name": "Garden", "neighbors": [] }
    ] },
    "portals": { "portals": [ { "from": "library", "to": "chapel", "condition": "always" } ] },
    "dreamRules": {
        "slip": {
            "baseIntervalSec": 100,
            "tensionGainPerAction": 5,
            "thinPlaceMultipliers": { "chapel": 2 },
            "calmActions": { "meditate": -15 }
        },
        "intrusion": { "instabilityPerSlip": 20, "metaDreamThreshold": 50, "cooldownSec": 30 },
        "palettes": [
            { "when": {}, "apply": "grey" },
            { "when": { "moralityMin": 20 }, "apply": "gold" },
            { "when": { "moralityMax": -20 }, "apply": "rust" }
        ],
        "spawns": [
            { "when": { "dietHas": ["moth"] }, "add": ["moth-swarm", "moth-swarm"] },
            { "when": {}, "add": ["lantern"] }
        ],
        "music": [
            { "when": {}, "motif": "hum" },
            { "when": { "manipulativeMin": 0.5 }, "motif": "discord" }
        ],
        "puzzles": [
            { "when": { "dietHas": ["moth", "ash"] }, "mod": "inverted" }
        ]
    },
    "books": [
        { "id": "book-a", "title": "Moths", "tags": ["moth"], "excerpt": "They come to the lamp.",
          "seed": { "spawn": "moth-swarm", "motif": "wingbeat", "delaySlips": 2 } },
        { "id": "book-b", "title": "Salt", "tags": [], "excerpt": "" }
    ],
    "codex": { "entries": [
        { "id": "book-a", "title": "On Moths", "text": "", "tags": ["moth"] },
        { "id": "book-b", "title": "On Salt", "text": "", "tags": [] },
        { "id": "orphan", "title": "Unwritten", "text": "", "tags": [] }
    ] },
    "characters": [
        { "id": "keeper", "name": "The Keeper", "layer": "waking", "dialogue": [
            { "id": "start", "text": "Quiet, please.", "choices": [
                { "text": "Sorry.", "effects": { "morality": 5, "style": { "cooperative": 0.3 } }, "next": "end" },
                { "text": "I work here.", "effects": { "style": { "manipulative": 0.4, "charming": 1 }, "diet": { "deceit": 1 } }, "next": "missing-node" },
                { "text": "Leave." }
            ] },
            { "id": "end", "text": "Thank you.", "choices": [] }
        ] },
        { "id": "moth-queen", "name": "Moth Queen", "layer": "dream", "dialogue": [] }
    ],
    "factions": { "factions": [ { "id": "lamplighters", "name": "Lamplighters" } ] },
    "quests": { "fragments": [
        { "id": "vespers", "title": "Vespers", "conditions": { "location": "chapel" },
          "effects": { "morality": 3,
                       "queueSpawn": { "tag": "bell", "spawn": "bell-ringer", "delaySlips": 1 } } }
    ] },
    "strings": { "ui": { "menu": { "title": "Overdream" } } }
}"#;

pub(crate) fn sample_content() -> ContentBundle {
    ContentBundle::from_json_str(SAMPLE_CONTENT).unwrap()
}

/// A store with the sample content loaded and a new game started.
pub(crate) fn playing_store() -> GameStore {
    let mut store = GameStore::default();
    store.set_content(sample_content(), Vec::new());
    store.start_new_game();
    store
}
