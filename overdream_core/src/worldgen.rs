//! Procedural rooms for the meta layer.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const META_ROOM_SIZE: usize = 5;

const WALL_TILES: [char; 3] = ['#', '%', '*'];
const FLOOR_TILES: [char; 2] = ['.', ':'];
/// Chance that an interior cell holds a floor mark instead of empty space.
const FLOOR_MARK_CHANCE: f64 = 0.3;

/// The rule a meta room bends while the player is inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaRule {
    GravityInverts,
    DoorsShuffle,
    TextScramble,
}

impl MetaRule {
    pub const ALL: [MetaRule; 3] = [
        MetaRule::GravityInverts,
        MetaRule::DoorsShuffle,
        MetaRule::TextScramble,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetaRule::GravityInverts => "gravity_inverts",
            MetaRule::DoorsShuffle => "doors_shuffle",
            MetaRule::TextScramble => "text_scramble",
        }
    }
}

impl fmt::Display for MetaRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A square room drawn as text rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaRoom {
    pub layout: Vec<String>,
    pub rule: MetaRule,
}

fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

/// Generate a walled room with a scattered floor and one bent rule.
pub fn generate_meta_room<R: Rng + ?Sized>(rng: &mut R) -> MetaRoom {
    let last = META_ROOM_SIZE - 1;
    let layout: Vec<String> = (0..META_ROOM_SIZE)
        .map(|y| {
            (0..META_ROOM_SIZE)
                .map(|x| {
                    if x == 0 || y == 0 || x == last || y == last {
                        pick(rng, &WALL_TILES)
                    } else if rng.gen_bool(FLOOR_MARK_CHANCE) {
                        pick(rng, &FLOOR_TILES)
                    } else {
                        ' '
                    }
                })
                .collect::<String>()
        })
        .collect();

    MetaRoom {
        layout,
        rule: pick(rng, &MetaRule::ALL),
    }
}
