//! # Overdream Core
//!
//! State core of the Overdream layered-reality game. This crate owns the
//! single game state, drives the waking/dream/meta layer machine from a clock,
//! evaluates dream ecology rules and moves snapshots in and out of save slots.
//!
//! ## Core Components
//!
//! - **store**: Observable store, mutate-then-notify
//! - **state**: The game state root and its named operations
//! - **game_loop**: Layer state machine driven by a time source
//! - **clock**: Slip tension from elapsed time and player actions
//! - **ecology**: Pure dream rule evaluation
//! - **persistence**: Save slot storage and the save/load gateway
//!
//! ## Design Philosophy
//!
//! - **Owned State**: The host owns the store and lends it to each component; there is no global
//! - **Explicit Notification**: Every named operation writes, then notifies subscribers once
//! - **Tick-Driven**: Time only advances when the host calls `GameLoop::tick`

pub mod clock;
pub mod dialogue;
pub mod ecology;
pub mod game_loop;
pub mod lore;
pub mod persistence;
mod quests;
pub mod snapshot;
pub mod spawn_queue;
pub mod state;
pub mod store;
pub mod worldgen;

#[cfg(test)]
mod test_support;

pub use clock::*;
pub use ecology::*;
pub use game_loop::*;
pub use persistence::*;
pub use snapshot::*;
pub use spawn_queue::*;
pub use state::*;
pub use store::*;
pub use worldgen::*;
