//! # Overdream Rules
//!
//! The static side of the game: content bundle types, dream rules, lore,
//! characters and engine tuning. This crate holds no mutable game state; the
//! `overdream_core` crate owns state and behaviour.

pub mod content;
pub mod dream;
pub mod entities;
pub mod error;
pub mod lore;
pub mod mechanics;
pub mod quests;
pub mod strings;
pub mod tuning;
pub mod world;

pub use content::*;
pub use dream::*;
pub use entities::*;
pub use error::*;
pub use lore::*;
pub use mechanics::*;
pub use quests::*;
pub use strings::*;
pub use tuning::*;
pub use world::*;
