//! Session bookkeeping that travels with the player in save slots.

use overdream_rules::Layer;

use crate::spawn_queue::SpawnQueue;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameFlags {
    /// Fingerprint of the last ecology outcome. A UI hint only.
    pub(crate) last_ecology_hash: Option<String>,
    pub(crate) pending_spawn_queue: SpawnQueue,
    /// Layer active before the current one, used by "continue".
    pub(crate) last_layer: Layer,
}

impl GameFlags {
    pub fn last_ecology_hash(&self) -> Option<&str> {
        self.last_ecology_hash.as_deref()
    }

    pub fn pending_spawn_queue(&self) -> &SpawnQueue {
        &self.pending_spawn_queue
    }

    pub fn last_layer(&self) -> Layer {
        self.last_layer
    }
}
