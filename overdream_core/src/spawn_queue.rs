//! Deferred spawns keyed to the slip counter.

use overdream_rules::SpawnRequest;
use serde::{Deserialize, Serialize};

/// A spawn waiting for `trigger_slip` to be reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnQueueItem {
    pub tag: String,
    pub spawn: String,
    pub trigger_slip: u32,
}

/// FIFO of pending spawns. Each item is handed out at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct SpawnQueue {
    items: Vec<SpawnQueueItem>,
}

impl SpawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a spawn `delay_slips` slips after `current_slip`.
    pub fn enqueue(&mut self, request: SpawnRequest, current_slip: u32) -> &SpawnQueueItem {
        let item = SpawnQueueItem {
            tag: request.tag,
            spawn: request.spawn,
            trigger_slip: current_slip.saturating_add(request.delay_slips),
        };
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// Remove and return every item that has matured by `slip_count`, in
    /// insertion order. Pending items keep their relative order.
    pub fn consume(&mut self, slip_count: u32) -> Vec<SpawnQueueItem> {
        let (matured, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| item.trigger_slip <= slip_count);
        self.items = pending;
        matured
    }

    pub fn pending(&self) -> &[SpawnQueueItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<SpawnQueueItem>> for SpawnQueue {
    fn from(items: Vec<SpawnQueueItem>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enqueue_computes_trigger_slip() {
        let mut queue = SpawnQueue::new();
        let item = queue.enqueue(SpawnRequest::new("t", "s", 2), 5);
        assert_eq!(item.trigger_slip, 7);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_item_matures_exactly_once() {
        let mut queue = SpawnQueue::new();
        queue.enqueue(SpawnRequest::new("t", "s", 2), 5);

        assert!(queue.consume(5).is_empty());
        assert!(queue.consume(6).is_empty());

        let matured = queue.consume(7);
        assert_eq!(matured.len(), 1);
        assert_eq!(matured[0].spawn, "s");
        assert!(queue.consume(7).is_empty());
        assert!(queue.consume(100).is_empty());
    }

    #[test]
    fn test_consume_preserves_insertion_order() {
        let mut queue = SpawnQueue::new();
        queue.enqueue(SpawnRequest::new("a", "first", 1), 0);
        queue.enqueue(SpawnRequest::new("b", "later", 5), 0);
        queue.enqueue(SpawnRequest::new("c", "second", 0), 0);
        queue.enqueue(SpawnRequest::new("d", "third", 1), 0);

        let matured: Vec<_> = queue.consume(1).into_iter().map(|i| i.spawn).collect();
        assert_eq!(matured, vec!["first", "second", "third"]);
        assert_eq!(queue.pending().len(), 1);
        assert_eq!(queue.pending()[0].spawn, "later");
    }

    #[test]
    fn test_zero_delay_matures_immediately() {
        let mut queue = SpawnQueue::new();
        queue.enqueue(SpawnRequest::new("t", "now", 0), 3);
        assert_eq!(queue.consume(3).len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_serializes_as_array() {
        let mut queue = SpawnQueue::new();
        queue.enqueue(SpawnRequest::new("t", "s", 1), 0);
        let json = serde_json::to_value(&queue).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "tag": "t", "spawn": "s", "triggerSlip": 1 }])
        );
    }
}
