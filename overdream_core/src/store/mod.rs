//! Observable store - a mutate-then-notify container for the game state.
//!
//! Every top-level mutation runs its writes and then one notification round,
//! handing each subscriber the same root reference. Subscribers cannot write
//! through that reference. A subscriber that has to react with a write queues
//! it on [`FollowUps`]; queued writes run after the round and trigger one more
//! round, up to [`MAX_NOTIFY_ROUNDS`].
//!
//! No ordering is guaranteed between subscribers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on notification rounds caused by one top-level mutation.
pub const MAX_NOTIFY_ROUNDS: usize = 16;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

type FollowUp<S> = Box<dyn FnOnce(&mut S)>;
type Subscriber<S> = Box<dyn FnMut(&S, &mut FollowUps<S>)>;

/// Writes requested by subscribers during a notification round.
pub struct FollowUps<S> {
    queued: Vec<FollowUp<S>>,
}

impl<S> FollowUps<S> {
    fn new() -> Self {
        Self { queued: Vec::new() }
    }

    /// Queue a write to run once the current round has finished.
    pub fn push(&mut self, write: impl FnOnce(&mut S) + 'static) {
        self.queued.push(Box::new(write));
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }
}

/// Owns the root state and the subscribers observing it.
pub struct Store<S> {
    state: S,
    subscribers: Vec<(SubscriptionId, Subscriber<S>)>,
}

impl<S> Store<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
        }
    }

    /// Read access to the root state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Register an observer. It is called after every top-level mutation.
    pub fn subscribe(&mut self, mut observer: impl FnMut(&S) + 'static) -> SubscriptionId {
        self.subscribe_with_follow_ups(move |state, _| observer(state))
    }

    /// Register a subscriber that may queue follow-up writes.
    pub fn subscribe_with_follow_ups(
        &mut self,
        subscriber: impl FnMut(&S, &mut FollowUps<S>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Run a batch of writes, then notify subscribers once.
    pub fn mutate<R>(&mut self, write: impl FnOnce(&mut S) -> R) -> R {
        let result = write(&mut self.state);
        self.notify();
        result
    }

    /// Run a notification round without writing.
    pub fn notify(&mut self) {
        let mut rounds = 0;
        loop {
            let mut follow_ups = FollowUps::new();
            for (_, subscriber) in self.subscribers.iter_mut() {
                subscriber(&self.state, &mut follow_ups);
            }
            rounds += 1;

            if follow_ups.is_empty() {
                return;
            }
            if rounds >= MAX_NOTIFY_ROUNDS {
                tracing::warn!(
                    dropped = follow_ups.len(),
                    "Subscriber follow-ups did not settle after {} rounds",
                    MAX_NOTIFY_ROUNDS
                );
                return;
            }
            for write in follow_ups.queued {
                write(&mut self.state);
            }
        }
    }
}

impl<S: Default> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
