//! Reading books and the codex they unlock.

use overdream_rules::CodexEntry;

use crate::state::GameState;
use crate::store::Store;

impl GameState {
    /// Codex entries for books the player has discovered, in content order.
    pub fn codex_entries(&self) -> Vec<&CodexEntry> {
        let Some(content) = self.content() else {
            return Vec::new();
        };
        content
            .codex_entries()
            .iter()
            .filter(|entry| self.player.has_discovered(&entry.id))
            .collect()
    }
}

impl Store<GameState> {
    /// Read a book: discover its lore, unlock its codex entry and focus it.
    ///
    /// Returns `false` without touching state if the book is unknown.
    pub fn read_book(&mut self, book_id: &str) -> bool {
        let Some(content) = self.state().content_handle() else {
            return false;
        };
        let Some(book) = content.book(book_id) else {
            tracing::debug!(book = book_id, "Ignoring unknown book");
            return false;
        };
        self.mutate(|s| {
            s.unlock_lore(book);
            s.player.unlock_codex(&book.id);
            s.codex_focus = Some(book.id.clone());
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::playing_store;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_read_book_unlocks_and_focuses() {
        let mut store = playing_store();
        assert!(store.read_book("book-a"));

        let state = store.state();
        assert!(state.player().has_discovered("book-a"));
        assert!(state.player().codex_unlocked().contains("book-a"));
        assert_eq!(state.codex_focus(), Some("book-a"));
        assert_eq!(state.player().diet().weight("wingbeat"), 1.0);

        let queue = state.flags().pending_spawn_queue().pending();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].tag, "moth");
        assert_eq!(queue[0].spawn, "moth-swarm");
        assert_eq!(queue[0].trigger_slip, 2);
    }

    #[test]
    fn test_unknown_book_is_silent() {
        let mut store = playing_store();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        store.subscribe(move |_| seen.set(seen.get() + 1));

        assert!(!store.read_book("no-such-book"));
        assert_eq!(calls.get(), 0);
        assert!(store.state().codex_focus().is_none());
    }

    #[test]
    fn test_codex_entries_follow_discovery() {
        let mut store = playing_store();
        assert!(store.state().codex_entries().is_empty());

        store.read_book("book-b");
        store.read_book("book-a");
        store.read_book("book-a");

        let ids: Vec<_> = store
            .state()
            .codex_entries()
            .iter()
            .map(|entry| entry.id.as_str())
            .collect();
        assert_eq!(ids, vec!["book-a", "book-b"]);
    }

    #[test]
    fn test_book_without_seed_only_discovers() {
        let mut store = playing_store();
        store.read_book("book-b");
        let state = store.state();
        assert!(state.flags().pending_spawn_queue().is_empty());
        assert!(state.player().diet().is_empty());
    }
}
