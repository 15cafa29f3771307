//! Location-gated quest fragments.

use overdream_rules::{QuestEffects, StyleAxis};

use crate::state::GameState;

/// Apply every quest fragment gated on the player's current location.
///
/// Runs once per arrival, inside the move that caused it.
pub(crate) fn apply_location_triggers(state: &mut GameState) {
    let Some(content) = state.content.clone() else {
        return;
    };
    let location = state.player.location.clone();
    for fragment in content.quests_at(&location) {
        tracing::debug!(fragment = %fragment.id, location = %location, "Quest fragment triggered");
        apply_quest_effects(state, &fragment.effects);
    }
}

fn apply_quest_effects(state: &mut GameState, effects: &QuestEffects) {
    if let Some(delta) = effects.morality {
        state.player.apply_morality(delta);
    }
    for (axis, delta) in &effects.style {
        match axis.parse::<StyleAxis>() {
            Ok(axis) => state.player.bump_style(axis, *delta),
            Err(err) => tracing::debug!("Skipping quest style effect: {}", err),
        }
    }
    if let Some(request) = &effects.queue_spawn {
        state.queue_spawn(request.clone());
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::playing_store;

    #[test]
    fn test_trigger_fires_on_every_arrival() {
        let mut store = playing_store();
        store.move_to_location("chapel");
        store.move_to_location("library");
        store.move_to_location("chapel");

        let state = store.state();
        assert_eq!(state.player().morality(), 6);
        assert_eq!(state.flags().pending_spawn_queue().len(), 2);
    }

    #[test]
    fn test_no_trigger_elsewhere() {
        let mut store = playing_store();
        store.move_to_location("garden");
        assert_eq!(store.state().player().morality(), 0);
        assert!(store.state().flags().pending_spawn_queue().is_empty());
    }
}
