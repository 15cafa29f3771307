//! Conversations with characters and the effects of the choices made.

use overdream_rules::{Character, ChoiceEffects, DialogueNode, Layer, StyleAxis};

use crate::state::{ActiveDialogue, GameState};
use crate::store::Store;

impl GameState {
    /// Characters that appear in `layer`.
    pub fn characters_for_layer(&self, layer: Layer) -> Vec<&Character> {
        match self.content() {
            Some(content) => content.characters_in(layer).collect(),
            None => Vec::new(),
        }
    }

    /// The character being spoken to and the node on screen.
    pub fn current_dialogue(&self) -> Option<(&Character, &DialogueNode)> {
        let active = self.active_dialogue.as_ref()?;
        let character = self.content()?.character(&active.character_id)?;
        let node = character.node(active.node_index)?;
        Some((character, node))
    }

    pub(crate) fn apply_choice_effects(&mut self, effects: &ChoiceEffects) {
        if let Some(delta) = effects.morality {
            self.player.apply_morality(delta);
        }
        for (axis, delta) in &effects.style {
            match axis.parse::<StyleAxis>() {
                Ok(axis) => self.player.bump_style(axis, *delta),
                Err(err) => tracing::debug!("Skipping choice style effect: {}", err),
            }
        }
        for (tag, delta) in &effects.diet {
            self.player.adjust_diet(tag, *delta);
        }
    }

    /// Move to the node named `next`, or close the conversation when there
    /// is no such node.
    fn advance_dialogue(&mut self, character: &Character, next: Option<&str>) {
        let next_index = next.and_then(|id| character.node_index(id));
        if next.is_some() && next_index.is_none() {
            tracing::debug!(
                character = %character.id,
                node = next.unwrap_or_default(),
                "Dialogue points at a missing node; closing"
            );
        }
        self.active_dialogue = next_index.map(|node_index| ActiveDialogue {
            character_id: character.id.clone(),
            node_index,
        });
    }
}

impl Store<GameState> {
    pub fn apply_choice_effects(&mut self, effects: &ChoiceEffects) {
        self.mutate(|s| s.apply_choice_effects(effects));
    }

    /// Start talking to a character at its first node.
    ///
    /// Returns `false` if the character is unknown or has nothing to say.
    pub fn open_dialogue(&mut self, character_id: &str) -> bool {
        let has_dialogue = self
            .state()
            .content()
            .and_then(|content| content.character(character_id))
            .is_some_and(|character| !character.dialogue.is_empty());
        if !has_dialogue {
            tracing::debug!(character = character_id, "No dialogue to open");
            return false;
        }
        self.mutate(|s| {
            s.active_dialogue = Some(ActiveDialogue {
                character_id: character_id.to_string(),
                node_index: 0,
            });
        });
        true
    }

    pub fn close_dialogue(&mut self) {
        self.mutate(|s| s.active_dialogue = None);
    }

    /// Take choice `choice_index` of the current node: apply its effects,
    /// then advance to its `next` node or close the conversation.
    ///
    /// Returns `false` and changes nothing when no such choice is on screen.
    pub fn choose(&mut self, choice_index: usize) -> bool {
        let Some(content) = self.state().content_handle() else {
            return false;
        };
        let Some(active) = self.state().active_dialogue().cloned() else {
            return false;
        };
        let Some(character) = content.character(&active.character_id) else {
            tracing::debug!(character = %active.character_id, "Active character vanished");
            self.close_dialogue();
            return false;
        };
        let Some(choice) = character
            .node(active.node_index)
            .and_then(|node| node.choices.get(choice_index))
        else {
            tracing::debug!(choice = choice_index, "No such dialogue choice");
            return false;
        };

        self.mutate(|s| {
            if let Some(effects) = &choice.effects {
                s.apply_choice_effects(effects);
            }
            s.advance_dialogue(character, choice.next.as_deref());
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::playing_store;
    use std::collections::BTreeMap;

    #[test]
    fn test_choice_effects_apply_and_ignore_unknown_axis() {
        let mut store = playing_store();
        let effects = ChoiceEffects {
            morality: Some(-7),
            style: BTreeMap::from([
                ("manipulative".to_string(), 0.5),
                ("charming".to_string(), 1.0),
            ]),
            diet: BTreeMap::from([("ash".to_string(), -1.5)]),
        };
        store.apply_choice_effects(&effects);

        let player = store.state().player();
        assert_eq!(player.morality(), -7);
        assert_eq!(player.style().manipulative, 0.5);
        assert_eq!(player.style().cooperative, 0.0);
        assert_eq!(player.diet().weight("ash"), -1.5);
    }

    #[test]
    fn test_choose_advances_to_next_node() {
        let mut store = playing_store();
        assert!(store.open_dialogue("keeper"));
        assert_eq!(store.state().current_dialogue().unwrap().1.id, "start");

        assert!(store.choose(0));
        let state = store.state();
        assert_eq!(state.player().morality(), 5);
        assert_eq!(state.player().style().cooperative, 0.3);
        let (character, node) = state.current_dialogue().unwrap();
        assert_eq!(character.id, "keeper");
        assert_eq!(node.id, "end");
    }

    #[test]
    fn test_missing_next_node_closes_dialogue() {
        let mut store = playing_store();
        store.open_dialogue("keeper");
        assert!(store.choose(1));

        let state = store.state();
        assert!(state.active_dialogue().is_none());
        assert_eq!(state.player().style().manipulative, 0.4);
        assert_eq!(state.player().diet().weight("deceit"), 1.0);
    }

    #[test]
    fn test_choice_without_next_ends_conversation() {
        let mut store = playing_store();
        store.open_dialogue("keeper");
        assert!(store.choose(2));
        assert!(store.state().active_dialogue().is_none());
        assert_eq!(store.state().player().morality(), 0);
    }

    #[test]
    fn test_invalid_choice_is_a_no_op() {
        let mut store = playing_store();
        assert!(!store.choose(0));

        store.open_dialogue("keeper");
        assert!(!store.choose(9));
        assert_eq!(store.state().active_dialogue().unwrap().node_index, 0);
    }

    #[test]
    fn test_open_rejects_unknown_or_silent_characters() {
        let mut store = playing_store();
        assert!(!store.open_dialogue("stranger"));
        assert!(!store.open_dialogue("moth-queen"));
        assert!(store.state().active_dialogue().is_none());
    }

    #[test]
    fn test_characters_for_layer() {
        let store = playing_store();
        let state = store.state();
        let waking: Vec<_> = state
            .characters_for_layer(Layer::Waking)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(waking, vec!["keeper"]);
        assert_eq!(state.characters_for_layer(Layer::Dream).len(), 1);
        assert!(state.characters_for_layer(Layer::Meta).is_empty());
    }
}
