//! Quest fragments: location-gated effects.

use serde::{Deserialize, Serialize};

use crate::entities::QuestEffects;
use crate::world::LocationId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QuestConditions {
    #[serde(default)]
    pub location: Option<LocationId>,
}

/// A fragment of a quest that fires when its conditions hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestFragment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub conditions: QuestConditions,
    #[serde(default)]
    pub effects: QuestEffects,
}

impl QuestFragment {
    /// Whether this fragment is gated on the given location.
    pub fn triggers_at(&self, location: &LocationId) -> bool {
        self.conditions.location.as_ref() == Some(location)
    }
}

/// `quests/fragments.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QuestFragmentsFile {
    pub fragments: Vec<QuestFragment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_at() {
        let fragment: QuestFragment = serde_json::from_str(
            r#"{ "id": "q1", "title": "The Bell", "conditions": { "location": "belfry" },
                 "effects": { "morality": 2 } }"#,
        )
        .unwrap();
        assert!(fragment.triggers_at(&LocationId::from("belfry")));
        assert!(!fragment.triggers_at(&LocationId::from("library")));
    }

    #[test]
    fn test_ungated_fragment_never_triggers() {
        let fragment: QuestFragment =
            serde_json::from_str(r#"{ "id": "q2", "title": "Loose thread" }"#).unwrap();
        assert!(!fragment.triggers_at(&LocationId::from("library")));
        assert!(fragment.effects.queue_spawn.is_none());
    }
}
