//! World geography: locations and the portals between them.

use serde::{Deserialize, Serialize};

/// Identifier of a location in the content bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Location kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    /// Places where the waking world wears thin.
    ThinPlace,
    #[default]
    Normal,
}

/// A location in the game world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: LocationKind,
    #[serde(default)]
    pub neighbors: Vec<LocationId>,
    #[serde(default)]
    pub description: String,
}

/// `world/locations.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LocationsFile {
    pub locations: Vec<Location>,
}

/// When a portal may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PortalCondition {
    #[default]
    Always,
}

/// A one-way connection between two locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    pub from: LocationId,
    pub to: LocationId,
    #[serde(default)]
    pub condition: PortalCondition,
}

/// `world/portals.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PortalsFile {
    pub portals: Vec<Portal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_deserialize() {
        let json = r#"{
            "id": "chapel",
            "name": "Chapel",
            "type": "thin_place",
            "neighbors": ["library"],
            "description": "Candles that never burn down."
        }"#;
        let location: Location = serde_json::from_str(json).unwrap();
        assert_eq!(location.id, LocationId::from("chapel"));
        assert_eq!(location.kind, LocationKind::ThinPlace);
        assert_eq!(location.neighbors, vec![LocationId::from("library")]);
    }

    #[test]
    fn test_location_kind_defaults_to_normal() {
        let location: Location =
            serde_json::from_str(r#"{"id": "hall", "name": "Hall"}"#).unwrap();
        assert_eq!(location.kind, LocationKind::Normal);
        assert!(location.neighbors.is_empty());
    }
}
