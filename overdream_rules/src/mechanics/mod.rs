//! Shared game mechanics: layers, play-style axes and visual cues.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The layer of reality the player currently occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    #[default]
    Menu,
    Waking,
    Dream,
    /// Temporary intrusion layer forced by instability.
    Meta,
}

impl Layer {
    /// Layers in which the game world is running.
    pub fn is_playing(&self) -> bool {
        !matches!(self, Layer::Menu)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Menu => "menu",
            Layer::Waking => "waking",
            Layer::Dream => "dream",
            Layer::Meta => "meta",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interaction style axes tracked on the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleAxis {
    Cooperative,
    Manipulative,
    Withdrawn,
}

impl StyleAxis {
    pub const ALL: [StyleAxis; 3] = [
        StyleAxis::Cooperative,
        StyleAxis::Manipulative,
        StyleAxis::Withdrawn,
    ];
}

/// Error returned when a style axis name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown style axis: {0}")]
pub struct UnknownStyleAxis(pub String);

impl FromStr for StyleAxis {
    type Err = UnknownStyleAxis;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cooperative" => Ok(StyleAxis::Cooperative),
            "manipulative" => Ok(StyleAxis::Manipulative),
            "withdrawn" => Ok(StyleAxis::Withdrawn),
            other => Err(UnknownStyleAxis(other.to_string())),
        }
    }
}

/// Visual cue a renderer should play when a layer transition happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualCue {
    Waking,
    Dream,
    Meta,
}

impl VisualCue {
    /// The cue associated with entering a layer, if any.
    pub fn for_layer(layer: Layer) -> Option<VisualCue> {
        match layer {
            Layer::Menu => None,
            Layer::Waking => Some(VisualCue::Waking),
            Layer::Dream => Some(VisualCue::Dream),
            Layer::Meta => Some(VisualCue::Meta),
        }
    }
}
