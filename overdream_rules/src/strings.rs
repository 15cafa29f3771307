//! Localised UI strings with fallbacks for degraded content.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// UI string sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiSection {
    Menu,
    Hud,
    Codex,
    Saves,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UiSections {
    #[serde(default)]
    pub menu: HashMap<String, String>,
    #[serde(default)]
    pub hud: HashMap<String, String>,
    #[serde(default)]
    pub codex: HashMap<String, String>,
    #[serde(default)]
    pub saves: HashMap<String, String>,
}

/// `ui/strings.<lang>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UiStrings {
    #[serde(default)]
    pub ui: UiSections,
}

impl UiStrings {
    /// Look up a string, returning `fallback` when it is missing.
    pub fn lookup<'a>(&'a self, section: UiSection, key: &str, fallback: &'a str) -> &'a str {
        let table = match section {
            UiSection::Menu => &self.ui.menu,
            UiSection::Hud => &self.ui.hud,
            UiSection::Codex => &self.ui.codex,
            UiSection::Saves => &self.ui.saves,
        };
        table.get(key).map(String::as_str).unwrap_or(fallback)
    }
}
