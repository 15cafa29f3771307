//! Engine tuning loaded from TOML.
//!
//! Content authors tune slips and intrusions through `dream_rules.json`; the
//! values here belong to the engine itself and rarely change. Every field is
//! optional in the TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{RulesError, RulesResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineTuning {
    /// Upper bound on the wall time a single tick may account for.
    pub max_tick_delta_secs: f64,
    /// Fraction of the tension delta removed per tick while dreaming.
    pub dream_relief_factor: f64,
    /// Tension at or below which a dream ends.
    pub wake_threshold: f64,
    /// Tension at or above which the player slips into a dream.
    pub dream_threshold: f64,
    pub dream_entry_tension: f64,
    pub meta_entry_tension: f64,
    /// Real time spent in a meta-dream before returning to waking.
    pub meta_dream_duration_secs: f64,
    /// Diet weight added per music motif heard in a dream.
    pub motif_feedback: f64,
    /// Name of the save database (directory for file-backed slots).
    pub database_name: String,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            max_tick_delta_secs: 5.0,
            dream_relief_factor: 0.75,
            wake_threshold: 10.0,
            dream_threshold: 100.0,
            dream_entry_tension: 50.0,
            meta_entry_tension: 20.0,
            meta_dream_duration_secs: 10.0,
            motif_feedback: 0.2,
            database_name: "overdream-saves".to_string(),
        }
    }
}

impl EngineTuning {
    pub fn from_toml_str(source: &str) -> RulesResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> RulesResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let tuning = EngineTuning::from_toml_str("").unwrap();
        assert_eq!(tuning, EngineTuning::default());
        assert_eq!(tuning.database_name, "overdream-saves");
    }

    #[test]
    fn test_partial_override() {
        let tuning = EngineTuning::from_toml_str(
            r#"
            meta_dream_duration_secs = 4.5
            database_name = "test-saves"
            "#,
        )
        .unwrap();
        assert_eq!(tuning.meta_dream_duration_secs, 4.5);
        assert_eq!(tuning.database_name, "test-saves");
        assert_eq!(tuning.max_tick_delta_secs, 5.0);
    }

    #[test]
    fn test_invalid_toml() {
        let err = EngineTuning::from_toml_str("max_tick_delta_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, RulesError::Toml(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dream_relief_factor = 0.5").unwrap();
        let tuning = EngineTuning::from_file(file.path()).unwrap();
        assert_eq!(tuning.dream_relief_factor, 0.5);
    }
}
