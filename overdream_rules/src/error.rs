//! Errors raised while reading content and tuning files.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tuning: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid content: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RulesResult<T> = Result<T, RulesError>;
