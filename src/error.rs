use std::path::PathBuf;
use thiserror::Error;

/// Failures at the host boundary. The engines themselves never fail:
/// numeric inputs are clamped and missing data degrades to defaults.
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("unknown audience profile '{0}'")]
    UnknownProfile(String),

    #[error("unknown progression axis '{0}'")]
    UnknownAxis(String),

    #[error("advice catalog must contain at least one card")]
    EmptyCatalog,

    #[error("advice card id '{0}' appears more than once")]
    DuplicateCard(String),

    #[error("failed to read config {path:?}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("ambiance runtime is no longer running")]
    RuntimeClosed,
}

pub type Result<T> = std::result::Result<T, CoachError>;
