use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoachError, Result};

/// Tuning for the reaction engine and its async driver.
///
/// Defaults are the values the audience profiles were balanced against;
/// changing them changes how the audience "feels", not what it reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbianceConfig {
    /// Minimum gap between two firings of the same trigger kind.
    pub cooldown_ms: u64,
    /// Period of the natural attention decay.
    pub decay_interval_ms: u64,
    /// Time the closing reaction gets to play before the engine halts.
    pub stop_grace_ms: u64,
    /// Attention never decays below this.
    pub attention_floor: f32,
    /// Capacity of the runtime's command and event channels.
    pub event_buffer: usize,
}

impl Default for AmbianceConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 3000,
            decay_interval_ms: 1000,
            stop_grace_ms: 500,
            attention_floor: 0.1,
            event_buffer: 100,
        }
    }
}

impl AmbianceConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(raw)?;
        config.attention_floor = config.attention_floor.clamp(0.0, 1.0);
        config.event_buffer = config.event_buffer.max(1);
        config.decay_interval_ms = config.decay_interval_ms.max(1);
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CoachError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}
