//! Configuration for the terminal engine

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::parser::{MAX_OSC_LEN, MAX_PARAMS};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial number of columns
    pub cols: usize,
    /// Initial number of rows
    pub rows: usize,
    /// Maximum CSI parameters kept per sequence
    pub max_params: usize,
    /// Maximum OSC payload length in characters
    pub max_osc_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cols: 80,
            rows: 24,
            max_params: MAX_PARAMS,
            max_osc_len: MAX_OSC_LEN,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
