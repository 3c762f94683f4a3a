//! State persistence configuration.

use serde::{Deserialize, Serialize};

/// Where selection and expansion state is stored between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Whether state is written to disk at all.
    pub enabled: bool,
    /// Directory holding one JSON file per state key.
    pub state_dir: String,
    /// Last fetched drive forest, read by offline commands.
    pub snapshot_file: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            state_dir: "data/state".to_string(),
            snapshot_file: "data/drive.json".to_string(),
        }
    }
}
