//! Persistent store configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the key-value store backing every collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store provider type: `"memory"` or `"file"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Directory holding one JSON document per key (file provider only).
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Seed empty collections with the demo data set on first load.
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            directory: default_directory(),
            seed_demo_data: default_true(),
        }
    }
}

fn default_provider() -> String {
    "file".to_string()
}

fn default_directory() -> String {
    "data/store".to_string()
}

fn default_true() -> bool {
    true
}
