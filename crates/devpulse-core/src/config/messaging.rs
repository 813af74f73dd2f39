//! Messaging and notification presentation settings.

use serde::{Deserialize, Serialize};

/// Settings shared by the fan-out formatter and the badge renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// Maximum number of characters of user text embedded in a summary.
    #[serde(default = "default_preview_length")]
    pub preview_length: usize,
    /// Marker appended to text cut at `preview_length`.
    #[serde(default = "default_ellipsis")]
    pub ellipsis: String,
    /// Largest count a navigation badge shows before switching to `"N+"`.
    #[serde(default = "default_badge_cap")]
    pub badge_cap: usize,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            preview_length: default_preview_length(),
            ellipsis: default_ellipsis(),
            badge_cap: default_badge_cap(),
        }
    }
}

fn default_preview_length() -> usize {
    30
}

fn default_ellipsis() -> String {
    "...".to_string()
}

fn default_badge_cap() -> usize {
    9
}
