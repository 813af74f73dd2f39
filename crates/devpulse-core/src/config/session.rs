//! Identity used when no caller-supplied user is given.

use serde::{Deserialize, Serialize};

/// Default acting identity for the command-line front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// User id of the acting user.
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Username of the acting user.
    #[serde(default = "default_username")]
    pub username: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            username: default_username(),
        }
    }
}

fn default_user_id() -> String {
    "1".to_string()
}

fn default_username() -> String {
    "johndoe".to_string()
}
