//! Session context carrying the acting user.

use serde::{Deserialize, Serialize};

use devpulse_core::config::session::SessionConfig;
use devpulse_core::events::Actor;
use devpulse_core::types::UserId;

/// Identity of the user on whose behalf operations run.
///
/// Supplied by the identity provider and passed into every fan-out call so
/// that each operation knows *who* is acting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// The acting user's ID.
    pub user_id: UserId,
    /// The acting user's username.
    pub username: String,
}

impl SessionContext {
    /// Creates a new session context.
    pub fn new(user_id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }

    /// The configured default identity.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.user_id.as_str(), config.username.as_str())
    }

    /// The acting user as an event actor.
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id.clone(), self.username.clone())
    }
}
