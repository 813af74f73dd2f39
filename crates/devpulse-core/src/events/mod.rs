//! Domain events raised by the feed, community, follow, and chat
//! collaborators.
//!
//! Events are handed to the fan-out layer, which turns each one into
//! notification records and, for direct messages, thread messages.

pub mod activity;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EventId, UserId};

pub use activity::ActivityEvent;

/// The user who caused an event, as supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user's id.
    pub user_id: UserId,
    /// The acting user's display username.
    pub username: String,
}

impl Actor {
    /// Create a new actor.
    pub fn new(user_id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }
}

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: EventId,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event.
    pub actor: Actor,
    /// The event payload.
    pub payload: ActivityEvent,
}

impl DomainEvent {
    /// Create a new domain event stamped with the current time.
    pub fn new(actor: Actor, payload: ActivityEvent) -> Self {
        Self {
            id: EventId::generate(),
            timestamp: Utc::now(),
            actor,
            payload,
        }
    }
}
