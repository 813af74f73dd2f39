//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use devpulse_core::types::{NotificationId, UserId};

use super::kind::NotificationKind;

/// A recipient-scoped record of a cross-domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The user who receives the notification.
    pub recipient_id: UserId,
    /// What happened.
    pub kind: NotificationKind,
    /// The user who triggered the event.
    pub actor_id: UserId,
    /// The triggering user's username at the time of the event.
    pub actor_username: String,
    /// Post, community, or thread the event refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    /// Human-readable summary, without the actor's name.
    pub summary: String,
    /// Whether the recipient has seen it.
    pub read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.read
    }

    /// Mark as read. Returns `true` if the state changed.
    pub fn mark_read(&mut self) -> bool {
        let changed = !self.read;
        self.read = true;
        changed
    }
}

/// Data required to append a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    /// What happened.
    pub kind: NotificationKind,
    /// The user who triggered the event.
    pub actor_id: UserId,
    /// The triggering user's username.
    pub actor_username: String,
    /// The user who should receive the notification.
    pub recipient_id: UserId,
    /// Post, community, or thread the event refers to.
    pub subject_id: Option<String>,
    /// Human-readable summary.
    pub summary: String,
}

impl NewNotification {
    /// Whether the actor would be notifying themselves.
    pub fn is_self_notification(&self) -> bool {
        self.actor_id == self.recipient_id
    }

    /// Materialize the record with a fresh id, unread, stamped now.
    pub fn into_notification(self) -> Notification {
        Notification {
            id: NotificationId::generate(),
            recipient_id: self.recipient_id,
            kind: self.kind,
            actor_id: self.actor_id,
            actor_username: self.actor_username,
            subject_id: self.subject_id,
            summary: self.summary,
            read: false,
            created_at: Utc::now(),
        }
    }
}
