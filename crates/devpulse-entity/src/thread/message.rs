//! Message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use devpulse_core::types::{MessageId, UserId};

/// A single message inside a thread.
///
/// Messages are immutable once sent; only `read` ever changes, and only
/// from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// The user who sent the message.
    pub sender_id: UserId,
    /// Message text.
    pub content: String,
    /// Optional attachment (image URL or data URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,
    /// Whether the non-sending participants have seen the message.
    pub read: bool,
}

impl Message {
    /// Create a new unread message stamped with the current time.
    pub fn new(sender_id: UserId, content: String, attachment_url: Option<String>) -> Self {
        Self {
            id: MessageId::generate(),
            sender_id,
            content,
            attachment_url,
            timestamp: Utc::now(),
            read: false,
        }
    }

    /// Whether this message counts as unread for `viewer`.
    ///
    /// A message is never unread for its own sender.
    pub fn is_unread_for(&self, viewer: &UserId) -> bool {
        !self.read && &self.sender_id != viewer
    }

    /// Whether the message carries an attachment.
    pub fn has_attachment(&self) -> bool {
        self.attachment_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_is_unread_for_others_only() {
        let msg = Message::new(UserId::from("2"), "hello".into(), None);
        assert!(!msg.read);
        assert!(msg.is_unread_for(&UserId::from("1")));
        assert!(!msg.is_unread_for(&UserId::from("2")));
    }

    #[test]
    fn test_attachment_is_omitted_when_absent() {
        let msg = Message::new(UserId::from("2"), "hello".into(), None);
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("attachment_url").is_none());
        assert!(!msg.has_attachment());
    }
}
