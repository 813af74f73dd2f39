//! Notification kind enumeration.

use serde::{Deserialize, Serialize};

/// Kind of event a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Someone started following the recipient.
    #[serde(rename = "follow")]
    Follow,
    /// Someone liked the recipient's post.
    #[serde(rename = "like")]
    Like,
    /// Someone commented on the recipient's post.
    #[serde(rename = "comment")]
    Comment,
    /// Someone asked to join a community the recipient owns.
    #[serde(rename = "community_request")]
    CommunityJoinRequest,
    /// The recipient's join request was approved.
    #[serde(rename = "community_approved")]
    CommunityJoinApproved,
    /// Someone sent the recipient a direct message.
    #[serde(rename = "message")]
    Message,
}

impl NotificationKind {
    /// Every kind, in display order.
    pub const ALL: [NotificationKind; 6] = [
        Self::Follow,
        Self::Like,
        Self::Comment,
        Self::CommunityJoinRequest,
        Self::CommunityJoinApproved,
        Self::Message,
    ];

    /// Return the kind as its persisted string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Like => "like",
            Self::Comment => "comment",
            Self::CommunityJoinRequest => "community_request",
            Self::CommunityJoinApproved => "community_approved",
            Self::Message => "message",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
