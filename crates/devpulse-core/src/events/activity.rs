//! Activity events that fan out into notifications.

use serde::{Deserialize, Serialize};

use crate::types::{CommunityId, PostId, UserId};

/// Every domain action the fan-out layer knows how to translate.
///
/// Adding a variant forces a matching rule in the fan-out `match`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityEvent {
    /// The actor liked a post.
    PostLiked {
        /// The liked post.
        post_id: PostId,
        /// The post's author.
        author_id: UserId,
    },
    /// The actor commented on a post.
    PostCommented {
        /// The commented post.
        post_id: PostId,
        /// The post's author.
        author_id: UserId,
        /// Full comment text.
        comment: String,
    },
    /// The actor asked to join a private community.
    CommunityJoinRequested {
        /// The community.
        community_id: CommunityId,
        /// Display name of the community.
        community_name: String,
        /// The community's creator or owner.
        owner_id: UserId,
    },
    /// The actor approved a pending join request.
    CommunityJoinApproved {
        /// The community.
        community_id: CommunityId,
        /// Display name of the community.
        community_name: String,
        /// The user whose request was approved.
        requester_id: UserId,
    },
    /// The actor started following a user.
    UserFollowed {
        /// The followed user.
        followed_id: UserId,
    },
    /// The actor sent a direct message.
    DirectMessageSent {
        /// The other participant.
        recipient_id: UserId,
        /// Message text.
        content: String,
        /// Optional attachment location.
        attachment_url: Option<String>,
    },
}

impl ActivityEvent {
    /// Short machine name of the event, used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PostLiked { .. } => "post_liked",
            Self::PostCommented { .. } => "post_commented",
            Self::CommunityJoinRequested { .. } => "community_join_requested",
            Self::CommunityJoinApproved { .. } => "community_join_approved",
            Self::UserFollowed { .. } => "user_followed",
            Self::DirectMessageSent { .. } => "direct_message_sent",
        }
    }
}
