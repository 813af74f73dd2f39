//! Like record entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use devpulse_core::types::{PostId, UserId};

/// One user's like of one post.
///
/// At most one record exists per `(post_id, user_id)`; a post's like
/// count is the number of records referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeRecord {
    /// The liked post.
    pub post_id: PostId,
    /// The user who liked it.
    pub user_id: UserId,
    /// When the like was recorded.
    pub liked_at: DateTime<Utc>,
}

impl LikeRecord {
    /// Create a like stamped with the current time.
    pub fn new(post_id: PostId, user_id: UserId) -> Self {
        Self {
            post_id,
            user_id,
            liked_at: Utc::now(),
        }
    }

    /// Whether this record is `user`'s like of `post`.
    pub fn matches(&self, post: &PostId, user: &UserId) -> bool {
        &self.post_id == post && &self.user_id == user
    }
}
