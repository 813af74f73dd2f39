//! Like ledger: one record per user and post.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use devpulse_core::result::AppResult;
use devpulse_core::traits::store::KeyValueStore;
use devpulse_core::types::{PostId, UserId};
use devpulse_entity::engagement::LikeRecord;
use devpulse_storage::{PersistentCollection, keys};

/// Tracks which users liked which posts.
///
/// A post's like count is derived from the records, so it can never drift
/// from the set of users who liked it.
#[derive(Debug)]
pub struct LikeLedger {
    likes: Mutex<PersistentCollection<LikeRecord>>,
}

impl LikeLedger {
    /// Load the ledger. It starts empty when nothing is stored.
    pub async fn open(store: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        let likes = PersistentCollection::load(store, keys::likes(), Vec::new).await?;
        info!(count = likes.items().len(), "Like ledger opened");
        Ok(Self {
            likes: Mutex::new(likes),
        })
    }

    /// Record `user_id`'s like of `post_id`.
    ///
    /// Returns `false` when the user had already liked the post.
    pub async fn like(&self, post_id: &PostId, user_id: &UserId) -> AppResult<bool> {
        let (added, written) = self.record_like(post_id, user_id).await;
        written.map(|()| added)
    }

    /// [`like`](Self::like) that reports whether the record was added
    /// separately from the write result.
    pub(crate) async fn record_like(&self, post_id: &PostId, user_id: &UserId) -> (bool, AppResult<()>) {
        let mut likes = self.likes.lock().await;
        if likes.items().iter().any(|r| r.matches(post_id, user_id)) {
            debug!(post_id = %post_id, user_id = %user_id, "Post already liked");
            return (false, likes.flush().await);
        }

        likes
            .items_mut()
            .push(LikeRecord::new(post_id.clone(), user_id.clone()));
        debug!(post_id = %post_id, user_id = %user_id, "Post liked");
        (true, likes.persist().await)
    }

    /// Remove `user_id`'s like of `post_id`.
    ///
    /// Returns `false` when there was nothing to remove. Notifications
    /// produced by the like are kept.
    pub async fn unlike(&self, post_id: &PostId, user_id: &UserId) -> AppResult<bool> {
        let mut likes = self.likes.lock().await;
        let Some(index) = likes
            .items()
            .iter()
            .position(|r| r.matches(post_id, user_id))
        else {
            likes.flush().await?;
            return Ok(false);
        };

        likes.items_mut().remove(index);
        debug!(post_id = %post_id, user_id = %user_id, "Post unliked");
        likes.persist().await?;
        Ok(true)
    }

    /// Number of users who like `post_id`.
    pub async fn like_count(&self, post_id: &PostId) -> usize {
        let likes = self.likes.lock().await;
        likes.items().iter().filter(|r| &r.post_id == post_id).count()
    }

    /// Whether `user_id` currently likes `post_id`.
    pub async fn has_liked(&self, post_id: &PostId, user_id: &UserId) -> bool {
        let likes = self.likes.lock().await;
        likes.items().iter().any(|r| r.matches(post_id, user_id))
    }

    /// Retry a write that failed earlier.
    pub async fn flush(&self) -> AppResult<()> {
        self.likes.lock().await.flush().await
    }
}
