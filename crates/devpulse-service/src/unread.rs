//! Unread counts for the navigation badges.

use std::sync::Arc;

use serde::Serialize;

use devpulse_core::types::UserId;
use devpulse_entity::notification::Notification;
use devpulse_entity::thread::Thread;

use crate::chat::MessageThreadStore;
use crate::notification::NotificationStore;

/// Unread totals for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UnreadCounts {
    /// Messages not yet read by the user.
    pub messages: usize,
    /// Unread notifications addressed to the user.
    pub notifications: usize,
}

impl UnreadCounts {
    /// Derive both counts from collection snapshots.
    pub fn compute(threads: &[Thread], notifications: &[Notification], user_id: &UserId) -> Self {
        Self {
            messages: crate::chat::store::unread_in(threads, user_id),
            notifications: crate::notification::store::unread_in(notifications, user_id),
        }
    }

    /// Sum of both counts.
    pub fn total(&self) -> usize {
        self.messages + self.notifications
    }
}

/// Read-only view over both stores. Counts are recomputed on every call.
#[derive(Debug, Clone)]
pub struct UnreadAggregator {
    threads: Arc<MessageThreadStore>,
    notifications: Arc<NotificationStore>,
}

impl UnreadAggregator {
    /// Creates a new aggregator.
    pub fn new(threads: Arc<MessageThreadStore>, notifications: Arc<NotificationStore>) -> Self {
        Self {
            threads,
            notifications,
        }
    }

    /// Current unread counts for `user_id`.
    pub async fn counts(&self, user_id: &UserId) -> UnreadCounts {
        let threads = self.threads.snapshot().await;
        let notifications = self.notifications.snapshot().await;
        UnreadCounts::compute(&threads, &notifications, user_id)
    }
}

/// Badge text for `count`: nothing for zero, `"<cap>+"` above `cap`.
pub fn badge_label(count: usize, cap: usize) -> Option<String> {
    match count {
        0 => None,
        n if n > cap => Some(format!("{cap}+")),
        n => Some(n.to_string()),
    }
}
