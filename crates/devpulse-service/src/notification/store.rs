//! Notification store: append, list, and read-state transitions.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use devpulse_core::result::AppResult;
use devpulse_core::traits::store::KeyValueStore;
use devpulse_core::types::{NotificationId, UserId};
use devpulse_entity::notification::{NewNotification, Notification};
use devpulse_storage::{PersistentCollection, keys};

use crate::seed;

/// Owns every notification of the session.
///
/// Records are never deleted; only `read` changes.
#[derive(Debug)]
pub struct NotificationStore {
    notifications: Mutex<PersistentCollection<Notification>>,
}

impl NotificationStore {
    /// Load the notification collection, seeding demo records when it is
    /// absent and `seed_demo_data` is set.
    pub async fn open(store: Arc<dyn KeyValueStore>, seed_demo_data: bool) -> AppResult<Self> {
        let notifications = PersistentCollection::load(store, keys::notifications(), || {
            if seed_demo_data {
                seed::demo_notifications(Utc::now())
            } else {
                Vec::new()
            }
        })
        .await?;
        info!(count = notifications.items().len(), "Notification store opened");
        Ok(Self {
            notifications: Mutex::new(notifications),
        })
    }

    /// The recipient's notifications, newest first.
    ///
    /// Records with the same `created_at` keep reverse insertion order.
    pub async fn notifications_for_user(&self, user_id: &UserId) -> Vec<Notification> {
        let notifications = self.notifications.lock().await;
        let mut result: Vec<(usize, &Notification)> = notifications
            .items()
            .iter()
            .enumerate()
            .filter(|(_, n)| &n.recipient_id == user_id)
            .collect();
        result.sort_by(|(ia, a), (ib, b)| b.created_at.cmp(&a.created_at).then_with(|| ib.cmp(ia)));
        result.into_iter().map(|(_, n)| n.clone()).collect()
    }

    /// Number of unread notifications for `user_id`.
    pub async fn unread_count(&self, user_id: &UserId) -> usize {
        let notifications = self.notifications.lock().await;
        unread_in(notifications.items(), user_id)
    }

    /// Record a notification.
    ///
    /// Returns `None` without writing anything when the actor is the
    /// recipient.
    pub async fn append(&self, new: NewNotification) -> AppResult<Option<Notification>> {
        let (notification, written) = self.insert(new).await;
        written.map(|()| notification)
    }

    /// [`append`](Self::append) that hands the record back together with
    /// the write result.
    pub(crate) async fn insert(&self, new: NewNotification) -> (Option<Notification>, AppResult<()>) {
        if new.is_self_notification() {
            debug!(actor_id = %new.actor_id, kind = %new.kind, "Suppressed self-notification");
            return (None, Ok(()));
        }

        let notification = new.into_notification();
        let mut notifications = self.notifications.lock().await;
        notifications.items_mut().push(notification.clone());
        debug!(
            notification_id = %notification.id,
            recipient_id = %notification.recipient_id,
            kind = %notification.kind,
            "Notification appended"
        );
        let written = notifications.persist().await;
        (Some(notification), written)
    }

    /// Mark one notification as read.
    ///
    /// Returns `false` when the id is unknown or the record was already read.
    pub async fn mark_read(&self, notification_id: &NotificationId) -> AppResult<bool> {
        let mut notifications = self.notifications.lock().await;
        let Some(index) = notifications
            .items()
            .iter()
            .position(|n| &n.id == notification_id && n.is_unread())
        else {
            if !notifications.items().iter().any(|n| &n.id == notification_id) {
                warn!(notification_id = %notification_id, "Mark read on unknown notification");
            }
            notifications.flush().await?;
            return Ok(false);
        };

        notifications.items_mut()[index].mark_read();
        notifications.persist().await?;
        Ok(true)
    }

    /// Mark every notification of `user_id` as read.
    ///
    /// Returns how many records changed state.
    pub async fn mark_all_read(&self, user_id: &UserId) -> AppResult<usize> {
        let mut notifications = self.notifications.lock().await;
        if unread_in(notifications.items(), user_id) == 0 {
            notifications.flush().await?;
            return Ok(0);
        }

        let changed = notifications
            .items_mut()
            .iter_mut()
            .filter(|n| &n.recipient_id == user_id)
            .map(Notification::mark_read)
            .filter(|changed| *changed)
            .count();
        debug!(user_id = %user_id, changed, "All notifications marked read");
        notifications.persist().await?;
        Ok(changed)
    }

    /// Clone of the full collection.
    pub async fn snapshot(&self) -> Vec<Notification> {
        self.notifications.lock().await.snapshot()
    }

    /// Retry a write that failed earlier.
    pub async fn flush(&self) -> AppResult<()> {
        self.notifications.lock().await.flush().await
    }

    /// Whether the durable copy is behind memory.
    pub async fn is_dirty(&self) -> bool {
        self.notifications.lock().await.is_dirty()
    }
}

/// Unread notifications addressed to `user_id`.
pub(crate) fn unread_in(notifications: &[Notification], user_id: &UserId) -> usize {
    notifications
        .iter()
        .filter(|n| &n.recipient_id == user_id && n.is_unread())
        .count()
}
