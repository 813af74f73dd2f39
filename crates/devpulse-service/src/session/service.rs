//! Session lifecycle.

use std::sync::Arc;

use tracing::{error, info};

use devpulse_core::config::AppConfig;
use devpulse_core::result::AppResult;
use devpulse_core::traits::store::KeyValueStore;
use devpulse_storage::StoreManager;

use crate::chat::MessageThreadStore;
use crate::engagement::LikeLedger;
use crate::fanout::{EventFanout, NotificationFormatter};
use crate::notification::NotificationStore;
use crate::unread::UnreadAggregator;

/// All stores and services of one running client session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Thread store.
    pub threads: Arc<MessageThreadStore>,
    /// Notification store.
    pub notifications: Arc<NotificationStore>,
    /// Like ledger.
    pub likes: Arc<LikeLedger>,
    /// Event fan-out over the stores above.
    pub fanout: EventFanout,
    /// Unread counts over the stores above.
    pub unread: UnreadAggregator,
    /// Backend shared by every store.
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    /// Open a session on the backend selected by `config.storage`.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let manager = StoreManager::new(&config.storage).await?;
        Self::open(config, manager.store()).await
    }

    /// Open a session on an existing backend.
    pub async fn open(config: &AppConfig, store: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        let seed = config.storage.seed_demo_data;

        // ── Step 1: Load collections ──
        let threads = Arc::new(MessageThreadStore::open(Arc::clone(&store), seed).await?);
        let notifications = Arc::new(NotificationStore::open(Arc::clone(&store), seed).await?);
        let likes = Arc::new(LikeLedger::open(Arc::clone(&store)).await?);

        // ── Step 2: Wire services ──
        let fanout = EventFanout::new(
            Arc::clone(&threads),
            Arc::clone(&notifications),
            Arc::clone(&likes),
            NotificationFormatter::new(&config.messaging),
        );
        let unread = UnreadAggregator::new(Arc::clone(&threads), Arc::clone(&notifications));

        info!(provider = store.provider_type(), seed, "Session opened");
        Ok(Self {
            threads,
            notifications,
            likes,
            fanout,
            unread,
            store,
        })
    }

    /// The backend shared by every store.
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    /// Write every collection still behind memory.
    ///
    /// All collections are attempted; the first failure is returned.
    pub async fn close(&self) -> AppResult<()> {
        let results = [
            self.threads.flush().await,
            self.notifications.flush().await,
            self.likes.flush().await,
        ];

        let mut first_error = None;
        for result in results {
            if let Err(e) = result {
                error!(error = %e, "Failed to flush collection on close");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                info!("Session closed");
                Ok(())
            }
        }
    }
}
