//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use devpulse_core::config::AppConfig;
use devpulse_core::config::storage::StorageConfig;
use devpulse_core::error::AppError;
use devpulse_core::result::AppResult;
use devpulse_core::traits::store::KeyValueStore;
use devpulse_core::types::UserId;
use devpulse_service::{Session, SessionContext};
use devpulse_storage::memory::MemoryKeyValueStore;

/// Memory store whose writes can be made to fail on demand.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryKeyValueStore,
    failing: AtomicBool,
}

impl FlakyStore {
    /// Make every following write fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Raw stored value, bypassing the failure switch.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.unwrap()
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    fn provider_type(&self) -> &str {
        "flaky"
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::persistence("simulated write failure"));
        }
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn keys(&self) -> AppResult<Vec<String>> {
        self.inner.keys().await
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.failing.load(Ordering::SeqCst))
    }
}

/// Test application context
pub struct TestApp {
    /// The open session
    pub session: Session,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Session on an in-memory store with the demo data set.
    pub async fn seeded() -> Self {
        Self::on_store(Arc::new(MemoryKeyValueStore::new()), true).await
    }

    /// Session on an empty in-memory store.
    pub async fn empty() -> Self {
        Self::on_store(Arc::new(MemoryKeyValueStore::new()), false).await
    }

    /// Session on a caller-supplied backend.
    pub async fn on_store(store: Arc<dyn KeyValueStore>, seed: bool) -> Self {
        let config = test_config("memory", "", seed);
        let session = Session::open(&config, store)
            .await
            .expect("Failed to open session");
        Self { session, config }
    }
}

/// Configuration with the given storage settings and defaults elsewhere.
pub fn test_config(provider: &str, directory: &str, seed: bool) -> AppConfig {
    AppConfig {
        storage: StorageConfig {
            provider: provider.to_string(),
            directory: directory.to_string(),
            seed_demo_data: seed,
        },
        ..AppConfig::default()
    }
}

/// Shorthand for a user id.
pub fn uid(id: &str) -> UserId {
    UserId::from(id)
}

/// The demo users.
pub fn john() -> SessionContext {
    SessionContext::new("1", "johndoe")
}

pub fn sarah() -> SessionContext {
    SessionContext::new("2", "sarahjones")
}

pub fn mike() -> SessionContext {
    SessionContext::new("3", "mikesmith")
}
