//! # devpulse-storage
//!
//! Persistent store implementations for DevPulse. Supports two modes:
//!
//! - **memory**: volatile in-process map using [dashmap](https://crates.io/crates/dashmap)
//! - **file**: one JSON document per key in a local directory
//!
//! The backend is selected at runtime based on configuration. On top of the
//! raw key-value layer, [`PersistentCollection`] implements the
//! load-or-seed / persist-after-mutation contract every store relies on.

pub mod collection;
#[cfg(feature = "file")]
pub mod file;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use collection::PersistentCollection;
pub use provider::StoreManager;
