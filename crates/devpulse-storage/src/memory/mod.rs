//! In-memory key-value backend.

pub mod store;

pub use store::MemoryKeyValueStore;
