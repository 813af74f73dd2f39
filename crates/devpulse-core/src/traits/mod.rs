//! Core traits defined in `devpulse-core` and implemented by other crates.

pub mod store;

pub use store::KeyValueStore;
