//! Per-recipient notification feed.

pub mod store;

pub use store::NotificationStore;
