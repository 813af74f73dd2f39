//! Conversation threads and direct messages.

pub mod store;

pub use store::MessageThreadStore;
