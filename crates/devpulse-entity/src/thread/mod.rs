//! Conversation thread entities.

pub mod message;
pub mod model;

pub use message::Message;
pub use model::Thread;
