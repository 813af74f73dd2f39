//! # devpulse-service
//!
//! Messaging and notification services for DevPulse. Each store owns one
//! persisted collection; the fan-out layer turns domain events into
//! thread messages and notification records; the unread aggregator
//! derives badge counts from both stores.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references, wired once per session by
//! [`Session::open`].

pub mod chat;
pub mod context;
pub mod engagement;
pub mod fanout;
pub mod notification;
pub mod seed;
pub mod session;
pub mod unread;

pub use chat::MessageThreadStore;
pub use context::SessionContext;
pub use engagement::LikeLedger;
pub use fanout::{DeliveredMessage, EventFanout, FanoutOutcome, NotificationFormatter};
pub use notification::NotificationStore;
pub use session::Session;
pub use unread::{UnreadAggregator, UnreadCounts, badge_label};
