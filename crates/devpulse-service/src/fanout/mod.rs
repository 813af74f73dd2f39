//! Event fan-out: domain events into thread messages and notifications.

pub mod formatter;
pub mod rules;

pub use formatter::NotificationFormatter;
pub use rules::{DeliveredMessage, EventFanout, FanoutOutcome};
