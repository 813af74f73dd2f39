//! Store key names for all DevPulse collections.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

/// Prefix applied to all DevPulse store keys.
const PREFIX: &str = "devpulse";

/// Key holding the serialized thread collection.
pub fn chats() -> String {
    format!("{PREFIX}_chats")
}

/// Key holding the serialized notification collection.
pub fn notifications() -> String {
    format!("{PREFIX}_notifications")
}

/// Key holding the serialized like ledger.
pub fn likes() -> String {
    format!("{PREFIX}_likes")
}

/// Every collection key, in load order.
pub fn all() -> Vec<String> {
    vec![chats(), notifications(), likes()]
}

/// Whether `key` is safe to use as a store key (and as a file name).
pub fn is_valid(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}
