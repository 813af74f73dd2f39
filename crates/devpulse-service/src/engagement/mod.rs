//! Post engagement: likes.

pub mod likes;

pub use likes::LikeLedger;
