//! Post engagement records.

pub mod like;

pub use like::LikeRecord;
