//! # devpulse-entity
//!
//! Domain entity models for the DevPulse messaging and notification core.
//! Every struct in this crate is a persisted record or a domain value
//! object. All entities derive `Debug`, `Clone`, `PartialEq`, `Serialize`,
//! and `Deserialize` so collections survive a store round-trip unchanged.

pub mod engagement;
pub mod notification;
pub mod thread;
