//! Session wiring: opens every store once and injects them into the
//! fan-out and aggregator.

pub mod service;

pub use service::Session;
