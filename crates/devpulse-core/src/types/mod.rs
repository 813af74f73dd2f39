//! Core type definitions used across the DevPulse workspace.

pub mod id;

pub use id::*;
