//! Error handling
//!
//! Defines domain-specific error types for the relay.

pub mod types;

pub use types::*;
