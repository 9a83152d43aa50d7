//! Relay server
//!
//! The accept loop, the per-connection handler, and the broadcast dispatcher.

pub mod broadcast;
pub mod core;
pub mod handler;

pub use broadcast::Dispatcher;
pub use core::Server;
