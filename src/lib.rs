//! chat-relay
//!
//! A connection-oriented chat relay: the server registers each connection
//! under a declared username and fans every message out to all connected
//! clients, announcing joins and departures. The client agent is the
//! library-side counterpart used by the terminal front end.

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod session;

pub use client::ChatClient;
pub use server::Server;
