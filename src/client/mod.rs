//! Client agent
//!
//! The counterpart running in each client process: connects, performs the
//! username handshake, offers a send operation, and runs a receive loop that
//! delivers inbound lines to the display collaborator as events.

pub mod agent;
pub mod event;

pub use agent::ChatClient;
pub use event::ClientEvent;
