//! Client events
//!
//! What the receive loop hands to the display collaborator.

/// An event delivered to the display collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// A relayed chat line, already split into sender and body.
    Message { sender: String, body: String },
    /// A payload that carried no separator; reported, not fatal.
    Malformed(String),
    /// The server closed or reset the connection. Terminal: the receive
    /// loop has exited and the collaborator should end the session.
    Disconnected,
}
