//! Relay wire protocol
//!
//! Defines the message envelope and the constants of the wire format.
//!
//! The protocol is deliberately minimal: the first payload a client sends is
//! its raw username (no framing), and every relayed message is the text
//! `"<sender>~<body>"`. Decoding splits on the first `~` only, so a body may
//! contain tildes but a sender name may not. Reads on both sides use a fixed
//! buffer of [`MAX_PAYLOAD`] bytes; larger payloads are cut at the read
//! boundary rather than reassembled.

pub mod envelope;

pub use envelope::Envelope;

/// Separator between sender and body on the wire.
pub const SEPARATOR: char = '~';

/// Sender name used for join/departure announcements.
pub const SERVER_SENDER: &str = "SERVER";

/// Upper bound on a single read, and therefore on a single payload.
pub const MAX_PAYLOAD: usize = 2048;
