//! Message envelope
//!
//! The logical `(sender, body)` pair carried by every relayed message,
//! independent of its wire encoding.

use crate::protocol::{SEPARATOR, SERVER_SENDER};

/// A relayed chat line: who said it and what was said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub sender: String,
    pub body: String,
}

impl Envelope {
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// An announcement issued by the server itself (joins, departures).
    pub fn server(body: impl Into<String>) -> Self {
        Self::new(SERVER_SENDER, body)
    }

    /// Wire form: `"<sender>~<body>"`.
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.sender, SEPARATOR, self.body)
    }

    /// Parses a wire payload, splitting on the first separator only.
    ///
    /// Returns `None` for payloads that carry no separator at all.
    pub fn decode(raw: &str) -> Option<Self> {
        raw.split_once(SEPARATOR)
            .map(|(sender, body)| Self::new(sender, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_sender_and_body() {
        let envelope = Envelope::new("alice", "hello");
        assert_eq!(envelope.encode(), "alice~hello");
    }

    #[test]
    fn server_announcement_uses_reserved_sender() {
        let envelope = Envelope::server("alice joined the chat");
        assert_eq!(envelope.encode(), "SERVER~alice joined the chat");
    }

    #[test]
    fn decodes_on_first_separator_only() {
        let envelope = Envelope::decode("bob~a ~ in the body").unwrap();
        assert_eq!(envelope.sender, "bob");
        assert_eq!(envelope.body, "a ~ in the body");
    }

    #[test]
    fn decode_rejects_unframed_payload() {
        assert!(Envelope::decode("no separator here").is_none());
    }

    #[test]
    fn decode_allows_empty_body() {
        let envelope = Envelope::decode("carol~").unwrap();
        assert_eq!(envelope.sender, "carol");
        assert_eq!(envelope.body, "");
    }

    #[test]
    fn round_trips_through_the_wire_form() {
        let envelope = Envelope::new("dave", "hi there");
        assert_eq!(Envelope::decode(&envelope.encode()).unwrap(), envelope);
    }
}
