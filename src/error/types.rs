//! Error types
//!
//! Failures local to one connection are logged where they happen and never
//! surface here; these types cover the cases a caller has to act on.

use std::fmt;
use std::io;

/// Server-side errors. Only `Bind` is fatal to the process.
#[derive(Debug)]
pub enum ServerError {
    /// The listening address is already in use or otherwise unavailable.
    Bind { addr: String, source: io::Error },
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Bind { addr, source } => {
                write!(f, "Unable to bind to {}: {}", addr, source)
            }
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Bind { source, .. } => Some(source),
        }
    }
}

/// Client agent errors, reported to the interactive collaborator.
#[derive(Debug)]
pub enum ClientError {
    /// The server was unreachable.
    Connect(io::Error),
    /// An operation was attempted before `connect` or after `disconnect`.
    NotConnected,
    /// The transport failed underneath a `join` or `send`.
    Send(io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Connect(e) => write!(f, "Failed to connect to the server: {}", e),
            ClientError::NotConnected => write!(f, "Not connected to the server"),
            ClientError::Send(e) => write!(f, "Failed to send message: {}", e),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Connect(e) | ClientError::Send(e) => Some(e),
            ClientError::NotConnected => None,
        }
    }
}
