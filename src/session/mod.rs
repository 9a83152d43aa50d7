//! Session management
//!
//! A session is the association between one live connection and the username
//! it declared at handshake, for as long as that connection stays open.

pub mod registry;

pub use registry::SessionRegistry;

use std::io;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Mutex;

/// A registered client: its username and the write half of its connection.
///
/// The read half stays with the connection handler, which is the only reader.
/// Cloning a session clones the handle, not the connection, so a registry
/// snapshot can be delivered to while the handler keeps reading.
#[derive(Clone)]
pub struct Session {
    username: String,
    writer: Arc<Mutex<OwnedWriteHalf>>,
}

impl Session {
    pub fn new(username: String, writer: OwnedWriteHalf) -> Self {
        Self {
            username,
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Writes a wire payload to this session's connection.
    pub async fn send_raw(&self, payload: &[u8]) -> io::Result<()> {
        let mut writer = self.writer.lock().await;
        writer.write_all(payload).await?;
        writer.flush().await
    }
}
