//! Chat client agent
//!
//! Owns the outbound half of the connection; the receive loop owns the
//! inbound half and runs concurrently with user-driven sends. The display
//! collaborator observes the session through a [`ClientEvent`] channel.

use std::sync::Arc;

use log::warn;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedReadHalf;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::client::ClientEvent;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::protocol::{Envelope, MAX_PAYLOAD};

/// Handle to one client connection.
///
/// Cloning shares the connection, so `disconnect` can be triggered from a
/// different task than the one driving sends.
#[derive(Clone)]
pub struct ChatClient {
    writer: Arc<Mutex<Option<tokio::net::tcp::OwnedWriteHalf>>>,
}

impl ChatClient {
    /// Connects to the configured server and starts the receive loop.
    ///
    /// Returns the client handle and the event stream the display
    /// collaborator should consume. Must precede every other operation.
    pub async fn connect(
        config: &ClientConfig,
    ) -> Result<(Self, UnboundedReceiver<ClientEvent>), ClientError> {
        let stream = TcpStream::connect(config.socket_addr())
            .await
            .map_err(ClientError::Connect)?;
        let (reader, writer) = stream.into_split();

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        tokio::spawn(receive_loop(reader, events_tx));

        let client = Self {
            writer: Arc::new(Mutex::new(Some(writer))),
        };
        Ok((client, events_rx))
    }

    /// Sends the handshake payload: the raw username.
    ///
    /// The caller guarantees `username` is non-empty. No acknowledgment is
    /// awaited; the handshake is assumed accepted once the bytes are sent.
    pub async fn join(&self, username: &str) -> Result<(), ClientError> {
        self.send_raw(username.as_bytes()).await
    }

    /// Transmits `text` as-is. The server attributes authorship from the
    /// session, not from the payload, so no username is prepended here.
    pub async fn send(&self, text: &str) -> Result<(), ClientError> {
        self.send_raw(text.as_bytes()).await
    }

    async fn send_raw(&self, payload: &[u8]) -> Result<(), ClientError> {
        let mut guard = self.writer.lock().await;
        let writer = guard.as_mut().ok_or(ClientError::NotConnected)?;
        writer.write_all(payload).await.map_err(ClientError::Send)?;
        writer.flush().await.map_err(ClientError::Send)
    }

    /// Closes the transport. Idempotent, and safe to call from a different
    /// task than the receive loop; the loop observes the closure through
    /// the transport itself.
    pub async fn disconnect(&self) {
        if let Some(mut writer) = self.writer.lock().await.take() {
            let _ = writer.shutdown().await;
        }
    }
}

async fn receive_loop(mut reader: OwnedReadHalf, events: UnboundedSender<ClientEvent>) {
    let mut buf = vec![0u8; MAX_PAYLOAD];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => {
                let _ = events.send(ClientEvent::Disconnected);
                break;
            }
            Ok(n) => {
                let raw = String::from_utf8_lossy(&buf[..n]).into_owned();
                let event = match Envelope::decode(&raw) {
                    Some(envelope) => ClientEvent::Message {
                        sender: envelope.sender,
                        body: envelope.body,
                    },
                    None => {
                        warn!("Received payload without a separator: {}", raw);
                        ClientEvent::Malformed(raw)
                    }
                };
                if events.send(event).is_err() {
                    // Collaborator went away; nothing left to deliver to.
                    break;
                }
            }
            Err(e) => {
                warn!("Lost connection to the server: {}", e);
                let _ = events.send(ClientEvent::Disconnected);
                break;
            }
        }
    }
}
