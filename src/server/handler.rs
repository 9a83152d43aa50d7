//! Connection handler
//!
//! Owns one connection from accept to termination: reads the single
//! handshake payload, registers the session, announces the join, relays
//! every inbound line, and on EOF or reset deregisters and announces the
//! departure. No other component reads from this connection.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{info, warn};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedReadHalf;

use crate::protocol::Envelope;
use crate::server::Dispatcher;
use crate::session::{Session, SessionRegistry};

pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    registry: Arc<SessionRegistry>,
    dispatcher: Dispatcher,
    max_payload: usize,
) {
    let (mut reader, writer) = stream.into_split();
    let mut buf = vec![0u8; max_payload];

    // The first payload is the handshake: the raw username.
    let username = match read_payload(&mut reader, &mut buf).await {
        Some(name) if !name.is_empty() => name,
        Some(_) => {
            warn!("Client {} sent an empty username", addr);
            return;
        }
        None => {
            info!("Client {} disconnected before the handshake", addr);
            return;
        }
    };

    registry.add(Session::new(username.clone(), writer)).await;
    info!("Client {} joined as {}", addr, username);
    dispatcher
        .broadcast(&Envelope::server(format!("{} joined the chat", username)))
        .await;

    // Receive loop: this handler is the connection's only reader, so a
    // sender's messages reach the dispatcher in the order they were sent.
    loop {
        match read_payload(&mut reader, &mut buf).await {
            Some(body) if !body.is_empty() => {
                info!("Relaying {} bytes from {}", body.len(), username);
                dispatcher.broadcast(&Envelope::new(username.clone(), body)).await;
            }
            Some(_) => {
                warn!("The message sent from client {} is empty", username);
            }
            None => break,
        }
    }

    // Deregister before announcing so the departed session is no longer in
    // the snapshot the announcement is delivered to. With duplicate
    // usernames permitted, first-match removal may take the other session's
    // slot; both connections stay readable regardless.
    if registry.remove(&username).await.is_some() {
        info!("Client {} ({}) left the chat", username, addr);
        dispatcher
            .broadcast(&Envelope::server(format!("{} left the chat", username)))
            .await;
    }
}

/// One blocking read. Returns `None` on EOF or reset, otherwise the payload
/// decoded as UTF-8 (lossily, the wire format is text).
async fn read_payload(reader: &mut OwnedReadHalf, buf: &mut [u8]) -> Option<String> {
    match reader.read(buf).await {
        Ok(0) => None,
        Ok(n) => Some(String::from_utf8_lossy(&buf[..n]).into_owned()),
        Err(e) => {
            info!("Connection reset by client: {}", e);
            None
        }
    }
}
