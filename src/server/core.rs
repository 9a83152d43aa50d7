//! Server core
//!
//! Binds the listening socket and runs the accept loop, spawning one task
//! per inbound connection.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info};
use tokio::net::{TcpListener, TcpSocket};

use crate::config::RelayConfig;
use crate::error::ServerError;
use crate::server::Dispatcher;
use crate::server::handler::handle_connection;
use crate::session::SessionRegistry;

pub struct Server {
    listener: TcpListener,
    registry: Arc<SessionRegistry>,
    config: RelayConfig,
}

impl Server {
    /// Binds the listening socket with the configured backlog.
    ///
    /// A bind failure is fatal to startup; the caller reports it and exits
    /// without entering the accept loop.
    pub async fn bind(config: RelayConfig) -> Result<Self, ServerError> {
        let addr = config.socket_addr();
        let listener = Self::listen(&config).await.map_err(|source| {
            error!("Failed to bind to {}: {}", addr, source);
            ServerError::Bind { addr, source }
        })?;

        info!("Server is running on {}", config.socket_addr());

        Ok(Self {
            listener,
            registry: Arc::new(SessionRegistry::new()),
            config,
        })
    }

    async fn listen(config: &RelayConfig) -> io::Result<TcpListener> {
        let addr: SocketAddr = config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        socket.bind(addr)?;
        socket.listen(config.backlog)
    }

    /// The address the listener actually bound, useful when the configured
    /// port was 0.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle to the session registry shared with every connection handler.
    pub fn registry(&self) -> Arc<SessionRegistry> {
        Arc::clone(&self.registry)
    }

    /// Accept loop. Runs until the process is killed.
    pub async fn run(self) {
        info!("Waiting for incoming connections...");

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!("Connected to client {}", addr);
                    let registry = Arc::clone(&self.registry);
                    let dispatcher = Dispatcher::new(Arc::clone(&self.registry));
                    let max_payload = self.config.max_payload;

                    // One task per connection so the accept loop never blocks
                    // on a slow client.
                    tokio::spawn(async move {
                        handle_connection(stream, addr, registry, dispatcher, max_payload).await;
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}
