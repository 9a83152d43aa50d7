//! Broadcast dispatcher
//!
//! Fans one envelope out to every registered session. A failed delivery is
//! logged and skipped; the failing recipient's own handler will observe the
//! dead connection on its next read and deregister it. The dispatcher never
//! removes sessions itself.

use std::sync::Arc;

use log::warn;

use crate::protocol::Envelope;
use crate::session::SessionRegistry;

#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<SessionRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    /// Delivers `envelope` to every session present in the registry at call
    /// time, continuing past per-recipient failures.
    pub async fn broadcast(&self, envelope: &Envelope) {
        let wire = envelope.encode();
        for session in self.registry.snapshot().await {
            if let Err(e) = session.send_raw(wire.as_bytes()).await {
                warn!("Failed to send message to {}: {}", session.username(), e);
            }
        }
    }
}
