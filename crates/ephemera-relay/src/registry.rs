//! Registry of connected relay clients.
//!
//! Each live connection is paired with a [`ClientId`] drawn from a
//! process-wide monotonic counter and an outbound channel sender. The
//! registry is the single shared structure of the relay; it takes an
//! explicit read-write lock so the broadcast path and the
//! connection-lifecycle paths can run on any runtime thread.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::ws::Message;
use tokio::sync::{RwLock, mpsc};
use tracing::debug;

/// Identifier of a connected relay client.
///
/// Allocated from a monotonic counter starting at 1, so uniqueness is
/// structural rather than probabilistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry of open connections, keyed by client id.
#[derive(Debug)]
pub struct ClientRegistry {
    next_id: AtomicU64,
    clients: RwLock<HashMap<ClientId, mpsc::UnboundedSender<Message>>>,
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientRegistry {
    /// Create an empty registry. The first client gets id 1.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection's outbound channel and allocate its id.
    pub async fn register(&self, tx: mpsc::UnboundedSender<Message>) -> ClientId {
        let id = ClientId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.clients.write().await.insert(id, tx);
        id
    }

    /// Remove a connection. Idempotent when already gone.
    pub async fn unregister(&self, id: ClientId) {
        self.clients.write().await.remove(&id);
    }

    /// Send a text frame to every registered client, sender included.
    ///
    /// Sends are fire-and-forget: a channel whose receiver has gone
    /// away is skipped, never an error. Returns the number of clients
    /// the frame was queued for.
    pub async fn broadcast(&self, text: &str) -> usize {
        let clients = self.clients.read().await;
        let mut delivered = 0_usize;
        for (id, tx) in clients.iter() {
            if tx.send(Message::Text(text.into())).is_ok() {
                delivered = delivered.saturating_add(1);
            } else {
                // The connection task will unregister itself shortly.
                debug!(client = %id, "skipping departed client");
            }
        }
        delivered
    }

    /// Number of currently registered clients.
    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_monotonic_and_distinct() {
        let registry = ClientRegistry::new();
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, _rx_b) = mpsc::unbounded_channel();

        let a = registry.register(tx_a).await;
        let b = registry.register(tx_b).await;

        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(a.to_string(), "1");
        assert_eq!(b.to_string(), "2");
    }

    #[tokio::test]
    async fn broadcast_reaches_every_registered_client() {
        let registry = ClientRegistry::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        registry.register(tx_a).await;
        registry.register(tx_b).await;

        let delivered = registry.broadcast("Client 1: hi").await;
        assert_eq!(delivered, 2);

        for rx in [&mut rx_a, &mut rx_b] {
            let frame = rx.recv().await.unwrap();
            assert!(matches!(frame, Message::Text(text) if text.as_str() == "Client 1: hi"));
        }
    }

    #[tokio::test]
    async fn departed_clients_are_skipped_not_errors() {
        let registry = ClientRegistry::new();
        let (tx_a, rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        registry.register(tx_a).await;
        registry.register(tx_b).await;

        drop(rx_a);
        let delivered = registry.broadcast("hello").await;
        assert_eq!(delivered, 1);
        assert!(rx_b.recv().await.is_some());
    }

    #[tokio::test]
    async fn unregister_is_idempotent() {
        let registry = ClientRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = registry.register(tx).await;
        assert_eq!(registry.client_count().await, 1);

        registry.unregister(id).await;
        registry.unregister(id).await;
        assert_eq!(registry.client_count().await, 0);
    }
}
