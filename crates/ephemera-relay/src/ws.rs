//! `WebSocket` handler for the broadcast relay.
//!
//! Each connection runs through `Connecting -> Open -> Closed`. On
//! upgrade the socket is split: a forwarding task drains the client's
//! outbound channel into the sink while the receive loop relays
//! incoming text frames through the shared [`ClientRegistry`].

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::debug;

use crate::registry::ClientRegistry;

/// Upgrade an HTTP request to a `WebSocket` connection and join the
/// broadcast relay.
///
/// # Route
///
/// `GET /`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(registry): State<Arc<ClientRegistry>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, registry))
}

/// Drive one relay connection from registration to cleanup.
async fn handle_socket(socket: WebSocket, registry: Arc<ClientRegistry>) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    let id = registry.register(tx.clone()).await;
    debug!(client = %id, "relay client connected");

    // Confirmation goes to this socket only, before any broadcast
    // traffic can reach it.
    let welcome = format!("You are connected as Client {id}");
    if sink.send(Message::Text(welcome.into())).await.is_err() {
        registry.unregister(id).await;
        return;
    }

    // Forward queued frames (broadcasts, pongs) to the peer.
    let send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sink.send(frame).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let outgoing = format!("Client {id}: {text}");
                let delivered = registry.broadcast(&outgoing).await;
                debug!(client = %id, delivered, "relayed message");
            }
            Ok(Message::Ping(data)) => {
                // Fire-and-forget, like every other send in the relay.
                let _ = tx.send(Message::Pong(data));
            }
            Ok(Message::Close(_)) => {
                debug!(client = %id, "relay client sent close frame");
                break;
            }
            Ok(Message::Binary(_) | Message::Pong(_)) => {
                // The relay speaks plain text only.
            }
            Err(e) => {
                debug!(client = %id, error = %e, "relay socket error");
                break;
            }
        }
    }

    registry.unregister(id).await;
    send_task.abort();
    debug!(client = %id, "relay client disconnected");
}
