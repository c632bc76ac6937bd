//! Relay server lifecycle management.
//!
//! The relay listens on its own port, independent of the REST API.
//! [`build_relay_router`] is exposed separately so tests can serve it
//! on an ephemeral listener.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::info;

use crate::registry::ClientRegistry;
use crate::ws;

/// Configuration for the relay server.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
        }
    }
}

/// Build the relay router: a single `WebSocket` upgrade at `/`.
pub fn build_relay_router(registry: Arc<ClientRegistry>) -> Router {
    Router::new()
        .route("/", get(ws::ws_handler))
        .with_state(registry)
}

/// Start the relay server.
///
/// Binds to the configured address and serves connections until the
/// process is terminated.
///
/// # Errors
///
/// Returns an error if the address is invalid, the TCP listener
/// cannot bind, or the server encounters a fatal I/O error.
pub async fn start_relay(
    config: &RelayConfig,
    registry: Arc<ClientRegistry>,
) -> Result<(), RelayError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| RelayError::Bind(format!("invalid address: {e}")))?;

    let router = build_relay_router(registry);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| RelayError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "broadcast relay listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| RelayError::Serve(format!("serve error: {e}")))?;

    Ok(())
}

/// Errors that can occur when starting or running the relay server.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}
