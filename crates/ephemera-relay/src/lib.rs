//! `WebSocket` broadcast relay for Ephemera.
//!
//! An independent chat-style subsystem with no dependency on the
//! resource store: it listens on its own port, tags every connection
//! with a generated client id, and rebroadcasts any received text
//! frame to every open connection -- sender included.
//!
//! # Lifecycle
//!
//! On connect the client is registered and receives
//! `You are connected as Client <id>` on its own socket only. Each
//! text frame it sends is relayed to all registered clients as
//! `Client <id>: <message>`. On disconnect the client is removed from
//! the registry; no history is kept and no delivery is guaranteed --
//! a send to a departed peer is simply skipped.

pub mod registry;
pub mod server;
pub mod ws;

// Re-export primary types for convenience.
pub use registry::{ClientId, ClientRegistry};
pub use server::{RelayConfig, RelayError, build_relay_router, start_relay};
