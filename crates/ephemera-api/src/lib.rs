//! REST API server for the Ephemera resource store.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - `POST /resources` -- create a resource (duplicate ids rejected)
//! - `GET /resources` -- list all resources through a single-slot
//!   read cache with a fixed time-to-live
//! - `PUT /resources/{id}` -- shallow-merge partial fields into a
//!   resource, invalidating the cache
//! - `DELETE /resources/{id}` -- remove a resource, invalidating the
//!   cache
//!
//! # Architecture
//!
//! All handlers operate on an explicit [`AppState`] injected via
//! Axum's `State` extractor -- there is no ambient global state, so
//! tests and embedders can run any number of isolated instances. The
//! store is the canonical list; the cache is populated only after a
//! GET miss has been served and is cleared by successful updates and
//! deletes (creates deliberately leave it alone, matching the
//! documented staleness window).
//!
//! Every request is appended to a plain-text access log through
//! [`AccessLog`], a channel-backed collaborator whose file I/O runs on
//! a background task so the request path never waits on the disk.

pub mod access_log;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use access_log::AccessLog;
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
