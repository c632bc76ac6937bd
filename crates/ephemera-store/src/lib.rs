//! In-memory resource storage for the Ephemera server.
//!
//! This crate owns the two leaf components of the system:
//!
//! - [`ResourceStore`] -- an ordered collection of schema-free JSON
//!   records, each identified by a unique `id` field, supporting
//!   create, list, shallow-merge update, and delete.
//! - [`ListCache`] -- a single-slot cache holding one snapshot of the
//!   full resource list with a time-to-live deadline.
//!
//! Nothing here performs I/O or locking. The HTTP layer wraps the
//! store and cache in its own synchronization and decides when the
//! cache is populated or invalidated; the store itself has no cache
//! awareness.

pub mod cache;
pub mod error;
pub mod resource;
pub mod store;

// Re-export primary types for convenience.
pub use cache::{DEFAULT_TTL, ListCache};
pub use error::StoreError;
pub use resource::Resource;
pub use store::ResourceStore;
