//! Error types for the resource store.
//!
//! [`StoreError`] is the domain-level taxonomy. The HTTP layer maps
//! these onto status codes and response payloads; the store never
//! formats wire-facing messages itself.

use serde_json::Value;

/// Errors that can occur in the resource store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// A resource with the same `id` value already exists.
    #[error("duplicate resource id: {id}")]
    DuplicateId {
        /// The colliding `id` value.
        id: Value,
    },

    /// No resource matched the requested `id`.
    #[error("no resource with id {id}")]
    NotFound {
        /// The `id` path parameter that matched nothing.
        id: String,
    },

    /// The resource body was not a JSON object.
    #[error("resource body must be a JSON object")]
    NotAnObject,

    /// The resource body has no `id` field.
    #[error("resource body has no id field")]
    MissingId,

    /// The `id` field is not a comparable scalar.
    #[error("resource id must be a string, number, or bool")]
    NonScalarId,
}
