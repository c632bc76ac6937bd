//! Error types for the REST API layer.
//!
//! [`ApiError`] unifies all failure modes into a single enum that
//! converts into an HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//! Domain errors become 4xx responses with a `{"error": ...}` JSON
//! payload; anything else becomes a generic plain-text 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ephemera_store::StoreError;

/// Body of the generic 500 response. No payload structure guaranteed.
pub const INTERNAL_ERROR_BODY: &str = "Something went wrong!";

/// Response extension carrying the underlying message of a 500, so the
/// access-log middleware can record it without parsing the body.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

/// Errors that can occur in the REST API layer.
///
/// The display strings are the wire payloads.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Create-time identifier collision.
    #[error("Resource with this ID already exists")]
    DuplicateId,

    /// Update target absent.
    #[error("Resource not found")]
    NotFound,

    /// Delete target absent; the payload names the identifier.
    #[error("Resource with id {id} not found")]
    NotFoundById {
        /// The identifier that matched nothing.
        id: String,
    },

    /// The request body failed resource validation.
    #[error("{0}")]
    InvalidResource(StoreError),

    /// Anything that should not happen; caught by the generic 500 path.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Map a store error raised by a create to its API error.
    pub fn from_create(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateId { .. } => Self::DuplicateId,
            StoreError::NotFound { .. } => Self::Internal(err.to_string()),
            validation => Self::InvalidResource(validation),
        }
    }

    /// Map a store error raised by an update to its API error.
    pub fn from_update(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound,
            other => Self::Internal(other.to_string()),
        }
    }

    /// Map a store error raised by a delete to its API error.
    pub fn from_delete(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => Self::NotFoundById { id },
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::DuplicateId | Self::InvalidResource(_) => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::NotFoundById { .. } => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match self {
            Self::Internal(message) => {
                // Generic plain-text 500; the real message travels as
                // an extension for the access log only.
                let mut response = (status, INTERNAL_ERROR_BODY).into_response();
                response.extensions_mut().insert(ErrorDetail(message));
                response
            }
            domain => {
                let body = serde_json::json!({ "error": domain.to_string() });
                (status, axum::Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        let cases = [
            (ApiError::DuplicateId, StatusCode::BAD_REQUEST),
            (
                ApiError::InvalidResource(StoreError::MissingId),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::NotFound, StatusCode::NOT_FOUND),
            (
                ApiError::NotFoundById { id: "7".to_owned() },
                StatusCode::NOT_FOUND,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn internal_error_is_generic_but_carries_detail() {
        let response = ApiError::Internal("boom".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = response.extensions().get::<ErrorDetail>().unwrap();
        assert_eq!(detail.0, "boom");
    }

    #[test]
    fn delete_miss_payload_names_the_id() {
        let err = ApiError::from_delete(StoreError::NotFound { id: "9".to_owned() });
        assert_eq!(err.to_string(), "Resource with id 9 not found");
    }
}
