//! REST endpoint handlers for the resource API.
//!
//! All handlers operate on the shared [`AppState`]. Mutations take the
//! store's write lock and invalidate the cache afterwards (creates
//! excepted -- see the cache policy note in [`crate`] docs).
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/resources` | Create a resource (unique `id` required) |
//! | `GET` | `/resources` | List all resources (cached) |
//! | `PUT` | `/resources/{id}` | Shallow-merge partial fields |
//! | `DELETE` | `/resources/{id}` | Remove a resource |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use ephemera_store::{Resource, StoreError};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /resources -- create
// ---------------------------------------------------------------------------

/// Create a resource from the request body.
///
/// Responds `201` with the stored resource, or `400` with an error
/// payload when the `id` collides or the body is not a valid resource.
pub async fn create_resource(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let resource = Resource::from_value(body).map_err(ApiError::from_create)?;

    let created = state
        .store
        .write()
        .await
        .create(resource)
        .map_err(ApiError::from_create)?;

    // Creates do not invalidate the cache. A snapshot populated by an
    // earlier GET keeps serving until its TTL or a later update/delete.
    Ok((StatusCode::CREATED, Json(created)))
}

// ---------------------------------------------------------------------------
// GET /resources -- list (cached)
// ---------------------------------------------------------------------------

/// List all resources.
///
/// A cache hit serves the stored snapshot unchanged. A miss serves the
/// live list and then populates the cache with that same snapshot for
/// subsequent requests.
pub async fn list_resources(State(state): State<Arc<AppState>>) -> Json<Vec<Resource>> {
    let mut cache = state.cache.lock().await;

    if let Some(snapshot) = cache.get() {
        debug!("serving resource list from cache");
        return Json(snapshot.to_vec());
    }

    let live = state.store.read().await.list_all().to_vec();
    cache.put(live.clone(), state.cache_ttl);
    Json(live)
}

// ---------------------------------------------------------------------------
// PUT /resources/{id} -- shallow-merge update
// ---------------------------------------------------------------------------

/// Shallow-merge partial fields into the resource with the given id.
///
/// Responds `200` with the merged resource, or `404` when no resource
/// matches. A successful update invalidates the cache.
pub async fn update_resource(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let Value::Object(partial) = body else {
        return Err(ApiError::InvalidResource(StoreError::NotAnObject));
    };

    let merged = state
        .store
        .write()
        .await
        .update_by_id(&id, partial)
        .map_err(ApiError::from_update)?;

    state.cache.lock().await.invalidate();
    Ok(Json(merged))
}

// ---------------------------------------------------------------------------
// DELETE /resources/{id} -- remove
// ---------------------------------------------------------------------------

/// Remove the resource with the given id.
///
/// Responds `200` with a plain-text confirmation, or `404` with an
/// error payload naming the id. A successful delete invalidates the
/// cache.
pub async fn delete_resource(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .write()
        .await
        .delete_by_id(&id)
        .map_err(ApiError::from_delete)?;

    state.cache.lock().await.invalidate();
    Ok(format!("Resource with id {id} deleted"))
}
