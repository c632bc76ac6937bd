//! Axum router construction for the resource API.
//!
//! Assembles the CRUD routes into a single [`Router`] with CORS, HTTP
//! tracing, and the access-log middleware applied. The access-log
//! layer records one line per request after the handler has produced
//! its response, so the logged status is the one actually sent.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::access_log::{error_line, request_line};
use crate::error::ErrorDetail;
use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the resource API.
///
/// The router includes:
/// - `POST /resources` -- create
/// - `GET /resources` -- list (cached)
/// - `PUT /resources/{id}` -- shallow-merge update
/// - `DELETE /resources/{id}` -- delete
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/resources",
            get(handlers::list_resources).post(handlers::create_resource),
        )
        .route(
            "/resources/{id}",
            put(handlers::update_resource).delete(handlers::delete_resource),
        )
        .layer(middleware::from_fn_with_state(state.clone(), log_request))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Middleware appending one access-log line per request.
///
/// Responses that carry an [`ErrorDetail`] extension (the generic 500
/// path) are logged as `ERROR` lines with the underlying message;
/// everything else logs the response status.
async fn log_request(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let line = match response.extensions().get::<ErrorDetail>() {
        Some(ErrorDetail(message)) => error_line(&method, &uri, message),
        None if response.status() == StatusCode::INTERNAL_SERVER_ERROR => {
            error_line(&method, &uri, "unhandled error")
        }
        None => request_line(&method, &uri, response.status()),
    };
    state.access_log.record(line);

    response
}
