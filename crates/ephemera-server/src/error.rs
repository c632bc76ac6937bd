//! Error type for the server binary.

use crate::config::ConfigError;

/// Errors that can occur while starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The REST API server failed.
    #[error("api server error: {0}")]
    Api(#[from] ephemera_api::ServerError),

    /// The broadcast relay server failed.
    #[error("relay server error: {0}")]
    Relay(#[from] ephemera_relay::RelayError),
}
