//! Server binary for Ephemera.
//!
//! Wires together the two independent subsystems: the REST resource
//! API (in-memory store + read cache + access log) and the `WebSocket`
//! broadcast relay on its own port.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `ephemera.yaml` (defaults when absent)
//! 3. Start the access-log writer task
//! 4. Build the API state (store, cache, TTL)
//! 5. Run the API server and the relay concurrently

mod config;
mod error;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use ephemera_api::{AccessLog, AppState, ServerConfig, start_server};
use ephemera_relay::{ClientRegistry, RelayConfig, start_relay};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerSettings;
use crate::error::AppError;

/// Default location of the YAML configuration file.
const DEFAULT_CONFIG_PATH: &str = "ephemera.yaml";

/// Application entry point.
///
/// Initializes both servers and runs them until one fails or the
/// process is terminated.
///
/// # Errors
///
/// Returns an error if configuration loading or either server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("ephemera-server starting");

    // 2. Load configuration.
    let settings = load_settings()?;
    info!(
        http_host = settings.http.host,
        http_port = settings.http.port,
        relay_port = settings.relay.port,
        cache_ttl_secs = settings.cache.ttl_secs,
        access_log = settings.access_log.path,
        "Configuration loaded"
    );

    // 3. Start the access-log writer task.
    let access_log = AccessLog::to_file(settings.access_log.path.clone());

    // 4. Build the API state.
    let state = Arc::new(AppState::with_cache_ttl(
        access_log,
        Duration::from_secs(settings.cache.ttl_secs),
    ));

    // 5. Run both servers until one exits.
    let api_config = ServerConfig {
        host: settings.http.host.clone(),
        port: settings.http.port,
    };
    let relay_config = RelayConfig {
        host: settings.relay.host.clone(),
        port: settings.relay.port,
    };
    let registry = Arc::new(ClientRegistry::new());

    tokio::try_join!(
        async { start_server(&api_config, state).await.map_err(AppError::from) },
        async { start_relay(&relay_config, registry).await.map_err(AppError::from) },
    )?;

    Ok(())
}

/// Load settings from `EPHEMERA_CONFIG` or the default path, falling
/// back to built-in defaults when no file exists.
fn load_settings() -> Result<ServerSettings, AppError> {
    let path = std::env::var("EPHEMERA_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
    let path = Path::new(&path);

    if path.exists() {
        Ok(ServerSettings::from_file(path)?)
    } else {
        info!(path = %path.display(), "no config file found, using defaults");
        Ok(ServerSettings::default())
    }
}
