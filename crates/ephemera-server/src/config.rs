//! Configuration loading and typed config structures for the server.
//!
//! The canonical configuration lives in `ephemera.yaml` at the project
//! root (overridable via the `EPHEMERA_CONFIG` environment variable).
//! Every field has a default, so a missing file yields a fully usable
//! configuration: REST API on port 3000, relay on port 8080, ten
//! minute cache TTL, access log in `server.log`.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ServerSettings {
    /// REST API listener settings.
    #[serde(default)]
    pub http: ListenConfig,

    /// Broadcast relay listener settings.
    #[serde(default)]
    pub relay: RelayListenConfig,

    /// Read cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Access log settings.
    #[serde(default)]
    pub access_log: AccessLogConfig,
}

impl ServerSettings {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// REST API listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListenConfig {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_http_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_http_port(),
        }
    }
}

/// Broadcast relay listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelayListenConfig {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on. Must differ from the HTTP port.
    #[serde(default = "default_relay_port")]
    pub port: u16,
}

impl Default for RelayListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_relay_port(),
        }
    }
}

/// Read cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Cache entry lifetime in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

/// Access log configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessLogConfig {
    /// Path of the append-only request log file.
    #[serde(default = "default_access_log_path")]
    pub path: String,
}

impl Default for AccessLogConfig {
    fn default() -> Self {
        Self {
            path: default_access_log_path(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_http_port() -> u16 {
    3000
}

const fn default_relay_port() -> u16 {
    8080
}

const fn default_cache_ttl_secs() -> u64 {
    600
}

fn default_access_log_path() -> String {
    String::from("server.log")
}
