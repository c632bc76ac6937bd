//! Append-only request access log.
//!
//! One plain-text line per request:
//!
//! ```text
//! 2026-08-27T12:00:00.000Z - POST /resources - 201
//! 2026-08-27T12:00:01.000Z - ERROR - GET /resources - boom
//! ```
//!
//! [`AccessLog`] has an asynchronous, non-blocking contract: callers
//! push formatted lines onto an unbounded channel and a background
//! task owns the file. The request path never waits on log I/O, and a
//! failed write is reported via [`tracing::warn!`] without ever
//! touching the response.

use std::path::PathBuf;

use axum::http::{Method, StatusCode, Uri};
use chrono::{SecondsFormat, Utc};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Handle for recording access-log lines.
///
/// Cheap to clone; all clones feed the same writer task. The
/// [`disabled`](AccessLog::disabled) variant drops every line and is
/// intended for tests.
#[derive(Debug, Clone)]
pub struct AccessLog {
    tx: Option<mpsc::UnboundedSender<String>>,
}

impl AccessLog {
    /// Create a log that appends to the file at `path`.
    ///
    /// Spawns the writer task on the current Tokio runtime. The file
    /// is created on first write if absent.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let path = path.into();
        tokio::spawn(write_loop(path, rx));
        Self { tx: Some(tx) }
    }

    /// Create a log that discards every line.
    pub const fn disabled() -> Self {
        Self { tx: None }
    }

    /// Queue a line for appending. Never blocks, never fails the caller.
    pub fn record(&self, line: String) {
        if let Some(tx) = &self.tx
            && tx.send(line).is_err()
        {
            warn!("access log writer is gone, dropping line");
        }
    }
}

/// Format the line for a completed request.
pub fn request_line(method: &Method, uri: &Uri, status: StatusCode) -> String {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    format!("{timestamp} - {method} {uri} - {}", status.as_u16())
}

/// Format the line for a request that hit the generic 500 path.
pub fn error_line(method: &Method, uri: &Uri, message: &str) -> String {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    format!("{timestamp} - ERROR - {method} {uri} - {message}")
}

/// Background task owning the log file.
///
/// Exits when every [`AccessLog`] handle has been dropped or the file
/// cannot be opened.
async fn write_loop(path: PathBuf, mut rx: mpsc::UnboundedReceiver<String>) {
    let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
        Ok(file) => file,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to open access log");
            return;
        }
    };

    while let Some(mut line) = rx.recv().await {
        line.push('\n');
        if let Err(e) = file.write_all(line.as_bytes()).await {
            warn!(path = %path.display(), error = %e, "failed to write access log");
        }
    }
    debug!(path = %path.display(), "access log writer shutting down");
}
