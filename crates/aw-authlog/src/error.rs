//! Auth log error types.

use thiserror::Error;

/// Errors raised below the tool layer.
///
/// Tools never surface these to callers: each one is logged and degraded
/// to an empty result where it happens.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("source not found: {0}")]
    NotFound(String),

    #[error("failed to run journal query: {0}")]
    Spawn(String),

    #[error("journal query timed out after {0}s")]
    Timeout(u64),

    #[error("failed to encode result: {0}")]
    Encode(String),
}

impl LogError {
    /// Classify an I/O error against the path it happened on.
    pub fn from_io(path: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_string()),
            _ => Self::Io(format!("{path}: {err}")),
        }
    }
}

impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

/// Convenience alias for auth log results.
pub type LogResult<T> = Result<T, LogError>;
