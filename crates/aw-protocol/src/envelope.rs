use serde::{Deserialize, Serialize};

/// Response envelope returned by every operation.
///
/// Data operations always report `status: true` and degrade to empty data;
/// `status: false` is reserved for dispatch-level failures (unknown
/// operation, malformed arguments).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    pub status: bool,
    pub data: T,
    /// Resolved source identifier, for operations that read lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: true,
            data,
            source: None,
            error: None,
        }
    }

    pub fn with_source(data: T, source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::ok(data)
        }
    }
}

impl Envelope<serde_json::Value> {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: false,
            data: serde_json::Value::Null,
            source: None,
            error: Some(error.into()),
        }
    }
}
