use serde::{Deserialize, Serialize};

/// Method recorded for `Invalid user ...` lines, which carry no auth method.
pub const INVALID_USER_METHOD: &str = "invalid_user";

/// Outcome of an SSH authentication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthOutcome {
    Success,
    Failed,
}

impl AuthOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for AuthOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parsed authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthEvent {
    /// Reconstructed `YYYY-MM-DD HH:MM:SS` (year taken from the clock at parse time).
    #[serde(rename = "ts")]
    pub timestamp: String,
    /// Which pattern matched.
    #[serde(rename = "status")]
    pub outcome: AuthOutcome,
    /// User name as logged; not checked against the passwd database.
    pub user: String,
    /// Remote address or hostname, verbatim.
    pub ip: String,
    /// As logged; not range-checked against 0..=65535.
    pub port: u64,
    /// Auth method (`password`, `publickey`, ...) or [`INVALID_USER_METHOD`].
    pub method: String,
    /// Original log line.
    pub raw: String,
}

impl AuthEvent {
    /// Text the free-form search filter runs against.
    pub fn search_haystack(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.timestamp, self.outcome, self.user, self.ip, self.method, self.raw
        )
    }
}

/// Login counters over the stats window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_success: u64,
    pub total_failed: u64,
    pub today_success: u64,
    pub today_failed: u64,
    /// Path or label of the source the counters were computed from.
    pub source: String,
}
