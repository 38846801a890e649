use serde::{Deserialize, Serialize};

/// Kind of log source in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Pseudo-source that defers to the auto-selection probe.
    Auto,
    /// A syslog-style text file.
    File,
    /// The systemd journal, queried through `journalctl`.
    #[serde(rename = "journalctl")]
    ExternalQuery,
}

/// Probe result for one catalog entry, as reported by `get_sources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// File sources only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    /// File sources only; 0 when missing or unreadable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// File sources only: whether the sampled tail contains sshd lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_sshd: Option<bool>,
    pub available: bool,
}
