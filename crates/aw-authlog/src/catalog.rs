//! Fixed catalog of log sources and per-request probing.

use serde::Deserialize;

use aw_protocol::{SourceInfo, SourceKind};

use crate::journal::JOURNAL_LABEL;
use crate::parsers::has_sshd_marker;
use crate::source::{FileProbe, LogSource};

pub const AUTO_KEY: &str = "auto";
pub const AUTH_LOG_KEY: &str = "auth.log";
pub const SECURE_KEY: &str = "secure";
pub const MESSAGES_KEY: &str = "messages";
pub const JOURNAL_KEY: &str = "journalctl";

/// File paths for the file-backed sources (the `[sources]` config section).
#[derive(Debug, Clone, Deserialize)]
pub struct SourcePaths {
    /// Debian/Ubuntu.
    #[serde(default = "default_auth_log")]
    pub auth_log: String,
    /// RHEL, CentOS, Alma, Rocky.
    #[serde(default = "default_secure")]
    pub secure: String,
    /// Some setups route sshd here.
    #[serde(default = "default_messages")]
    pub messages: String,
}

fn default_auth_log() -> String {
    "/var/log/auth.log".into()
}

fn default_secure() -> String {
    "/var/log/secure".into()
}

fn default_messages() -> String {
    "/var/log/messages".into()
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            auth_log: default_auth_log(),
            secure: default_secure(),
            messages: default_messages(),
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub key: &'static str,
    pub label: String,
    pub kind: SourceKind,
    /// Set iff `kind` is [`SourceKind::File`].
    pub path: Option<String>,
}

impl SourceSpec {
    fn file(key: &'static str, path: &str) -> Self {
        Self {
            key,
            label: path.to_string(),
            kind: SourceKind::File,
            path: Some(path.to_string()),
        }
    }
}

/// Ordered source catalog: auto, the file sources in auto-selection
/// priority, then the journal.
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    entries: Vec<SourceSpec>,
}

impl SourceCatalog {
    pub fn new(paths: &SourcePaths) -> Self {
        let entries = vec![
            SourceSpec {
                key: AUTO_KEY,
                label: "Auto".into(),
                kind: SourceKind::Auto,
                path: None,
            },
            SourceSpec::file(AUTH_LOG_KEY, &paths.auth_log),
            SourceSpec::file(SECURE_KEY, &paths.secure),
            SourceSpec::file(MESSAGES_KEY, &paths.messages),
            SourceSpec {
                key: JOURNAL_KEY,
                label: JOURNAL_LABEL.into(),
                kind: SourceKind::ExternalQuery,
                path: None,
            },
        ];
        Self { entries }
    }

    pub fn entries(&self) -> &[SourceSpec] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&SourceSpec> {
        self.entries.iter().find(|s| s.key == key)
    }

    /// File-backed sources in auto-selection priority order.
    pub fn file_candidates(&self) -> impl Iterator<Item = &SourceSpec> {
        self.entries.iter().filter(|s| s.kind == SourceKind::File)
    }

    /// Probe every entry, in catalog order. Nothing is cached.
    pub async fn probe_all(&self, files: &dyn LogSource, sample: usize) -> Vec<SourceInfo> {
        let mut infos = Vec::with_capacity(self.entries.len());
        for spec in &self.entries {
            infos.push(probe_source(spec, files, sample).await);
        }
        infos
    }
}

impl Default for SourceCatalog {
    fn default() -> Self {
        Self::new(&SourcePaths::default())
    }
}

/// Probe one entry. Auto and journal are always reported available; the
/// journal is not touched since a query can be slow.
pub async fn probe_source(spec: &SourceSpec, files: &dyn LogSource, sample: usize) -> SourceInfo {
    let mut info = SourceInfo {
        key: spec.key.to_string(),
        label: spec.label.clone(),
        kind: spec.kind,
        path: spec.path.clone(),
        exists: None,
        size: None,
        has_sshd: None,
        available: true,
    };
    let (SourceKind::File, Some(path)) = (spec.kind, spec.path.as_deref()) else {
        return info;
    };

    let probe = files.probe(path).await;
    if let FileProbe::Unreadable(e) = &probe {
        tracing::debug!(path, error = %e, "source probe failed");
    }
    info.exists = Some(probe.exists());
    info.size = Some(probe.size());
    info.available = probe.has_content();
    info.has_sshd = Some(probe.has_content() && sample_has_sshd(files, path, sample).await);
    info
}

/// Whether the last `sample` lines of `path` contain any sshd line.
/// Read failures count as "no".
pub async fn sample_has_sshd(files: &dyn LogSource, path: &str, sample: usize) -> bool {
    match files.tail_lines(path, sample).await {
        Ok(lines) => lines.iter().any(|l| has_sshd_marker(l)),
        Err(e) => {
            tracing::debug!(path, error = %e, "source sample failed");
            false
        }
    }
}
