//! Request context, read windows, and the AuthTool trait.

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use std::time::Duration;

use aw_protocol::Envelope;

use crate::catalog::SourceCatalog;
use crate::error::LogResult;
use crate::journal::{JournalQuery, JournalSettings};
use crate::source::LogSource;

// ── Windows ───────────────────────────────────────────────────

/// How many trailing lines each operation considers (the `[windows]`
/// config section).
///
/// Stats read a smaller window than event listing to keep the polling path
/// cheap. The journal query receives whichever window the caller uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Windows {
    #[serde(default = "default_stats")]
    pub stats: usize,
    #[serde(default = "default_events")]
    pub events: usize,
    #[serde(default = "default_debug")]
    pub debug: usize,
    /// Lines sampled when auto-selecting a file.
    #[serde(default = "default_auto_sample")]
    pub auto_sample: usize,
    /// Lines sampled for `has_sshd` in the source listing.
    #[serde(default = "default_probe_sample")]
    pub probe_sample: usize,
}

fn default_stats() -> usize {
    20_000
}

fn default_events() -> usize {
    50_000
}

fn default_debug() -> usize {
    3_000
}

fn default_auto_sample() -> usize {
    500
}

fn default_probe_sample() -> usize {
    300
}

impl Default for Windows {
    fn default() -> Self {
        Self {
            stats: default_stats(),
            events: default_events(),
            debug: default_debug(),
            auto_sample: default_auto_sample(),
            probe_sample: default_probe_sample(),
        }
    }
}

// ── Tool Context ──────────────────────────────────────────────

/// Everything one request needs. Built per request; holds no state
/// between calls.
pub struct ToolContext<'a> {
    pub files: &'a dyn LogSource,
    pub journal: &'a dyn JournalQuery,
    pub catalog: SourceCatalog,
    pub windows: Windows,
    pub journal_timeout: Duration,
    /// Local wall-clock time, captured once so every line in a request
    /// agrees on the year and on what "today" is.
    pub now: NaiveDateTime,
}

impl<'a> ToolContext<'a> {
    /// Default catalog and windows, `now` taken from the local clock.
    pub fn new(files: &'a dyn LogSource, journal: &'a dyn JournalQuery) -> Self {
        Self {
            files,
            journal,
            catalog: SourceCatalog::default(),
            windows: Windows::default(),
            journal_timeout: JournalSettings::default().timeout(),
            now: Local::now().naive_local(),
        }
    }

    pub fn with_catalog(mut self, catalog: SourceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_windows(mut self, windows: Windows) -> Self {
        self.windows = windows;
        self
    }

    pub fn with_journal_timeout(mut self, timeout: Duration) -> Self {
        self.journal_timeout = timeout;
        self
    }

    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }
}

// ── AuthTool Trait ────────────────────────────────────────────

/// An operation invocable by name with JSON arguments.
///
/// Data tools degrade failures to empty data and always return an
/// `Ok` envelope with `status: true`; `Err` is reserved for encoding
/// failures.
#[async_trait]
pub trait AuthTool: Send + Sync {
    /// Operation name (e.g., "get_events").
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema describing accepted arguments.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Run the operation.
    async fn execute(&self, args: serde_json::Value, ctx: &ToolContext<'_>)
    -> LogResult<Envelope>;
}
