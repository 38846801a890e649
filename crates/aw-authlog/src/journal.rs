//! Journal fallback — recent sshd lines via a `journalctl` subprocess.
//!
//! Used when no auth log file qualifies. Two backends implement
//! [`JournalQuery`]: [`DirectJournal`] spawns `journalctl` with an argument
//! vector, [`ShellJournal`] hands the same command line to `sh -c` for hosts
//! that only expose a shell executor. [`from_settings`] picks one at startup.

use async_trait::async_trait;
use serde::Deserialize;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

use crate::error::{LogError, LogResult};
use crate::parsers::sshd;

/// Source identifier reported when lines come from the journal.
pub const JOURNAL_LABEL: &str = "journalctl";

/// Which process backend runs the journal query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalBackend {
    #[default]
    Direct,
    Shell,
}

/// Journal query settings (the `[journal]` config section).
#[derive(Debug, Clone, Deserialize)]
pub struct JournalSettings {
    #[serde(default)]
    pub backend: JournalBackend,
    /// Wall-clock limit for one query.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// systemd units whose messages are requested.
    #[serde(default = "default_units")]
    pub units: Vec<String>,
}

fn default_timeout_secs() -> u64 {
    8
}

fn default_units() -> Vec<String> {
    ["ssh", "sshd", "ssh.service", "sshd.service"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            backend: JournalBackend::default(),
            timeout_secs: default_timeout_secs(),
            units: default_units(),
        }
    }
}

impl JournalSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Capability for fetching recent sshd lines from the journal.
#[async_trait]
pub trait JournalQuery: Send + Sync {
    /// Return up to `max_lines` recent journal lines, filtered to those
    /// carrying an sshd marker.
    ///
    /// Never fails: spawn errors, timeouts and empty output all yield an
    /// empty vector. Spawns at most one process and does not retry.
    async fn query_recent(&self, max_lines: usize, timeout: Duration) -> Vec<String>;
}

/// Build the configured backend.
pub fn from_settings(settings: &JournalSettings) -> Box<dyn JournalQuery> {
    match settings.backend {
        JournalBackend::Direct => Box::new(DirectJournal::new(settings.units.clone())),
        JournalBackend::Shell => Box::new(ShellJournal::new(settings.units.clone())),
    }
}

/// Runs `journalctl` directly, no shell involved.
pub struct DirectJournal {
    units: Vec<String>,
}

impl DirectJournal {
    pub fn new(units: Vec<String>) -> Self {
        Self { units }
    }

    fn command(&self, max_lines: usize) -> Command {
        let mut cmd = Command::new("journalctl");
        cmd.args(journalctl_args(&self.units, max_lines));
        cmd
    }
}

#[async_trait]
impl JournalQuery for DirectJournal {
    async fn query_recent(&self, max_lines: usize, timeout: Duration) -> Vec<String> {
        collect_lines(run(self.command(max_lines), timeout).await)
    }
}

/// Runs the journal query as a shell command line.
pub struct ShellJournal {
    units: Vec<String>,
}

impl ShellJournal {
    pub fn new(units: Vec<String>) -> Self {
        Self { units }
    }

    /// The full command line handed to `sh -c`.
    pub fn command_line(&self, max_lines: usize) -> String {
        let mut argv = vec!["journalctl".to_string()];
        argv.extend(journalctl_args(&self.units, max_lines));
        format!("{} 2>/dev/null", shell_words::join(argv))
    }
}

#[async_trait]
impl JournalQuery for ShellJournal {
    async fn query_recent(&self, max_lines: usize, timeout: Duration) -> Vec<String> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(self.command_line(max_lines));
        collect_lines(run(cmd, timeout).await)
    }
}

fn journalctl_args(units: &[String], max_lines: usize) -> Vec<String> {
    let mut args = Vec::with_capacity(units.len() * 2 + 3);
    for unit in units {
        args.push("-u".to_string());
        args.push(unit.clone());
    }
    args.push("--no-pager".to_string());
    args.push("-n".to_string());
    args.push(max_lines.to_string());
    args
}

async fn run(mut cmd: Command, timeout: Duration) -> LogResult<Output> {
    cmd.stdin(Stdio::null()).kill_on_drop(true);
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(LogError::Spawn(e.to_string())),
        Err(_) => Err(LogError::Timeout(timeout.as_secs())),
    }
}

fn collect_lines(result: LogResult<Output>) -> Vec<String> {
    match result {
        Ok(output) => {
            if !output.status.success() {
                tracing::debug!(status = %output.status, "journalctl exited unsuccessfully");
            }
            let text = select_output(output.status.success(), &output.stdout, &output.stderr);
            filter_sshd(&text)
        }
        Err(e) => {
            tracing::warn!(error = %e, "journal query failed");
            Vec::new()
        }
    }
}

/// Pick the text to scan: stdout normally, stderr when the command failed
/// or printed nothing and stderr has something to offer.
pub fn select_output(success: bool, stdout: &[u8], stderr: &[u8]) -> String {
    if (!success || stdout.is_empty()) && !stderr.is_empty() {
        String::from_utf8_lossy(stderr).into_owned()
    } else {
        String::from_utf8_lossy(stdout).into_owned()
    }
}

/// Keep only lines with an sshd marker.
pub fn filter_sshd(text: &str) -> Vec<String> {
    text.lines()
        .filter(|l| sshd::has_sshd_marker(l))
        .map(String::from)
        .collect()
}
