//! Mock log source for testing — serves pre-loaded log content.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{LogError, LogResult};
use crate::journal::{JournalQuery, filter_sshd};
use crate::source::{FileProbe, LogSource};

/// A mock log source that serves pre-loaded content by path.
pub struct MockLogSource {
    files: HashMap<String, Vec<String>>,
    denied: HashSet<String>,
}

impl MockLogSource {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            denied: HashSet::new(),
        }
    }

    /// Add a file with the given lines.
    pub fn add_file(&mut self, path: impl Into<String>, lines: Vec<String>) {
        self.files.insert(path.into(), lines);
    }

    /// Make a path fail probes and reads with permission denied.
    pub fn deny(&mut self, path: impl Into<String>) {
        self.denied.insert(path.into());
    }

    /// A Debian-style `/var/log/auth.log` with a mix of sshd outcomes.
    pub fn with_auth_log_sample() -> Self {
        let mut m = Self::new();
        m.add_file("/var/log/auth.log", sample_auth_lines());
        m
    }

    /// A RHEL-style `/var/log/secure`, sshd tag without pid.
    pub fn with_secure_sample() -> Self {
        let mut m = Self::new();
        m.add_file(
            "/var/log/secure",
            vec![
                "Mar  3 10:00:01 rhel9 sshd: Accepted password for deploy from 192.0.2.10 port 40022 ssh2".into(),
                "Mar  3 10:00:09 rhel9 sshd: Failed password for root from 192.0.2.66 port 40100 ssh2".into(),
                "Mar  3 10:00:12 rhel9 sudo: deploy : TTY=pts/0 ; PWD=/home/deploy ; COMMAND=/bin/ls".into(),
            ],
        );
        m
    }
}

/// Canned sshd lines shared by mock-backed tests.
pub fn sample_auth_lines() -> Vec<String> {
    vec![
        "Feb  8 03:20:55 host sshd[120]: Server listening on 0.0.0.0 port 22.".into(),
        "Feb  8 03:21:10 host sshd[123]: Accepted publickey for alice from 10.0.0.5 port 51515 ssh2: ED25519 SHA256:abc".into(),
        "Feb  8 03:22:00 host sshd[124]: Failed password for invalid user bob from 203.0.113.9 port 44000 ssh2".into(),
        "Feb  8 03:23:00 host sshd[125]: Invalid user carol from 198.51.100.2 port 33000".into(),
        "Feb  8 03:24:00 host CRON[126]: pam_unix(cron:session): session opened for user root".into(),
        "Feb  8 03:25:30 host sshd[127]: Failed password for bob from 203.0.113.9 port 44002 ssh2".into(),
        "Feb  8 03:26:45 host sshd[128]: Accepted password for dave from 2001:db8::7 port 60000 ssh2".into(),
    ]
}

impl Default for MockLogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSource for MockLogSource {
    async fn probe(&self, path: &str) -> FileProbe {
        if self.denied.contains(path) {
            return FileProbe::Unreadable(LogError::PermissionDenied(path.to_string()));
        }
        match self.files.get(path) {
            Some(lines) => FileProbe::Present {
                size: lines.iter().map(|l| l.len() as u64 + 1).sum(),
            },
            None => FileProbe::Missing,
        }
    }

    async fn tail_lines(&self, path: &str, count: usize) -> LogResult<Vec<String>> {
        if self.denied.contains(path) {
            return Err(LogError::PermissionDenied(path.to_string()));
        }
        let Some(lines) = self.files.get(path) else {
            return Ok(Vec::new());
        };
        let start = lines.len().saturating_sub(count);
        Ok(lines[start..].to_vec())
    }
}

/// A mock journal that serves canned `journalctl` output.
///
/// Applies the same sshd filter as the real backends and records the
/// window of every query so tests can assert when the fallback ran.
pub struct MockJournal {
    output: String,
    calls: Mutex<Vec<usize>>,
}

impl MockJournal {
    /// A journal that returns nothing, like a host without sshd units.
    pub fn empty() -> Self {
        Self::with_output("")
    }

    pub fn with_output(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// journalctl short-format output (zero-padded days) with sshd and
    /// unrelated lines.
    pub fn with_sample() -> Self {
        Self::with_output(
            "-- Journal begins at Mon 2026-02-02 09:00:00 UTC. --\n\
             Feb 08 04:00:00 host sshd[900]: Accepted publickey for erin from 10.1.1.1 port 50000 ssh2\n\
             Feb 08 04:00:05 host systemd[1]: Started session-4.scope.\n\
             Feb 08 04:01:00 host sshd[901]: Failed password for root from 10.1.1.2 port 50001 ssh2\n",
        )
    }

    /// Windows passed to each query so far.
    pub fn calls(&self) -> Vec<usize> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl JournalQuery for MockJournal {
    async fn query_recent(&self, max_lines: usize, _timeout: Duration) -> Vec<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(max_lines);
        }
        let lines = filter_sshd(&self.output);
        let start = lines.len().saturating_sub(max_lines);
        lines[start..].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_tail_lines() {
        let source = MockLogSource::with_auth_log_sample();
        let lines = source.tail_lines("/var/log/auth.log", 2).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("dave"));
    }

    #[tokio::test]
    async fn mock_missing_is_empty() {
        let source = MockLogSource::new();
        assert!(source.tail_lines("/nope", 5).await.unwrap().is_empty());
        assert!(matches!(source.probe("/nope").await, FileProbe::Missing));
    }

    #[tokio::test]
    async fn mock_empty_file_has_no_content() {
        let mut source = MockLogSource::new();
        source.add_file("/var/log/secure", vec![]);
        let probe = source.probe("/var/log/secure").await;
        assert!(probe.exists());
        assert!(!probe.has_content());
    }

    #[tokio::test]
    async fn mock_denied_path() {
        let mut source = MockLogSource::with_auth_log_sample();
        source.deny("/var/log/auth.log");
        assert!(matches!(
            source.probe("/var/log/auth.log").await,
            FileProbe::Unreadable(LogError::PermissionDenied(_))
        ));
        assert!(source.tail_lines("/var/log/auth.log", 5).await.is_err());
    }

    #[tokio::test]
    async fn mock_journal_filters_and_records() {
        let journal = MockJournal::with_sample();
        let lines = journal.query_recent(100, Duration::from_secs(1)).await;
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("erin"));
        assert_eq!(journal.calls(), vec![100]);

        let last = journal.query_recent(1, Duration::from_secs(1)).await;
        assert_eq!(last.len(), 1);
        assert!(last[0].contains("root"));
    }
}
