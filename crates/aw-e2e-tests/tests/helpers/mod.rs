//! Shared test harness for E2E integration tests.
//!
//! Points the agent config at log files in a temp directory, reads them
//! through the real `FileLogSource`, and swaps the journal for a
//! `MockJournal` so no test depends on the host's systemd.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use aw_agent::config::AgentConfig;
use aw_agent::registry::ToolRegistry;
use aw_authlog::{FileLogSource, MockJournal, SourcePaths};
use aw_protocol::Envelope;

/// Sample Debian auth.log lines, all on Feb 7 and Feb 8.
pub const AUTH_LOG: &str = "\
Feb  7 22:10:00 web1 sshd[900]: Accepted password for ops from 10.9.9.9 port 40000 ssh2
Feb  7 22:11:00 web1 sshd[901]: Failed password for root from 203.0.113.50 port 40001 ssh2
Feb  8 03:20:55 web1 sshd[120]: Server listening on 0.0.0.0 port 22.
Feb  8 03:21:10 web1 sshd[123]: Accepted publickey for alice from 10.0.0.5 port 51515 ssh2: ED25519 SHA256:abc
Feb  8 03:22:00 web1 sshd[124]: Failed password for invalid user bob from 203.0.113.9 port 44000 ssh2
Feb  8 03:22:00 web1 sshd[124]: Invalid user bob from 203.0.113.9 port 44000
Feb  8 03:24:00 web1 CRON[126]: pam_unix(cron:session): session opened for user root by (uid=0)
Feb  8 03:26:45 web1 sshd[128]: Accepted password for dave from 2001:db8::7 port 60000 ssh2
";

/// RHEL-style secure lines (sshd tag without pid).
pub const SECURE: &str = "\
Feb  8 10:00:01 rhel9 sshd: Accepted password for deploy from 192.0.2.10 port 40022 ssh2
Feb  8 10:00:09 rhel9 sshd: Failed password for root from 192.0.2.66 port 40100 ssh2
";

/// journalctl short output with a header and a non-sshd line.
pub const JOURNAL: &str = "\
-- Journal begins at Mon 2026-02-02 09:00:00 UTC. --
Feb 08 04:00:00 host sshd[900]: Accepted publickey for erin from 10.1.1.1 port 50000 ssh2
Feb 08 04:00:05 host systemd[1]: Started session-4.scope.
Feb 08 04:01:00 host sshd[901]: Failed password for root from 10.1.1.2 port 50001 ssh2
";

/// End-to-end harness: temp log directory + agent config + mock journal.
pub struct TestHarness {
    /// Holds the temp directory alive for the test's duration.
    pub dir: TempDir,
    pub config: AgentConfig,
    pub journal: MockJournal,
    pub registry: ToolRegistry,
    /// Fixed request time: 2026-02-08 12:00:00.
    pub now: NaiveDateTime,
}

impl TestHarness {
    /// A host with no log files and an empty journal.
    pub fn empty() -> Self {
        Self::with_journal("")
    }

    /// A host with no log files and the given journal output.
    pub fn with_journal(output: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let paths = SourcePaths {
            auth_log: path_str(&dir, "auth.log"),
            secure: path_str(&dir, "secure"),
            messages: path_str(&dir, "messages"),
        };
        let config = AgentConfig {
            sources: paths,
            ..AgentConfig::default()
        };
        Self {
            dir,
            config,
            journal: MockJournal::with_output(output),
            registry: ToolRegistry::with_defaults(),
            now: NaiveDate::from_ymd_opt(2026, 2, 8)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    /// Write `contents` to one of `auth.log`, `secure`, `messages`.
    pub fn write_log(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn path(&self, name: &str) -> String {
        path_str(&self.dir, name)
    }

    /// Dispatch an operation through the agent registry against real files.
    pub async fn call(&self, operation: &str, args: serde_json::Value) -> Envelope {
        let files = FileLogSource;
        let ctx = self.config.context(&files, &self.journal).with_now(self.now);
        self.registry.dispatch(operation, args, &ctx).await
    }
}

fn path_str(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_string_lossy().into_owned()
}
