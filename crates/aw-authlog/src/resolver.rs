//! Source resolution — turn a requested source key into lines.
//!
//! `auto` (and anything unrecognized) walks the file candidates in priority
//! order and takes the first non-empty one whose recent tail contains sshd
//! lines, else falls back to the journal. Explicit keys are read as asked,
//! without the sshd sampling gate.

use aw_protocol::SourceKind;

use crate::catalog::{AUTO_KEY, SourceSpec, sample_has_sshd};
use crate::journal::JOURNAL_LABEL;
use crate::types::ToolContext;

/// Lines read for one request, plus where they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLines {
    pub lines: Vec<String>,
    /// File path, or the journal label.
    pub source: String,
}

/// Map a requested key to a catalog entry. `None` means auto-selection:
/// absent, blank, `auto`, `0`, `None`, or a key the catalog doesn't know.
pub fn lookup<'c>(ctx: &'c ToolContext<'_>, requested: Option<&str>) -> Option<&'c SourceSpec> {
    let key = requested.map(str::trim).unwrap_or_default();
    if matches!(key, "" | AUTO_KEY | "0" | "None") {
        return None;
    }
    let spec = ctx.catalog.get(key);
    if spec.is_none() {
        tracing::debug!(key, "unknown source key, using auto");
    }
    spec.filter(|s| s.kind != SourceKind::Auto)
}

/// Read up to `max_lines` trailing lines from the requested source.
///
/// Never fails: unreadable files and journal failures produce an empty
/// line set under the source that was chosen.
pub async fn read_lines(
    ctx: &ToolContext<'_>,
    requested: Option<&str>,
    max_lines: usize,
) -> ResolvedLines {
    match lookup(ctx, requested) {
        None => read_auto(ctx, max_lines).await,
        Some(spec) => match (spec.kind, spec.path.as_deref()) {
            (SourceKind::File, Some(path)) => read_file(ctx, path, max_lines).await,
            _ => read_journal(ctx, max_lines).await,
        },
    }
}

/// Path of the file auto-selection would read, if any qualifies.
pub async fn pick_log_file(ctx: &ToolContext<'_>) -> Option<String> {
    for spec in ctx.catalog.file_candidates() {
        let Some(path) = spec.path.as_deref() else {
            continue;
        };
        if !ctx.files.probe(path).await.has_content() {
            continue;
        }
        if sample_has_sshd(ctx.files, path, ctx.windows.auto_sample).await {
            return Some(path.to_string());
        }
        tracing::debug!(path, "no sshd lines in sample, skipping");
    }
    None
}

async fn read_auto(ctx: &ToolContext<'_>, max_lines: usize) -> ResolvedLines {
    match pick_log_file(ctx).await {
        Some(path) => {
            tracing::debug!(path = %path, "auto-selected log file");
            read_file(ctx, &path, max_lines).await
        }
        None => {
            tracing::debug!("no usable log file, falling back to journal");
            read_journal(ctx, max_lines).await
        }
    }
}

async fn read_file(ctx: &ToolContext<'_>, path: &str, max_lines: usize) -> ResolvedLines {
    let lines = if ctx.files.probe(path).await.exists() {
        ctx.files
            .tail_lines(path, max_lines)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(path, error = %e, "failed to read log file");
                Vec::new()
            })
    } else {
        Vec::new()
    };
    ResolvedLines {
        lines,
        source: path.to_string(),
    }
}

async fn read_journal(ctx: &ToolContext<'_>, max_lines: usize) -> ResolvedLines {
    ResolvedLines {
        lines: ctx
            .journal
            .query_recent(max_lines, ctx.journal_timeout)
            .await,
        source: JOURNAL_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockJournal, MockLogSource, sample_auth_lines};

    #[tokio::test]
    async fn auto_prefers_auth_log() {
        let mut files = MockLogSource::with_auth_log_sample();
        files.add_file(
            "/var/log/secure",
            vec!["Feb  8 03:21:10 host sshd[1]: Accepted password for x from 1.1.1.1 port 1 ssh2".into()],
        );
        let journal = MockJournal::with_sample();
        let ctx = ToolContext::new(&files, &journal);

        let resolved = read_lines(&ctx, None, 100).await;
        assert_eq!(resolved.source, "/var/log/auth.log");
        assert_eq!(resolved.lines, sample_auth_lines());
        assert!(journal.calls().is_empty());
    }

    #[tokio::test]
    async fn auto_skips_files_without_sshd() {
        let mut files = MockLogSource::with_secure_sample();
        files.add_file(
            "/var/log/auth.log",
            vec!["Feb  8 03:24:00 host CRON[126]: session opened".into()],
        );
        let journal = MockJournal::empty();
        let ctx = ToolContext::new(&files, &journal);

        let resolved = read_lines(&ctx, Some("auto"), 100).await;
        assert_eq!(resolved.source, "/var/log/secure");
        assert_eq!(resolved.lines.len(), 3);
    }

    #[tokio::test]
    async fn auto_skips_empty_and_unreadable_files() {
        let mut files = MockLogSource::new();
        files.add_file("/var/log/auth.log", vec![]);
        files.add_file("/var/log/secure", sample_auth_lines());
        files.deny("/var/log/secure");
        files.add_file("/var/log/messages", sample_auth_lines());
        let journal = MockJournal::empty();
        let ctx = ToolContext::new(&files, &journal);

        assert_eq!(pick_log_file(&ctx).await.as_deref(), Some("/var/log/messages"));
    }

    #[tokio::test]
    async fn auto_falls_back_to_journal() {
        let files = MockLogSource::new();
        let journal = MockJournal::with_sample();
        let ctx = ToolContext::new(&files, &journal);

        let resolved = read_lines(&ctx, None, 20_000).await;
        assert_eq!(resolved.source, "journalctl");
        assert_eq!(resolved.lines.len(), 2);
        assert_eq!(journal.calls(), vec![20_000]);
    }

    #[tokio::test]
    async fn auto_sample_window_is_respected() {
        // sshd line sits outside a 2-line sample.
        let mut files = MockLogSource::new();
        files.add_file(
            "/var/log/auth.log",
            vec![
                "Feb  8 03:21:10 host sshd[1]: Accepted password for x from 1.1.1.1 port 1 ssh2".into(),
                "Feb  8 03:24:00 host CRON[1]: a".into(),
                "Feb  8 03:24:01 host CRON[1]: b".into(),
            ],
        );
        let journal = MockJournal::empty();
        let mut ctx = ToolContext::new(&files, &journal);
        ctx.windows.auto_sample = 2;

        let resolved = read_lines(&ctx, None, 100).await;
        assert_eq!(resolved.source, "journalctl");
    }

    #[tokio::test]
    async fn unknown_and_placeholder_keys_mean_auto() {
        let files = MockLogSource::with_auth_log_sample();
        let journal = MockJournal::empty();
        let ctx = ToolContext::new(&files, &journal);

        for key in ["bogus", "", "  ", "0", "None", " auto "] {
            let resolved = read_lines(&ctx, Some(key), 10).await;
            assert_eq!(resolved.source, "/var/log/auth.log", "key {key:?}");
        }
    }

    #[tokio::test]
    async fn explicit_file_skips_sshd_gate() {
        let mut files = MockLogSource::new();
        files.add_file("/var/log/messages", vec!["kernel: hello".into()]);
        let journal = MockJournal::empty();
        let ctx = ToolContext::new(&files, &journal);

        let resolved = read_lines(&ctx, Some("messages"), 10).await;
        assert_eq!(resolved.source, "/var/log/messages");
        assert_eq!(resolved.lines, vec!["kernel: hello"]);
    }

    #[tokio::test]
    async fn explicit_missing_file_is_empty_not_error() {
        let files = MockLogSource::new();
        let journal = MockJournal::with_sample();
        let ctx = ToolContext::new(&files, &journal);

        let resolved = read_lines(&ctx, Some("secure"), 10).await;
        assert_eq!(resolved.source, "/var/log/secure");
        assert!(resolved.lines.is_empty());
        assert!(journal.calls().is_empty());
    }

    #[tokio::test]
    async fn explicit_unreadable_file_is_empty() {
        let mut files = MockLogSource::with_auth_log_sample();
        files.deny("/var/log/auth.log");
        let journal = MockJournal::empty();
        let ctx = ToolContext::new(&files, &journal);

        let resolved = read_lines(&ctx, Some("auth.log"), 10).await;
        assert_eq!(resolved.source, "/var/log/auth.log");
        assert!(resolved.lines.is_empty());
    }

    #[tokio::test]
    async fn explicit_journal_always_queries() {
        let files = MockLogSource::with_auth_log_sample();
        let journal = MockJournal::with_sample();
        let ctx = ToolContext::new(&files, &journal);

        let resolved = read_lines(&ctx, Some("journalctl"), 50_000).await;
        assert_eq!(resolved.source, "journalctl");
        assert_eq!(journal.calls(), vec![50_000]);
    }
}
