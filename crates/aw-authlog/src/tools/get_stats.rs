//! get_stats — success/failure counters, overall and for today.

use async_trait::async_trait;
use serde_json::json;

use aw_protocol::{AuthOutcome, Envelope, Stats};

use crate::error::LogResult;
use crate::parsers::{classify, is_today_line};
use crate::resolver;
use crate::tools::{source_arg, source_schema};
use crate::types::{AuthTool, ToolContext};

pub struct GetStats;

/// Count outcomes over the stats window of the resolved source.
///
/// Only classifies lines; no events are built. Each line lands in at most
/// one family, and in that family's today counter iff it is from today.
pub async fn compute_stats(ctx: &ToolContext<'_>, source: Option<&str>) -> Stats {
    let resolved = resolver::read_lines(ctx, source, ctx.windows.stats).await;
    let today = ctx.now.date();

    let mut stats = Stats {
        source: resolved.source,
        ..Stats::default()
    };
    for line in &resolved.lines {
        let Some(m) = classify(line) else {
            continue;
        };
        let is_today = is_today_line(line, today);
        match m.outcome() {
            AuthOutcome::Success => {
                stats.total_success += 1;
                if is_today {
                    stats.today_success += 1;
                }
            }
            AuthOutcome::Failed => {
                stats.total_failed += 1;
                if is_today {
                    stats.today_failed += 1;
                }
            }
        }
    }

    tracing::debug!(
        source = %stats.source,
        lines = resolved.lines.len(),
        %today,
        "stats computed"
    );
    stats
}

#[async_trait]
impl AuthTool for GetStats {
    fn name(&self) -> &str {
        "get_stats"
    }

    fn description(&self) -> &str {
        "Count successful and failed SSH logins, in total and for today"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "source": source_schema()
            }
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> LogResult<Envelope> {
        let source = source_arg(&args);
        let stats = compute_stats(ctx, source.as_deref()).await;
        Ok(Envelope::ok(serde_json::to_value(stats)?))
    }
}
