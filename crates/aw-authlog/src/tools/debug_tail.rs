//! debug_tail — the most recent raw sshd lines, unparsed.

use async_trait::async_trait;
use serde_json::json;

use aw_protocol::Envelope;

use crate::error::LogResult;
use crate::parsers::has_sshd_marker;
use crate::resolver::{self, ResolvedLines};
use crate::tools::{source_arg, source_schema};
use crate::types::{AuthTool, ToolContext};

/// Lines returned after marker filtering.
pub const DEBUG_TAIL_LINES: usize = 50;

/// Last [`DEBUG_TAIL_LINES`] sshd lines from the debug window of `source`.
pub async fn debug_tail(ctx: &ToolContext<'_>, source: Option<&str>) -> ResolvedLines {
    let resolved = resolver::read_lines(ctx, source, ctx.windows.debug).await;
    let mut lines: Vec<String> = resolved
        .lines
        .into_iter()
        .filter(|l| has_sshd_marker(l))
        .collect();
    let start = lines.len().saturating_sub(DEBUG_TAIL_LINES);
    lines.drain(..start);
    ResolvedLines {
        lines,
        source: resolved.source,
    }
}

pub struct DebugTail;

#[async_trait]
impl AuthTool for DebugTail {
    fn name(&self) -> &str {
        "debug_tail"
    }

    fn description(&self) -> &str {
        "Show the last 50 raw sshd lines from the selected source"
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
        let tail = debug_tail(ctx, source_arg(&args).as_deref()).await;
        Ok(Envelope::with_source(
            serde_json::to_value(tail.lines)?,
            tail.source,
        ))
    }
}
