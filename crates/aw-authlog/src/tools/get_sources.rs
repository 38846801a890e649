//! get_sources — list the catalog with fresh availability probes.

use async_trait::async_trait;
use serde_json::json;

use aw_protocol::{Envelope, SourceInfo};

use crate::error::LogResult;
use crate::types::{AuthTool, ToolContext};

pub struct GetSources;

/// Probe every catalog entry: auto, the file sources, then the journal.
pub async fn list_sources(ctx: &ToolContext<'_>) -> Vec<SourceInfo> {
    ctx.catalog
        .probe_all(ctx.files, ctx.windows.probe_sample)
        .await
}

#[async_trait]
impl AuthTool for GetSources {
    fn name(&self) -> &str {
        "get_sources"
    }

    fn description(&self) -> &str {
        "List known log sources with existence, size and availability"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(
        &self,
        _args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> LogResult<Envelope> {
        let sources = list_sources(ctx).await;
        Ok(Envelope::ok(serde_json::to_value(sources)?))
    }
}
