//! Tool registry and dispatcher for the four auth-log operations.
//!
//! The agent looks operations up by name and turns every outcome,
//! including unknown names and malformed arguments, into an envelope.

use std::collections::HashMap;

use serde::Serialize;

use aw_authlog::{AuthTool, ToolContext};
use aw_protocol::Envelope;

/// Metadata about a registered tool, as printed by `authwatch --list`.
#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    #[serde(rename = "parameters")]
    pub schema: serde_json::Value,
}

/// Registry of auth tools, indexed by name.
pub struct ToolRegistry {
    tools: Vec<Box<dyn AuthTool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Box<dyn AuthTool>>) -> Self {
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool.name().to_string(), i))
            .collect();
        Self { tools, index }
    }

    /// Build with every tool from `aw-authlog`.
    pub fn with_defaults() -> Self {
        Self::new(aw_authlog::tools::all_tools())
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn AuthTool> {
        self.index.get(name).map(|&i| self.tools[i].as_ref())
    }

    /// Run `name` with `args`.
    ///
    /// Missing or `null` args are treated as `{}`. Unknown operations,
    /// non-object args and tool errors produce a `status: false` envelope.
    pub async fn dispatch(
        &self,
        name: &str,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> Envelope {
        let Some(tool) = self.lookup(name) else {
            tracing::warn!(operation = name, "unknown operation");
            return Envelope::failure(format!("unknown operation: {name}"));
        };
        let args = match args {
            serde_json::Value::Null => serde_json::json!({}),
            obj @ serde_json::Value::Object(_) => obj,
            _ => {
                tracing::warn!(operation = name, "arguments are not a JSON object");
                return Envelope::failure("arguments must be a JSON object");
            }
        };

        match tool.execute(args, ctx).await {
            Ok(envelope) => {
                tracing::info!(
                    operation = name,
                    source = envelope.source.as_deref().unwrap_or("-"),
                    "operation completed"
                );
                envelope
            }
            Err(e) => {
                tracing::error!(operation = name, error = %e, "operation failed");
                Envelope::failure(e.to_string())
            }
        }
    }

    /// List all registered tools with metadata, in registration order.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|tool| ToolInfo {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                schema: tool.parameters_schema(),
            })
            .collect()
    }

    /// Total number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
