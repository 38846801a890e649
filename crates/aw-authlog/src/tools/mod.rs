//! The four dashboard operations, each an [`AuthTool`].
//!
//! Argument handling is deliberately lenient: dashboards send loosely typed
//! JSON, so bad values fall back to defaults instead of failing the call.

pub mod debug_tail;
pub mod get_events;
pub mod get_sources;
pub mod get_stats;

use serde_json::Value;

use crate::types::AuthTool;

pub use debug_tail::{DebugTail, debug_tail};
pub use get_events::{EventQuery, GetEvents, list_events};
pub use get_sources::{GetSources, list_sources};
pub use get_stats::{GetStats, compute_stats};

/// Every operation, in listing order.
pub fn all_tools() -> Vec<Box<dyn AuthTool>> {
    vec![
        Box::new(GetSources),
        Box::new(GetStats),
        Box::new(GetEvents),
        Box::new(DebugTail),
    ]
}

/// The `source` argument, if it is a string.
pub(crate) fn source_arg(args: &Value) -> Option<String> {
    args.get("source").and_then(Value::as_str).map(String::from)
}

/// JSON schema fragment shared by every tool that reads lines.
pub(crate) fn source_schema() -> Value {
    serde_json::json!({
        "type": "string",
        "enum": ["auto", "auth.log", "secure", "messages", "journalctl"],
        "description": "Log source key; unknown values behave like 'auto'",
        "default": "auto"
    })
}
