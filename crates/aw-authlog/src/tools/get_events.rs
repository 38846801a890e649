//! get_events — searchable, newest-first feed of parsed auth events.

use async_trait::async_trait;
use chrono::Datelike;
use serde_json::{Value, json};

use aw_protocol::{AuthEvent, Envelope};

use crate::error::LogResult;
use crate::parsers::{is_today_line, parse_event};
use crate::resolver;
use crate::tools::{source_arg, source_schema};
use crate::types::{AuthTool, ToolContext};

pub const DEFAULT_LIMIT: usize = 200;
pub const MIN_LIMIT: usize = 1;
pub const MAX_LIMIT: usize = 2000;

/// Filters for one event listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub source: Option<String>,
    /// Clamped to `MIN_LIMIT..=MAX_LIMIT` when applied.
    pub limit: usize,
    /// Case-insensitive substring; empty matches everything.
    pub query: String,
    pub today_only: bool,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            source: None,
            limit: DEFAULT_LIMIT,
            query: String::new(),
            today_only: false,
        }
    }
}

impl EventQuery {
    /// Read `{source?, limit?, q?, today?}`, falling back to defaults for
    /// anything missing or malformed.
    pub fn from_args(args: &Value) -> Self {
        Self {
            source: source_arg(args),
            limit: parse_limit(args.get("limit")),
            query: args
                .get("q")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            today_only: parse_flag(args.get("today")),
        }
    }
}

/// Integers and numeric strings clamp into range; floats truncate;
/// anything else is the default.
fn parse_limit(value: Option<&Value>) -> usize {
    let requested = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match requested {
        Some(n) => n.clamp(MIN_LIMIT as i64, MAX_LIMIT as i64) as usize,
        None => DEFAULT_LIMIT,
    }
}

/// `true`, `1`, `"1"`, `"true"` and `"True"` switch a flag on.
fn parse_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::String(s)) => matches!(s.as_str(), "1" | "true" | "True"),
        _ => false,
    }
}

/// Events from the resolved source, newest first.
pub struct EventListing {
    pub events: Vec<AuthEvent>,
    pub source: String,
}

/// Parse the events window, filter, and keep the `limit` most recent.
///
/// Events are gathered in file order and reversed before truncating, so a
/// smaller limit always yields a prefix of a larger one.
pub async fn list_events(ctx: &ToolContext<'_>, query: &EventQuery) -> EventListing {
    let resolved = resolver::read_lines(ctx, query.source.as_deref(), ctx.windows.events).await;
    let today = ctx.now.date();
    let year = ctx.now.year();
    let needle = query.query.to_lowercase();

    let mut events: Vec<AuthEvent> = resolved
        .lines
        .iter()
        .filter(|line| !query.today_only || is_today_line(line, today))
        .filter_map(|line| parse_event(line, year))
        .filter(|ev| needle.is_empty() || ev.search_haystack().to_lowercase().contains(&needle))
        .collect();

    events.reverse();
    events.truncate(query.limit.clamp(MIN_LIMIT, MAX_LIMIT));

    EventListing {
        events,
        source: resolved.source,
    }
}

pub struct GetEvents;

#[async_trait]
impl AuthTool for GetEvents {
    fn name(&self) -> &str {
        "get_events"
    }

    fn description(&self) -> &str {
        "List recent SSH authentication events, newest first, with search and today filters"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "source": source_schema(),
                "limit": {
                    "type": "integer",
                    "description": "Maximum events to return (default: 200, range 1-2000)",
                    "default": DEFAULT_LIMIT
                },
                "q": {
                    "type": "string",
                    "description": "Case-insensitive substring matched against time, status, user, ip, method and raw line"
                },
                "today": {
                    "type": "boolean",
                    "description": "Only include lines logged today",
                    "default": false
                }
            }
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> LogResult<Envelope> {
        let query = EventQuery::from_args(&args);
        let listing = list_events(ctx, &query).await;
        tracing::debug!(
            source = %listing.source,
            shown = listing.events.len(),
            limit = query.limit,
            "events listed"
        );
        Ok(Envelope::with_source(
            serde_json::to_value(listing.events)?,
            listing.source,
        ))
    }
}
