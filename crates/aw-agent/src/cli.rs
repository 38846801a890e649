//! Command-line interface for the `authwatch` binary.

use anyhow::Context;
use clap::Parser;

use crate::config::CONFIG_ENV;

#[derive(Debug, Parser)]
#[command(name = "authwatch")]
#[command(about = "SSH authentication log watcher", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (TOML) [default: /etc/authwatch/agent.toml, if present]
    #[arg(long, env = CONFIG_ENV, value_name = "PATH")]
    pub config: Option<String>,

    /// Print every operation with its JSON argument schema and exit
    #[arg(long, conflicts_with = "operation")]
    pub list: bool,

    /// Operation to run: get_sources, get_stats, get_events, debug_tail
    #[arg(required_unless_present = "list")]
    pub operation: Option<String>,

    /// Arguments as a JSON object, e.g. '{"q":"root","limit":50}'
    pub args: Option<String>,
}

impl Cli {
    /// The JSON arguments; `Null` when omitted.
    ///
    /// Non-object JSON is returned as-is and rejected by the dispatcher.
    pub fn json_args(&self) -> anyhow::Result<serde_json::Value> {
        match self.args.as_deref() {
            Some(raw) => serde_json::from_str(raw).context("arguments are not valid JSON"),
            None => Ok(serde_json::Value::Null),
        }
    }
}
