//! AuthWatch agent — run one SSH auth-log operation and print its envelope.
//!
//! Logs go to stderr as JSON; stdout carries only the envelope.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use aw_agent::cli::Cli;
use aw_agent::config::AgentConfig;
use aw_agent::registry::ToolRegistry;
use aw_authlog::{FileLogSource, journal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let registry = ToolRegistry::with_defaults();

    if cli.list {
        println!("{}", serde_json::to_string_pretty(&registry.list_tools())?);
        return Ok(());
    }

    let operation = cli.operation.clone().unwrap_or_default();
    let args = cli.json_args()?;

    // ── Load config ─────────────────────────────────────────────
    let config = AgentConfig::load(cli.config.as_deref())?;
    tracing::debug!(
        backend = ?config.journal.backend,
        auth_log = %config.sources.auth_log,
        "config loaded"
    );

    // ── Sources ─────────────────────────────────────────────────
    let files = FileLogSource;
    let journal = journal::from_settings(&config.journal);
    let ctx = config.context(&files, journal.as_ref());

    // ── Dispatch ────────────────────────────────────────────────
    let envelope = registry.dispatch(&operation, args, &ctx).await;
    println!("{}", serde_json::to_string(&envelope)?);

    if !envelope.status {
        std::process::exit(2);
    }
    Ok(())
}
