//! AuthWatch agent — library crate behind the `authwatch` binary.
//!
//! Re-exports all modules so external crates (e.g. `aw-e2e-tests`) can
//! reach `AgentConfig`, `ToolRegistry` and the CLI parser.

pub mod cli;
pub mod config;
pub mod registry;
