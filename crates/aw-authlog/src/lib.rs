//! SSH authentication log analysis for AuthWatch.
//!
//! Resolves where sshd logs live on this host (`/var/log/auth.log`,
//! `/var/log/secure`, `/var/log/messages`, or the systemd journal), tails
//! them without reading whole files, parses accepted/failed/invalid-user
//! lines, and exposes 4 dashboard operations: get_sources, get_stats,
//! get_events, debug_tail.

pub mod catalog;
pub mod error;
pub mod journal;
pub mod mock;
pub mod parsers;
pub mod resolver;
pub mod source;
pub mod tools;
pub mod types;

// Re-export key types for convenience
pub use catalog::{SourceCatalog, SourcePaths, SourceSpec};
pub use error::{LogError, LogResult};
pub use journal::{JournalBackend, JournalQuery, JournalSettings};
pub use mock::{MockJournal, MockLogSource};
pub use resolver::ResolvedLines;
pub use source::{FileLogSource, FileProbe, LogSource};
pub use types::{AuthTool, ToolContext, Windows};
