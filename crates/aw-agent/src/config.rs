//! Agent configuration, loadable from TOML.

use std::path::Path;

use serde::Deserialize;

use aw_authlog::{JournalQuery, JournalSettings, LogSource, SourceCatalog, SourcePaths, ToolContext, Windows};

/// Used when neither `--config` nor `AUTHWATCH_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/authwatch/agent.toml";

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "AUTHWATCH_CONFIG";

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentConfig {
    /// File paths for the auth.log / secure / messages sources.
    #[serde(default)]
    pub sources: SourcePaths,
    /// Journal fallback settings.
    #[serde(default)]
    pub journal: JournalSettings,
    /// Trailing-line windows per operation.
    #[serde(default)]
    pub windows: Windows,
}

impl AgentConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load `explicit` if given (it must exist), else the default path if
    /// present, else built-in defaults.
    ///
    /// The CLI folds `AUTHWATCH_CONFIG` into `explicit`.
    pub fn load(explicit: Option<&str>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => {
                tracing::debug!(path, "loading config");
                Self::from_file(path)
            }
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
            None => {
                tracing::debug!(path = DEFAULT_CONFIG_PATH, "no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// A request context wired to this config's catalog, windows and
    /// journal timeout.
    pub fn context<'a>(
        &self,
        files: &'a dyn LogSource,
        journal: &'a dyn JournalQuery,
    ) -> ToolContext<'a> {
        ToolContext::new(files, journal)
            .with_catalog(SourceCatalog::new(&self.sources))
            .with_windows(self.windows)
            .with_journal_timeout(self.journal.timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aw_authlog::JournalBackend;
    use std::time::Duration;

    #[test]
    fn deserialize_empty_config() {
        let config: AgentConfig = toml::from_str("").unwrap();
        assert_eq!(config.sources.auth_log, "/var/log/auth.log");
        assert_eq!(config.sources.secure, "/var/log/secure");
        assert_eq!(config.sources.messages, "/var/log/messages");
        assert_eq!(config.journal.backend, JournalBackend::Direct);
        assert_eq!(config.journal.timeout_secs, 8);
        assert_eq!(config.journal.units.len(), 4);
        assert_eq!(config.windows, Windows::default());
    }

    #[test]
    fn deserialize_full_config() {
        let toml = r#"
[sources]
auth_log = "/srv/log/auth.log"
secure = "/srv/log/secure"
messages = "/srv/log/messages"

[journal]
backend = "shell"
timeout_secs = 3
units = ["sshd.service"]

[windows]
stats = 1000
events = 2000
debug = 300
auto_sample = 50
probe_sample = 30
"#;
        let config: AgentConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.sources.auth_log, "/srv/log/auth.log");
        assert_eq!(config.journal.backend, JournalBackend::Shell);
        assert_eq!(config.journal.timeout(), Duration::from_secs(3));
        assert_eq!(config.journal.units, vec!["sshd.service"]);
        assert_eq!(config.windows.stats, 1000);
        assert_eq!(config.windows.probe_sample, 30);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let toml = r#"
[sources]
secure = "/opt/secure"

[windows]
events = 10
"#;
        let config: AgentConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.sources.auth_log, "/var/log/auth.log");
        assert_eq!(config.sources.secure, "/opt/secure");
        assert_eq!(config.windows.events, 10);
        assert_eq!(config.windows.stats, 20_000);
        assert_eq!(config.journal.timeout_secs, 8);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let toml = r#"
[journal]
backend = "systemd"
"#;
        assert!(toml::from_str::<AgentConfig>(toml).is_err());
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.toml");
        std::fs::write(&path, "[journal]\ntimeout_secs = 2\n").unwrap();

        let config = AgentConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.journal.timeout_secs, 2);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        assert!(AgentConfig::load(Some("/nonexistent/authwatch.toml")).is_err());
    }

    #[test]
    fn context_uses_config_paths() {
        let mut config = AgentConfig::default();
        config.sources.messages = "/tmp/messages".into();
        config.windows.debug = 7;
        config.journal.timeout_secs = 1;

        let files = aw_authlog::MockLogSource::new();
        let journal = aw_authlog::MockJournal::empty();
        let ctx = config.context(&files, &journal);
        assert_eq!(
            ctx.catalog.get("messages").unwrap().path.as_deref(),
            Some("/tmp/messages")
        );
        assert_eq!(ctx.windows.debug, 7);
        assert_eq!(ctx.journal_timeout, Duration::from_secs(1));
    }
}
