pub mod schema;
pub mod watcher;

pub use schema::{
    GuardConfig, HistoryConfig, ServerConfig, SourceConfig, SourceMode, ThemeConfig,
    TrackingConfig,
};
pub use watcher::ConfigWatcher;

use guard_core::{GuardError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `GuardConfig::default()` if
/// the file doesn't exist so the dashboard always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<GuardConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(GuardConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| GuardError::Config(format!("cannot read '{}': {e}", path.display())))?;

    let config = parse(&raw)?;
    validate(&config)?;
    Ok(config)
}

/// Parse a TOML document into a config without touching the filesystem.
pub fn parse(raw: &str) -> Result<GuardConfig> {
    toml::from_str(raw).map_err(|e| GuardError::Config(format!("TOML parse error: {e}")))
}

/// Reject settings the refresh loop cannot run with.
pub fn validate(config: &GuardConfig) -> Result<()> {
    if config.history.capacity == 0 {
        return Err(GuardError::Config("history.capacity must be at least 1".into()));
    }
    if config.source.interval_ms == 0 {
        return Err(GuardError::Config("source.interval_ms must be positive".into()));
    }
    if config.source.request_timeout_ms == 0 {
        return Err(GuardError::Config(
            "source.request_timeout_ms must be positive".into(),
        ));
    }
    if config.source.mode == SourceMode::Polled && config.source.base_url.trim().is_empty() {
        return Err(GuardError::Config(
            "source.base_url is required in polled mode".into(),
        ));
    }
    if !config
        .tracking
        .categories
        .contains(&config.tracking.primary_category)
    {
        return Err(GuardError::Config(format!(
            "tracking.primary_category '{}' is not listed in tracking.categories",
            config.tracking.primary_category
        )));
    }
    Ok(())
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("bison-guard").join("bison-guard.toml")
}
