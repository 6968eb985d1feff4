//! Logging & crash reporting for the file widget host
//!
//! Library crates only emit `tracing` events; the host calls [`init`] once.

mod logging;
mod panic_hook;

pub use logging::{cleanup_old_logs, init_logging, LogGuard};
pub use panic_hook::init_panic_hook;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Also write JSON lines to a daily rolling file in [`log_dir`]
    pub file: bool,
    /// Keep rolled log files for this many days
    pub retention_days: u32,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: true,
            retention_days: 7,
        }
    }
}

/// Get the application log directory
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("com", "FileWidget", "FileWidget")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialize logging and the panic hook
///
/// The returned guard flushes the file writer on drop; keep it alive in `main`.
pub fn init(config: &LogConfig) -> anyhow::Result<LogGuard> {
    let guard = init_logging(config)?;
    init_panic_hook();

    if config.file {
        if let Err(e) = cleanup_old_logs(&log_dir(), config.retention_days) {
            tracing::warn!("Failed to cleanup old logs: {}", e);
        }
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_defaults_from_partial_toml() {
        let config: LogConfig = toml::from_str("level = \"debug\"").unwrap();
        assert_eq!(config.level, "debug");
        assert!(config.file);
        assert_eq!(config.retention_days, 7);
    }

    #[test]
    fn test_log_dir_is_named_logs() {
        assert!(log_dir().ends_with("logs"));
    }
}
