//! Structured logging setup with tracing

use crate::LogConfig;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "file_widget.log";

/// Keeps the non-blocking file writer alive
#[must_use = "dropping the guard stops the file writer"]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize the global subscriber
///
/// Console output goes to stderr so that stdout stays free for the widget's
/// emitted values.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<LogGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let console = fmt::layer().with_writer(std::io::stderr).with_target(false);

    if !config.file {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console)
            .try_init()?;
        tracing::debug!("Logging initialized (console only)");
        return Ok(LogGuard { _file: None });
    }

    let log_dir = super::log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(fmt::layer().json().with_writer(non_blocking))
        .try_init()?;

    tracing::debug!("Logging initialized, writing to {:?}", log_dir);
    Ok(LogGuard { _file: Some(guard) })
}

/// Clean up log files in `log_dir` older than `days` days
pub fn cleanup_old_logs(log_dir: &Path, days: u32) -> anyhow::Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let threshold = SystemTime::now() - Duration::from_secs(days as u64 * 24 * 60 * 60);
    let mut deleted = 0;

    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        // Rolled files are named "<prefix>.YYYY-MM-DD"
        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX));
        if !is_log {
            continue;
        }

        let modified = entry.metadata().and_then(|m| m.modified());
        if matches!(modified, Ok(time) if time < threshold) && std::fs::remove_file(&path).is_ok() {
            deleted += 1;
            tracing::debug!("Deleted old log: {:?}", path);
        }
    }

    if deleted > 0 {
        tracing::info!("Cleaned up {} old log files", deleted);
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cleanup_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        assert_eq!(cleanup_old_logs(&missing, 7).unwrap(), 0);
    }

    #[test]
    fn test_cleanup_keeps_fresh_and_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("file_widget.log.2026-10-18"), b"{}").unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), b"keep").unwrap();

        // Files written just now are newer than any threshold of >= 1 day
        assert_eq!(cleanup_old_logs(temp_dir.path(), 1).unwrap(), 0);
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_cleanup_zero_days_removes_only_logs() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("file_widget.log.2026-10-01"), b"{}").unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), b"keep").unwrap();
        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(cleanup_old_logs(temp_dir.path(), 0).unwrap(), 1);
        assert!(temp_dir.path().join("notes.txt").exists());
    }
}
