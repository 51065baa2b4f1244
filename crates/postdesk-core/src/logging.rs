//! Tracing subscriber setup.
//!
//! The TUI owns stdout/stderr while running, so interactive mode writes to a
//! daily-rolling file under `logs/`. Command mode writes to stderr.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, paths};

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "POSTDESK_LOG";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Rolling file under `logs/` (interactive mode).
    File,
    /// Standard error (command mode).
    Stderr,
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Installs the global subscriber.
///
/// Returns the appender guard for file logging; it must be held until exit
/// so buffered lines are flushed. Returns `None` when logging to stderr or
/// when file logging is disabled.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init(config: &LogConfig, target: LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(config);

    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
            Ok(None)
        }
        LogTarget::File if !config.file => Ok(None),
        LogTarget::File => {
            let dir = paths::logs_dir();
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::daily(&dir, "postdesk.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init();
            Ok(Some(guard))
        }
    }
}
