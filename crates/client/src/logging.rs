//! Tracing subscriber setup for the `people` binary.
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogConfig;

const LOG_FILE_NAME: &str = "people.log";

/// Keeps the background log writer alive. Drop it at the end of `main` to
/// flush buffered lines.
#[must_use = "dropping the guard stops the file writer"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// Logs go to stderr so they never interleave with the screen output on
/// stdout. When enabled, a plain-text copy is appended to `people.log`.
pub fn setup_logging(config: &LogConfig) -> Result<LoggingGuard> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("Invalid log filter '{}'", config.filter))?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(true);

    let (file_layer, guard) = if config.log_to_file {
        let log_dir = config.log_dir.clone().unwrap_or_else(default_log_dir);
        fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

        let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_thread_names(true);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LoggingGuard { _file: guard })
}

/// `<cache dir>/logs`, or a temp directory when the platform has none.
fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "people")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("people").join("logs"))
}
