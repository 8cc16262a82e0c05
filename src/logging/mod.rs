//! Log file setup
//!
//! The terminal UI owns stdout, so everything goes to a daily log file under
//! the config directory.

use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::config_dir;

const LOG_FILE_PREFIX: &str = "textgrid.log";

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// Installs the global subscriber. `filter` takes precedence over
/// `RUST_LOG`; with neither set the level is `info`.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(filter: Option<&str>) -> anyhow::Result<WorkerGuard> {
    let dir = logs_dir();
    fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = match filter {
        Some(f) => EnvFilter::try_new(f)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;

    tracing::info!(
        "=== textgrid started at {} ===",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(guard)
}
