//! File-based logging.
//!
//! The terminal belongs to the status screen, so logs go to
//! `<dir>/lcdplay.YYYY-MM-DD.log` with daily rotation. `RUST_LOG` overrides
//! the configured filter.

use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LoggingSettings, default_log_dir};
use crate::error::PlayerError;

const LOG_FILE_PREFIX: &str = "lcdplay";

/// Where log files go for these settings.
pub fn log_dir(settings: &LoggingSettings) -> PathBuf {
    settings
        .directory
        .clone()
        .or_else(default_log_dir)
        .unwrap_or_else(|| PathBuf::from(".logs"))
}

/// Install the global subscriber. Keep the returned guard alive for as long
/// as logs should be flushed.
pub fn init_logging(settings: &LoggingSettings) -> Result<WorkerGuard, PlayerError> {
    let dir = log_dir(settings);
    fs::create_dir_all(&dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(&dir)
        .map_err(|e| PlayerError::Logging(e.to_string()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .map_err(|e| PlayerError::Logging(e.to_string()))?;

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| PlayerError::Logging(e.to_string()))?;

    tracing::info!(dir = %dir.display(), "logging initialized");
    Ok(guard)
}
