//! Logging bootstrap for core and CLI.
//!
//! # Responsibility
//! - Initialize file-based rolling logs exactly once per process.
//! - Offer a stderr fallback for sessions run without a log directory.
//!
//! # Invariants
//! - Initialization is one-shot; later calls with any configuration are
//!   rejected instead of silently reconfiguring.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::Path;

const LOG_FILE_BASENAME: &str = "messroll";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Returns the default log level for the current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Initializes rolling file logging under `log_dir`.
///
/// # Errors
/// - Returns an error when logging is already initialized.
/// - Returns an error when the level is invalid or the backend fails to start.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), String> {
    init_once(|| {
        let logger = Logger::try_with_str(level)
            .map_err(|err| format!("invalid log level `{level}`: {err}"))?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir)
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;
        Ok(logger)
    })
}

/// Initializes stderr-only logging for sessions without a log directory.
///
/// # Errors
/// - Returns an error when logging is already initialized.
/// - Returns an error when the level is invalid or the backend fails to start.
pub fn init_stderr_logging(level: &str) -> Result<(), String> {
    init_once(|| {
        Logger::try_with_str(level)
            .map_err(|err| format!("invalid log level `{level}`: {err}"))?
            .log_to_stderr()
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))
    })
}

fn init_once(start: impl FnOnce() -> Result<LoggerHandle, String>) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Err("logging already initialized".to_string());
    }

    LOGGER.get_or_try_init(|| {
        let logger = start()?;
        info!(
            "event=app_start module=core status=ok build_mode={} version={}",
            build_mode(),
            env!("CARGO_PKG_VERSION")
        );
        Ok::<LoggerHandle, String>(logger)
    })?;

    Ok(())
}

fn build_mode() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
