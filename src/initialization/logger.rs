//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors) and JSON formats for structured logging. Output goes to
/// stderr, which is where the preload refresh diagnostic ends up.
///
/// The logger reads from the `RUST_LOG` environment variable first; the
/// provided `level` overrides it for this crate and the global filter.
///
/// # Arguments
///
/// * `level` - Minimum log level to display (overrides `RUST_LOG` if set)
/// * `format` - Log format (Plain or Json)
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Quiet refresh job, JSON lines for the log collector
/// LOG_LEVEL=warn LOG_FORMAT=json header_observatory
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=header_observatory=debug,reqwest=info header_observatory
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("header_observatory", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| write_json_line(buf, record));
        }
        LogFormat::Plain => {
            builder.format(|buf, record| write_plain_line(buf, record));
        }
    }

    // try_init so a second initialization (tests, embedding) is an error, not a panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// One JSON object per line: `ts` (Unix millis), `level`, `target`, `msg`.
fn write_json_line<W: Write>(buf: &mut W, record: &log::Record) -> std::io::Result<()> {
    writeln!(
        buf,
        "{{\"ts\":{},\"level\":\"{}\",\"target\":{},\"msg\":{}}}",
        chrono::Utc::now().timestamp_millis(),
        record.level(),
        serde_json::to_string(record.target()).unwrap_or_else(|_| "\"\"".into()),
        serde_json::to_string(&record.args().to_string()).unwrap_or_else(|_| "\"\"".into())
    )
}

fn write_plain_line<W: Write>(buf: &mut W, record: &log::Record) -> std::io::Result<()> {
    let level = record.level();
    let colored_level = match level {
        log::Level::Error => level.to_string().red(),
        log::Level::Warn => level.to_string().yellow(),
        log::Level::Info => level.to_string().green(),
        log::Level::Debug => level.to_string().blue(),
        log::Level::Trace => level.to_string().purple(),
    };

    writeln!(
        buf,
        "{} [{}] {}",
        record.target().cyan(),
        colored_level,
        record.args()
    )
}
