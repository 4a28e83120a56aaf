//! HSTS preload refresh job (CLI binary).
//!
//! Takes no arguments. Configuration comes from the environment:
//! - `HSTS_PRELOAD_PATH`: output file (default `conf/hsts-preload.json`)
//! - `SCANNER_PINNED_DOMAINS`: comma-separated manually pinned domains
//! - `HSTS_PRELOAD_TIMEOUT_SECS`: optional download deadline (unset means none)
//! - `LOG_LEVEL`, `LOG_FORMAT`, `RUST_LOG`: logging
//!
//! A failed refresh logs one diagnostic line to stderr and still exits 0;
//! the previous dataset file stays in place.

use anyhow::{Context, Result};

use header_observatory::initialization::init_logger_with;
use header_observatory::{refresh_hsts_preload, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logger_with(config.log_level.into(), config.log_format)
        .context("Failed to initialize logger")?;

    refresh_hsts_preload(&config).await;
    Ok(())
}
