//! HSTS preload dataset builder.
//!
//! This module handles:
//! - Downloading Chromium's static HSTS preload feed
//! - Stripping its `// ` line comments and decoding the JSON
//! - Normalizing entries into an [`HstsPreloadDataset`]
//! - Forcing the deployment's manually pinned domains into it
//! - Persisting the result as sorted, pretty-printed JSON
//!
//! The dataset is rebuilt wholesale on every successful refresh. When any
//! step before the write fails, the existing file is left as it was.

mod comments;
mod fetch;
mod models;
mod store;

use crate::config::{Config, HSTS_PRELOAD_URL};
use crate::error_handling::PreloadError;
use crate::initialization::init_client;
use crate::utils::sanitize::sanitize_and_truncate_diagnostic;

use fetch::fetch_feed;
use models::PreloadFeed;

pub use comments::strip_line_comments;
pub use models::{HstsPreloadDataset, HstsPreloadEntry};

const DIAGNOSTIC_PREFIX: &str = "Unable to download the Chromium HSTS preload list";

/// Builds the dataset from raw feed text plus manually pinned domains.
///
/// Manual pins are applied after the feed, so they replace any feed record
/// for the same domain.
///
/// # Errors
///
/// Returns `PreloadError::Decode` if the comment-stripped text is not a JSON
/// object with an `entries` array of named records.
pub fn build_dataset(
    raw_feed: &str,
    pinned_domains: &[String],
) -> Result<HstsPreloadDataset, PreloadError> {
    let stripped = strip_line_comments(raw_feed);
    let feed: PreloadFeed = serde_json::from_str(&stripped).map_err(PreloadError::Decode)?;

    let mut dataset = HstsPreloadDataset::from_feed(&feed);
    for domain in pinned_domains {
        dataset.insert_pinned(domain);
    }

    log::debug!(
        "Normalized {} feed entries, {} manually pinned domain(s)",
        feed.entries.len(),
        pinned_domains.len()
    );
    Ok(dataset)
}

/// Refreshes the preload dataset file, reporting failures.
///
/// Downloads [`HSTS_PRELOAD_URL`], builds the dataset and writes it to
/// `config.hsts_preload_path`.
///
/// # Errors
///
/// Any [`PreloadError`]. Only `PreloadError::Io` can occur after the output
/// file has been opened.
pub async fn try_refresh_hsts_preload(
    config: &Config,
) -> Result<HstsPreloadDataset, PreloadError> {
    refresh_from_source(HSTS_PRELOAD_URL, config).await
}

/// Refreshes the preload dataset file on a best-effort basis.
///
/// On failure a single diagnostic line is reported and the previous file is
/// left in place. Success is silent apart from debug logs.
///
/// The diagnostic is logged at error level through `log`, so an installed
/// logger (for example [`crate::initialization::init_logger_with`]) decides
/// where it goes. When no logger has been installed the line is written to
/// stderr directly instead of being dropped.
///
/// # Returns
///
/// `true` if a new dataset was written.
pub async fn refresh_hsts_preload(config: &Config) -> bool {
    refresh_and_report(HSTS_PRELOAD_URL, config).await
}

pub(crate) async fn refresh_and_report(url: &str, config: &Config) -> bool {
    match refresh_from_source(url, config).await {
        Ok(_) => true,
        Err(e) => {
            report_failure(&diagnostic_line(&e));
            false
        }
    }
}

pub(crate) async fn refresh_from_source(
    url: &str,
    config: &Config,
) -> Result<HstsPreloadDataset, PreloadError> {
    let client = init_client(config.feed_timeout)?;
    let raw_feed = fetch_feed(&client, url).await?;
    let dataset = build_dataset(&raw_feed, &config.pinned_domains)?;

    let output_path = &config.hsts_preload_path;
    dataset.save(output_path).await?;
    log::debug!(
        "Wrote {} HSTS preload entries to {}",
        dataset.len(),
        output_path.display()
    );

    Ok(dataset)
}

// `log` starts with the max level at Off and only a logger raises it
fn report_failure(line: &str) {
    if log::max_level() == log::LevelFilter::Off {
        eprintln!("{}", line);
    } else {
        log::error!("{}", line);
    }
}

/// Formats a refresh failure as one line, cause chain included.
pub(crate) fn diagnostic_line(error: &PreloadError) -> String {
    let mut message = format!("{}: {}", DIAGNOSTIC_PREFIX, error);
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = std::error::Error::source(cause);
    }
    sanitize_and_truncate_diagnostic(&message)
}
