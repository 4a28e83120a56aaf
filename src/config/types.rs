//! Configuration types.
//!
//! The refresh job takes no command-line arguments; everything comes from
//! the environment (see [`Config::from_env`]).

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use strum_macros::{Display, EnumString};

use crate::config::constants::DEFAULT_HSTS_PRELOAD_PATH;

/// Environment variable holding the minimum log level.
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
/// Environment variable holding the log format (`plain` or `json`).
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
/// Environment variable overriding where the preload dataset is written.
pub const ENV_HSTS_PRELOAD_PATH: &str = "HSTS_PRELOAD_PATH";
/// Environment variable with the comma-separated manually pinned domains.
pub const ENV_PINNED_DOMAINS: &str = "SCANNER_PINNED_DOMAINS";
/// Environment variable with an overall deadline for the feed download, in seconds.
pub const ENV_FEED_TIMEOUT_SECS: &str = "HSTS_PRELOAD_TIMEOUT_SECS";

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Deployment configuration for the refresh job.
///
/// # Examples
///
/// ```no_run
/// use header_observatory::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     hsts_preload_path: PathBuf::from("/srv/scanner/conf/hsts-preload.json"),
///     pinned_domains: vec!["accounts.example.org".to_string()],
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Where the preload dataset is written
    pub hsts_preload_path: PathBuf,

    /// Domains forced into the dataset as pinned, HTTPS-only, subdomains included
    pub pinned_domains: Vec<String>,

    /// Overall deadline for the feed download. `None` waits as long as the
    /// server keeps the connection alive.
    pub feed_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            hsts_preload_path: PathBuf::from(DEFAULT_HSTS_PRELOAD_PATH),
            pinned_domains: Vec::new(),
            feed_timeout: None,
        }
    }
}

impl Config {
    /// Builds a configuration from the process environment.
    ///
    /// Unset variables keep their defaults. Values that do not parse are
    /// reported on stderr and replaced by the default, since the logger is not
    /// running yet when this is called.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_level = parse_or_default(ENV_LOG_LEVEL, lookup(ENV_LOG_LEVEL), defaults.log_level);
        let log_format =
            parse_or_default(ENV_LOG_FORMAT, lookup(ENV_LOG_FORMAT), defaults.log_format);

        let hsts_preload_path = lookup(ENV_HSTS_PRELOAD_PATH)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.hsts_preload_path);

        let pinned_domains = lookup(ENV_PINNED_DOMAINS)
            .map(|raw| parse_domain_list(&raw))
            .unwrap_or(defaults.pinned_domains);

        let feed_timeout = lookup(ENV_FEED_TIMEOUT_SECS)
            .and_then(|raw| parse_timeout_secs(&raw))
            .or(defaults.feed_timeout);

        Self {
            log_level,
            log_format,
            hsts_preload_path,
            pinned_domains,
            feed_timeout,
        }
    }
}

/// Splits a comma-separated domain list, trimming entries and dropping empties.
pub fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

// Zero and unparsable values mean "no deadline"
fn parse_timeout_secs(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            eprintln!(
                "Ignoring invalid {}={:?}, feed download has no deadline",
                ENV_FEED_TIMEOUT_SECS, raw
            );
            None
        }
    }
}

fn parse_or_default<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match value {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                eprintln!(
                    "Ignoring invalid {}={:?}, using default '{}'",
                    key, raw, default
                );
                default
            }
        },
        None => default,
    }
}
