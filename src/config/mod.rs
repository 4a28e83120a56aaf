//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (size limits, feed location)
//! - HTTP header name constants
//! - Environment-driven configuration for the refresh job

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{
    parse_domain_list, Config, LogFormat, LogLevel, ENV_FEED_TIMEOUT_SECS, ENV_HSTS_PRELOAD_PATH,
    ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_PINNED_DOMAINS,
};
