//! Configuration constants.
//!
//! This module defines the fixed limits, locations and network parameters
//! used by the extractor, the sanitizer and the preload builder. The feed
//! download has no deadline of its own; see `Config::feed_timeout`.

/// Maximum serialized size of a response-header collection, in bytes.
///
/// Header maps are measured as compact JSON (`{"name":"value",...}`).
/// Anything larger is rejected rather than stored. This ceiling is not
/// configurable.
pub const MAX_HEADERS_SERIALIZED_SIZE: usize = 16384;

/// Chromium's static HSTS preload feed (JSON with `// ` line comments).
pub const HSTS_PRELOAD_URL: &str =
    "https://raw.githubusercontent.com/chromium/chromium/main/net/http/transport_security_state_static.json";

/// Default location of the persisted preload dataset.
///
/// Relative paths are resolved against the working directory of the process.
pub const DEFAULT_HSTS_PRELOAD_PATH: &str = "conf/hsts-preload.json";

/// User-Agent sent when downloading the preload feed.
pub const DEFAULT_USER_AGENT: &str = concat!("header_observatory/", env!("CARGO_PKG_VERSION"));

/// Mode assigned to manually pinned domains.
pub const PINNED_DOMAIN_MODE: &str = "force-https";

/// Maximum length of a diagnostic line written for a preload failure.
pub const MAX_DIAGNOSTIC_LENGTH: usize = 2000;
