//! header_observatory library: normalization primitives for a security-header scanner.
//!
//! Three independent components:
//! - **Meta-header extraction**: policy headers a page declares in `<meta>`
//!   tags ([`parse_http_equiv_headers`])
//! - **Header sanitizing**: size-bounded copies of attacker-influenced
//!   response headers ([`sanitize_headers`])
//! - **HSTS preload dataset**: Chromium's preload feed normalized and
//!   written to a JSON file ([`refresh_hsts_preload`])
//!
//! None of the public entry points return errors: they degrade to a safe
//! default. The `try_*` variants expose the underlying failure.
//!
//! # Example
//!
//! ```no_run
//! use header_observatory::{parse_http_equiv_headers, sanitize_headers, RawHeaderMap};
//!
//! let headers = parse_http_equiv_headers(
//!     r#"<meta http-equiv="Content-Security-Policy" content="default-src 'self'">"#,
//! );
//! assert_eq!(headers.content_security_policy, vec!["default-src 'self'"]);
//!
//! let mut raw = RawHeaderMap::new();
//! raw.insert("Server".to_string(), "nginx".to_string());
//! assert!(sanitize_headers(&raw).is_some());
//! ```
//!
//! # Requirements
//!
//! The preload refresh is async and needs a Tokio runtime. Extraction and
//! sanitizing are synchronous and safe to call from any thread.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod hsts_preload;
pub mod initialization;
mod parse;
pub mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{ExtractError, InitializationError, PreloadError, SanitizeError};
pub use hsts_preload::{
    build_dataset, refresh_hsts_preload, strip_line_comments, try_refresh_hsts_preload,
    HstsPreloadDataset, HstsPreloadEntry,
};
pub use parse::{
    parse_http_equiv_headers, try_parse_http_equiv_headers, HttpEquivHeaders, HttpEquivValue,
};
pub use utils::{
    headers_to_map, sanitize_headers, try_sanitize_headers, RawHeaderMap, SanitizedHeaderMap,
};
