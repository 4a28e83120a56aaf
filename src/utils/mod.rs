//! Utility functions.
//!
//! This module provides:
//! - Response-header sanitizing (size ceiling) and conversion
//! - Diagnostic message sanitization
//! - CSS selector parsing utilities

mod headers;
pub mod sanitize;
mod selector;

pub use headers::{
    headers_to_map, sanitize_headers, serialized_size, try_sanitize_headers, RawHeaderMap,
    SanitizedHeaderMap,
};
pub use selector::parse_selector_with_fallback;
