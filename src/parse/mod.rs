//! HTML parsing and data extraction.
//!
//! Extracts policy headers that a page declares in markup rather than in
//! its response headers:
//! - `Content-Security-Policy` from `<meta http-equiv>` (all of them, in order)
//! - `Referrer-Policy` from `<meta name="referrer">` (last one wins)
//!
//! All parsing is done using CSS selectors via the `scraper` crate.

mod http_equiv;

// Re-export public API
pub use http_equiv::{
    parse_http_equiv_headers, try_parse_http_equiv_headers, HttpEquivHeaders, HttpEquivValue,
};
