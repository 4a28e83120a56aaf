//! Error handling.
//!
//! Error types are categorized by component:
//! - **Initialization**: logger and HTTP client setup
//! - **Extract**: markup parser faults (recovered to the default header set)
//! - **Sanitize**: oversize or unserializable header maps (recovered to a rejection)
//! - **Preload**: feed download, decode and persistence failures (recovered
//!   to a diagnostic line)

mod types;

// Re-export public API
pub use types::{ExtractError, InitializationError, PreloadError, SanitizeError};
