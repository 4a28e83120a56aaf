//! Error type definitions.
//!
//! Every component has an explicit error type for its internal `try_*`
//! operation. The public wrappers recover from these locally, so none of
//! them cross the crate boundary through the best-effort entry points.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure while extracting http-equiv headers from markup.
///
/// Recovered by [`crate::parse_http_equiv_headers`], which returns the
/// default header set instead.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The markup parser panicked on the input.
    #[error("HTML parser failed: {0}")]
    ParserFault(String),
}

/// Reasons a response-header collection is refused by the sanitizer.
#[derive(Error, Debug)]
pub enum SanitizeError {
    /// Serialized header map is over the storage ceiling.
    #[error("Serialized headers are {size} bytes, limit is {limit}")]
    TooLarge {
        /// Measured size in bytes
        size: usize,
        /// Allowed maximum in bytes
        limit: usize,
    },

    /// Header map could not be serialized for measuring.
    #[error("Headers could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures of the HSTS preload refresh.
///
/// Any of these leaves a previously written dataset file untouched, except
/// [`PreloadError::Io`], which may happen part way through the write.
#[derive(Error, Debug)]
pub enum PreloadError {
    /// HTTP client could not be built.
    #[error(transparent)]
    Client(#[from] InitializationError),

    /// Network error while downloading the feed.
    #[error("Failed to fetch preload feed: {0}")]
    Fetch(#[from] ReqwestError),

    /// Feed server answered with a non-success status.
    #[error("Preload feed request returned HTTP {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Comment-stripped feed is not the expected JSON document.
    #[error("Failed to decode preload feed: {0}")]
    Decode(#[source] serde_json::Error),

    /// Dataset could not be rendered as JSON.
    #[error("Failed to encode preload dataset: {0}")]
    Encode(#[source] serde_json::Error),

    /// Dataset file could not be read or written.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
