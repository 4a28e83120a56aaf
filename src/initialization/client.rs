//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::DEFAULT_USER_AGENT;
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used to download the preload feed.
///
/// Creates a `reqwest::Client` configured with:
/// - The crate User-Agent
/// - An overall request deadline, only when `timeout` is set
/// - Default redirect following
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(timeout: Option<Duration>) -> Result<reqwest::Client, InitializationError> {
    let mut builder = ClientBuilder::new().user_agent(DEFAULT_USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
