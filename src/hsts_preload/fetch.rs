//! Preload feed download.

use crate::error_handling::PreloadError;

/// Downloads the raw feed text.
///
/// Any non-success status is an error; the body of an error page is never
/// handed to the decoder.
pub(crate) async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<String, PreloadError> {
    log::debug!("Fetching HSTS preload feed from: {}", url);
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(PreloadError::HttpStatus(response.status()));
    }

    let text = response.text().await?;
    log::debug!("Downloaded {} bytes of preload feed", text.len());
    Ok(text)
}
