//! Shared HTTP client and page fetch for the static source.

use anyhow::{anyhow, Result};
use std::time::Duration;
use tracing::debug;

use crate::config::HttpConfig;

/// Maximum HTTP response body size (10 MB). Bodies exceeding this limit are
/// truncated during streaming reads rather than rejected after full download.
const MAX_HTTP_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the HTTP client used for all static-page fetches.
pub fn build_client(http: &HttpConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(http.timeout_secs))
        .user_agent(&http.user_agent)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))
}

/// Fetch a page and return its body as text, capped at [`MAX_HTTP_BODY_BYTES`].
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    debug!("Fetching {}", url);
    let response = client.get(url).send().await?.error_for_status()?;
    read_body_capped(response, MAX_HTTP_BODY_BYTES).await
}

/// Read a response body in chunks, stopping at `max_bytes`. Returns the body
/// as a String (lossy UTF-8 conversion for truncated multi-byte boundaries).
async fn read_body_capped(mut response: reqwest::Response, max_bytes: usize) -> Result<String> {
    let mut body = Vec::with_capacity(max_bytes.min(256 * 1024));
    let mut total = 0usize;

    while let Some(chunk) = response.chunk().await? {
        let remaining = max_bytes.saturating_sub(total);
        if remaining == 0 {
            debug!("HTTP response truncated at {} bytes (limit: {})", total, max_bytes);
            break;
        }
        let take = chunk.len().min(remaining);
        body.extend_from_slice(&chunk[..take]);
        total += take;
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}
