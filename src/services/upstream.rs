use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling sibling services
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Build a pooled HTTP client with a request timeout
pub fn build_http_client(timeout: Duration) -> Result<Client, UpstreamError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Join a base URL and a path without doubling slashes
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
