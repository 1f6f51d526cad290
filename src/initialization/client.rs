//! HTTP client initialization.
//!
//! This module builds the client used to query the geolocation provider.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::InitializationError;
use reqwest::ClientBuilder;

/// Initializes the HTTP client for provider requests.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Request timeout from `fetch_timeout_seconds`
/// - TCP connect timeout capped at `TCP_CONNECT_TIMEOUT_SECS`
/// - Rustls TLS backend (no native TLS)
///
/// The pipeline enforces its own per-call deadline on top of these, so the
/// client timeouts only bound work the pipeline has already given up on.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientConfigError` if the fetch timeout is
/// zero, or `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    if config.fetch_timeout_seconds == 0 {
        return Err(InitializationError::HttpClientConfigError(
            "fetch timeout must be greater than zero".to_string(),
        ));
    }

    let request_timeout = Duration::from_secs(config.fetch_timeout_seconds);
    let connect_timeout = Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS).min(request_timeout);
    let client = ClientBuilder::new()
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
