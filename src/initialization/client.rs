//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::{build_header_map, Config, MAX_REDIRECT_HOPS};

/// Initializes the shared HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - The request header set (default User-Agent merged with `-H` overrides)
/// - Redirect following enabled (up to `MAX_REDIRECT_HOPS`)
///
/// Timeouts are applied per request by the `Fetcher`, since existence probes
/// and content fetches use different limits. The client's connection pool is
/// safe to share between concurrent target scans.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let headers = build_header_map(&config.user_agent, &config.headers);
    let client = ClientBuilder::new()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .build()?;
    Ok(Arc::new(client))
}
