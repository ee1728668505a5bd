//! Network retrieval.
//!
//! [`Fetcher`] wraps the shared `reqwest::Client` and performs single-attempt
//! GET and HEAD requests with per-call timeouts. Failures come back as a
//! classified [`FetchError`]; whether to skip, report or abort is the
//! caller's decision.

use std::sync::Arc;
use std::time::Duration;

use log::trace;
use reqwest::header::HeaderMap;

use crate::config::Config;
use crate::error_handling::{categorize_reqwest_error, InitializationError};

pub use crate::error_handling::FetchError;

/// A fully read HTTP response.
#[derive(Debug)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// URL after following redirects
    pub final_url: String,
    /// Response headers
    pub headers: HeaderMap,
    /// Decoded response body
    pub body: String,
}

impl FetchResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-2xx response into [`FetchError::Status`].
    pub fn require_success(self, url: &str) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

/// HTTP retrieval with header injection and per-request timeouts.
///
/// Cloning is cheap; clones share the underlying connection pool, which is
/// safe for concurrent use from several target scans.
#[derive(Clone)]
pub struct Fetcher {
    client: Arc<reqwest::Client>,
    content_timeout: Duration,
    probe_timeout: Duration,
}

impl Fetcher {
    /// Creates a fetcher around an existing client.
    pub fn new(
        client: Arc<reqwest::Client>,
        content_timeout: Duration,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            client,
            content_timeout,
            probe_timeout,
        }
    }

    /// Builds the client from the configured header set and timeouts.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let client = crate::initialization::init_client(config)?;
        Ok(Self::new(
            client,
            config.content_timeout(),
            config.probe_timeout(),
        ))
    }

    /// Timeout used by [`Fetcher::get`].
    pub fn content_timeout(&self) -> Duration {
        self.content_timeout
    }

    /// Timeout used by [`Fetcher::head`].
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// GET with the content timeout. Any status is returned as a response.
    pub async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        self.get_with_timeout(url, self.content_timeout).await
    }

    /// GET with an explicit timeout covering the whole exchange including
    /// the body read.
    pub async fn get_with_timeout(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<FetchResponse, FetchError> {
        trace!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| request_error(url, e))?;

        Ok(FetchResponse {
            status,
            final_url,
            headers,
            body,
        })
    }

    /// HEAD with the probe timeout, returning only the status code.
    pub async fn head(&self, url: &str) -> Result<u16, FetchError> {
        trace!("HEAD {url}");
        let response = self
            .client
            .head(url)
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;
        Ok(response.status().as_u16())
    }
}

fn request_error(url: &str, source: reqwest::Error) -> FetchError {
    FetchError::Request {
        url: url.to_string(),
        kind: categorize_reqwest_error(&source),
        source,
    }
}
