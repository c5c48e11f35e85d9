//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with user agent and timeouts
//! - GET requests for archive, dataset and record pages
//! - Error classification (network failure vs. non-2xx status)
//!
//! There is no retry logic: a failed fetch is reported once and the caller
//! decides what to skip.

use crate::config::HttpConfig;
use crate::{Result, ScrapeError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// Every request is bounded by `timeout_secs`; a request that hangs past it
/// fails like any other network error.
///
/// # Example
///
/// ```no_run
/// use crd_scraper::config::HttpConfig;
/// use crd_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body with a single GET request
///
/// # Returns
///
/// * `Ok(String)` - The response body of a 2xx response
/// * `Err(ScrapeError::HttpStatus)` - The server answered with a non-2xx status
/// * `Err(ScrapeError::Fetch)` - Connection, timeout or body read failure
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| {
            if source.is_timeout() {
                tracing::debug!("Request timeout for {}", url);
            }
            ScrapeError::Fetch {
                url: url.to_string(),
                source,
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| ScrapeError::Fetch {
        url: url.to_string(),
        source,
    })
}
