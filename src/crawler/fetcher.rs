//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with the configured user agent
//! - GET requests returning the page body
//! - Classifying failures into fetch errors
//!
//! There is no retry: a failed request fails the stage that issued it.

use crate::config::UserAgentConfig;
use crate::{Result, ShopSieveError};
use reqwest::Client;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use shop_sieve::config::UserAgentConfig;
/// use shop_sieve::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "ShopSieve".to_string(),
///     crawler_version: "1.0".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent(config))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Formats the user agent as `CrawlerName/Version`
pub fn user_agent(config: &UserAgentConfig) -> String {
    format!("{}/{}", config.crawler_name, config.crawler_version)
}

/// Fetches a page and returns its body
///
/// Redirects are followed by the client. Any transport failure, non-2xx
/// status, or unreadable body is an error.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    tracing::debug!("Fetching {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ShopSieveError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!("{} returned HTTP {}", url, status.as_u16());
        return Err(ShopSieveError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| ShopSieveError::Http {
        url: url.to_string(),
        source,
    })
}
