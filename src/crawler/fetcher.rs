//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building the HTTP client with a proper user agent string
//! - GET requests with a per-attempt timeout
//! - Retry logic with a fixed delay between attempts
//! - Error classification

use crate::config::{FetchConfig, UserAgentConfig};
use crate::{FetchError, FetchErrorKind};
use reqwest::Client;
use std::time::Duration;

/// Retry and timeout policy handed to every fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Total number of attempts, first one included
    pub max_attempts: u32,

    /// Pause between two consecutive attempts
    pub delay: Duration,

    /// Budget of each individual attempt
    pub timeout: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self::from(&FetchConfig::default())
    }
}

impl From<&FetchConfig> for FetchPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self {
            max_attempts: config.retries,
            delay: config.delay(),
            timeout: config.timeout(),
        }
    }
}

/// A successfully fetched page body
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL that was requested
    pub url: String,

    /// Response body
    pub body: String,

    /// Attempts used, including the successful one
    pub attempts: u32,
}

/// Builds an HTTP client with proper configuration
///
/// Request timeouts are set per attempt by [`fetch_with_retries`], so only the
/// connect timeout is configured here.
///
/// # Example
///
/// ```no_run
/// use deputes_scraper::config::UserAgentConfig;
/// use deputes_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, retrying failed attempts
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 2xx | Return body |
/// | Any other HTTP status | Retry after `delay` |
/// | Timeout (per attempt) | Retry after `delay` |
/// | Connection / body error | Retry after `delay` |
///
/// Exactly `max_attempts` attempts are made before giving up; there is no
/// pause after the final attempt.
///
/// # Returns
///
/// * `Ok(FetchedPage)` - Body of the first successful attempt
/// * `Err(FetchError)` - Every attempt failed; carries the last failure
pub async fn fetch_with_retries(
    client: &Client,
    url: &str,
    policy: &FetchPolicy,
) -> Result<FetchedPage, FetchError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut last_error = FetchErrorKind::Other("no attempt made".to_string());

    for attempt in 1..=max_attempts {
        tracing::debug!("Attempt {}/{} fetching: {}", attempt, max_attempts, url);

        match fetch_once(client, url, policy.timeout).await {
            Ok(body) => {
                return Ok(FetchedPage {
                    url: url.to_string(),
                    body,
                    attempts: attempt,
                });
            }
            Err(kind) => {
                tracing::warn!("Attempt {} failed for {}: {}", attempt, url, kind);
                last_error = kind;
            }
        }

        if attempt < max_attempts && !policy.delay.is_zero() {
            tracing::debug!("Sleeping {:?} before retrying {}", policy.delay, url);
            tokio::time::sleep(policy.delay).await;
        }
    }

    Err(FetchError {
        url: url.to_string(),
        attempts: max_attempts,
        kind: last_error,
    })
}

/// Performs a single GET attempt bounded by `timeout`
async fn fetch_once(client: &Client, url: &str, timeout: Duration) -> Result<String, FetchErrorKind> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(classify_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchErrorKind::Status(status.as_u16()));
    }

    response.text().await.map_err(classify_error)
}

/// Maps a reqwest error onto a failure kind
fn classify_error(error: reqwest::Error) -> FetchErrorKind {
    if error.is_timeout() {
        FetchErrorKind::Timeout
    } else if error.is_connect() {
        FetchErrorKind::Connect(error.to_string())
    } else {
        FetchErrorKind::Other(error.to_string())
    }
}
