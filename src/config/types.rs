use serde::Deserialize;
use std::time::Duration;

/// Default host serving deputy profile pages
pub const DEFAULT_BASE_URL: &str = "https://www.assemblee-nationale.fr";

/// Default page listing every deputy grouped by region
pub const DEFAULT_LISTING_URL: &str = "https://www2.assemblee-nationale.fr/deputes/liste/regions";

/// Main configuration structure for Deputes-Scraper
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub fetch: FetchConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Where the scraper reads its pages from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL that profile links are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// URL of the region listing page
    #[serde(rename = "listing-url")]
    pub listing_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            listing_url: DEFAULT_LISTING_URL.to_string(),
        }
    }
}

/// Worker pool and retry policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Number of concurrent workers
    pub threads: u32,

    /// Maximum number of attempts per request (including the first one)
    pub retries: u32,

    /// Delay between two attempts, in seconds
    #[serde(rename = "delay-secs")]
    pub delay_secs: f64,

    /// Per-attempt timeout, in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: f64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            threads: 5,
            retries: 3,
            delay_secs: 0.0,
            timeout_secs: 10.0,
        }
    }
}

impl FetchConfig {
    // Invalid values are rejected by validation; fall back to zero rather than panic.
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_secs).unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs).unwrap_or_default()
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the scraper
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the scraper
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// Optional URL with information about the scraper
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "deputes-scraper".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version` or `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(url) => format!("{}/{} (+{})", self.crawler_name, self.crawler_version, url),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}
