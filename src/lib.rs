//! Deputes-Scraper: public listing scraper for the French National Assembly
//!
//! This crate fetches the per-region list of deputies from the Assemblée nationale
//! website, visits every deputy profile concurrently, and extracts name, region,
//! email, parliamentary group and constituency into ordered records.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod region;

use thiserror::Error;

/// Main error type for fatal scraper failures
///
/// Per-target problems (`FetchError`, `ParseError`) never surface here; they are
/// recorded in the run report instead.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Region(#[from] RegionError),

    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Raised when requested region names do not match the canonical list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("Invalid region(s): {}. Valid regions: {}", .values.join(", "), region::VALID_REGIONS.join(", "))]
    Invalid { values: Vec<String> },
}

/// Raised when a `--fields` list names an unknown column
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Unknown field '{0}' (expected one of: nom, region, email, groupe, circonscription)")]
    Unknown(String),

    #[error("Field list is empty")]
    Empty,
}

/// Why a single attempt (and ultimately a target) failed at the network level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchErrorKind {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("{0}")]
    Other(String),
}

/// A fetch that exhausted every attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch {url} after {attempts} attempt(s): {kind}")]
pub struct FetchError {
    pub url: String,
    pub attempts: u32,
    pub kind: FetchErrorKind,
}

/// Markup did not have the shape the extraction schema expects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("region heading '{region}' not found on listing page")]
    RegionNotFound { region: String },

    #[error("no deputies listed under region '{region}'")]
    NoDeputies { region: String },

    #[error("listing row without a name (link {href})")]
    MissingName { href: String },

    #[error("cannot extract deputy id from link '{href}'")]
    MissingId { href: String },

    #[error("profile page of {name} has none of the expected fields")]
    EmptyProfile { name: String },
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{scrape, Scraper};
pub use model::{Field, Record};
pub use region::{resolve_regions, Region};
