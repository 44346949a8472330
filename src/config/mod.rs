//! Configuration module for Deputes-Scraper
//!
//! Settings come from three layers: built-in defaults, an optional TOML file,
//! and command-line overrides applied by the binary. The merged result is
//! validated once before any request is made.
//!
//! # Example
//!
//! ```no_run
//! use deputes_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Workers: {}", config.fetch.threads);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, SourceConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
pub use validation::validate;
