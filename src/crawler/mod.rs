//! Crawler module for deputy page fetching and processing
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with retry logic
//! - Pluggable HTML extraction schemas
//! - A bounded worker pool with ordered collection
//! - Overall run coordination and cooperative shutdown

mod coordinator;
mod fetcher;
mod parser;
mod pool;
mod shutdown;

pub use coordinator::{run_scrape, scrape_deputy, Scraper};
pub use fetcher::{build_http_client, fetch_with_retries, FetchPolicy, FetchedPage};
pub use parser::{AssembleeSchema, ExtractionSchema, RegionListing};
pub use pool::WorkerPool;
pub use shutdown::{ShutdownSignal, ShutdownTrigger};

use crate::config::Config;
use crate::output::RunReport;
use crate::region::Region;
use crate::ScrapeError;

/// Runs a complete scrape operation
///
/// This is the main entry point for a scrape. It will:
/// 1. Build the HTTP client and extraction schema
/// 2. Fetch the region listing page
/// 3. Enumerate deputy targets for each region
/// 4. Fetch and parse every profile concurrently
/// 5. Return ordered records plus a failure summary
///
/// # Returns
///
/// * `Ok(RunReport)` - Run finished; individual targets may still have failed
/// * `Err(ScrapeError)` - The run could not start
pub async fn scrape(config: &Config, regions: &[Region]) -> Result<RunReport, ScrapeError> {
    run_scrape(config, regions).await
}
