//! Scrape coordinator - main run orchestration logic
//!
//! This module drives one scrape run:
//! - Fetching the region listing page once
//! - Turning each requested region into deputy targets
//! - Dispatching deputy profiles to the worker pool
//! - Folding every outcome into an ordered [`RunReport`]

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_with_retries, FetchPolicy};
use crate::crawler::parser::{AssembleeSchema, ExtractionSchema};
use crate::crawler::pool::WorkerPool;
use crate::crawler::shutdown::ShutdownSignal;
use crate::model::{DeputyTarget, FailureKind, Record, TargetFailure, TargetOutcome};
use crate::output::RunReport;
use crate::region::Region;
use crate::ScrapeError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;

/// Main scraper structure
pub struct Scraper {
    client: Client,
    policy: FetchPolicy,
    schema: Arc<dyn ExtractionSchema>,
    threads: usize,
    shutdown: ShutdownSignal,
}

impl Scraper {
    /// Creates a new scraper from a validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Scraper)` - Ready to run
    /// * `Err(ScrapeError)` - HTTP client or source URLs could not be set up
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.user_agent)?;
        let schema = AssembleeSchema::new(&config.source.listing_url, &config.source.base_url)?;

        Ok(Self {
            client,
            policy: FetchPolicy::from(&config.fetch),
            schema: Arc::new(schema),
            threads: config.fetch.threads as usize,
            shutdown: ShutdownSignal::never(),
        })
    }

    /// Replaces the extraction schema
    pub fn with_schema(mut self, schema: Arc<dyn ExtractionSchema>) -> Self {
        self.schema = schema;
        self
    }

    /// Attaches a shutdown signal observed by every stage of the run
    pub fn with_shutdown(mut self, shutdown: ShutdownSignal) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Runs a complete scrape for the given regions
    ///
    /// Per-target failures are collected in the report; this method itself
    /// never fails.
    ///
    /// # Flow
    ///
    /// 1. Fetch the listing page (with retries)
    /// 2. Parse the section of every region, in request order
    /// 3. Fetch and parse every deputy profile through the worker pool
    /// 4. Return records in target order with the failure summary
    pub async fn run(&self, regions: &[Region]) -> RunReport {
        let start_time = Instant::now();
        let mut report = RunReport::default();

        tracing::info!(
            "Scraping {} region(s) with {} worker(s)",
            regions.len(),
            self.threads
        );

        let targets = self.collect_targets(regions, &mut report).await;
        tracing::info!("Found {} deputies total", targets.len());

        if !targets.is_empty() {
            self.scrape_deputies(targets, &mut report).await;
        }

        tracing::info!(
            "Scrape completed: {} record(s), {} failure(s), {} cancelled in {:?}",
            report.records.len(),
            report.failures.len(),
            report.cancelled.len(),
            start_time.elapsed()
        );

        report
    }

    /// Fetches the listing page and extracts deputy targets for each region
    async fn collect_targets(&self, regions: &[Region], report: &mut RunReport) -> Vec<DeputyTarget> {
        let listing_url = self.schema.listing_url().to_string();
        let mut shutdown = self.shutdown.clone();

        let fetched = tokio::select! {
            result = fetch_with_retries(&self.client, &listing_url, &self.policy) => result,
            _ = shutdown.triggered() => {
                tracing::warn!("Interrupted while fetching listing page");
                report
                    .cancelled
                    .extend(regions.iter().map(|region| region.to_string()));
                return Vec::new();
            }
        };

        let page = match fetched {
            Ok(page) => page,
            Err(err) => {
                tracing::error!("Could not fetch region page: {}", err);
                for region in regions {
                    report.record_failure(TargetFailure {
                        target: region.to_string(),
                        kind: FailureKind::Fetch(err.kind.clone()),
                        attempts: err.attempts,
                    });
                }
                return Vec::new();
            }
        };

        let mut targets = Vec::new();
        for region in regions {
            tracing::debug!("Collecting deputies for region: {}", region);

            match self.schema.parse_listing(&page.body, *region) {
                Ok(listing) => {
                    report.regions_succeeded += 1;
                    for rejected in listing.rejected {
                        report.record_failure(TargetFailure {
                            target: format!("{} (listing row)", region),
                            kind: FailureKind::Parse(rejected),
                            attempts: page.attempts,
                        });
                    }
                    tracing::debug!(
                        "Deputies found for {}: {}",
                        region,
                        listing.deputies.len()
                    );
                    targets.extend(listing.deputies);
                }
                Err(err) => {
                    tracing::warn!("No deputies extracted for {}: {}", region, err);
                    report.record_failure(TargetFailure {
                        target: region.to_string(),
                        kind: FailureKind::Parse(err),
                        attempts: page.attempts,
                    });
                }
            }
        }

        targets
    }

    /// Resolves every deputy target through the worker pool
    async fn scrape_deputies(&self, targets: Vec<DeputyTarget>, report: &mut RunReport) {
        let pool = WorkerPool::new(self.threads).with_shutdown(self.shutdown.clone());
        let client = self.client.clone();
        let policy = self.policy.clone();
        let schema = Arc::clone(&self.schema);

        let results = pool
            .run(targets, move |deputy: DeputyTarget| {
                let client = client.clone();
                let policy = policy.clone();
                let schema = Arc::clone(&schema);
                async move { scrape_deputy(&client, &policy, schema.as_ref(), &deputy).await }
            })
            .await;

        for (deputy, outcome) in results {
            match outcome {
                TargetOutcome::Success(record) => report.records.push(record),
                TargetOutcome::Failure { kind, attempts } => {
                    report.record_failure(TargetFailure {
                        target: deputy.to_string(),
                        kind,
                        attempts,
                    });
                }
                TargetOutcome::Cancelled => report.cancelled.push(deputy.to_string()),
            }
        }
    }
}

/// Fetch-parse worker: resolves one deputy profile into a record
///
/// Touches no shared state besides the network.
pub async fn scrape_deputy(
    client: &Client,
    policy: &FetchPolicy,
    schema: &dyn ExtractionSchema,
    deputy: &DeputyTarget,
) -> TargetOutcome<Record> {
    let page = match fetch_with_retries(client, &deputy.profile_url, policy).await {
        Ok(page) => page,
        Err(err) => {
            tracing::warn!("Giving up on {}: {}", deputy, err);
            return err.into();
        }
    };

    match schema.parse_profile(&page.body, deputy) {
        Ok(record) => TargetOutcome::Success(record),
        Err(err) => {
            tracing::warn!("Failed to parse profile of {}: {}", deputy, err);
            TargetOutcome::Failure {
                kind: FailureKind::Parse(err),
                attempts: page.attempts,
            }
        }
    }
}

/// Runs a complete scrape with a fresh [`Scraper`]
///
/// # Example
///
/// ```no_run
/// use deputes_scraper::config::Config;
/// use deputes_scraper::crawler::run_scrape;
/// use deputes_scraper::region::resolve_regions;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let regions = resolve_regions(&["Bretagne"])?;
/// let report = run_scrape(&Config::default(), &regions).await?;
/// println!("{} deputies", report.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: &Config, regions: &[Region]) -> Result<RunReport, ScrapeError> {
    let scraper = Scraper::new(config)?;
    Ok(scraper.run(regions).await)
}
