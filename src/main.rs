//! Deputes-Scraper main entry point
//!
//! This is the command-line interface for the Assemblée nationale deputy scraper.

use anyhow::Context;
use clap::Parser;
use deputes_scraper::config::{self, Config};
use deputes_scraper::crawler::{Scraper, ShutdownSignal, ShutdownTrigger};
use deputes_scraper::model::Field;
use deputes_scraper::output::{self, parse_fields, RenderOptions};
use deputes_scraper::region::{resolve_regions, VALID_REGIONS};
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

/// Deputes-Scraper: French deputies from the Assemblée nationale website
///
/// Scrapes name, region, email, parliamentary group and constituency of the
/// deputies of the requested regions, then prints them as text or as a table.
#[derive(Parser, Debug)]
#[command(name = "deputes-scraper")]
#[command(version)]
#[command(about = "Scrape French deputies (name, region, email, group, constituency)", long_about = None)]
struct Cli {
    /// Regions to scrape (e.g. 'Ile-de-France' 'Bretagne'), or 'all'.
    /// Defaults to Ile-de-France and Provence-Alpes-Côte d'Azur
    #[arg(long, num_args = 1.., value_name = "NAME")]
    region: Vec<String>,

    /// Print the list of valid regions and exit
    #[arg(long)]
    list_regions: bool,

    /// Comma-separated fields to print (nom,region,email,groupe,circonscription)
    #[arg(long, value_name = "CSV")]
    fields: Option<String>,

    /// Render an ASCII table instead of text lines
    #[arg(long)]
    table: bool,

    /// Print values only, without field labels
    #[arg(long)]
    barefields: bool,

    /// With --barefields and a single field, drop the separator lines
    #[arg(long)]
    no_separator: bool,

    /// Number of concurrent workers
    #[arg(long, value_name = "N")]
    threads: Option<u32>,

    /// Maximum attempts per request
    #[arg(long, value_name = "N")]
    retries: Option<u32>,

    /// Delay between attempts, in seconds
    #[arg(long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Per-attempt request timeout, in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<f64>,

    /// Write results to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging (same as -v)
    #[arg(long)]
    debug: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error logging
    #[arg(short, long, conflicts_with_all = ["verbose", "debug"])]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbosity = if cli.debug { cli.verbose.max(1) } else { cli.verbose };
    setup_logging(verbosity, cli.quiet);

    if cli.list_regions {
        return handle_list_regions();
    }

    // Everything that can be rejected is checked before the first request.
    let config = load_config(&cli)?;
    let options = render_options(&cli)?;
    let regions = resolve_regions(cli.region.as_slice())?;

    tracing::info!(
        "Regions: {}",
        regions
            .iter()
            .map(|r| r.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let (trigger, shutdown) = ShutdownSignal::channel();
    spawn_shutdown_listener(wait_for_termination(), trigger);

    let scraper = Scraper::new(&config)?.with_shutdown(shutdown);
    let report = scraper.run(&regions).await;

    let rendered = output::render(&report.records, &options);
    output::write_output(&rendered, cli.output.as_deref())
        .context("Failed to write results")?;

    output::print_summary(&report);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("deputes_scraper=info,warn"),
            1 => EnvFilter::new("deputes_scraper=debug,info"),
            2 => EnvFilter::new("deputes_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Fires `trigger` once `termination` resolves
fn spawn_shutdown_listener<F>(termination: F, trigger: ShutdownTrigger) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        termination.await;
        tracing::warn!("Termination requested, keeping results collected so far");
        trigger.trigger();
    })
}

/// Resolves on Ctrl-C, or on SIGTERM where the platform has it
async fn wait_for_termination() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Unable to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Unable to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Handles --list-regions: prints every valid region
fn handle_list_regions() -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_region_list(&mut stdout.lock()).context("Failed to print regions")
}

fn write_region_list(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Valid regions:")?;
    for region in VALID_REGIONS {
        writeln!(out, "  - {}", region)?;
    }
    out.flush()
}

/// Layers defaults, the optional config file and command-line overrides
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = config::load_config_or_default(cli.config.as_deref())?;

    if let Some(threads) = cli.threads {
        config.fetch.threads = threads;
    }
    if let Some(retries) = cli.retries {
        config.fetch.retries = retries;
    }
    if let Some(delay) = cli.delay {
        config.fetch.delay_secs = delay;
    }
    if let Some(timeout) = cli.timeout {
        config.fetch.timeout_secs = timeout;
    }

    config::validate(&config)?;
    tracing::debug!("Effective configuration: {:?}", config);

    Ok(config)
}

/// Builds render options from formatting flags
fn render_options(cli: &Cli) -> anyhow::Result<RenderOptions> {
    let fields = match &cli.fields {
        Some(csv) => parse_fields(csv)?,
        None => Field::ALL.to_vec(),
    };

    Ok(RenderOptions {
        fields,
        table: cli.table,
        barefields: cli.barefields,
        no_separator: cli.no_separator,
    })
}
