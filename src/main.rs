//! medref-harvest main entry point
//!
//! This is the command-line interface for the medical reference harvester.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use medref_harvest::config::{load_config, validate, Config};
use medref_harvest::crawler::{run_crawl, CrawlOptions};
use medref_harvest::output::read_report;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// medref-harvest: a polite medical reference harvester
///
/// Walks the A-Z index of the reference site, fetches every condition page
/// one at a time and exports each article as markdown and YAML, together
/// with a JSON crawl report.
#[derive(Parser, Debug)]
#[command(name = "medref-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A polite medical reference harvester", long_about = None)]
struct Cli {
    /// Which links to harvest
    #[arg(long, value_enum, default_value_t = Mode::Test)]
    mode: Mode,

    /// Index of the first link to harvest (resume mode)
    #[arg(long)]
    start: Option<usize>,

    /// Maximum number of links to harvest (resume mode)
    #[arg(long)]
    limit: Option<usize>,

    /// Politeness delay between requests, in seconds
    #[arg(long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Validate config and show what would be harvested without fetching
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// First 5 links
    Test,
    /// First 50 links
    Sample,
    /// Every discovered link
    All,
    /// From --start, optionally bounded by --limit
    Resume,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let loaded = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(hash) = &loaded.source_hash {
        tracing::info!("Configuration loaded successfully (hash: {})", hash);
    }

    let mut config = loaded.config;
    config.apply_overrides(cli.delay, cli.output.clone());
    validate(&config).context("invalid configuration")?;

    let options = crawl_options(&cli, &config);

    if cli.dry_run {
        print_dry_run(&config, &options);
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current item");
            interrupt.cancel();
        }
    });

    tracing::info!("Output directory: {}", config.output.directory.display());
    match run_crawl(&config, &options, &cancel).await {
        Ok(progress) => {
            tracing::info!(
                "Harvest finished: {} of {} page(s) saved",
                progress.successful,
                progress.total
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("medref_harvest=info,warn"),
            1 => EnvFilter::new("medref_harvest=debug,info"),
            2 => EnvFilter::new("medref_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Maps the selected mode onto a window of discovered links
fn crawl_options(cli: &Cli, config: &Config) -> CrawlOptions {
    let (start_from, limit) = match cli.mode {
        Mode::Test => (0, Some(5)),
        Mode::Sample => (0, Some(50)),
        Mode::All => (0, None),
        Mode::Resume => (
            cli.start
                .unwrap_or_else(|| previous_resume_index(&config.output.report_path())),
            cli.limit,
        ),
    };

    CrawlOptions {
        start_from,
        limit,
        delay: config.crawler.delay(),
    }
}

/// Start index recorded by the previous run, or 0 without a readable report
fn previous_resume_index(report_path: &Path) -> usize {
    match read_report(report_path) {
        Ok(report) => {
            let index = report.resume_index();
            tracing::info!(
                "Resuming from index {} recorded in {}",
                index,
                report_path.display()
            );
            index
        }
        Err(e) => {
            tracing::debug!("No previous report at {}: {}", report_path.display(), e);
            0
        }
    }
}

/// Handles the --dry-run mode: shows the resolved configuration
fn print_dry_run(config: &Config, options: &CrawlOptions) {
    println!("=== medref-harvest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Index path: {}", config.site.index_path);
    println!("  Index keys: {}", config.site.index_keys);
    println!("  Leaf namespace: {}", config.site.leaf_namespace);

    println!("\nCrawler:");
    println!("  Delay: {:?}", config.crawler.delay());
    println!("  Max retries: {}", config.crawler.max_retries);
    println!("  Request timeout: {:?}", config.crawler.request_timeout());
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nSelection:");
    println!("  Start from: {}", options.start_from);
    match options.limit {
        Some(limit) => println!("  Limit: {}", limit),
        None => println!("  Limit: none"),
    }

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory.display());
    println!("  Report: {}", config.output.report_path().display());

    println!("\n✓ Configuration is valid");
}
