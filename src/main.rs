//! Spindle main entry point
//!
//! Command-line interface for the spindle web crawler: resolves the
//! configuration from an optional TOML file plus flags, runs the crawl,
//! prints the summary and maps "nothing fetched" to a failure exit status.

use clap::Parser;
use spindle::config::{load_config, validate_config, Config};
use spindle::crawler::crawl;
use spindle::output::print_summary;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Spindle: a recursive web crawler
///
/// Fetches the seed page, follows every in-scope link it has not seen
/// before, and keeps going until no new links remain.
#[derive(Parser, Debug)]
#[command(name = "spindle")]
#[command(version)]
#[command(about = "Recursive web crawler with a bounded worker pool", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(short = 'u', long)]
    url: String,

    /// Per-request timeout in seconds (default 10)
    #[arg(short = 't', long)]
    timeout: Option<u64>,

    /// Never ascend above the seed URL's directory
    #[arg(long, alias = "np")]
    no_parent: bool,

    /// Follow links to hosts other than the seed's host
    #[arg(long)]
    span_hosts: bool,

    /// Strip query strings from discovered links
    #[arg(long = "no-query-params", alias = "nq")]
    no_query_params: bool,

    /// Verify TLS certificates (disabled by default)
    #[arg(long)]
    ssl_verify: bool,

    /// Number of concurrent fetch workers
    #[arg(long)]
    workers: Option<usize>,

    /// Capacity of the shared work queue
    #[arg(long)]
    queue_capacity: Option<usize>,

    /// Abort the crawl after this many seconds
    #[arg(long)]
    max_time: Option<u64>,

    /// Path to a TOML configuration file (CLI flags take precedence)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };
    apply_cli_overrides(&mut config, &cli);
    validate_config(&config)?;

    println!("Start crawl from {}", cli.url);
    let summary = crawl(config, &cli.url).await?;
    print_summary(&summary);

    if summary.fetched_anything() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::error!("No pages fetched");
        Ok(ExitCode::FAILURE)
    }
}

/// Applies CLI flags on top of the loaded (or default) configuration
///
/// Boolean flags can only enable a feature from the command line; value
/// flags replace the file value when given.
fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(timeout) = cli.timeout {
        config.http.timeout = timeout;
    }
    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
    if let Some(queue_capacity) = cli.queue_capacity {
        config.crawler.queue_capacity = queue_capacity;
    }
    if cli.max_time.is_some() {
        config.crawler.max_time = cli.max_time;
    }
    if cli.no_parent {
        config.crawler.no_parent = true;
    }
    if cli.span_hosts {
        config.crawler.span_hosts = true;
    }
    if cli.no_query_params {
        config.crawler.strip_query = true;
    }
    if cli.ssl_verify {
        config.http.tls_verify = true;
    }
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("spindle=info,warn"),
            1 => EnvFilter::new("spindle=debug,info"),
            2 => EnvFilter::new("spindle=trace,debug"),
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
