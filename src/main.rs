//! Shop-Sieve main entry point
//!
//! This is the command-line interface for the Shop-Sieve product scraper.

use clap::Parser;
use shop_sieve::config::{load_config_with_hash, validate, Config};
use shop_sieve::output::log_error;
use shop_sieve::run_pipeline;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Shop-Sieve: a single-site product scraper
///
/// Shop-Sieve crawls a shop's pages for product links, scrapes title, price
/// and image from every product page, and writes them to a dated CSV file.
#[derive(Parser, Debug)]
#[command(name = "shop-sieve")]
#[command(version)]
#[command(about = "A single-site product scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the site base URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Override the number of link-discovery levels
    #[arg(long, value_name = "N")]
    levels: Option<u32>,

    /// Override the CSV output directory
    #[arg(long, value_name = "DIR")]
    data_dir: Option<String>,

    /// Show progress logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all tracing output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without scraping
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load_effective_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            let err = shop_sieve::ShopSieveError::from(e);
            // The log path may be what failed to load; fall back to the default
            log_error(&err, Path::new(&Config::default().output.error_log));
            return ExitCode::FAILURE;
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return ExitCode::SUCCESS;
    }

    tracing::info!(
        "Scraping {} ({} levels)",
        config.site.base_url,
        config.crawler.levels
    );

    match run_pipeline(config).await {
        Ok(path) => {
            tracing::info!("Scrape completed: {}", path.display());
            ExitCode::SUCCESS
        }
        // Already reported by the error log
        Err(_) => ExitCode::FAILURE,
    }
}

/// Loads the config file (if any), applies CLI overrides, and validates
fn load_effective_config(cli: &Cli) -> Result<Config, shop_sieve::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(base_url) = &cli.base_url {
        config.site.base_url = base_url.clone();
    }
    if let Some(levels) = cli.levels {
        config.crawler.levels = levels;
    }
    if let Some(data_dir) = &cli.data_dir {
        config.output.data_dir = data_dir.clone();
    }

    validate(&config)?;
    Ok(config)
}

/// Tracing filter for a verbosity level
///
/// Without flags a run is silent apart from the one-line error report, so
/// progress logging is opt-in.
fn log_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "off";
    }

    match verbose {
        0 => "error",
        1 => "shop_sieve=info,warn",
        2 => "shop_sieve=debug,info",
        3 => "shop_sieve=trace,debug",
        _ => "trace",
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    // stdout carries the user-facing error line
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(verbose, quiet)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(config: &Config) {
    println!("=== Shop-Sieve Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Seeds: {:?}", config.site.seeds);
    println!("  Product marker: {}", config.site.product_marker);

    println!("\nCrawler:");
    println!("  Levels: {}", config.crawler.levels);
    println!("  Link selector: {}", config.crawler.link_selector);

    println!("\nTemplate:");
    for (name, rule) in [
        ("Title", &config.template.title),
        ("Price", &config.template.price),
        ("ImageURL", &config.template.image_url),
    ] {
        print!("  {}: {}", name, rule.selector);
        if let Some(attribute) = &rule.attribute {
            print!(" @{}", attribute);
        }
        if let Some(prefix) = &rule.prefix {
            print!(" (prefix {})", prefix);
        }
        println!();
    }

    println!("\nOutput:");
    println!("  Data directory: {}", config.output.data_dir);
    println!("  Error log: {}", config.output.error_log);

    println!("\n✓ Configuration is valid");
}
