//! ASX Mining Scanner - daily mining announcement digest
//!
//! # Usage
//!
//! ```bash
//! # Scan the sources listed in scanner_config.toml
//! asx-mining-scanner
//!
//! # Replay a saved JSON capture without sending anything
//! asx-mining-scanner --json-source capture.json --no-deliver
//!
//! # Pipe a scraper's JSON lines straight in
//! scrape_announcements | asx-mining-scanner --stdin
//!
//! # Inspect the tracked universe or validate a config file
//! asx-mining-scanner companies
//! asx-mining-scanner --config scanner_config.toml check-config
//! ```
//!
//! # Environment Variables
//!
//! - `ASX_SCANNER_CONFIG`: Path to the TOML config (if `--config` is not given)
//! - `SENDER_EMAIL`, `RECIPIENT_EMAIL`, `NOTIFY_WEBHOOK_URL`: Delivery settings
//! - `RUST_LOG`: Logging level (default: info)
//!
//! A `.env` file in the working directory is loaded first when present.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};

use asx_mining_scanner::acquisition::build_sources;
use asx_mining_scanner::{CompanyRegistry, DailyScan, Dispatcher, ScannerConfig};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "asx-mining-scanner")]
#[command(about = "Daily scanner for ASX mining company announcements")]
#[command(version)]
struct CliArgs {
    /// Path to scanner_config.toml (overrides ASX_SCANNER_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON file holding an array of announcement records (repeatable)
    #[arg(long = "json-source", value_name = "PATH")]
    json_sources: Vec<PathBuf>,

    /// Tab-separated announcement table: time, company, title (repeatable)
    #[arg(long = "listing-source", value_name = "PATH")]
    listing_sources: Vec<PathBuf>,

    /// HTTP endpoint returning JSON announcement records (repeatable)
    #[arg(long = "feed-url", value_name = "URL")]
    feed_urls: Vec<String>,

    /// Read JSON announcement records from stdin, one per line
    #[arg(long)]
    stdin: bool,

    /// Directory for saved reports (overrides report.output_dir)
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Build and save the report but do not deliver it
    #[arg(long)]
    no_deliver: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "SCANNER_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum SubCommand {
    /// Run the daily scan (default)
    Scan,
    /// Print the tracked company universe
    Companies,
    /// Load and validate the configuration, then print the effective settings
    CheckConfig,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Fold command-line source and output selections into the loaded config.
fn apply_cli_overrides(config: &mut ScannerConfig, args: &CliArgs) {
    config.sources.json_files.extend(args.json_sources.iter().cloned());
    config
        .sources
        .listing_files
        .extend(args.listing_sources.iter().cloned());
    config.sources.feed_urls.extend(args.feed_urls.iter().cloned());
    if let Some(ref dir) = args.out_dir {
        config.report.output_dir = dir.clone();
    }
}

fn print_companies(registry: &CompanyRegistry) {
    for company in registry.all() {
        println!("{:<5} {:<40} {}", company.code, company.name, company.sector);
    }
    println!();
    println!("{} companies tracked", registry.len());
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let args = CliArgs::parse();
    init_tracing(args.log_json);

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment from .env");
    }

    let mut config =
        ScannerConfig::load(args.config.as_deref()).context("Failed to load scanner configuration")?;
    config.apply_env_overrides();
    apply_cli_overrides(&mut config, &args);
    config
        .validate()
        .context("Invalid configuration after command-line overrides")?;

    let registry = Arc::new(CompanyRegistry::load(
        config.companies.supplemental_path.as_deref(),
    ));

    match args.command.unwrap_or(SubCommand::Scan) {
        SubCommand::Companies => {
            print_companies(&registry);
            return Ok(());
        }
        SubCommand::CheckConfig => {
            println!("{}", config.to_toml().context("Failed to render configuration")?);
            if !config.delivery.is_complete() {
                warn!("Delivery settings incomplete; reports will be saved but not sent");
            }
            info!(companies = registry.len(), "✓ Configuration OK");
            return Ok(());
        }
        SubCommand::Scan => {}
    }

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  ASX Mining Scanner");
    info!("  Daily mining announcement digest");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!(
        companies = registry.len(),
        keywords = config.scanning.keywords.len(),
        min_title_len = config.scanning.min_announcement_length,
        "Scan settings"
    );

    let run_date = Utc::now().date_naive();
    let sources = build_sources(&config.sources, args.stdin, run_date, Arc::clone(&registry))
        .context("Failed to initialise announcement sources")?;
    let dispatcher = Dispatcher::from_config(&config, !args.no_deliver);

    let outcome = DailyScan::new(&config, registry, sources, dispatcher)
        .run()
        .await?;

    info!("{}", outcome.stats);
    if !outcome.delivered && !args.no_deliver {
        warn!("Report saved but not delivered");
    }
    Ok(())
}
