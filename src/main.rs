//! assetlens - analytics reports for IT asset inventories
//!
//! A CLI tool that fetches an asset inventory from a Supabase-compatible
//! store, aggregates it by location, type, model, and status, and writes
//! a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (connection, config, write failure, etc.)

mod analytics;
mod cli;
mod config;
mod models;
mod report;
mod store;

use analytics::{build_chart_data, headline, selected_models_data, AnalyticsMode};
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use models::{AnalyticsReport, Inventory, ReportMetadata};
use std::time::{Duration, Instant};
use store::{StoreClient, StoreOptions};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("assetlens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the report
    match run_report(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Report failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .assetlens.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".assetlens.toml");

    if path.exists() {
        eprintln!("⚠️  .assetlens.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .assetlens.toml")?;

    println!("✅ Created .assetlens.toml with default settings.");
    println!("   Edit it to set the store URL and timeout.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete report workflow.
async fn run_report(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    if config.store.url.is_empty() {
        anyhow::bail!(
            "No store URL configured. Pass --store-url, set ASSETLENS_STORE_URL, \
             or add it to .assetlens.toml"
        );
    }
    if config.store.api_key.is_empty() {
        anyhow::bail!("No API key configured. Pass --api-key or set ASSETLENS_API_KEY");
    }

    let client = StoreClient::new(&StoreOptions {
        url: config.store.url.clone(),
        api_key: config.store.api_key.clone(),
        timeout_seconds: config.store.timeout_seconds,
    })?;

    // Step 1: Fetch the inventory (assets plus the four lookup tables)
    println!("📥 Fetching inventory from: {}", config.store.url);
    let spinner = make_spinner(args.quiet);
    let inventory = client.fetch_inventory().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let inventory = inventory.context("Failed to fetch inventory from store")?;

    // Handle --dry-run: print table counts and exit
    if args.dry_run {
        return handle_dry_run(&inventory);
    }

    warn_unknown_filters(&args, &inventory);

    // Step 2: Run the aggregation
    let mode = args.mode();
    let filter = args.filter_criteria();
    let selection = args.selection_set();

    if mode == AnalyticsMode::Selection {
        let found = inventory
            .assets
            .iter()
            .filter(|a| selection.contains(a.id))
            .count();
        let missing = selection.len().saturating_sub(found);
        if missing > 0 {
            warn!("{} selected id(s) not present in the asset list", missing);
        }
    }

    let charts = build_chart_data(&inventory.assets, mode, &filter, &selection);
    let selected_models = match mode {
        AnalyticsMode::Selection => selected_models_data(&inventory.assets, &selection),
        AnalyticsMode::Filter => Vec::new(),
    };
    let headline = headline(&inventory.assets, mode, &filter, &selection);

    // Step 3: Build and write the report
    println!("📝 Generating report...");

    let metadata = ReportMetadata {
        store_url: config.store.url.clone(),
        generated_at: Utc::now(),
        mode: mode.as_str().to_string(),
        filters: filter.describe(),
        selected_ids: selection.len(),
        total_assets: inventory.assets.len(),
        headline: headline.clone(),
        duration_seconds: start_time.elapsed().as_secs_f64(),
    };

    let report = AnalyticsReport {
        metadata,
        charts,
        selected_models,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    std::fs::write(&config.general.output, &output)
        .with_context(|| format!("Failed to write report to {}", config.general.output))?;

    // Print summary
    println!("\n📊 Aggregation Summary:");
    println!("   {}: {}", report.metadata.headline.label, report.metadata.headline.count);
    println!(
        "   Total units: {}",
        models::ChartBundle::total_of(&report.charts.by_status)
    );
    println!(
        "   Locations: {} | Types: {} | Models shown: {} | Statuses: {}",
        report.charts.by_location.len(),
        report.charts.by_type.len(),
        report.charts.by_model.len(),
        report.charts.by_status.len()
    );
    if let Some(top) = report.charts.by_location.first() {
        println!("   Largest location: {} ({} units)", top.name, top.count);
    }
    println!("   Duration: {:.1}s", report.metadata.duration_seconds);
    println!("\n✅ Report saved to: {}", config.general.output);

    Ok(())
}

/// Handle --dry-run: print what was fetched, write nothing.
fn handle_dry_run(inventory: &Inventory) -> Result<()> {
    println!("\n🔍 Dry run: inventory fetched, no report written.\n");

    println!("   Assets:           {}", inventory.assets.len());
    println!("   Models:           {}", inventory.models.len());
    println!("   Office Locations: {}", inventory.locations.len());
    println!("   Asset Types:      {}", inventory.types.len());
    println!("   Statuses:         {}", inventory.statuses.len());

    println!("\n✅ Dry run complete.");
    Ok(())
}

/// Warn about filter values that match nothing in the lookup tables. The
/// engine treats them as exact-match strings either way; a typo just means
/// empty drill-downs.
fn warn_unknown_filters(args: &Args, inventory: &Inventory) {
    if let Some(ref location) = args.location {
        if !inventory.locations.iter().any(|l| l == location) {
            warn!("Location filter '{}' is not a known office location", location);
        }
    }
    if let Some(ref asset_type) = args.asset_type {
        if !inventory.types.iter().any(|t| t == asset_type) {
            warn!("Type filter '{}' is not a known asset type", asset_type);
        }
    }
    if let Some(ref model) = args.model {
        if !inventory.models.iter().any(|m| m == model) {
            warn!("Model filter '{}' is not a known model", model);
        }
    }
}

/// Spinner shown while the store round-trips.
fn make_spinner(quiet: bool) -> Option<ProgressBar> {
    if quiet {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );
    pb.set_message("Fetching inventory...");
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .assetlens.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
