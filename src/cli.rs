//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::analytics::{AnalyticsMode, FilterCriteria, SelectionSet};
use clap::Parser;
use std::path::PathBuf;

/// assetlens - analytics reports for IT asset inventories
///
/// Fetches the asset inventory from a Supabase-compatible store,
/// aggregates it by location, type, model, and status, and writes a
/// Markdown or JSON report.
///
/// Examples:
///   assetlens --store-url https://project.supabase.co --api-key $KEY
///   assetlens --store-url https://project.supabase.co --location "Berlin"
///   assetlens --store-url https://project.supabase.co --type Laptop --format json
///   assetlens --store-url https://project.supabase.co --select 12,14,89
///   assetlens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Base URL of the inventory store
    ///
    /// E.g. https://project.supabase.co. Can also be set via the
    /// ASSETLENS_STORE_URL env var or .assetlens.toml config.
    #[arg(short = 'u', long, value_name = "URL", env = "ASSETLENS_STORE_URL")]
    pub store_url: Option<String>,

    /// API key for the store
    ///
    /// Sent as `apikey` and bearer token. Prefer the env var over the flag
    /// so the key stays out of shell history.
    #[arg(long, value_name = "KEY", env = "ASSETLENS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Only drill into assets at this office location (exact name)
    #[arg(short, long, value_name = "NAME")]
    pub location: Option<String>,

    /// Only drill into assets of this type (exact name)
    #[arg(short = 't', long = "type", value_name = "NAME")]
    pub asset_type: Option<String>,

    /// Only drill into assets of this model (exact name)
    #[arg(short, long, value_name = "NAME")]
    pub model: Option<String>,

    /// Aggregate over a hand-picked set of asset ids (comma-separated)
    ///
    /// Switches to selection mode, which is exclusive with the dimension
    /// filters above.
    #[arg(
        long,
        value_name = "IDS",
        value_delimiter = ',',
        conflicts_with_all = ["location", "asset_type", "model"]
    )]
    pub select: Option<Vec<i64>>,

    /// Output file path for the report
    #[arg(short, long, default_value = "asset_report.md", value_name = "FILE")]
    pub output: PathBuf,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .assetlens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Dry run: fetch the inventory and print table counts without
    /// writing a report
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .assetlens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref url) = self.store_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Store URL must start with 'http://' or 'https://'".to_string());
            }
        }

        // Selection mode and filter mode are mutually exclusive
        if self.select.is_some()
            && (self.location.is_some() || self.asset_type.is_some() || self.model.is_some())
        {
            return Err("--select cannot be combined with dimension filters".to_string());
        }

        if let Some(ref ids) = self.select {
            if ids.is_empty() {
                return Err("--select requires at least one asset id".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        Ok(())
    }

    /// Which aggregation mode these arguments ask for.
    pub fn mode(&self) -> AnalyticsMode {
        if self.select.is_some() {
            AnalyticsMode::Selection
        } else {
            AnalyticsMode::Filter
        }
    }

    /// The dimension filters as engine criteria.
    pub fn filter_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            location: self.location.clone(),
            asset_type: self.asset_type.clone(),
            model: self.model.clone(),
        }
    }

    /// The selected asset ids as an engine selection set.
    pub fn selection_set(&self) -> SelectionSet {
        let mut selection = SelectionSet::new();
        if let Some(ref ids) = self.select {
            selection.select_all(ids.iter().copied());
        }
        selection
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
