//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.assetlens.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Store connection settings.
    #[serde(default)]
    pub store: StoreConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "asset_report.md".to_string()
}

/// Inventory store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store, e.g. https://project.supabase.co.
    #[serde(default)]
    pub url: String,

    /// API key. The ASSETLENS_API_KEY env var or --api-key flag take
    /// precedence; leaving this empty keeps the key out of the file.
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".assetlens.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref url) = args.store_url {
            self.store.url = url.clone();
        }
        if let Some(ref api_key) = args.api_key {
            self.store.api_key = api_key.clone();
        }
        if let Some(timeout) = args.timeout {
            self.store.timeout_seconds = timeout;
        }

        // Output always has a CLI default, so it always overrides.
        self.general.output = args.output.display().to_string();

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Args, OutputFormat};
    use std::path::PathBuf;

    fn make_args() -> Args {
        Args {
            store_url: None,
            api_key: None,
            location: None,
            asset_type: None,
            model: None,
            select: None,
            output: PathBuf::from("asset_report.md"),
            format: OutputFormat::Markdown,
            config: None,
            verbose: false,
            quiet: false,
            timeout: None,
            dry_run: false,
            init_config: false,
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, "asset_report.md");
        assert_eq!(config.store.timeout_seconds, 30);
        assert!(config.store.url.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "weekly_report.md"
verbose = true

[store]
url = "https://project.supabase.co"
api_key = "secret"
timeout_seconds = 10
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "weekly_report.md");
        assert!(config.general.verbose);
        assert_eq!(config.store.url, "https://project.supabase.co");
        assert_eq!(config.store.api_key, "secret");
        assert_eq!(config.store.timeout_seconds, 10);
    }

    #[test]
    fn test_merge_keeps_config_when_args_silent() {
        let mut config: Config = toml::from_str(
            r#"
[store]
url = "https://from-config.supabase.co"
api_key = "from-config"
"#,
        )
        .unwrap();

        config.merge_with_args(&make_args());
        assert_eq!(config.store.url, "https://from-config.supabase.co");
        assert_eq!(config.store.api_key, "from-config");
    }

    #[test]
    fn test_merge_prefers_explicit_args() {
        let mut config: Config = toml::from_str(
            r#"
[store]
url = "https://from-config.supabase.co"
timeout_seconds = 10
"#,
        )
        .unwrap();

        let mut args = make_args();
        args.store_url = Some("https://from-cli.supabase.co".to_string());
        args.timeout = Some(60);

        config.merge_with_args(&args);
        assert_eq!(config.store.url, "https://from-cli.supabase.co");
        assert_eq!(config.store.timeout_seconds, 60);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[store]"));
    }
}
