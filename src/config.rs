//! Configuration file handling
//!
//! This module manages loading and parsing configuration from ~/.cdigest.toml

use crate::formatter::OutputFormat;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Ignore pattern options
    #[serde(default)]
    pub ignore: IgnoreConfig,

    /// Display options for the console tree
    #[serde(default)]
    pub display: DisplayConfig,

    /// Output options
    #[serde(default)]
    pub output: OutputConfig,
}

/// Ignore pattern configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Use the built-in default ignore patterns
    #[serde(default = "default_true")]
    pub use_defaults: bool,

    /// Read .gitignore from the scan root
    #[serde(default = "default_true")]
    pub use_gitignore: bool,

    /// Read .cdigestignore from the scan root
    #[serde(default = "default_true")]
    pub use_ignore_file: bool,

    /// Extra ignore patterns applied to every run
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Display configuration for the console tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show file sizes by default
    #[serde(default)]
    pub show_size: bool,

    /// Show ignored entries by default
    #[serde(default)]
    pub show_ignored: bool,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format when none is given on the command line
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Maximum allowed text content size in KB
    #[serde(default = "default_max_size_kb")]
    pub max_size_kb: u64,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            use_defaults: true,
            use_gitignore: true,
            use_ignore_file: true,
            patterns: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            max_size_kb: 10240,
        }
    }
}

impl Config {
    /// Load configuration from ~/.cdigest.toml
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            log::debug!("No config file found at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }

        log::debug!("Loading config from {:?}", config_path);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }
}

/// Get the path to the config file
fn get_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::config("Could not determine home directory"))?;

    Ok(home.join(".cdigest.toml"))
}

/// Default value helpers for serde
fn default_true() -> bool {
    true
}

fn default_max_size_kb() -> u64 {
    10240
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ignore.use_defaults);
        assert!(config.ignore.use_gitignore);
        assert!(!config.display.show_ignored);
        assert_eq!(config.output.max_size_kb, 10240);
    }

    #[test]
    fn test_config_parsing() {
        let config: Config = toml::from_str(
            r#"
            [ignore]
            use_defaults = false
            patterns = ["*.generated.rs"]

            [display]
            show_size = true

            [output]
            format = "markdown"
            max_size_kb = 2048
            "#,
        )
        .unwrap();

        assert!(!config.ignore.use_defaults);
        assert!(config.ignore.use_gitignore);
        assert_eq!(config.ignore.patterns, vec!["*.generated.rs"]);
        assert!(config.display.show_size);
        assert_eq!(config.output.format, Some(OutputFormat::Markdown));
        assert_eq!(config.output.max_size_kb, 2048);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.ignore.use_defaults);
        assert_eq!(config.output.max_size_kb, 10240);
        assert_eq!(config.output.format, None);
    }
}
