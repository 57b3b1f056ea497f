//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.listjiggler.toml` files.

use crate::models::DEFAULT_TITLE;
use crate::preview::PreviewSettings;
use crate::ranking::{is_valid_persistence, DEFAULT_PERSISTENCE};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".listjiggler.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Share link settings.
    #[serde(default)]
    pub links: LinksConfig,

    /// Ranking engine settings.
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Link preview settings.
    #[serde(default)]
    pub preview: PreviewConfig,

    /// List creation settings.
    #[serde(default)]
    pub create: CreateConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Share link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Origin that share links are built under.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://listjiggler.com".to_string()
}

/// Ranking engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// RBO persistence, strictly between 0 and 1.
    #[serde(default = "default_persistence")]
    pub persistence: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            persistence: default_persistence(),
        }
    }
}

fn default_persistence() -> f64 {
    DEFAULT_PERSISTENCE
}

/// Link preview settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Items shown in a text summary.
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Provider name in oEmbed documents.
    #[serde(default = "default_provider_name")]
    pub provider_name: String,

    /// Provider URL in oEmbed documents.
    #[serde(default = "default_provider_url")]
    pub provider_url: String,

    /// Embed width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
            provider_name: default_provider_name(),
            provider_url: default_provider_url(),
            width: default_width(),
        }
    }
}

fn default_max_items() -> usize {
    5
}

fn default_provider_name() -> String {
    "List Jiggler".to_string()
}

fn default_provider_url() -> String {
    default_base_url()
}

fn default_width() -> u32 {
    400
}

/// List creation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConfig {
    /// Title used when none is given.
    #[serde(default = "default_title")]
    pub default_title: String,
}

impl Default for CreateConfig {
    fn default() -> Self {
        Self {
            default_title: default_title(),
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Check values serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_persistence(self.ranking.persistence) {
            bail!(
                "ranking.persistence must be strictly between 0 and 1, got {}",
                self.ranking.persistence
            );
        }
        if self.preview.max_items == 0 {
            bail!("preview.max_items must be at least 1");
        }
        let base_url = &self.links.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            bail!("links.base_url must start with 'http://' or 'https://'");
        }
        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref base_url) = args.base_url {
            self.links.base_url = base_url.clone();
        }

        if let Some(persistence) = args.command.persistence() {
            self.ranking.persistence = persistence;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Log level for this configuration. `quiet` wins over `general.verbose`.
    pub fn log_level(&self, quiet: bool) -> tracing::Level {
        if quiet {
            tracing::Level::ERROR
        } else if self.general.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Preview settings derived from this configuration.
    pub fn preview_settings(&self) -> PreviewSettings {
        PreviewSettings {
            max_items: self.preview.max_items,
            provider_name: self.preview.provider_name.clone(),
            provider_url: self.preview.provider_url.clone(),
            width: self.preview.width,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
