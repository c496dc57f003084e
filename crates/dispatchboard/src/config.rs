//! Configuration management for dispatchboard.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::views::{OutputFormat, ViewOptions};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "dispatchboard";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `DISPATCHBOARD_`)
/// 2. TOML config file at `~/.config/dispatchboard/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset configuration.
    pub dataset: DatasetConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Where shipments and drivers come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to a JSON dataset.
    /// Defaults to the dataset bundled with the binary.
    pub path: Option<PathBuf>,
    /// Check shipment/driver invariants when loading.
    pub validate: bool,
}

/// How views are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Default output format when a command does not override it.
    pub format: OutputFormat,
    /// Show driver contact details.
    pub show_contacts: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            validate: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            show_contacts: true,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        debug!("Loading configuration from {}", config_file.display());

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("DISPATCHBOARD_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.dataset.path {
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if !is_json {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "dataset path must be a .json file: {}",
                        path.display()
                    ),
                });
            }
        }

        Ok(())
    }

    /// The configured dataset path, if not using the bundled one.
    #[must_use]
    pub fn dataset_path(&self) -> Option<&Path> {
        self.dataset.path.as_deref()
    }

    /// Load the configured dataset, validating it unless disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be read or parsed, or breaks
    /// an invariant while validation is enabled.
    pub fn load_dataset(&self) -> Result<Dataset> {
        let dataset = match self.dataset_path() {
            Some(path) => Dataset::from_path(path)?,
            None => Dataset::bundled()?,
        };
        if self.dataset.validate {
            dataset.validate()?;
        }
        Ok(dataset)
    }

    /// View options derived from the display section.
    #[must_use]
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            format: self.display.format,
            show_contacts: self.display.show_contacts,
        }
    }
}
