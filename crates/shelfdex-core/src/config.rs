//! Configuration management for Shelfdex.
//!
//! This module provides configuration loading, saving, and defaults.
//! Configuration is stored in TOML format in a platform-appropriate location.

use crate::error::{Result, ShelfdexError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure for Shelfdex.
///
/// ## Example Configuration File (shelfdex.toml)
///
/// ```toml
/// [general]
/// log_level = "info"
///
/// [catalog]
/// database_path = "/home/me/books.db"
/// initial_capacity = 64
///
/// [format]
/// legacy_author_concat = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Catalog storage settings
    pub catalog: CatalogConfig,

    /// On-disk format compatibility settings
    pub format: FormatConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            general: GeneralConfig::default(),
            catalog: CatalogConfig::default(),
            format: FormatConfig::default(),
        }
    }
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_level: "info".to_string(),
        }
    }
}

/// Catalog storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog file location (None = default location)
    pub database_path: Option<PathBuf>,

    /// Pre-allocation hint for a catalog created without a file
    pub initial_capacity: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            database_path: None,
            initial_capacity: 0,
        }
    }
}

/// On-disk format compatibility configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FormatConfig {
    /// Write author lists the way the legacy writer did (only the final
    /// author's last name survives). Leave off unless byte-compatibility
    /// with files it produced is required.
    pub legacy_author_concat: bool,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default config if no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        info!(path = %path.display(), "Loading configuration");
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| ShelfdexError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "Saving configuration");
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ShelfdexError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "shelfdex")
            .ok_or_else(|| ShelfdexError::config("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("shelfdex.toml"))
    }

    /// Get the default data directory path.
    pub fn default_data_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "shelfdex")
            .ok_or_else(|| ShelfdexError::config("Could not determine data directory"))?;

        Ok(dirs.data_dir().to_path_buf())
    }
}
