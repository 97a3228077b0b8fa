//! Configuration management
//!
//! This module handles loading and saving the bu configuration file.
//! The configuration file is stored in TOML format at ~/.config/bu/config.toml
//! and holds the database location plus output defaults; every value can be
//! overridden per invocation with CLI flags.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Default database path, relative to the working directory
const DEFAULT_DATABASE_PATH: &str = "users.db";

/// Default field separator for file output
const DEFAULT_SEPARATOR: &str = ";";

/// Default output filename when the destination is a directory
const DEFAULT_FILENAME: &str = "banned_users.csv";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// File output defaults
    #[serde(default)]
    pub output: OutputDefaults,
}

/// Location of the SQLite user database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

/// Defaults for the file output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDefaults {
    /// Field separator for delimited output
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Filename appended when the destination names a directory
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_filename() -> String {
    DEFAULT_FILENAME.to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for OutputDefaults {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            filename: default_filename(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            database: DatabaseConfig::default(),
            output: OutputDefaults::default(),
        }
    }
}

/// Configuration manager handles loading and saving config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        let config_path = config_dir.join("bu").join("config.toml");
        Ok(Self { config_path })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    /// If the schema version doesn't match, attempts migration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        if config.schema_version < SCHEMA_VERSION {
            config = self.migrate(config)?;
        } else if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade bu.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(config)
    }

    /// Save configuration to disk, creating parent directories if needed.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        Ok(())
    }

    /// Migrate configuration from older schema version
    fn migrate(&self, config: Config) -> Result<Config> {
        let mut config = config;

        // Add migration logic here when the schema version is bumped.

        config.schema_version = SCHEMA_VERSION;
        Ok(config)
    }
}
