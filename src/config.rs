//! Configuration management for port-lineup
//!
//! All configuration is loaded from `./config/port-lineup.toml`.
//! No hardcoded defaults exist in source code - all defaults are in the config template.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file path relative to working directory
pub const CONFIG_PATH: &str = "./config/port-lineup.toml";

/// Default configuration file content - this is the ONLY place defaults exist
pub const DEFAULT_CONFIG: &str = include_str!("../config/port-lineup.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found at {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid URL in '{field}': {url}")]
    InvalidUrl { field: String, url: String },

    #[error("Configuration field '{field}' cannot be empty")]
    EmptyRequired { field: String },
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub paranagua: ParanaguaConfig,
    pub santos: SantosConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout for static-page fetches, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User agent sent with static-page fetches
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// A mapping from 0-based cell positions to the semantic cargo fields of a row.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ColumnMap {
    pub commodity: usize,
    pub eta: usize,
    pub weight: usize,
}

/// Paranagua static lineup page
#[derive(Debug, Clone, Deserialize)]
pub struct ParanaguaConfig {
    pub url: String,
    /// Style-class signature shared by the candidate tables on the page
    #[serde(default = "default_table_class_signature")]
    pub table_class_signature: String,
    /// 0-based position of the expected-vessels table among signature matches
    #[serde(default = "default_paranagua_table_index")]
    pub table_index: usize,
    /// Rows with more cells than this use `wide_columns`, others `narrow_columns`
    #[serde(default = "default_wide_row_threshold")]
    pub wide_row_threshold: usize,
    pub wide_columns: ColumnMap,
    pub narrow_columns: ColumnMap,
}

/// Santos rendered lineup page
#[derive(Debug, Clone, Deserialize)]
pub struct SantosConfig {
    pub url: String,
    /// Explicit Chrome/Chromium binary; None lets headless_chrome locate one
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,
    /// Upper bound on waiting for script-rendered rows before giving up
    #[serde(default = "default_row_wait_timeout_secs")]
    pub row_wait_timeout_secs: u64,
    /// 0-based table index holding import rows
    pub import_table_index: usize,
    /// 0-based table index holding export rows
    pub export_table_index: usize,
    pub columns: ColumnMap,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root directory for CSV/SQLite snapshot artifacts
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_table_class_signature() -> String {
    "table table-bordered table-striped table-hover".to_string()
}

fn default_paranagua_table_index() -> usize {
    4
}

fn default_wide_row_threshold() -> usize {
    10
}

fn default_row_wait_timeout_secs() -> u64 {
    30
}

fn default_data_dir() -> String {
    "./data".to_string()
}

impl AppConfig {
    /// Load configuration from the default path
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    /// Load and validate configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default configuration template to [`CONFIG_PATH`]
    pub fn create_default_config() -> Result<PathBuf, ConfigError> {
        let path = PathBuf::from(CONFIG_PATH);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, DEFAULT_CONFIG)?;
        Ok(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("paranagua.url", &self.paranagua.url)?;
        validate_url("santos.url", &self.santos.url)?;
        if self.http.user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "http.user_agent".to_string(),
            });
        }
        if self.output.data_dir.trim().is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "output.data_dir".to_string(),
            });
        }
        Ok(())
    }
}

fn validate_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.trim().is_empty() {
        return Err(ConfigError::EmptyRequired {
            field: field.to_string(),
        });
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::InvalidUrl {
            field: field.to_string(),
            url: url.to_string(),
        });
    }
    Ok(())
}
