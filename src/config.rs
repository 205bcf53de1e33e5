//! Configuration for satzone
//!
//! Loaded from an optional TOML file (`--config`); command-line flags
//! override individual fields.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Runtime configuration
///
/// # Example
/// ```
/// use satzone::config::SatzoneConfig;
///
/// let config = SatzoneConfig::default();
/// assert_eq!(config.max_transactions, 100);
/// assert_eq!(config.min_transactions, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SatzoneConfig {
    /// Base URL of the ledger-data API
    pub api_base_url: String,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,

    /// Most recent transactions fetched per address
    ///
    /// Bounds inference cost; the engine itself is linear in this number.
    pub max_transactions: usize,

    /// Minimum total transactions (ins + outs) for an address summary row
    /// to be kept
    pub min_transactions: u64,
}

impl Default for SatzoneConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://blockchain.info".to_string(),
            request_timeout_secs: 30,
            max_transactions: 100,
            min_transactions: 20,
        }
    }
}

impl SatzoneConfig {
    /// Load from a TOML file; missing keys take default values
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_base_url must start with http:// or https://, got {}",
                self.api_base_url
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }

        if self.max_transactions == 0 {
            return Err(ConfigError::Invalid(
                "max_transactions must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
