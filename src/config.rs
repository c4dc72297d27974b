//! Configuration management for TLC Fetcher
//!
//! This module provides a single TOML-loadable configuration struct with
//! zero-config defaults. CLI arguments override individual fields after
//! loading; there is no process-wide mutable configuration state.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{http, tlc, workers};
use crate::errors::{ConfigError, ConfigResult};

/// Application configuration
///
/// Constructed from defaults, optionally overlaid with a TOML file, then
/// overridden by CLI arguments. Passed explicitly into the components that
/// need it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Page scraped for dataset file links
    pub page_url: String,

    /// Directory that the store writes artifacts into
    pub data_dir: PathBuf,

    /// Side file persisting the discovered URL list
    pub url_list_file: PathBuf,

    /// Maximum number of downloads in flight at once
    pub workers: usize,

    /// Timeout applied to each individual fetch
    #[serde(with = "humantime_serde")]
    pub fetch_timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            page_url: tlc::PAGE_URL.to_string(),
            data_dir: PathBuf::from(tlc::DATA_DIR),
            url_list_file: PathBuf::from(tlc::URL_LIST_FILE),
            workers: workers::DEFAULT_WORKER_COUNT,
            fetch_timeout: http::DEFAULT_TIMEOUT,
        }
    }
}

impl FetcherConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values and return errors for invalid settings
    pub fn validate(&self) -> ConfigResult<()> {
        if self.workers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "workers".to_string(),
                value: self.workers.to_string(),
                reason: "worker count cannot be zero".to_string(),
            });
        }

        if self.workers > workers::MAX_WORKER_COUNT {
            return Err(ConfigError::InvalidValue {
                field: "workers".to_string(),
                value: self.workers.to_string(),
                reason: format!("exceeds maximum of {}", workers::MAX_WORKER_COUNT),
            });
        }

        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "fetch_timeout".to_string(),
                value: "0s".to_string(),
                reason: "fetch timeout must be non-zero".to_string(),
            });
        }

        if self.page_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "page_url".to_string(),
                value: String::new(),
                reason: "page URL cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FetcherConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.workers, workers::DEFAULT_WORKER_COUNT);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = FetcherConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "workers"
        ));
    }

    #[test]
    fn test_excessive_workers_rejected() {
        let config = FetcherConfig {
            workers: workers::MAX_WORKER_COUNT + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = FetcherConfig {
            workers: 4,
            fetch_timeout: Duration::from_secs(120),
            ..Default::default()
        };
        let serialized = toml::to_string(&config).unwrap();
        let parsed: FetcherConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.workers, 4);
        assert_eq!(parsed.fetch_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: FetcherConfig = toml::from_str("workers = 2\n").unwrap();
        assert_eq!(parsed.workers, 2);
        assert_eq!(parsed.page_url, tlc::PAGE_URL);
    }

    #[test]
    fn test_missing_file_reported() {
        let result = FetcherConfig::load(Path::new("/nonexistent/tlc_fetcher.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }
}
