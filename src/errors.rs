//! Error types for TLC Fetcher
//!
//! This module defines error types for all components of the application.
//! Per-URL and per-file failures are carried as values inside outcomes and
//! verdicts rather than thrown across task boundaries; only environment-level
//! failures propagate through these types to the top of the program.

use std::path::PathBuf;

use thiserror::Error;

/// Download and HTTP client errors
///
/// Every variant describes the failure of a single URL's download attempt.
/// These never abort a batch; the coordinator records them in the per-URL
/// outcome and moves on.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("Download timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Connection to the remote host could not be established
    #[error("Connection failed: {message}")]
    Connect { message: String },

    /// Server returned a non-success status
    #[error("Server error: HTTP {status}")]
    ServerError { status: u16 },

    /// URL has no usable final path segment to derive a filename from
    #[error("URL has no derivable filename: {url}")]
    NoFilename { url: String },

    /// Two distinct URLs in one batch map to the same local filename
    #[error("Filename collision: '{filename}' already claimed by {first_url}")]
    FilenameCollision { filename: String, first_url: String },

    /// A download task panicked; the outcome is recorded for its URL only
    #[error("Download task panicked: {reason}")]
    TaskPanicked { reason: String },

    /// Store failed to persist the fetched bytes
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Local artifact store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Data directory cannot be created or is not writable.
    /// This is the fatal environment error class: no partial progress is
    /// meaningful without a writable store.
    #[error("Data directory not writable: {path}")]
    DirectoryNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filename contains path separators or parent-directory components
    #[error("Invalid artifact filename: {name}")]
    InvalidFilename { name: String },

    /// I/O error during a store operation
    #[error("Store I/O error")]
    Io(#[from] std::io::Error),
}

/// URL discovery and URL-list persistence errors
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// HTTP request for the source page failed
    #[error("Failed to fetch source page: {0}")]
    Page(#[from] DownloadError),

    /// Invalid CSS selector (programming error surfaced as data)
    #[error("Invalid CSS selector: {selector}")]
    InvalidSelector { selector: String },

    /// Discovery completed but produced no URLs
    #[error("No dataset URLs found on {page}")]
    NoUrlsFound { page: String },

    /// A URL failed SourceUrl validation
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// I/O error reading or writing the persisted URL list
    #[error("URL list file I/O error")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// I/O error reading the configuration file
    #[error("Configuration file I/O error")]
    Io(#[from] std::io::Error),
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Discovery error
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Download(_) => "download",
            AppError::Store(_) => "store",
            AppError::Discovery(_) => "discovery",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }

    /// Whether the error names an environment condition that aborts the run
    /// (as opposed to a contained per-URL failure that was escalated for
    /// reporting purposes only)
    pub fn is_fatal_environment(&self) -> bool {
        matches!(
            self,
            AppError::Store(StoreError::DirectoryNotWritable { .. })
                | AppError::Config(_)
                | AppError::Discovery(DiscoveryError::NoUrlsFound { .. })
        )
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Store result type alias
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Discovery result type alias
pub type DiscoveryResult<T> = std::result::Result<T, DiscoveryError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let err = AppError::from(DownloadError::Timeout { seconds: 30 });
        assert_eq!(err.category(), "download");

        let err = AppError::from(DiscoveryError::NoUrlsFound {
            page: "https://example.com".to_string(),
        });
        assert_eq!(err.category(), "discovery");
        assert!(err.is_fatal_environment());
    }

    #[test]
    fn test_download_errors_are_not_fatal() {
        let err = AppError::from(DownloadError::ServerError { status: 503 });
        assert!(!err.is_fatal_environment());
    }

    #[test]
    fn test_error_display_contains_context() {
        let err = DownloadError::FilenameCollision {
            filename: "trip.parquet".to_string(),
            first_url: "https://example.com/a/trip.parquet".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("trip.parquet"));
        assert!(message.contains("https://example.com/a/trip.parquet"));
    }
}
