//! Core data types shared across the download pipeline
//!
//! This module defines the vocabulary of the pipeline: source URLs, per-URL
//! download outcomes, and per-artifact validation verdicts. Failure states
//! are plain values here, never exceptions in disguise.

use std::fmt;

use url::Url;

use crate::errors::{DiscoveryError, DiscoveryResult, DownloadError};

/// An absolute, secure-transport URL identifying one remote dataset file
///
/// Parsing enforces the invariants once, so the rest of the pipeline can
/// rely on them: non-empty input and an `https` scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceUrl(Url);

impl SourceUrl {
    /// Parse and validate a URL string
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::InvalidUrl` if the input is empty, fails to
    /// parse, or does not use the `https` scheme.
    pub fn parse(input: &str) -> DiscoveryResult<Self> {
        if input.is_empty() {
            return Err(DiscoveryError::InvalidUrl {
                url: input.to_string(),
                reason: "empty URL".to_string(),
            });
        }

        let url = Url::parse(input).map_err(|e| DiscoveryError::InvalidUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;

        if url.scheme() != "https" {
            return Err(DiscoveryError::InvalidUrl {
                url: input.to_string(),
                reason: format!("scheme '{}' is not https", url.scheme()),
            });
        }

        Ok(Self(url))
    }

    /// The local filename this URL maps to: its final non-empty path segment
    ///
    /// Returns `None` for URLs with a trailing slash or no path, which
    /// cannot name an artifact.
    pub fn derived_filename(&self) -> Option<&str> {
        self.0
            .path_segments()
            .and_then(|segments| segments.last())
            .filter(|segment| !segment.is_empty())
    }

    /// The underlying parsed URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// The URL as a string slice
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Terminal state of one URL's download attempt
#[derive(Debug)]
pub enum DownloadStatus {
    /// Fetch and store both succeeded
    Downloaded {
        /// Number of bytes written to the store
        bytes: u64,
    },
    /// Fetch or store failed; the batch continued without this URL
    Failed {
        /// The classified failure
        error: DownloadError,
    },
}

/// Per-URL result of a coordinator run
///
/// Exactly one outcome is produced per input URL per run. Outcomes are
/// reported and logged, never persisted.
#[derive(Debug)]
pub struct DownloadOutcome {
    /// The URL this outcome describes
    pub url: SourceUrl,
    /// Terminal status of the attempt
    pub status: DownloadStatus,
}

impl DownloadOutcome {
    /// Construct a successful outcome
    pub fn downloaded(url: SourceUrl, bytes: u64) -> Self {
        Self {
            url,
            status: DownloadStatus::Downloaded { bytes },
        }
    }

    /// Construct a failed outcome
    pub fn failed(url: SourceUrl, error: DownloadError) -> Self {
        Self {
            url,
            status: DownloadStatus::Failed { error },
        }
    }

    /// Whether the download reached the store
    pub fn is_success(&self) -> bool {
        matches!(self.status, DownloadStatus::Downloaded { .. })
    }
}

/// Per-artifact result of a structural integrity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationVerdict {
    /// The file parses as a structurally sound container
    Valid,
    /// The file failed structural parsing and should be purged
    Corrupt {
        /// Parser-reported reason for the failure
        reason: String,
    },
}

impl ValidationVerdict {
    /// Whether the artifact passed validation
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationVerdict::Valid)
    }
}

impl fmt::Display for ValidationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationVerdict::Valid => write!(f, "valid"),
            ValidationVerdict::Corrupt { reason } => write!(f, "corrupt: {}", reason),
        }
    }
}
