//! Post-download cleanup of corrupt artifacts
//!
//! The sweeper runs strictly after a coordinator batch has completed, so it
//! never validates a file mid-write. It lists everything resident in the
//! store, validates each file's parquet structure, and deletes every file
//! that fails, so the next run re-fetches it. Sweeping an unchanged store
//! again yields the same verdicts and deletes nothing.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::errors::StoreResult;

use super::models::ValidationVerdict;
use super::store::DataStore;
use super::validator;

/// One swept file and its verdict
#[derive(Debug, Clone)]
pub struct SweepEntry {
    /// Artifact filename within the store
    pub filename: String,
    /// Validation result for the artifact
    pub verdict: ValidationVerdict,
}

/// Summary of one full sweep pass
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Per-file verdicts, in store listing order
    pub entries: Vec<SweepEntry>,
    /// Files that passed validation
    pub files_valid: usize,
    /// Corrupt files successfully removed
    pub files_removed: usize,
    /// Corrupt files that could not be removed
    pub removal_failures: usize,
    /// Total sweep time
    pub elapsed: Duration,
}

impl SweepReport {
    /// Total files checked
    pub fn files_checked(&self) -> usize {
        self.entries.len()
    }
}

/// Validate-and-purge pass over the whole store
#[derive(Debug, Clone)]
pub struct CleanupSweeper {
    store: DataStore,
}

impl CleanupSweeper {
    /// Create a sweeper over the given store
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    /// Validate every resident file and delete those that are corrupt
    ///
    /// # Errors
    ///
    /// Only store listing failures propagate. A corrupt verdict is handled
    /// by deletion, and a failed deletion is logged and counted in the
    /// report rather than escalated.
    pub async fn sweep(&self) -> StoreResult<SweepReport> {
        let start = Instant::now();
        let mut report = SweepReport::default();

        for filename in self.store.list().await? {
            let verdict = validator::validate(&self.store.path_of(&filename));

            match &verdict {
                ValidationVerdict::Valid => {
                    report.files_valid += 1;
                }
                ValidationVerdict::Corrupt { reason } => {
                    info!("Deleting corrupted file '{}': {}", filename, reason);
                    match self.store.delete(&filename).await {
                        Ok(()) => report.files_removed += 1,
                        Err(e) => {
                            warn!("Failed to delete corrupted file '{}': {}", filename, e);
                            report.removal_failures += 1;
                        }
                    }
                }
            }

            report.entries.push(SweepEntry { filename, verdict });
        }

        report.elapsed = start.elapsed();
        info!(
            "Sweep complete: {} checked, {} valid, {} removed",
            report.files_checked(),
            report.files_valid,
            report.files_removed
        );
        Ok(report)
    }
}
