//! Structural integrity validation for downloaded parquet files
//!
//! Validation opens the file with the parquet format's own reader, which
//! parses the magic bytes, footer, and metadata without touching row data.
//! That is enough to catch truncated or garbage files left behind by an
//! interrupted download, which is the failure mode this exists for; it is
//! not a full data audit.

use std::fs::File;
use std::path::Path;

use parquet::file::reader::SerializedFileReader;
use tracing::debug;

use super::models::ValidationVerdict;

/// Classify a local file as structurally valid parquet or corrupt
///
/// Pure apart from the read: no side effects, no deletion. The caller
/// (the sweeper) decides what to do with a `Corrupt` verdict.
pub fn validate(path: &Path) -> ValidationVerdict {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            return ValidationVerdict::Corrupt {
                reason: format!("cannot open file: {}", e),
            }
        }
    };

    // Constructing the reader parses the structural envelope (header magic,
    // footer length, metadata thrift) without reading any row group data.
    match SerializedFileReader::new(file) {
        Ok(_) => {
            debug!("Validated parquet structure: {}", path.display());
            ValidationVerdict::Valid
        }
        Err(e) => ValidationVerdict::Corrupt {
            reason: e.to_string(),
        },
    }
}
