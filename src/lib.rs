//! TLC Fetcher Library
//!
//! A Rust library for downloading NYC TLC trip record parquet files.
//! Discovers dataset URLs from the TLC landing page, downloads them
//! concurrently with bounded parallelism and per-URL failure isolation,
//! and validates every stored file's parquet structure afterwards,
//! deleting corrupt artifacts so a later run retries them.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use config::FetcherConfig;
pub use errors::{AppError, Result};
