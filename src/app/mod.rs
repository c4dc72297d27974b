//! Core application logic for TLC Fetcher
//!
//! This module contains the download pipeline components: the HTTP client,
//! the artifact store, the parquet validator, the download coordinator, the
//! cleanup sweeper, and URL discovery. The pipeline runs them in order:
//! discovery produces the URL list, the coordinator fetches and stores each
//! file concurrently, and the sweeper purges anything that fails structural
//! validation so a later run can retry it.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tlc_fetcher::app::{
//!     CleanupSweeper, CoordinatorConfig, DataStore, Discovery, DownloadCoordinator,
//!     PageDiscovery, TlcClient,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(TlcClient::new_default()?);
//! let store = DataStore::create("data")?;
//!
//! let discovery = PageDiscovery::new(client.clone(), tlc_fetcher::constants::PAGE_URL)?;
//! let urls = discovery.list_urls().await?;
//!
//! let coordinator = DownloadCoordinator::new(client, store.clone(), CoordinatorConfig::default());
//! let outcomes = coordinator.run(&urls).await;
//! println!("{} downloads succeeded", outcomes.iter().filter(|o| o.is_success()).count());
//!
//! let report = CleanupSweeper::new(store).sweep().await?;
//! println!("{} corrupt files removed", report.files_removed);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod coordinator;
pub mod discovery;
pub mod models;
pub mod store;
pub mod sweeper;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main public API
pub use client::{ClientConfig, Fetcher, TlcClient};
pub use coordinator::{CoordinatorConfig, DownloadCoordinator, ProgressHook};
pub use discovery::{read_url_list, write_url_list, Discovery, PageDiscovery};
pub use models::{DownloadOutcome, DownloadStatus, SourceUrl, ValidationVerdict};
pub use store::DataStore;
pub use sweeper::{CleanupSweeper, SweepEntry, SweepReport};
pub use validator::validate;
