//! Download coordination with bounded concurrency
//!
//! The coordinator owns the core loop of the pipeline: it fans a URL list
//! out into concurrent fetch-and-store tasks, gated by a semaphore so the
//! number of requests in flight never exceeds the configured limit, and
//! joins every task before returning. One URL's failure is recorded in its
//! own outcome and never cancels or fails the others; the returned vector
//! holds exactly one outcome per input URL, in input order.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::constants::workers;
use crate::errors::DownloadError;

use super::client::Fetcher;
use super::models::{DownloadOutcome, SourceUrl};
use super::store::DataStore;

/// Callback invoked once per terminal outcome, in completion order
pub type ProgressHook = Arc<dyn Fn(&DownloadOutcome) + Send + Sync>;

/// Configuration for the download coordinator
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Maximum number of downloads in flight at once
    pub max_in_flight: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            max_in_flight: workers::DEFAULT_WORKER_COUNT,
        }
    }
}

/// Orchestrator for a batch of concurrent downloads
///
/// Generic over the [`Fetcher`] seam so tests can script per-URL failures.
/// The coordinator never touches the filesystem itself; all writes go
/// through the store.
pub struct DownloadCoordinator<F: Fetcher> {
    fetcher: Arc<F>,
    store: DataStore,
    config: CoordinatorConfig,
    on_complete: Option<ProgressHook>,
}

impl<F: Fetcher> DownloadCoordinator<F> {
    /// Create a coordinator over the given fetcher and store
    pub fn new(fetcher: Arc<F>, store: DataStore, config: CoordinatorConfig) -> Self {
        Self {
            fetcher,
            store,
            config,
            on_complete: None,
        }
    }

    /// Register a hook called once per terminal outcome
    pub fn with_progress_hook(mut self, hook: ProgressHook) -> Self {
        self.on_complete = Some(hook);
        self
    }

    /// Download every URL in the batch and report one outcome per URL
    ///
    /// Completes only after every task has reached a terminal state; this
    /// is a join over all tasks, not a race. Ordering of the returned
    /// outcomes matches the input URL order regardless of completion order.
    pub async fn run(&self, urls: &[SourceUrl]) -> Vec<DownloadOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_in_flight.max(1)));
        let mut tasks: JoinSet<(usize, DownloadOutcome)> = JoinSet::new();
        let mut index_of_task = HashMap::new();
        let mut slots: Vec<Option<DownloadOutcome>> = Vec::new();
        slots.resize_with(urls.len(), || None);

        // First URL to derive a filename claims it; later URLs colliding on
        // the same name fail up front rather than silently overwriting.
        let mut claimed: HashMap<String, SourceUrl> = HashMap::new();

        for (index, url) in urls.iter().enumerate() {
            let filename = match url.derived_filename() {
                Some(name) => name.to_string(),
                None => {
                    slots[index] = Some(self.complete(DownloadOutcome::failed(
                        url.clone(),
                        DownloadError::NoFilename {
                            url: url.to_string(),
                        },
                    )));
                    continue;
                }
            };

            if let Some(first_url) = claimed.get(&filename) {
                if first_url != url {
                    slots[index] = Some(self.complete(DownloadOutcome::failed(
                        url.clone(),
                        DownloadError::FilenameCollision {
                            filename,
                            first_url: first_url.to_string(),
                        },
                    )));
                    continue;
                }
            } else {
                claimed.insert(filename.clone(), url.clone());
            }

            let handle = tasks.spawn(download_one(
                index,
                url.clone(),
                filename,
                self.fetcher.clone(),
                self.store.clone(),
                semaphore.clone(),
            ));
            index_of_task.insert(handle.id(), index);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_, (index, outcome))) => {
                    slots[index] = Some(self.complete(outcome));
                }
                Err(join_error) => {
                    // A panicked task fails its own URL only
                    if let Some(&index) = index_of_task.get(&join_error.id()) {
                        slots[index] = Some(self.complete(DownloadOutcome::failed(
                            urls[index].clone(),
                            DownloadError::TaskPanicked {
                                reason: join_error.to_string(),
                            },
                        )));
                    }
                }
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    DownloadOutcome::failed(
                        urls[index].clone(),
                        DownloadError::TaskPanicked {
                            reason: "task produced no result".to_string(),
                        },
                    )
                })
            })
            .collect()
    }

    /// Notify the progress hook and pass the outcome through
    fn complete(&self, outcome: DownloadOutcome) -> DownloadOutcome {
        if let Some(hook) = &self.on_complete {
            hook(&outcome);
        }
        outcome
    }
}

/// Fetch one URL and hand the bytes to the store
///
/// All failure paths end in a `Failed` outcome; nothing escapes the task.
async fn download_one<F: Fetcher>(
    index: usize,
    url: SourceUrl,
    filename: String,
    fetcher: Arc<F>,
    store: DataStore,
    semaphore: Arc<Semaphore>,
) -> (usize, DownloadOutcome) {
    let _permit = match semaphore.acquire_owned().await {
        Ok(permit) => permit,
        Err(e) => {
            return (
                index,
                DownloadOutcome::failed(
                    url,
                    DownloadError::TaskPanicked {
                        reason: format!("semaphore closed: {}", e),
                    },
                ),
            );
        }
    };

    info!("Downloading file '{}'", url);

    let outcome = match fetcher.fetch(&url).await {
        Ok(bytes) => {
            let size = bytes.len() as u64;
            match store.put(&filename, &bytes).await {
                Ok(()) => {
                    info!("Finished downloading file '{}' ({} bytes)", url, size);
                    DownloadOutcome::downloaded(url, size)
                }
                Err(e) => {
                    warn!("Failed to store '{}': {}", filename, e);
                    DownloadOutcome::failed(url, e.into())
                }
            }
        }
        Err(e) => {
            warn!("Failed to download '{}': {}", url, e);
            DownloadOutcome::failed(url, e)
        }
    };

    (index, outcome)
}
