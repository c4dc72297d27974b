//! Command handlers for TLC Fetcher CLI
//!
//! This module implements the command handlers that wire CLI arguments into
//! the core pipeline. Individual URL failures never fail a command; only
//! environment-level errors (unwritable data directory, bad configuration,
//! discovery producing nothing) propagate to the exit code.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::app::{
    read_url_list, write_url_list, CleanupSweeper, ClientConfig, CoordinatorConfig, DataStore,
    Discovery, DownloadCoordinator, DownloadStatus, PageDiscovery, TlcClient,
};
use crate::cli::{DownloadArgs, GlobalArgs, ListArgs, SweepArgs};
use crate::config::FetcherConfig;
use crate::errors::{DiscoveryError, Result};

/// Handle the download command
///
/// Runs the full pipeline: discovery (or URL-list replay), persistence of
/// the discovered list, the concurrent download batch, and the cleanup
/// sweep, finishing with an elapsed-time summary.
pub async fn handle_download(global: &GlobalArgs, args: DownloadArgs) -> Result<()> {
    let start = Instant::now();
    let config = resolve_download_config(global, &args)?;

    info!(
        "Starting download into {} with {} workers",
        config.data_dir.display(),
        config.workers
    );

    let client = Arc::new(build_client(&config)?);
    let store = DataStore::create(&config.data_dir)?;

    // URL list: scraped from the page, or replayed from a prior run's file
    let mut urls = match &args.urls_file {
        Some(path) => {
            let urls = read_url_list(path).await?;
            if urls.is_empty() {
                return Err(DiscoveryError::NoUrlsFound {
                    page: path.display().to_string(),
                }
                .into());
            }
            info!("Replaying {} URLs from {}", urls.len(), path.display());
            urls
        }
        None => {
            let discovery = PageDiscovery::new(client.clone(), &config.page_url)?;
            let urls = discovery.list_urls().await?;
            write_url_list(&config.url_list_file, &urls).await?;
            urls
        }
    };

    if let Some(limit) = args.limit {
        urls.truncate(limit);
        info!("Limiting batch to {} URLs", urls.len());
    }

    let progress = make_progress_bar(global.quiet, urls.len() as u64);
    let hook_bar = progress.clone();
    let coordinator = DownloadCoordinator::new(
        client,
        store.clone(),
        CoordinatorConfig {
            max_in_flight: config.workers,
        },
    )
    .with_progress_hook(Arc::new(move |_outcome: &crate::app::DownloadOutcome| {
        hook_bar.inc(1);
    }));

    let outcomes = coordinator.run(&urls).await;
    progress.finish_and_clear();

    let mut failed = 0;
    for outcome in &outcomes {
        if let DownloadStatus::Failed { error } = &outcome.status {
            failed += 1;
            warn!("Download failed for '{}': {}", outcome.url, error);
        }
    }
    info!(
        "Downloaded {}/{} files ({} failed)",
        outcomes.len() - failed,
        outcomes.len(),
        failed
    );

    if args.skip_sweep {
        info!("Skipping validation sweep");
    } else {
        let report = CleanupSweeper::new(store).sweep().await?;
        if report.files_removed > 0 {
            info!(
                "Removed {} corrupt files; re-run to retry them",
                report.files_removed
            );
        }
    }

    info!("Total time: {:.2?}", start.elapsed());
    Ok(())
}

/// Handle the sweep command
pub async fn handle_sweep(global: &GlobalArgs, args: SweepArgs) -> Result<()> {
    let mut config = load_base_config(global)?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    let store = DataStore::create(&config.data_dir)?;
    let report = CleanupSweeper::new(store).sweep().await?;

    for entry in &report.entries {
        info!("{}: {}", entry.filename, entry.verdict);
    }
    info!(
        "Sweep finished in {:.2?}: {} checked, {} valid, {} removed",
        report.elapsed,
        report.files_checked(),
        report.files_valid,
        report.files_removed
    );
    Ok(())
}

/// Handle the list command
pub async fn handle_list(global: &GlobalArgs, args: ListArgs) -> Result<()> {
    let mut config = load_base_config(global)?;
    if let Some(page_url) = args.page_url {
        config.page_url = page_url;
    }
    config.validate()?;

    let client = Arc::new(build_client(&config)?);
    let discovery = PageDiscovery::new(client, &config.page_url)?;
    let urls = discovery.list_urls().await?;

    for url in &urls {
        println!("{}", url);
    }

    if let Some(output) = args.output {
        write_url_list(&output, &urls).await?;
    }
    Ok(())
}

/// Load the base configuration, from file when `--config` is given
fn load_base_config(global: &GlobalArgs) -> Result<FetcherConfig> {
    let config = match &global.config {
        Some(path) => FetcherConfig::load(Path::new(path))?,
        None => FetcherConfig::default(),
    };
    Ok(config)
}

/// Base configuration overlaid with download command overrides
fn resolve_download_config(global: &GlobalArgs, args: &DownloadArgs) -> Result<FetcherConfig> {
    let mut config = load_base_config(global)?;
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(page_url) = &args.page_url {
        config.page_url = page_url.clone();
    }
    config.validate()?;
    Ok(config)
}

/// HTTP client configured with the run's fetch timeout
fn build_client(config: &FetcherConfig) -> Result<TlcClient> {
    let client = TlcClient::new(ClientConfig {
        request_timeout: config.fetch_timeout,
        ..Default::default()
    })?;
    Ok(client)
}

/// Progress bar over batch completion; hidden in quiet mode
fn make_progress_bar(quiet: bool, total: u64) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    ProgressBar::new(total).with_style(ProgressStyle::default_bar())
}
