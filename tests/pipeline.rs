//! End-to-end tests for the download-and-validate pipeline
//!
//! These tests drive the coordinator and sweeper together through the
//! public API, with a scripted fetcher standing in for the network, and
//! verify the idempotent re-run behavior: corrupt artifacts are purged by
//! the sweep and re-created by the next run.

use std::collections::HashMap;
use std::sync::Arc;

use tempfile::tempdir;

use tlc_fetcher::app::{
    CleanupSweeper, CoordinatorConfig, DataStore, DownloadCoordinator, Fetcher, SourceUrl,
};
use tlc_fetcher::errors::{DownloadError, DownloadResult};

/// A small but fully well-formed parquet file as raw bytes
fn minimal_parquet_bytes() -> Vec<u8> {
    use parquet::data_type::Int32Type;
    use parquet::file::properties::WriterProperties;
    use parquet::file::writer::SerializedFileWriter;
    use parquet::schema::parser::parse_message_type;

    let schema = Arc::new(parse_message_type("message trip { required int32 id; }").unwrap());
    let props = Arc::new(WriterProperties::builder().build());

    let mut writer = SerializedFileWriter::new(Vec::new(), schema, props).unwrap();
    let mut row_group = writer.next_row_group().unwrap();
    let mut column = row_group.next_column().unwrap().unwrap();
    column
        .typed::<Int32Type>()
        .write_batch(&[1, 2, 3], None, None)
        .unwrap();
    column.close().unwrap();
    row_group.close().unwrap();
    writer.into_inner().unwrap()
}

/// Fetcher with scripted per-URL payloads
struct ScriptedFetcher {
    payloads: HashMap<String, Vec<u8>>,
}

impl ScriptedFetcher {
    fn new(payloads: HashMap<String, Vec<u8>>) -> Self {
        Self { payloads }
    }
}

impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &SourceUrl) -> DownloadResult<Vec<u8>> {
        match self.payloads.get(url.as_str()) {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(DownloadError::Timeout { seconds: 30 }),
        }
    }
}

fn source_urls(inputs: &[&str]) -> Vec<SourceUrl> {
    inputs
        .iter()
        .map(|input| SourceUrl::parse(input).unwrap())
        .collect()
}

#[tokio::test]
async fn full_pipeline_keeps_valid_and_purges_corrupt() {
    let dir = tempdir().unwrap();
    let store = DataStore::create(dir.path()).unwrap();

    let good = minimal_parquet_bytes();
    let truncated = good[..good.len() - 10].to_vec();

    let urls = source_urls(&[
        "https://example.com/trip-data/yellow_2023-01.parquet",
        "https://example.com/trip-data/green_2023-01.parquet",
        "https://example.com/trip-data/fhv_2023-01.parquet",
    ]);
    let mut payloads = HashMap::new();
    payloads.insert(urls[0].as_str().to_string(), good.clone());
    payloads.insert(urls[1].as_str().to_string(), truncated);
    // fhv has no payload: its fetch times out

    let coordinator = DownloadCoordinator::new(
        Arc::new(ScriptedFetcher::new(payloads)),
        store.clone(),
        CoordinatorConfig { max_in_flight: 2 },
    );
    let outcomes = coordinator.run(&urls).await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_success());
    assert!(outcomes[1].is_success()); // stored fine; corruption surfaces in the sweep
    assert!(!outcomes[2].is_success());

    let report = CleanupSweeper::new(store.clone()).sweep().await.unwrap();
    assert_eq!(report.files_checked(), 2);
    assert_eq!(report.files_valid, 1);
    assert_eq!(report.files_removed, 1);
    assert_eq!(
        store.list().await.unwrap(),
        vec!["yellow_2023-01.parquet"]
    );
}

#[tokio::test]
async fn rerun_after_sweep_refetches_purged_artifact() {
    let dir = tempdir().unwrap();
    let store = DataStore::create(dir.path()).unwrap();

    let good = minimal_parquet_bytes();
    let urls = source_urls(&["https://example.com/trip-data/yellow_2023-01.parquet"]);

    // First run delivers a truncated body; the sweep purges it
    let mut bad_payloads = HashMap::new();
    bad_payloads.insert(urls[0].as_str().to_string(), good[..good.len() - 10].to_vec());
    let coordinator = DownloadCoordinator::new(
        Arc::new(ScriptedFetcher::new(bad_payloads)),
        store.clone(),
        CoordinatorConfig::default(),
    );
    coordinator.run(&urls).await;
    let report = CleanupSweeper::new(store.clone()).sweep().await.unwrap();
    assert_eq!(report.files_removed, 1);
    assert!(store.list().await.unwrap().is_empty());

    // Second run with well-formed remote content re-creates the artifact
    let mut good_payloads = HashMap::new();
    good_payloads.insert(urls[0].as_str().to_string(), good);
    let coordinator = DownloadCoordinator::new(
        Arc::new(ScriptedFetcher::new(good_payloads)),
        store.clone(),
        CoordinatorConfig::default(),
    );
    let outcomes = coordinator.run(&urls).await;
    assert!(outcomes[0].is_success());

    let report = CleanupSweeper::new(store.clone()).sweep().await.unwrap();
    assert_eq!(report.files_removed, 0);
    assert_eq!(
        store.list().await.unwrap(),
        vec!["yellow_2023-01.parquet"]
    );
}

#[tokio::test]
async fn repeated_runs_overwrite_rather_than_duplicate() {
    let dir = tempdir().unwrap();
    let store = DataStore::create(dir.path()).unwrap();

    let good = minimal_parquet_bytes();
    let urls = source_urls(&["https://example.com/trip-data/yellow_2023-01.parquet"]);
    let mut payloads = HashMap::new();
    payloads.insert(urls[0].as_str().to_string(), good);

    let coordinator = DownloadCoordinator::new(
        Arc::new(ScriptedFetcher::new(payloads)),
        store.clone(),
        CoordinatorConfig::default(),
    );
    coordinator.run(&urls).await;
    coordinator.run(&urls).await;

    assert_eq!(store.list().await.unwrap().len(), 1);
}
