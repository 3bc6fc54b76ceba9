//! Integration tests for graceful shutdown functionality
//!
//! These tests verify that:
//! - Shutdown signals are properly handled
//! - The enumerate phase stops between repositories and between records
//! - The export phase stops between requests
//! - Interrupted runs are reported as interrupted, not as failures

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use marcexport::adapters::archivesspace::{ArchivesSpaceApi, ResourceDetail};
use marcexport::core::enumerate::{EnumerationSummary, Enumerator};
use marcexport::core::export::{ExportSummary, MarcExporter};
use marcexport::core::store::ResourceLookup;
use marcexport::domain::{ResourceRecord, Result};

/// Test double that requests shutdown from inside the first metadata fetch
struct SignalingApi {
    shutdown_tx: watch::Sender<bool>,
    listings: AtomicUsize,
}

#[async_trait]
impl ArchivesSpaceApi for SignalingApi {
    async fn resource_ids(&self, _repository_id: u32) -> Result<Vec<u32>> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        Ok((1..=8).collect())
    }

    async fn resource(&self, repository_id: u32, resource_id: u32) -> Result<ResourceDetail> {
        let _ = self.shutdown_tx.send(true);
        Ok(ResourceDetail {
            identifiers: format!("R{repository_id}.{resource_id}"),
            title: format!("Resource {resource_id}"),
            ead_id: String::new(),
        })
    }

    async fn raw_bytes(&self, endpoint: &str) -> Result<Vec<u8>> {
        unimplemented!("never fetched in shutdown tests: {endpoint}")
    }

    fn base_url(&self) -> &str {
        "http://stub.local"
    }
}

/// Test double that fails the whole test if any request reaches it
struct UnreachableApi;

#[async_trait]
impl ArchivesSpaceApi for UnreachableApi {
    async fn resource_ids(&self, repository_id: u32) -> Result<Vec<u32>> {
        panic!("unexpected listing of repository {repository_id}")
    }

    async fn resource(&self, _repository_id: u32, resource_id: u32) -> Result<ResourceDetail> {
        panic!("unexpected metadata fetch for resource {resource_id}")
    }

    async fn raw_bytes(&self, endpoint: &str) -> Result<Vec<u8>> {
        panic!("unexpected MARC fetch for {endpoint}")
    }

    fn base_url(&self) -> &str {
        "http://stub.local"
    }
}

#[tokio::test]
async fn test_shutdown_signal_channel_creation() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    assert!(!*shutdown_rx.borrow());

    shutdown_tx.send(true).unwrap();

    assert!(*shutdown_rx.borrow());
}

#[tokio::test]
async fn test_shutdown_signal_propagation() {
    let (shutdown_tx, shutdown_rx1) = watch::channel(false);
    let shutdown_rx2 = shutdown_rx1.clone();

    assert!(!*shutdown_rx1.borrow());
    assert!(!*shutdown_rx2.borrow());

    shutdown_tx.send(true).unwrap();

    assert!(*shutdown_rx1.borrow());
    assert!(*shutdown_rx2.borrow());
}

#[tokio::test]
async fn test_enumerator_stops_before_next_repository_after_signal() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let api = Arc::new(SignalingApi {
        shutdown_tx,
        listings: AtomicUsize::new(0),
    });

    let enumerator = Enumerator::new(api.clone(), vec![1, 2], shutdown_rx);
    let outcome = enumerator.run().await.unwrap();

    // The signal fires during the first repository's fetches, so the second
    // repository is never listed
    assert_eq!(api.listings.load(Ordering::SeqCst), 1);
    assert!(outcome.summary.interrupted);
    assert!(!outcome.summary.is_complete());
    assert_eq!(outcome.summary.seeded, 8);
    assert!(!outcome.records.is_empty());
    assert!(outcome.records.len() <= 8);
}

#[tokio::test]
async fn test_exporter_stops_before_first_request_when_signal_pre_sent() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    shutdown_tx.send(true).unwrap();

    let lookup = ResourceLookup::build(
        vec![ResourceRecord::new(2, 1, "MSS.001", "Papers", "")],
        "resources.tsv",
    )
    .unwrap();

    let work_dir = tempfile::tempdir().unwrap();
    let exporter = MarcExporter::new(
        Arc::new(UnreachableApi),
        work_dir.path(),
        "20240117",
        false,
        shutdown_rx,
    );

    let summary = exporter.export_all(&lookup, &["MSS.001".to_string()]).await;

    assert!(summary.interrupted);
    assert_eq!(summary.exported, 0);
    assert_eq!(summary.skipped(), 0);
    assert!(!summary.is_successful());
}

#[test]
fn test_enumeration_summary_interrupted_flag() {
    let mut summary = EnumerationSummary::new(3);

    assert!(!summary.interrupted);
    assert!(summary.is_complete());

    // Progress made before the interruption is preserved
    summary.seeded = 100;
    summary.fetched = 40;
    summary.interrupted = true;

    assert_eq!(summary.fetched, 40);
    assert!(!summary.is_complete());
}

#[test]
fn test_export_summary_interrupted_flag() {
    let mut summary = ExportSummary::new(10);

    assert!(!summary.interrupted);

    summary.exported = 4;
    summary.interrupted = true;

    assert_eq!(summary.exported, 4);
    assert!(!summary.is_successful());
}
