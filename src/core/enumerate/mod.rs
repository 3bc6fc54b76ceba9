//! Concurrent resource enumeration
//!
//! For each configured repository the enumerator lists every resource ID,
//! splits the listing into contiguous chunks, and fans the chunks out to a
//! fixed pool of fetch workers. Worker results are collected in dispatch
//! order, so the merged inventory preserves listing order whenever every
//! fetch succeeds.

pub mod chunk;
pub mod summary;
pub mod worker;

pub use summary::{EnumerationSummary, WorkerFailure};
pub use worker::ChunkOutcome;

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::watch;

use crate::adapters::archivesspace::ArchivesSpaceApi;
use crate::domain::{ResourceRecord, Result};

use chunk::chunk_items;
use worker::fetch_chunk;

/// Fixed size of the per-repository fetch worker pool
pub const WORKER_COUNT: usize = 4;

/// Result of an enumeration run
#[derive(Debug)]
pub struct EnumerationOutcome {
    /// Merged records across all repositories, in listing order per repository
    pub records: Vec<ResourceRecord>,
    /// Run accounting
    pub summary: EnumerationSummary,
}

/// Two-step enumeration pipeline: list resource IDs, then fetch metadata
pub struct Enumerator {
    client: Arc<dyn ArchivesSpaceApi>,
    repository_ids: Vec<u32>,
    shutdown: watch::Receiver<bool>,
}

impl Enumerator {
    pub fn new(
        client: Arc<dyn ArchivesSpaceApi>,
        repository_ids: Vec<u32>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            client,
            repository_ids,
            shutdown,
        }
    }

    /// Enumerates every configured repository
    ///
    /// A failed resource listing aborts the run. A failed metadata fetch
    /// skips that record. A crashed worker loses its chunk but keeps the
    /// other workers' output; the crash is recorded in the summary.
    ///
    /// # Errors
    ///
    /// Returns an error when a repository's resource listing cannot be
    /// fetched.
    pub async fn run(&self) -> Result<EnumerationOutcome> {
        let started = Instant::now();
        let mut records = Vec::new();
        let mut summary = EnumerationSummary::new(self.repository_ids.len());

        for &repository_id in &self.repository_ids {
            if *self.shutdown.borrow() {
                tracing::info!(repository_id, "Skipping repository, shutdown requested");
                summary.interrupted = true;
                break;
            }

            let ids = self.client.resource_ids(repository_id).await?;
            tracing::info!(repository_id, resources = ids.len(), "Listed repository resources");
            summary.seeded += ids.len();

            let handles: Vec<_> = chunk_items(ids, WORKER_COUNT)
                .into_iter()
                .enumerate()
                .map(|(index, chunk)| {
                    let client = Arc::clone(&self.client);
                    let shutdown = self.shutdown.clone();
                    tokio::spawn(fetch_chunk(client, repository_id, chunk, index + 1, shutdown))
                })
                .collect();

            for (index, joined) in join_all(handles).await.into_iter().enumerate() {
                let worker = index + 1;
                match joined {
                    Ok(outcome) => {
                        tracing::info!(
                            worker,
                            repository_id,
                            records = outcome.records.len(),
                            skipped = outcome.skipped,
                            "Adding worker records to result set"
                        );
                        summary.fetched += outcome.records.len();
                        summary.skipped += outcome.skipped;
                        summary.interrupted |= outcome.interrupted;
                        records.extend(outcome.records);
                    }
                    Err(e) => {
                        tracing::error!(worker, repository_id, error = %e, "Worker crashed");
                        summary.record_worker_failure(repository_id, worker, e.to_string());
                    }
                }
            }
        }

        summary.duration = started.elapsed();
        summary.log_summary();

        Ok(EnumerationOutcome { records, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::archivesspace::ResourceDetail;
    use crate::domain::ArchivesSpaceError;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};

    struct StubApi {
        repositories: HashMap<u32, Vec<u32>>,
        failing: HashSet<(u32, u32)>,
        panicking: HashSet<(u32, u32)>,
    }

    impl StubApi {
        fn new(repositories: HashMap<u32, Vec<u32>>) -> Self {
            Self {
                repositories,
                failing: HashSet::new(),
                panicking: HashSet::new(),
            }
        }

        fn failing_on(mut self, repository_id: u32, resource_id: u32) -> Self {
            self.failing.insert((repository_id, resource_id));
            self
        }

        fn panicking_on(mut self, repository_id: u32, resource_id: u32) -> Self {
            self.panicking.insert((repository_id, resource_id));
            self
        }
    }

    #[async_trait]
    impl ArchivesSpaceApi for StubApi {
        async fn resource_ids(&self, repository_id: u32) -> Result<Vec<u32>> {
            self.repositories.get(&repository_id).cloned().ok_or_else(|| {
                ArchivesSpaceError::NotFound(format!("/repositories/{repository_id}")).into()
            })
        }

        async fn resource(&self, repository_id: u32, resource_id: u32) -> Result<ResourceDetail> {
            if self.panicking.contains(&(repository_id, resource_id)) {
                panic!("simulated worker crash on resource {resource_id}");
            }
            if self.failing.contains(&(repository_id, resource_id)) {
                return Err(ArchivesSpaceError::ServerError {
                    status: 500,
                    message: "simulated failure".to_string(),
                }
                .into());
            }
            Ok(ResourceDetail {
                identifiers: format!("R{repository_id}.{resource_id}"),
                title: format!("Resource {resource_id}"),
                ead_id: String::new(),
            })
        }

        async fn raw_bytes(&self, endpoint: &str) -> Result<Vec<u8>> {
            unimplemented!("enumeration never fetches raw bytes: {endpoint}")
        }

        fn base_url(&self) -> &str {
            "http://stub.local"
        }
    }

    fn enumerator(api: StubApi, repository_ids: Vec<u32>) -> (Enumerator, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        (Enumerator::new(Arc::new(api), repository_ids, rx), tx)
    }

    #[tokio::test]
    async fn test_run_preserves_listing_order() {
        let api = StubApi::new(HashMap::from([(2, (1..=10).collect())]));
        let (enumerator, _tx) = enumerator(api, vec![2]);

        let outcome = enumerator.run().await.unwrap();

        let ids: Vec<u32> = outcome.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
        assert_eq!(outcome.summary.seeded, 10);
        assert_eq!(outcome.summary.fetched, 10);
        assert!(outcome.summary.is_complete());
    }

    #[tokio::test]
    async fn test_run_skips_failed_fetches() {
        let api = StubApi::new(HashMap::from([(2, (1..=10).collect())]))
            .failing_on(2, 3)
            .failing_on(2, 7);
        let (enumerator, _tx) = enumerator(api, vec![2]);

        let outcome = enumerator.run().await.unwrap();

        let ids: Vec<u32> = outcome.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5, 6, 8, 9, 10]);
        assert_eq!(outcome.summary.fetched, 8);
        assert_eq!(outcome.summary.skipped, 2);
        assert!(!outcome.summary.is_complete());
    }

    #[tokio::test]
    async fn test_run_merges_repositories_in_configured_order() {
        let api = StubApi::new(HashMap::from([(2, vec![10, 11]), (3, vec![20])]));
        let (enumerator, _tx) = enumerator(api, vec![2, 3]);

        let outcome = enumerator.run().await.unwrap();

        let keys: Vec<(u32, u32)> = outcome
            .records
            .iter()
            .map(|r| (r.repository_id, r.id))
            .collect();
        assert_eq!(keys, vec![(2, 10), (2, 11), (3, 20)]);
        assert_eq!(outcome.summary.repositories, 2);
    }

    #[tokio::test]
    async fn test_run_populates_record_fields() {
        let api = StubApi::new(HashMap::from([(2, vec![5])]));
        let (enumerator, _tx) = enumerator(api, vec![2]);

        let outcome = enumerator.run().await.unwrap();

        let record = &outcome.records[0];
        assert_eq!(record.repository_id, 2);
        assert_eq!(record.id, 5);
        assert_eq!(record.identifiers, "R2.5");
        assert_eq!(record.title, "Resource 5");
        assert_eq!(record.ead_id, "");
    }

    #[tokio::test]
    async fn test_run_handles_empty_repository() {
        let api = StubApi::new(HashMap::from([(2, Vec::new())]));
        let (enumerator, _tx) = enumerator(api, vec![2]);

        let outcome = enumerator.run().await.unwrap();

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.summary.seeded, 0);
        assert!(outcome.summary.is_complete());
    }

    #[tokio::test]
    async fn test_run_records_worker_crash_and_keeps_other_chunks() {
        // 8 resources across 4 workers puts IDs 3 and 4 in worker 2's chunk
        let api = StubApi::new(HashMap::from([(2, (1..=8).collect())])).panicking_on(2, 3);
        let (enumerator, _tx) = enumerator(api, vec![2]);

        let outcome = enumerator.run().await.unwrap();

        let ids: Vec<u32> = outcome.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 5, 6, 7, 8]);
        assert_eq!(outcome.summary.fetched, 6);
        assert_eq!(outcome.summary.skipped, 0);
        assert_eq!(outcome.summary.worker_failures.len(), 1);
        assert_eq!(outcome.summary.worker_failures[0].worker, 2);
        assert_eq!(outcome.summary.worker_failures[0].repository_id, 2);
        assert!(!outcome.summary.is_complete());
    }

    #[tokio::test]
    async fn test_run_fails_when_listing_fails() {
        let api = StubApi::new(HashMap::new());
        let (enumerator, _tx) = enumerator(api, vec![9]);

        let result = enumerator.run().await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown_signal() {
        let api = StubApi::new(HashMap::from([(2, vec![1]), (3, vec![2])]));
        let (enumerator, tx) = enumerator(api, vec![2, 3]);
        tx.send(true).unwrap();

        let outcome = enumerator.run().await.unwrap();

        assert!(outcome.records.is_empty());
        assert!(outcome.summary.interrupted);
        assert!(!outcome.summary.is_complete());
    }
}
