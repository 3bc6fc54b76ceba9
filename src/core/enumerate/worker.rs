//! Metadata fetch worker
//!
//! Each worker owns one contiguous chunk of resource IDs and fetches their
//! metadata sequentially. A failed fetch skips that record and moves on;
//! the shutdown signal is observed between records.

use std::sync::Arc;

use tokio::sync::watch;

use crate::adapters::archivesspace::ArchivesSpaceApi;
use crate::domain::ResourceRecord;

/// How many records a worker processes between progress log lines
const PROGRESS_INTERVAL: usize = 100;

/// What one worker produced from its chunk
#[derive(Debug, Default)]
pub struct ChunkOutcome {
    /// Fetched records, in chunk order
    pub records: Vec<ResourceRecord>,
    /// Records skipped because their metadata fetch failed
    pub skipped: usize,
    /// Whether the worker stopped early on the shutdown signal
    pub interrupted: bool,
}

/// Fetches metadata for every resource ID in `chunk`
///
/// `worker` is the 1-based worker number used in log output. Fetch failures
/// are logged and counted, never propagated; the caller decides what an
/// incomplete chunk means for the run.
pub async fn fetch_chunk(
    client: Arc<dyn ArchivesSpaceApi>,
    repository_id: u32,
    chunk: Vec<u32>,
    worker: usize,
    shutdown: watch::Receiver<bool>,
) -> ChunkOutcome {
    let total = chunk.len();
    tracing::info!(worker, repository_id, total, "Worker started");

    let mut outcome = ChunkOutcome::default();

    for (index, resource_id) in chunk.into_iter().enumerate() {
        if *shutdown.borrow() {
            tracing::info!(worker, repository_id, "Worker stopping on shutdown signal");
            outcome.interrupted = true;
            break;
        }

        match client.resource(repository_id, resource_id).await {
            Ok(detail) => {
                outcome.records.push(ResourceRecord::new(
                    repository_id,
                    resource_id,
                    detail.identifiers,
                    detail.title,
                    detail.ead_id,
                ));
            }
            Err(e) => {
                tracing::warn!(
                    worker,
                    repository_id,
                    resource_id,
                    error = %e,
                    "Skipping resource, metadata fetch failed"
                );
                outcome.skipped += 1;
            }
        }

        if index > 0 && index % PROGRESS_INTERVAL == 0 {
            tracing::info!(worker, repository_id, completed = index, total, "Worker progress");
        }
    }

    outcome
}
