//! Enumeration run accounting

use std::time::Duration;

/// Statistics for a completed enumeration run
#[derive(Debug, Clone)]
pub struct EnumerationSummary {
    /// Number of repositories processed
    pub repositories: usize,
    /// Total resource IDs listed across all repositories
    pub seeded: usize,
    /// Records whose metadata was fetched successfully
    pub fetched: usize,
    /// Records skipped because their metadata fetch failed
    pub skipped: usize,
    /// Workers that crashed instead of returning a result
    pub worker_failures: Vec<WorkerFailure>,
    /// Whether the run stopped early on the shutdown signal
    pub interrupted: bool,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

/// A worker task that panicked or was cancelled before producing output
#[derive(Debug, Clone)]
pub struct WorkerFailure {
    pub repository_id: u32,
    pub worker: usize,
    pub message: String,
}

impl EnumerationSummary {
    /// Creates an empty summary for a run over `repositories` repositories
    pub fn new(repositories: usize) -> Self {
        Self {
            repositories,
            seeded: 0,
            fetched: 0,
            skipped: 0,
            worker_failures: Vec::new(),
            interrupted: false,
            duration: Duration::ZERO,
        }
    }

    /// Records a worker that crashed before returning its chunk
    pub fn record_worker_failure(
        &mut self,
        repository_id: u32,
        worker: usize,
        message: impl Into<String>,
    ) {
        self.worker_failures.push(WorkerFailure {
            repository_id,
            worker,
            message: message.into(),
        });
    }

    /// Returns true when every listed resource produced a record
    pub fn is_complete(&self) -> bool {
        self.skipped == 0 && self.worker_failures.is_empty() && !self.interrupted
    }

    /// Percentage of listed resources that were fetched (0.0 to 100.0)
    pub fn completion_rate(&self) -> f64 {
        if self.seeded == 0 {
            return 100.0;
        }
        (self.fetched as f64 / self.seeded as f64) * 100.0
    }

    /// Logs the summary through the tracing system
    pub fn log_summary(&self) {
        tracing::info!(
            repositories = self.repositories,
            seeded = self.seeded,
            fetched = self.fetched,
            skipped = self.skipped,
            worker_failures = self.worker_failures.len(),
            interrupted = self.interrupted,
            duration_secs = self.duration.as_secs_f64(),
            completion_rate = format!("{:.1}%", self.completion_rate()),
            "Enumeration completed"
        );

        for failure in &self.worker_failures {
            tracing::warn!(
                repository_id = failure.repository_id,
                worker = failure.worker,
                message = %failure.message,
                "Worker crashed during enumeration"
            );
        }
    }
}
