//! Export run accounting

use std::time::Duration;

/// Statistics for a completed export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Identifiers requested by the caller
    pub requested: usize,
    /// Records exported (or, in dry-run mode, that would have been)
    pub exported: usize,
    /// Requests skipped because the identifier was not in the inventory
    pub missing: usize,
    /// Requests skipped because the MARC fetch failed
    pub fetch_failures: usize,
    /// Requests skipped because the output file could not be written
    pub write_failures: usize,
    /// Whether this run resolved records without writing files
    pub dry_run: bool,
    /// Whether the run stopped early on the shutdown signal
    pub interrupted: bool,
    /// Wall-clock duration of the run
    pub duration: Duration,
    /// One entry per skipped request
    pub errors: Vec<ExportError>,
}

/// Which stage of the export skipped a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// The identifier was not present in the resource inventory
    Lookup,
    /// The MARC record could not be fetched
    Fetch,
    /// The output file could not be written
    Write,
}

/// A request that was skipped, with the stage and cause
#[derive(Debug, Clone)]
pub struct ExportError {
    pub error_type: ExportErrorType,
    pub identifier: String,
    pub message: String,
}

impl ExportError {
    pub fn new(
        error_type: ExportErrorType,
        identifier: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error_type,
            identifier: identifier.into(),
            message: message.into(),
        }
    }
}

impl ExportSummary {
    /// Creates an empty summary for a run over `requested` identifiers
    pub fn new(requested: usize) -> Self {
        Self {
            requested,
            exported: 0,
            missing: 0,
            fetch_failures: 0,
            write_failures: 0,
            dry_run: false,
            interrupted: false,
            duration: Duration::ZERO,
            errors: Vec::new(),
        }
    }

    /// Total requests skipped across all stages
    pub fn skipped(&self) -> usize {
        self.missing + self.fetch_failures + self.write_failures
    }

    /// Returns true when every requested identifier was exported
    pub fn is_successful(&self) -> bool {
        self.skipped() == 0 && !self.interrupted
    }

    /// Percentage of requested identifiers that were exported (0.0 to 100.0)
    pub fn success_rate(&self) -> f64 {
        if self.requested == 0 {
            return 100.0;
        }
        (self.exported as f64 / self.requested as f64) * 100.0
    }

    /// Records a skipped request
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Logs the summary through the tracing system
    pub fn log_summary(&self) {
        tracing::info!(
            requested = self.requested,
            exported = self.exported,
            missing = self.missing,
            fetch_failures = self.fetch_failures,
            write_failures = self.write_failures,
            dry_run = self.dry_run,
            interrupted = self.interrupted,
            duration_secs = self.duration.as_secs_f64(),
            success_rate = format!("{:.1}%", self.success_rate()),
            "Export completed"
        );

        for error in &self.errors {
            tracing::warn!(
                stage = ?error.error_type,
                identifier = %error.identifier,
                message = %error.message,
                "Request skipped"
            );
        }
    }
}
