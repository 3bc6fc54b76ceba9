//! MARC21 XML export
//!
//! Resolves each requested identifier against the resource inventory,
//! fetches the record's MARC21 serialization, and writes it to the output
//! directory. Every failure past configuration is scoped to the single
//! request that caused it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;

use crate::adapters::archivesspace::ArchivesSpaceApi;
use crate::core::store::ResourceLookup;
use crate::domain::Result;

use super::summary::{ExportError, ExportErrorType, ExportSummary};

/// Writes MARC21 XML files for requested resource identifiers
pub struct MarcExporter {
    client: Arc<dyn ArchivesSpaceApi>,
    output_dir: PathBuf,
    date_tag: String,
    dry_run: bool,
    shutdown: watch::Receiver<bool>,
}

impl MarcExporter {
    pub fn new(
        client: Arc<dyn ArchivesSpaceApi>,
        output_dir: impl Into<PathBuf>,
        date_tag: impl Into<String>,
        dry_run: bool,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
            date_tag: date_tag.into(),
            dry_run,
            shutdown,
        }
    }

    /// Exports every identifier in `requests`, in order
    ///
    /// Skipped requests are logged and counted in the summary; the run only
    /// stops early on the shutdown signal.
    pub async fn export_all(&self, lookup: &ResourceLookup, requests: &[String]) -> ExportSummary {
        let started = Instant::now();
        let mut summary = ExportSummary::new(requests.len());
        summary.dry_run = self.dry_run;

        tracing::info!(
            requests = requests.len(),
            inventory = lookup.len(),
            output_dir = %self.output_dir.display(),
            date_tag = %self.date_tag,
            dry_run = self.dry_run,
            "Starting export"
        );

        for identifier in requests {
            if *self.shutdown.borrow() {
                tracing::info!("Export stopping on shutdown signal");
                summary.interrupted = true;
                break;
            }

            self.export_one(lookup, identifier, &mut summary).await;
        }

        summary.duration = started.elapsed();
        summary.log_summary();
        summary
    }

    async fn export_one(&self, lookup: &ResourceLookup, identifier: &str, summary: &mut ExportSummary) {
        let record = match lookup.get(identifier) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(identifier, error = %e, "Skipping request, identifier not in inventory");
                summary.missing += 1;
                summary.add_error(ExportError::new(ExportErrorType::Lookup, identifier, e.to_string()));
                return;
            }
        };

        let file_name = record.export_file_name(&self.date_tag);

        if self.dry_run {
            tracing::info!(identifier, file = %file_name, "Dry run - would export");
            summary.exported += 1;
            return;
        }

        let bytes = match self.client.raw_bytes(&record.marc21_endpoint()).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(identifier, error = %e, "Skipping request, MARC fetch failed");
                summary.fetch_failures += 1;
                summary.add_error(ExportError::new(ExportErrorType::Fetch, identifier, e.to_string()));
                return;
            }
        };

        match self.write_file(&file_name, &bytes) {
            Ok(path) => {
                tracing::info!(
                    identifier,
                    path = %path.display(),
                    bytes = bytes.len(),
                    "Exported MARC record"
                );
                summary.exported += 1;
            }
            Err(e) => {
                tracing::warn!(identifier, error = %e, "Skipping request, file write failed");
                summary.write_failures += 1;
                summary.add_error(ExportError::new(ExportErrorType::Write, identifier, e.to_string()));
            }
        }
    }

    /// Writes one MARC file into the output directory
    ///
    /// Written files are world-writable so the downstream pickup process,
    /// which runs as a different user, can move and delete them.
    fn write_file(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        fs::write(&path, bytes)?;
        set_pickup_permissions(&path)?;
        Ok(path)
    }
}

#[cfg(unix)]
fn set_pickup_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o666))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_pickup_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::archivesspace::ResourceDetail;
    use crate::domain::{ArchivesSpaceError, ResourceRecord};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tempfile::tempdir;

    struct StubMarcSource {
        responses: HashMap<String, Vec<u8>>,
    }

    impl StubMarcSource {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
            }
        }

        fn with_marc(mut self, endpoint: &str, body: &str) -> Self {
            self.responses.insert(endpoint.to_string(), body.as_bytes().to_vec());
            self
        }
    }

    #[async_trait]
    impl ArchivesSpaceApi for StubMarcSource {
        async fn resource_ids(&self, _repository_id: u32) -> crate::domain::Result<Vec<u32>> {
            unimplemented!("export never lists resources")
        }

        async fn resource(
            &self,
            _repository_id: u32,
            _resource_id: u32,
        ) -> crate::domain::Result<ResourceDetail> {
            unimplemented!("export never fetches metadata")
        }

        async fn raw_bytes(&self, endpoint: &str) -> crate::domain::Result<Vec<u8>> {
            self.responses.get(endpoint).cloned().ok_or_else(|| {
                ArchivesSpaceError::NotFound(endpoint.to_string()).into()
            })
        }

        fn base_url(&self) -> &str {
            "http://stub.local"
        }
    }

    fn lookup_with(records: Vec<ResourceRecord>) -> ResourceLookup {
        ResourceLookup::build(records, "resources.tsv").unwrap()
    }

    fn exporter(
        api: StubMarcSource,
        output_dir: &Path,
        dry_run: bool,
    ) -> (MarcExporter, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        let exporter = MarcExporter::new(Arc::new(api), output_dir, "20240117", dry_run, rx);
        (exporter, tx)
    }

    #[tokio::test]
    async fn test_export_writes_named_file() {
        let dir = tempdir().unwrap();
        let api = StubMarcSource::new()
            .with_marc("/repositories/2/resources/marc21/17.xml", "<record/>");
        let lookup = lookup_with(vec![ResourceRecord::new(
            2,
            17,
            "ABC123",
            "Sample Collection",
            "us-ct-abc123",
        )]);
        let (exporter, _tx) = exporter(api, dir.path(), false);

        let summary = exporter.export_all(&lookup, &["ABC123".to_string()]).await;

        assert!(summary.is_successful());
        assert_eq!(summary.exported, 1);
        let written = dir.path().join("us-ct-abc123_20240117.xml");
        assert_eq!(fs::read_to_string(written).unwrap(), "<record/>");
    }

    #[tokio::test]
    async fn test_export_falls_back_to_identifiers_for_file_name() {
        let dir = tempdir().unwrap();
        let api = StubMarcSource::new()
            .with_marc("/repositories/3/resources/marc21/9.xml", "<record/>");
        let lookup = lookup_with(vec![ResourceRecord::new(3, 9, "MSS.44", "Papers", "")]);
        let (exporter, _tx) = exporter(api, dir.path(), false);

        let summary = exporter.export_all(&lookup, &["MSS.44".to_string()]).await;

        assert_eq!(summary.exported, 1);
        assert!(dir.path().join("MSS.44_20240117.xml").exists());
    }

    #[tokio::test]
    async fn test_unknown_identifier_is_skipped_and_run_continues() {
        let dir = tempdir().unwrap();
        let api = StubMarcSource::new()
            .with_marc("/repositories/2/resources/marc21/1.xml", "<record/>");
        let lookup = lookup_with(vec![ResourceRecord::new(2, 1, "KNOWN", "Known", "")]);
        let (exporter, _tx) = exporter(api, dir.path(), false);

        let requests = vec!["GHOST".to_string(), "KNOWN".to_string()];
        let summary = exporter.export_all(&lookup, &requests).await;

        assert_eq!(summary.missing, 1);
        assert_eq!(summary.exported, 1);
        assert!(!summary.is_successful());
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].error_type, ExportErrorType::Lookup);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_skipped_and_run_continues() {
        let dir = tempdir().unwrap();
        let api = StubMarcSource::new()
            .with_marc("/repositories/2/resources/marc21/2.xml", "<record/>");
        let lookup = lookup_with(vec![
            ResourceRecord::new(2, 1, "FAILS", "Failing", ""),
            ResourceRecord::new(2, 2, "WORKS", "Working", ""),
        ]);
        let (exporter, _tx) = exporter(api, dir.path(), false);

        let requests = vec!["FAILS".to_string(), "WORKS".to_string()];
        let summary = exporter.export_all(&lookup, &requests).await;

        assert_eq!(summary.fetch_failures, 1);
        assert_eq!(summary.exported, 1);
        assert!(dir.path().join("WORKS_20240117.xml").exists());
        assert!(!dir.path().join("FAILS_20240117.xml").exists());
    }

    #[tokio::test]
    async fn test_dry_run_resolves_without_writing() {
        let dir = tempdir().unwrap();
        let api = StubMarcSource::new();
        let lookup = lookup_with(vec![ResourceRecord::new(2, 17, "ABC123", "Sample", "")]);
        let (exporter, _tx) = exporter(api, dir.path(), true);

        let requests = vec!["ABC123".to_string(), "GHOST".to_string()];
        let summary = exporter.export_all(&lookup, &requests).await;

        assert!(summary.dry_run);
        assert_eq!(summary.exported, 1);
        assert_eq!(summary.missing, 1);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_stops_between_requests() {
        let dir = tempdir().unwrap();
        let api = StubMarcSource::new();
        let lookup = lookup_with(vec![ResourceRecord::new(2, 1, "A", "A", "")]);
        let (exporter, tx) = exporter(api, dir.path(), false);
        tx.send(true).unwrap();

        let summary = exporter.export_all(&lookup, &["A".to_string()]).await;

        assert!(summary.interrupted);
        assert_eq!(summary.exported, 0);
        assert_eq!(summary.skipped(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exported_file_is_world_writable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let api = StubMarcSource::new()
            .with_marc("/repositories/2/resources/marc21/17.xml", "<record/>");
        let lookup = lookup_with(vec![ResourceRecord::new(2, 17, "ABC123", "Sample", "")]);
        let (exporter, _tx) = exporter(api, dir.path(), false);

        exporter.export_all(&lookup, &["ABC123".to_string()]).await;

        let path = dir.path().join("ABC123_20240117.xml");
        let mode = fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o666);
    }
}
