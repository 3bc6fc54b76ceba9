//! MARC21 XML export pipeline

pub mod exporter;
pub mod summary;

pub use exporter::MarcExporter;
pub use summary::{ExportError, ExportErrorType, ExportSummary};
