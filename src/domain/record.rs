//! Resource record domain model
//!
//! This module defines the ResourceRecord type, the shared data shape of the
//! enumerate and export phases.

use serde::{Deserialize, Serialize};

/// One archival resource, as inventoried by the enumerate phase
///
/// Records are created in memory during enumeration, persisted as one
/// tab-separated line each, and reconstructed from that file for the export
/// phase. The `identifiers` field is the lookup key and must be unique
/// across an inventory.
///
/// # Examples
///
/// ```
/// use marcexport::domain::record::ResourceRecord;
///
/// let record = ResourceRecord::new(2, 5, "MC.104", "Guide to the Archive", "mc_104");
/// assert_eq!(record.export_file_name("20260825"), "mc_104_20260825.xml");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceRecord {
    /// Owning repository
    pub repository_id: u32,

    /// Resource identifier within the repository
    pub id: u32,

    /// Merged identifier string (non-empty `id_0`..`id_3` joined with `.`)
    pub identifiers: String,

    /// Display title
    pub title: String,

    /// EAD identifier; may be empty
    pub ead_id: String,
}

impl ResourceRecord {
    /// Creates a new ResourceRecord
    pub fn new(
        repository_id: u32,
        id: u32,
        identifiers: impl Into<String>,
        title: impl Into<String>,
        ead_id: impl Into<String>,
    ) -> Self {
        Self {
            repository_id,
            id,
            identifiers: identifiers.into(),
            title: title.into(),
            ead_id: ead_id.into(),
        }
    }

    /// Returns the file-name stem for exported MARC records
    ///
    /// Uses the EAD ID when present, falling back to the merged identifier
    /// string when the EAD ID is empty.
    pub fn export_stem(&self) -> &str {
        if self.ead_id.is_empty() {
            &self.identifiers
        } else {
            &self.ead_id
        }
    }

    /// Returns the output file name for a given date tag
    pub fn export_file_name(&self, date_tag: &str) -> String {
        format!("{}_{}.xml", self.export_stem(), date_tag)
    }

    /// Returns the MARC21 export endpoint path for this record
    pub fn marc21_endpoint(&self) -> String {
        format!(
            "/repositories/{}/resources/marc21/{}.xml",
            self.repository_id, self.id
        )
    }
}
