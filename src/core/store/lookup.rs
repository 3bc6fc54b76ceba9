//! Identifier lookup over a loaded inventory
//!
//! Builds the identifiers-to-record map the export phase resolves requests
//! against. Duplicate identifier keys are rejected at build time; with two
//! records sharing a key, whichever won a silent overwrite would export the
//! wrong repository/resource pair.

use crate::domain::{ResourceRecord, Result, StoreError};
use std::collections::HashMap;

/// In-memory lookup keyed by the merged identifier string
#[derive(Debug)]
pub struct ResourceLookup {
    source: String,
    by_identifier: HashMap<String, ResourceRecord>,
}

impl ResourceLookup {
    /// Builds a lookup from inventory records
    ///
    /// `source` names the inventory file for error context. Records are
    /// expected in file order so duplicate errors can report both line
    /// numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if two records share an identifier key.
    pub fn build(records: Vec<ResourceRecord>, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let mut by_identifier = HashMap::with_capacity(records.len());
        let mut first_seen: HashMap<String, usize> = HashMap::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let line = index + 1;
            if let Some(&first) = first_seen.get(&record.identifiers) {
                return Err(StoreError::DuplicateIdentifier {
                    path: source,
                    identifier: record.identifiers,
                    first,
                    second: line,
                }
                .into());
            }
            first_seen.insert(record.identifiers.clone(), line);
            by_identifier.insert(record.identifiers.clone(), record);
        }

        Ok(Self {
            source,
            by_identifier,
        })
    }

    /// Resolves an identifier to its record
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an identifier absent from the
    /// inventory.
    pub fn get(&self, identifier: &str) -> Result<&ResourceRecord> {
        self.by_identifier
            .get(identifier)
            .ok_or_else(|| StoreError::IdentifierNotFound(identifier.to_string()).into())
    }

    /// Number of records in the lookup
    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    /// Whether the lookup holds no records
    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }

    /// Inventory file this lookup was built from
    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarcExportError;

    fn sample_records() -> Vec<ResourceRecord> {
        vec![
            ResourceRecord::new(2, 5, "MC.104", "Guide to the Archive", "mc_104"),
            ResourceRecord::new(3, 17, "MSS.417", "Papers, 1878-1922", ""),
            ResourceRecord::new(6, 1, "RG.2.1", "Office Records", "rg_2_1"),
        ]
    }

    #[test]
    fn test_every_record_retrievable_by_identifier() {
        let records = sample_records();
        let lookup = ResourceLookup::build(records.clone(), "resources.tsv").unwrap();

        assert_eq!(lookup.len(), 3);
        for record in &records {
            assert_eq!(lookup.get(&record.identifiers).unwrap(), record);
        }
    }

    #[test]
    fn test_absent_key_is_not_found() {
        let lookup = ResourceLookup::build(sample_records(), "resources.tsv").unwrap();

        let err = lookup.get("NOPE.1").unwrap_err();
        assert!(matches!(
            err,
            MarcExportError::Store(StoreError::IdentifierNotFound(_))
        ));
        assert!(err.to_string().contains("NOPE.1"));
    }

    #[test]
    fn test_duplicate_identifier_rejected_with_both_lines() {
        let mut records = sample_records();
        records.push(ResourceRecord::new(2, 99, "MC.104", "Another Guide", ""));

        let err = ResourceLookup::build(records, "resources.tsv").unwrap_err();

        match err {
            MarcExportError::Store(StoreError::DuplicateIdentifier {
                identifier,
                first,
                second,
                ..
            }) => {
                assert_eq!(identifier, "MC.104");
                assert_eq!(first, 1);
                assert_eq!(second, 4);
            }
            other => panic!("expected duplicate identifier error, got {other}"),
        }
    }

    #[test]
    fn test_empty_lookup() {
        let lookup = ResourceLookup::build(vec![], "resources.tsv").unwrap();
        assert!(lookup.is_empty());
        assert!(lookup.get("MC.104").is_err());
    }
}
