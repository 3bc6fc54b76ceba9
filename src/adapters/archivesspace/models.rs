//! Wire models for the ArchivesSpace backend API
//!
//! Response shapes deserialized from the JSON the backend returns. Only the
//! fields this tool consumes are modeled; everything else in the payloads is
//! ignored.

use serde::Deserialize;

/// Response body of `POST /users/:username/login`
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// Session token carried on subsequent requests
    pub session: String,
}

/// Resource payload of `GET /repositories/:repo_id/resources/:id`
///
/// ArchivesSpace models the external identifier as four optional parts
/// (`id_0` through `id_3`); [`ResourceDto::merge_identifiers`] flattens them
/// into the single lookup-key string used throughout this tool.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDto {
    #[serde(default)]
    pub id_0: Option<String>,
    #[serde(default)]
    pub id_1: Option<String>,
    #[serde(default)]
    pub id_2: Option<String>,
    #[serde(default)]
    pub id_3: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub ead_id: Option<String>,
}

impl ResourceDto {
    /// Joins the non-empty identifier parts with `.`
    pub fn merge_identifiers(&self) -> String {
        [&self.id_0, &self.id_1, &self.id_2, &self.id_3]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Converts the wire payload into the metadata shape used by callers
    pub fn into_detail(self) -> ResourceDetail {
        let identifiers = self.merge_identifiers();
        ResourceDetail {
            identifiers,
            title: self.title.unwrap_or_default(),
            ead_id: self.ead_id.unwrap_or_default(),
        }
    }
}

/// Resource metadata as consumed by the enumerate phase
///
/// The identifier parts are already merged and the optional wire fields are
/// flattened to plain strings (empty when absent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDetail {
    /// Merged identifier string; the inventory lookup key
    pub identifiers: String,

    /// Display title
    pub title: String,

    /// EAD identifier; empty when the resource has none
    pub ead_id: String,
}
