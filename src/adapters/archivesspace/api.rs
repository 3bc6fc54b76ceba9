//! ArchivesSpace API trait definition
//!
//! This module defines the `ArchivesSpaceApi` trait that abstracts the
//! backend REST API behind the three operations the pipelines consume. The
//! production implementation is [`ArchivesSpaceClient`](super::ArchivesSpaceClient);
//! tests substitute in-memory doubles.

use super::models::ResourceDetail;
use crate::domain::Result;
use async_trait::async_trait;

/// Trait for the ArchivesSpace operations consumed by the pipelines
///
/// Implementations must be safe for concurrent use; the enumerate phase
/// shares one instance across its worker tasks behind an `Arc`.
///
/// # Example
///
/// ```no_run
/// use marcexport::adapters::archivesspace::{ArchivesSpaceApi, ArchivesSpaceClient};
/// use marcexport::config::ArchivesSpaceConfig;
///
/// # async fn example() -> marcexport::domain::Result<()> {
/// let config = ArchivesSpaceConfig::default();
/// let client = ArchivesSpaceClient::connect(&config).await?;
///
/// let ids = client.resource_ids(2).await?;
/// println!("repository 2 holds {} resources", ids.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ArchivesSpaceApi: Send + Sync {
    /// Lists every resource ID in a repository
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the server
    /// rejects the session.
    async fn resource_ids(&self, repository_id: u32) -> Result<Vec<u32>>;

    /// Fetches resource metadata for one (repository, resource) pair
    ///
    /// The four-part identifier in the response is merged into the single
    /// lookup-key string of [`ResourceDetail`].
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown resource, and request errors
    /// as in [`resource_ids`](Self::resource_ids).
    async fn resource(&self, repository_id: u32, resource_id: u32) -> Result<ResourceDetail>;

    /// Fetches the raw bytes of an arbitrary endpoint path
    ///
    /// Used for the MARC21 export endpoint, whose payload is opaque XML that
    /// is written to disk unmodified.
    ///
    /// # Errors
    ///
    /// Returns request errors as in [`resource_ids`](Self::resource_ids).
    async fn raw_bytes(&self, endpoint: &str) -> Result<Vec<u8>>;

    /// Returns the base URL of the backend
    fn base_url(&self) -> &str;
}
