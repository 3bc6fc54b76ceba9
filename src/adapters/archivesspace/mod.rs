//! ArchivesSpace adapter implementation
//!
//! This module provides the integration with the ArchivesSpace backend API:
//! the [`ArchivesSpaceApi`] trait the pipelines depend on, the production
//! HTTP client, and the wire models.

pub mod api;
pub mod client;
pub mod models;

pub use api::ArchivesSpaceApi;
pub use client::ArchivesSpaceClient;
pub use models::{LoginResponse, ResourceDetail, ResourceDto};
