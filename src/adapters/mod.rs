//! External system integrations for marcexport.
//!
//! This module provides adapters for integrating with external systems:
//!
//! - [`archivesspace`] - ArchivesSpace backend API integration
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies
//! and enable testing with mock implementations. The pipelines depend on the
//! [`archivesspace::ArchivesSpaceApi`] trait rather than the concrete HTTP
//! client, so test suites can substitute in-memory doubles.
//!
//! ```rust,no_run
//! use marcexport::adapters::archivesspace::{ArchivesSpaceApi, ArchivesSpaceClient};
//! use marcexport::config::{ArchivesSpaceConfig, secret_string};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ArchivesSpaceConfig {
//!     base_url: "https://aspace.example.edu/api".to_string(),
//!     username: "exporter".to_string(),
//!     password: secret_string("secret".to_string()),
//!     timeout_seconds: 20,
//!     tls_verify: true,
//! };
//!
//! let client = ArchivesSpaceClient::connect(&config).await?;
//! let ids = client.resource_ids(2).await?;
//! # Ok(())
//! # }
//! ```

pub mod archivesspace;
