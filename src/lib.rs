// marcexport - ArchivesSpace MARC21 Export Tool
// Copyright (c) 2025 Digital Library Infrastructure Team
// Licensed under the MIT License

//! # marcexport - ArchivesSpace MARC21 Export
//!
//! marcexport is a batch tool that exports MARC21 XML records from an
//! ArchivesSpace archival management system, for hand-off to downstream
//! library catalog ingest.
//!
//! ## Overview
//!
//! The export runs in two phases:
//!
//! - **Enumerate** - list every resource in the configured repositories,
//!   fetch its descriptive metadata with a pool of concurrent workers, and
//!   write the merged inventory to a tab-separated file
//! - **Export** - resolve requested identifiers against the inventory,
//!   fetch each record's MARC21 serialization, and write one XML file per
//!   record
//!
//! ## Architecture
//!
//! marcexport follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (enumerate, store, export)
//! - [`adapters`] - ArchivesSpace REST API integration
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marcexport::adapters::archivesspace::ArchivesSpaceClient;
//! use marcexport::config::load_config;
//! use marcexport::core::enumerate::Enumerator;
//! use marcexport::core::store;
//! use std::sync::Arc;
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("marcexport.toml")?;
//!
//!     // Authenticate against the ArchivesSpace backend
//!     let client = ArchivesSpaceClient::connect(&config.archivesspace).await?;
//!
//!     // Build and persist the resource inventory
//!     let (_shutdown_tx, shutdown_rx) = watch::channel(false);
//!     let enumerator = Enumerator::new(
//!         Arc::new(client),
//!         config.enumerate.repository_ids.clone(),
//!         shutdown_rx,
//!     );
//!     let outcome = enumerator.run().await?;
//!     store::write_records(&config.enumerate.resource_file, &outcome.records)?;
//!
//!     println!("Inventoried {} resources", outcome.records.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! marcexport uses the [`domain::MarcExportError`] type for all errors:
//!
//! ```rust,no_run
//! use marcexport::domain::MarcExportError;
//!
//! fn example() -> Result<(), MarcExportError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = marcexport::config::load_config("marcexport.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! marcexport uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting export");
//! warn!(identifier = "MSS.001", "Request skipped");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
