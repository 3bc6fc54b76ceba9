//! Configuration management for marcexport.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! marcexport uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - Comprehensive validation
//! - Type-safe configuration structs
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use marcexport::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration from file
//! let config = load_config("marcexport.toml")?;
//!
//! // Access configuration sections
//! println!("ArchivesSpace URL: {}", config.archivesspace.base_url);
//! println!("Repositories: {:?}", config.enumerate.repository_ids);
//! println!("Output directory: {}", config.export.output_dir);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! The configuration is organized into sections:
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ArchivesSpaceConfig`] - ArchivesSpace connection and authentication
//! - [`EnumerateConfig`] - Enumerate phase (repositories, inventory path)
//! - [`ExportConfig`] - Export phase (inputs, output directory, date tag)
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [archivesspace]
//! base_url = "https://aspace.example.edu/api"
//! username = "exporter"
//! password = "${ASPACE_PASSWORD}"
//! timeout_seconds = 20
//!
//! [enumerate]
//! repository_ids = [2, 3, 6]
//! resource_file = "resources.tsv"
//!
//! [export]
//! resource_file = "resources.tsv"
//! request_file = "resources.txt"
//! output_dir = "."
//! ```
//!
//! # Environment Variables
//!
//! Use `${VAR_NAME}` syntax for environment variable substitution:
//!
//! ```bash
//! export ASPACE_PASSWORD="secret-password"
//! ```
//!
//! Any key can also be overridden with a `MARCEXPORT_<SECTION>_<KEY>`
//! environment variable, e.g. `MARCEXPORT_EXPORT_OUTPUT_DIR`.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ArchivesSpaceConfig, EnumerateConfig, Environment, ExportConfig,
    MarcExportConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
