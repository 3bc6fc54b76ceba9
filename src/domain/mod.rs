//! Domain models and types for marcexport.
//!
//! This module contains the core domain models, types, and business rules for
//! the MARC21 export pipeline.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Domain model** ([`ResourceRecord`])
//! - **Error types** ([`MarcExportError`], [`ArchivesSpaceError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, MarcExportError>`]:
//!
//! ```rust
//! use marcexport::domain::{MarcExportError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = marcexport::config::load_config("marcexport.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ArchivesSpaceError, MarcExportError, StoreError};
pub use record::ResourceRecord;
pub use result::Result;
