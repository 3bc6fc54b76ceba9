//! Core pipeline logic
//!
//! The enumerate module builds the resource inventory, the store module
//! persists and reloads it, and the export module turns requested
//! identifiers into MARC21 XML files.

pub mod enumerate;
pub mod export;
pub mod store;
