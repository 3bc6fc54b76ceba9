//! Flat-file store shared by the two pipelines
//!
//! The enumerate phase writes the TSV inventory through [`flatfile`]; the
//! export phase reads it back and resolves requests through
//! [`lookup::ResourceLookup`]. The flat file is the sole persisted
//! representation between the phases.

pub mod flatfile;
pub mod lookup;

pub use flatfile::{read_records, read_request_list, write_records};
pub use lookup::ResourceLookup;
