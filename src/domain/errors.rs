//! Domain error types
//!
//! This module defines the error hierarchy for marcexport. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main marcexport error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum MarcExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// ArchivesSpace-related errors
    #[error("ArchivesSpace error: {0}")]
    ArchivesSpace(#[from] ArchivesSpaceError),

    /// Flat-file store errors (inventory and request list)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// ArchivesSpace-specific errors
///
/// Errors that occur when interacting with an ArchivesSpace backend.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum ArchivesSpaceError {
    /// Failed to connect to the ArchivesSpace API
    #[error("Failed to connect to ArchivesSpace: {0}")]
    ConnectionFailed(String),

    /// Session login rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Session token no longer accepted (HTTP 412)
    #[error("Session expired, re-authentication required")]
    SessionExpired,

    /// Invalid response from server
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Requested record does not exist
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Flat-file store errors
///
/// Parsing and lookup failures for the TSV inventory and the request list.
/// Line numbers are 1-based and point at the offending input line.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A line had the wrong number of tab-separated fields
    #[error("{path}:{line}: expected {expected} tab-separated fields, found {found}")]
    FieldCount {
        path: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A numeric field failed to parse as an integer
    #[error("{path}:{line}: invalid {field} '{value}'")]
    InvalidNumber {
        path: String,
        line: usize,
        field: &'static str,
        value: String,
    },

    /// The same identifier key appeared on two lines
    #[error("duplicate identifier '{identifier}' in {path} (lines {first} and {second})")]
    DuplicateIdentifier {
        path: String,
        identifier: String,
        first: usize,
        second: usize,
    },

    /// A requested identifier has no entry in the inventory
    #[error("identifier '{0}' not found in resource inventory")]
    IdentifierNotFound(String),

    /// Reading or writing a store file failed
    #[error("failed to access {path}: {message}")]
    FileAccess { path: String, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for MarcExportError {
    fn from(err: std::io::Error) -> Self {
        MarcExportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MarcExportError {
    fn from(err: serde_json::Error) -> Self {
        MarcExportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MarcExportError {
    fn from(err: toml::de::Error) -> Self {
        MarcExportError::Configuration(format!("TOML parse error: {err}"))
    }
}
