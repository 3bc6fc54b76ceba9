//! Logging and observability
//!
//! Structured logging through `tracing`, with console output always on and
//! an optional JSON file layer with daily rotation.
//!
//! # Example
//!
//! ```no_run
//! use marcexport::logging::init_logging;
//!
//! let _guard = init_logging("info", None).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! tracing::warn!(identifier = "MSS.001", "Request skipped");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
