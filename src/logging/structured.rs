//! Structured logging setup using tracing
//!
//! Console output is always enabled; passing a log directory adds a
//! JSON-formatted daily-rotated file layer on top.
//!
//! # Example
//!
//! ```no_run
//! use marcexport::logging::init_logging;
//!
//! let _guard = init_logging("info", None).expect("Failed to initialize logging");
//! ```

use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::domain::{MarcExportError, Result};

/// Guard that must be kept alive for the duration of the program
/// to ensure file logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            _file_guard: file_guard,
        }
    }
}

/// Initialize the logging system
///
/// `level` applies to this crate's targets unless `RUST_LOG` overrides the
/// whole filter. When `log_dir` is given, the directory is created and a
/// daily-rotated `marcexport.log` receives JSON-formatted events alongside
/// the console output.
///
/// # Errors
///
/// Returns an error when `level` is not a recognized log level or the log
/// directory cannot be created.
///
/// # Example
///
/// ```no_run
/// use marcexport::logging::init_logging;
/// use std::path::Path;
///
/// let _guard = init_logging("debug", Some(Path::new("logs")))
///     .expect("Failed to initialize logging");
/// // Keep _guard alive for the duration of the program
/// ```
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<LoggingGuard> {
    let log_level = parse_log_level(level)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("marcexport={}", log_level)));

    let mut layers = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(env_filter.clone());

    layers.push(console_layer.boxed());

    let file_guard = if let Some(dir) = log_dir {
        std::fs::create_dir_all(dir).map_err(|e| {
            MarcExportError::Configuration(format!(
                "Failed to create log directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "marcexport.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking)
            .with_filter(env_filter);

        layers.push(file_layer.boxed());
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry().with(layers).init();

    tracing::debug!(
        level = %log_level,
        file_logging = log_dir.is_some(),
        "Logging initialized"
    );

    Ok(LoggingGuard::new(file_guard))
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(MarcExportError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            level
        ))),
    }
}
