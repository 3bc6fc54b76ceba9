//! Configuration schema types
//!
//! This module defines the configuration structure for marcexport.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        write!(f, "{name}")
    }
}

/// Main marcexport configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarcExportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// ArchivesSpace backend configuration
    pub archivesspace: ArchivesSpaceConfig,

    /// Enumerate phase settings
    #[serde(default)]
    pub enumerate: EnumerateConfig,

    /// Export phase settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl MarcExportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.archivesspace.validate(&self.environment)?;
        self.enumerate.validate()?;
        self.export.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// ArchivesSpace backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivesSpaceConfig {
    /// Base URL of the ArchivesSpace backend API
    pub base_url: String,

    /// Username for session login
    pub username: String,

    /// Password for session login
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// **SECURITY WARNING**: Disabling TLS verification (setting to `false`)
    /// exposes the application to man-in-the-middle attacks and should ONLY be
    /// used against development/staging hosts with self-signed certificates.
    ///
    /// - In **production** environments, this MUST be set to `true` (enforced
    ///   by validation)
    /// - Default: `true`
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl ArchivesSpaceConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("archivesspace.base_url cannot be empty".to_string());
        }

        match Url::parse(&self.base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => {
                return Err(format!(
                    "archivesspace.base_url must use http or https, got '{}'",
                    url.scheme()
                ));
            }
            Err(e) => {
                return Err(format!("archivesspace.base_url is not a valid URL: {e}"));
            }
        }

        if self.username.is_empty() {
            return Err("archivesspace.username cannot be empty".to_string());
        }

        if self.password.expose_secret().is_empty() {
            return Err("archivesspace.password cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 600 {
            return Err(format!(
                "archivesspace.timeout_seconds must be between 1 and 600, got {}",
                self.timeout_seconds
            ));
        }

        // Security: TLS verification stays on against production hosts
        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                Either set 'tls_verify = true' or set 'environment = \"development\"' or \
                'environment = \"staging\"' for hosts with self-signed certificates."
                    .to_string(),
            );
        }

        Ok(())
    }
}

impl Default for ArchivesSpaceConfig {
    /// Creates a configuration pointing at a local development backend
    ///
    /// Note: This is primarily for testing. Production deployments load
    /// credentials from the configuration file or environment.
    fn default() -> Self {
        use crate::config::secret::SecretValue;
        use secrecy::Secret;

        Self {
            base_url: "http://localhost:8089".to_string(),
            username: "admin".to_string(),
            password: Secret::new(SecretValue::from("admin".to_string())),
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
        }
    }
}

/// Enumerate phase configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumerateConfig {
    /// Repository IDs to inventory, in processing order
    #[serde(default = "default_repository_ids")]
    pub repository_ids: Vec<u32>,

    /// Path of the TSV inventory this phase writes
    #[serde(default = "default_resource_file")]
    pub resource_file: String,
}

impl EnumerateConfig {
    fn validate(&self) -> Result<(), String> {
        if self.repository_ids.is_empty() {
            return Err("enumerate.repository_ids cannot be empty".to_string());
        }

        if self.resource_file.is_empty() {
            return Err("enumerate.resource_file cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for EnumerateConfig {
    fn default() -> Self {
        Self {
            repository_ids: default_repository_ids(),
            resource_file: default_resource_file(),
        }
    }
}

/// Export phase configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Path of the TSV inventory this phase reads
    #[serde(default = "default_resource_file")]
    pub resource_file: String,

    /// Path of the newline-delimited identifier request list
    #[serde(default = "default_request_file")]
    pub request_file: String,

    /// Directory MARC21 XML files are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Date tag appended to output file names
    ///
    /// When unset, the local date at process start is used (`%Y%m%d`),
    /// captured once so every file in a batch shares the same tag.
    #[serde(default)]
    pub date_suffix: Option<String>,

    /// Dry run mode - resolve and log without fetching or writing (default: false)
    /// When enabled, the exporter resolves every requested identifier and logs
    /// the file it would write, but performs no MARC fetches and no writes.
    /// Useful for checking an inventory against a request list.
    #[serde(default)]
    pub dry_run: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.resource_file.is_empty() {
            return Err("export.resource_file cannot be empty".to_string());
        }

        if self.request_file.is_empty() {
            return Err("export.request_file cannot be empty".to_string());
        }

        if self.output_dir.is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if let Some(suffix) = &self.date_suffix {
            if suffix.is_empty() {
                return Err("export.date_suffix cannot be empty when set".to_string());
            }
            if suffix.contains('/') || suffix.contains(char::is_whitespace) {
                return Err(format!(
                    "export.date_suffix must be path-safe (no slashes or whitespace), got '{suffix}'"
                ));
            }
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            resource_file: default_resource_file(),
            request_file: default_request_file(),
            output_dir: default_output_dir(),
            date_suffix: None,
            dry_run: false,
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    20
}

fn default_repository_ids() -> Vec<u32> {
    vec![2, 3, 6]
}

fn default_resource_file() -> String {
    "resources.tsv".to_string()
}

fn default_request_file() -> String {
    "resources.txt".to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}
