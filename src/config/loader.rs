//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MarcExportConfig;
use super::secret::secret_string;
use crate::domain::errors::MarcExportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MarcExportConfig
/// 4. Applies environment variable overrides (MARCEXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use marcexport::config::loader::load_config;
///
/// let config = load_config("marcexport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MarcExportConfig> {
    let path = path.as_ref();

    // Check if file exists
    if !path.exists() {
        return Err(MarcExportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    // Read file contents
    let contents = fs::read_to_string(path).map_err(|e| {
        MarcExportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    // Parse TOML
    let mut config: MarcExportConfig = toml::from_str(&contents)
        .map_err(|e| MarcExportError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    // Apply environment variable overrides
    apply_env_overrides(&mut config);

    // Validate configuration
    config.validate().map_err(|e| {
        MarcExportError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Arguments
///
/// * `input` - String containing ${VAR} placeholders
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        // Process non-comment lines for env var substitution
        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MarcExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the MARCEXPORT_* prefix
///
/// Environment variables follow the pattern: MARCEXPORT_<SECTION>_<KEY>
/// For example: MARCEXPORT_ARCHIVESSPACE_BASE_URL, MARCEXPORT_EXPORT_OUTPUT_DIR
///
/// # Arguments
///
/// * `config` - Mutable reference to the configuration to update
fn apply_env_overrides(config: &mut MarcExportConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("MARCEXPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // ArchivesSpace overrides
    if let Ok(val) = std::env::var("MARCEXPORT_ARCHIVESSPACE_BASE_URL") {
        config.archivesspace.base_url = val;
    }
    if let Ok(val) = std::env::var("MARCEXPORT_ARCHIVESSPACE_USERNAME") {
        config.archivesspace.username = val;
    }
    if let Ok(val) = std::env::var("MARCEXPORT_ARCHIVESSPACE_PASSWORD") {
        config.archivesspace.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("MARCEXPORT_ARCHIVESSPACE_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.archivesspace.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("MARCEXPORT_ARCHIVESSPACE_TLS_VERIFY") {
        config.archivesspace.tls_verify = val.parse().unwrap_or(true);
    }

    // Enumerate overrides
    if let Ok(val) = std::env::var("MARCEXPORT_ENUMERATE_REPOSITORY_IDS") {
        let ids: Vec<u32> = val
            .split(',')
            .filter_map(|part| part.trim().parse().ok())
            .collect();
        if !ids.is_empty() {
            config.enumerate.repository_ids = ids;
        }
    }
    if let Ok(val) = std::env::var("MARCEXPORT_ENUMERATE_RESOURCE_FILE") {
        config.enumerate.resource_file = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("MARCEXPORT_EXPORT_RESOURCE_FILE") {
        config.export.resource_file = val;
    }
    if let Ok(val) = std::env::var("MARCEXPORT_EXPORT_REQUEST_FILE") {
        config.export.request_file = val;
    }
    if let Ok(val) = std::env::var("MARCEXPORT_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("MARCEXPORT_EXPORT_DATE_SUFFIX") {
        config.export.date_suffix = Some(val);
    }
    if let Ok(val) = std::env::var("MARCEXPORT_EXPORT_DRY_RUN") {
        config.export.dry_run = val.parse().unwrap_or(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("TEST_ASPACE_VAR", "test_value");
        let input = "password = \"${TEST_ASPACE_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("TEST_ASPACE_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("MISSING_ASPACE_VAR");
        let input = "password = \"${MISSING_ASPACE_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("COMMENTED_OUT_VAR");
        let input = "# password = \"${COMMENTED_OUT_VAR}\"\nusername = \"admin\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${COMMENTED_OUT_VAR}"));
        assert!(result.contains("username = \"admin\""));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "info"

[archivesspace]
base_url = "https://aspace.example.edu/api"
username = "exporter"
password = "secret"

[enumerate]
repository_ids = [2, 3, 6]

[export]
output_dir = "marc"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config.archivesspace.base_url, "https://aspace.example.edu/api");
        assert_eq!(config.archivesspace.timeout_seconds, 20);
        assert_eq!(config.enumerate.repository_ids, vec![2, 3, 6]);
        assert_eq!(config.export.output_dir, "marc");
        assert_eq!(config.export.request_file, "resources.txt");
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"this is not [valid toml").unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
