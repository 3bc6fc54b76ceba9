//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use std::fs;
use std::path::Path;

use clap::Args;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "marcexport.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing marcexport configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Copy .env.example to .env");
                println!("     - Set ARCHIVESSPACE_USERNAME and ARCHIVESSPACE_PASSWORD");
                println!("  3. Validate configuration: marcexport validate-config");
                println!("  4. Build the inventory: marcexport enumerate");
                println!("  5. Export records: marcexport export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# marcexport Configuration File
# ArchivesSpace MARC21 export tool
#
# Two-phase workflow:
#   1. marcexport enumerate   builds the resource inventory file
#   2. marcexport export      writes MARC21 XML for requested identifiers

# Runtime environment (development, staging, production)
# Production refuses tls_verify = false.
environment = "development"

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[archivesspace]
# ArchivesSpace backend API URL
base_url = "https://archivesspace.example.edu/api"

# Credentials (use environment variables)
username = "${ARCHIVESSPACE_USERNAME}"
password = "${ARCHIVESSPACE_PASSWORD}"

# Per-request timeout in seconds
timeout_seconds = 20

# TLS/SSL verification
tls_verify = true

[enumerate]
# Repositories whose resources are inventoried
repository_ids = [2, 3, 6]

# Where the inventory is written
resource_file = "resources.tsv"

[export]
# Inventory consumed by the export phase
resource_file = "resources.tsv"

# Newline-delimited identifiers to export
request_file = "resources.txt"

# Where MARC21 XML files are written
output_dir = "."

# File name date tag (YYYYMMDD); defaults to the run date
# date_suffix = "20240117"

# Resolve identifiers without fetching or writing
dry_run = false
"#
        .to_string()
    }
}
