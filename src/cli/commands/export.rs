//! Export command implementation
//!
//! This module implements the `export` command, which turns the resource
//! inventory plus a request list into MARC21 XML files.

use std::fs;
use std::sync::Arc;

use clap::Args;
use tokio::sync::watch;

use crate::adapters::archivesspace::ArchivesSpaceClient;
use crate::config::load_config;
use crate::core::export::MarcExporter;
use crate::core::store::{self, ResourceLookup};

/// How many skipped requests the console summary lists before truncating
const MAX_LISTED_ERRORS: usize = 10;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - resolve identifiers without fetching or writing
    #[arg(long)]
    pub dry_run: bool,

    /// Override the request list file
    #[arg(long)]
    pub requests: Option<String>,

    /// Override the output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Override the file name date tag (YYYYMMDD)
    #[arg(long)]
    pub date: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if let Some(requests) = &self.requests {
            tracing::info!(requests = %requests, "Overriding request file from CLI");
            config.export.request_file = requests.clone();
        }

        if let Some(output_dir) = &self.output_dir {
            tracing::info!(output_dir = %output_dir, "Overriding output directory from CLI");
            config.export.output_dir = output_dir.clone();
        }

        if let Some(date) = &self.date {
            tracing::info!(date = %date, "Overriding date tag from CLI");
            config.export.date_suffix = Some(date.clone());
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.export.dry_run = true;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let dry_run = config.export.dry_run;

        // The inventory and request list are validated before any network
        // traffic so a corrupt file fails the run up front.
        let records = match store::read_records(&config.export.resource_file) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read resource inventory");
                eprintln!("Failed to read resource inventory: {e}");
                return Ok(2);
            }
        };

        let lookup = match ResourceLookup::build(records, &config.export.resource_file) {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(error = %e, "Resource inventory is invalid");
                eprintln!("Resource inventory is invalid: {e}");
                return Ok(2);
            }
        };

        let requests = match store::read_request_list(&config.export.request_file) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read request list");
                eprintln!("Failed to read request list: {e}");
                return Ok(2);
            }
        };

        let date_tag = config
            .export
            .date_suffix
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format("%Y%m%d").to_string());

        if dry_run {
            tracing::info!("Dry run mode enabled - no files will be written");
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        if !self.yes && !dry_run {
            println!("Export Configuration:");
            println!("  Inventory: {} ({} records)", lookup.source(), lookup.len());
            println!("  Requests: {} ({} identifiers)", config.export.request_file, requests.len());
            println!("  Output directory: {}", config.export.output_dir);
            println!("  Date tag: {date_tag}");
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        if !dry_run {
            if let Err(e) = fs::create_dir_all(&config.export.output_dir) {
                tracing::error!(error = %e, "Failed to create output directory");
                eprintln!("Failed to create output directory: {e}");
                return Ok(5);
            }
        }

        let client = match ArchivesSpaceClient::connect(&config.archivesspace).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to ArchivesSpace");
                eprintln!("Failed to connect to ArchivesSpace: {e}");
                return Ok(4);
            }
        };

        println!("🚀 Starting export...");
        println!();

        let exporter = MarcExporter::new(
            Arc::new(client),
            &config.export.output_dir,
            date_tag,
            dry_run,
            shutdown_signal,
        );

        let summary = exporter.export_all(&lookup, &requests).await;

        println!();
        println!("📊 Export Summary:");
        println!("  Requested: {}", summary.requested);
        println!("  Exported: {}", summary.exported);
        println!("  Not in inventory: {}", summary.missing);
        println!("  Fetch failures: {}", summary.fetch_failures);
        println!("  Write failures: {}", summary.write_failures);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());
        println!();

        if !summary.errors.is_empty() {
            println!("⚠️  Skipped requests:");
            for error in summary.errors.iter().take(MAX_LISTED_ERRORS) {
                println!("  - {} ({:?}): {}", error.identifier, error.error_type, error.message);
            }
            if summary.errors.len() > MAX_LISTED_ERRORS {
                println!("  ... and {} more", summary.errors.len() - MAX_LISTED_ERRORS);
            }
            println!();
        }

        let exit_code = if summary.interrupted {
            println!("⚠️  Export interrupted. Remaining requests were not processed.");
            tracing::info!("Export interrupted by user signal");
            130
        } else if summary.is_successful() {
            println!("✅ Export completed successfully!");
            0
        } else {
            println!("⚠️  Export completed with skipped requests");
            1
        };

        Ok(exit_code)
    }
}
