//! Enumerate command implementation
//!
//! This module implements the `enumerate` command, which builds the resource
//! inventory file consumed by the `export` command.

use std::sync::Arc;

use clap::Args;
use tokio::sync::watch;

use crate::adapters::archivesspace::ArchivesSpaceClient;
use crate::config::load_config;
use crate::core::enumerate::Enumerator;
use crate::core::store;

/// Arguments for the enumerate command
#[derive(Args, Debug)]
pub struct EnumerateArgs {
    /// Override repository IDs to enumerate (comma-separated)
    #[arg(long)]
    pub repository: Option<String>,

    /// Override the inventory file path
    #[arg(long)]
    pub output: Option<String>,
}

impl EnumerateArgs {
    /// Execute the enumerate command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting enumerate command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if let Some(repository) = &self.repository {
            let parsed: Result<Vec<u32>, _> =
                repository.split(',').map(|s| s.trim().parse()).collect();
            match parsed {
                Ok(ids) if !ids.is_empty() => {
                    tracing::info!(repository_ids = ?ids, "Overriding repository IDs from CLI");
                    config.enumerate.repository_ids = ids;
                }
                _ => {
                    eprintln!("Invalid repository ID list: {repository}");
                    return Ok(2);
                }
            }
        }

        if let Some(output) = &self.output {
            tracing::info!(output = %output, "Overriding inventory file from CLI");
            config.enumerate.resource_file = output.clone();
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let client = match ArchivesSpaceClient::connect(&config.archivesspace).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to ArchivesSpace");
                eprintln!("Failed to connect to ArchivesSpace: {e}");
                return Ok(4);
            }
        };

        println!("🚀 Starting enumeration...");
        println!();

        let enumerator = Enumerator::new(
            Arc::new(client),
            config.enumerate.repository_ids.clone(),
            shutdown_signal,
        );

        let outcome = match enumerator.run().await {
            Ok(o) => o,
            Err(e) => {
                tracing::error!(error = %e, "Enumeration failed");
                eprintln!("Enumeration failed: {e}");
                return Ok(5);
            }
        };

        // A partial inventory from an interrupted run is still written; the
        // export phase treats the inventory as a cache, never as complete.
        if let Err(e) = store::write_records(&config.enumerate.resource_file, &outcome.records) {
            tracing::error!(error = %e, "Failed to write inventory file");
            eprintln!("Failed to write inventory file: {e}");
            return Ok(5);
        }

        let summary = &outcome.summary;
        println!();
        println!("📊 Enumeration Summary:");
        println!("  Repositories: {}", summary.repositories);
        println!("  Resources listed: {}", summary.seeded);
        println!("  Records fetched: {}", summary.fetched);
        println!("  Records skipped: {}", summary.skipped);
        println!("  Worker crashes: {}", summary.worker_failures.len());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Completion Rate: {:.2}%", summary.completion_rate());
        println!("  Inventory file: {}", config.enumerate.resource_file);
        println!();

        if !summary.worker_failures.is_empty() {
            println!("⚠️  Worker crashes:");
            for failure in &summary.worker_failures {
                println!(
                    "  - repository {} worker {}: {}",
                    failure.repository_id, failure.worker, failure.message
                );
            }
            println!();
        }

        let exit_code = if summary.interrupted {
            println!("⚠️  Enumeration interrupted. The inventory file is partial.");
            tracing::info!("Enumeration interrupted by user signal");
            130
        } else if summary.is_complete() {
            println!("✅ Enumeration completed successfully!");
            0
        } else {
            println!("⚠️  Enumeration completed with skipped records");
            1
        };

        Ok(exit_code)
    }
}
