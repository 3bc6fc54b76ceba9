//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for marcexport using clap.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// marcexport - ArchivesSpace MARC21 export tool
#[derive(Parser, Debug)]
#[command(name = "marcexport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "marcexport.toml", env = "MARCEXPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MARCEXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for JSON log files (console only when unset)
    #[arg(long, env = "MARCEXPORT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the resource inventory file from ArchivesSpace
    Enumerate(commands::enumerate::EnumerateArgs),

    /// Export MARC21 XML files for requested identifiers
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_enumerate() {
        let cli = Cli::parse_from(["marcexport", "enumerate"]);
        assert_eq!(cli.config, "marcexport.toml");
        assert!(matches!(cli.command, Commands::Enumerate(_)));
    }

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["marcexport", "export"]);
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["marcexport", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["marcexport", "--log-level", "debug", "enumerate"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_with_log_dir() {
        let cli = Cli::parse_from(["marcexport", "--log-dir", "logs", "enumerate"]);
        assert_eq!(cli.log_dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["marcexport", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["marcexport", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_parse_export_flags() {
        let cli = Cli::parse_from(["marcexport", "export", "--dry-run", "--yes"]);
        match cli.command {
            Commands::Export(args) => {
                assert!(args.dry_run);
                assert!(args.yes);
            }
            _ => panic!("expected export command"),
        }
    }
}
