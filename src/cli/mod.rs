//! Command-line interface module.
//!
//! This module defines the CLI structure using Clap, including
//! all commands, arguments, and options.
//!
//! # Commands
//!
//! - `scan`: Extract the inventory of a Terraform directory
//! - `init`: Create an example configuration file
//! - `validate`: Validate a configuration file
//!
//! # Example Usage
//!
//! ```bash
//! # Breakdown of a directory, pretty JSON on stdout
//! tfbreakdown scan ./my-terraform-project
//!
//! # Save output to a file
//! tfbreakdown scan ./infra -o output.json
//!
//! # Compact JSON output
//! tfbreakdown scan ./infra -p false
//!
//! # Human-readable summary
//! tfbreakdown scan ./infra --format text
//! ```

use crate::types::ReportFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// tfbreakdown - Terraform/OpenTofu inventory extractor.
#[derive(Parser, Debug)]
#[command(
    name = "tfbreakdown",
    author,
    version,
    about = "Parse Terraform code and output a JSON breakdown",
    long_about = "tfbreakdown recursively scans a directory for Terraform files and extracts:\n  \
                  - Resources: all resource blocks with their types, names, and attributes\n  \
                  - Modules: module calls with source information and parameters\n  \
                  - Providers: provider configurations and requirements\n  \
                  - Variables: variable declarations from .tf files\n  \
                  - TfVars: variable values from .tfvars and .tfvars.json files"
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "TFBREAKDOWN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v lists parsed and skipped files, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a directory and output its breakdown
    #[command(visible_alias = "s")]
    Scan(ScanArgs),

    /// Create an example configuration file
    Init,

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Arguments for the scan command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory containing Terraform files
    #[arg(value_name = "DIRECTORY")]
    pub path: PathBuf,

    /// Write output to file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Pretty print JSON output [default: true]
    #[arg(short, long, value_name = "BOOL", action = clap::ArgAction::Set)]
    pub pretty: Option<bool>,

    /// Output format [default: json]
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Patterns to exclude from scanning (glob patterns)
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude_patterns: Vec<String>,

    /// Maximum depth for recursive directory scanning (at least 1)
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Follow symbolic links
    #[arg(long)]
    pub follow_links: bool,

    /// Disable colors in text output
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(value_name = "FILE", default_value = "tfbreakdown.yaml")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parsing() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_command() {
        let cli = Cli::parse_from(["tfbreakdown", "scan", "./terraform"]);
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.path, PathBuf::from("./terraform"));
                assert!(args.output.is_none());
                assert!(args.pretty.is_none());
                assert!(args.format.is_none());
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_scan_with_options() {
        let cli = Cli::parse_from([
            "tfbreakdown",
            "scan",
            "./infra",
            "-o",
            "output.json",
            "-p",
            "false",
            "--exclude",
            ".terraform",
            "--max-depth",
            "3",
        ]);
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.output, Some(PathBuf::from("output.json")));
                assert_eq!(args.pretty, Some(false));
                assert_eq!(args.exclude_patterns, vec![".terraform".to_string()]);
                assert_eq!(args.max_depth, Some(3));
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_scan_requires_directory() {
        assert!(Cli::try_parse_from(["tfbreakdown", "scan"]).is_err());
    }

    #[test]
    fn test_zero_depth_rejected_by_config() {
        let cli = Cli::parse_from(["tfbreakdown", "scan", ".", "--max-depth", "0"]);
        let Commands::Scan(args) = cli.command else {
            panic!("Expected Scan command");
        };

        let mut config = crate::Config::default();
        config.merge_cli_args(&args);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_numeric_depth_rejected() {
        assert!(Cli::try_parse_from(["tfbreakdown", "scan", ".", "--max-depth", "deep"]).is_err());
    }

    #[test]
    fn test_text_format() {
        let cli = Cli::parse_from(["tfbreakdown", "scan", ".", "--format", "text"]);
        match cli.command {
            Commands::Scan(args) => assert_eq!(args.format, Some(ReportFormat::Text)),
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_init_command() {
        let cli = Cli::parse_from(["tfbreakdown", "init"]);
        assert!(matches!(cli.command, Commands::Init));
    }

    #[test]
    fn test_validate_command() {
        let cli = Cli::parse_from(["tfbreakdown", "validate", "custom.yaml"]);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.config, PathBuf::from("custom.yaml"));
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::parse_from([
            "tfbreakdown",
            "-vv",
            "--config",
            "custom.yaml",
            "scan",
            "./terraform",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    }

    #[test]
    fn test_alias() {
        let cli = Cli::parse_from(["tfbreakdown", "s", "./terraform"]);
        assert!(matches!(cli.command, Commands::Scan(_)));
    }
}
