//! tfbreakdown CLI entry point.
//!
//! This binary provides the command-line interface for tfbreakdown.

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tfbreakdown::cli::{Cli, Commands};
use tfbreakdown::config::DEFAULT_CONFIG_FILES;
use tfbreakdown::reporter::Reporter;
use tfbreakdown::{BreakdownError, Config, Scanner};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            eprintln!("Error: {e}");

            let mut source = e.source();
            if source.is_some() {
                eprintln!("\nCaused by:");
                let mut i = 0;
                while let Some(cause) = source {
                    eprintln!("  {i}: {cause}");
                    source = cause.source();
                    i += 1;
                }
            }

            let code = e
                .downcast_ref::<BreakdownError>()
                .map_or(1, BreakdownError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        // RUST_LOG wins over the verbosity flag
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // -v lists parsed and skipped files
            let base_level = match verbose {
                0 => "error",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            EnvFilter::new(format!("warn,tfbreakdown={base_level}"))
        })
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .with(filter)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    tracing::debug!("Loading configuration");
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Scan(args) => {
            config.merge_cli_args(&args);
            config.validate()?;

            let breakdown = Scanner::new(config.clone()).scan_path(&args.path)?;

            let reporter = Reporter::new(&config);
            let report = reporter.generate(&breakdown, config.output.format)?;

            if let Some(output_path) = args.output {
                std::fs::write(&output_path, &report)
                    .map_err(|e| BreakdownError::io(&output_path, e, file!(), line!()))?;
                tracing::info!(path = %output_path.display(), "Output written");
            } else {
                println!("{report}");
            }

            Ok(ExitCode::SUCCESS)
        }

        Commands::Init => {
            let config_path = std::path::Path::new(DEFAULT_CONFIG_FILES[0]);

            if config_path.exists() {
                anyhow::bail!("Configuration file already exists: {}", config_path.display());
            }

            std::fs::write(config_path, Config::example_yaml())?;
            println!("Created example configuration: {}", config_path.display());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Validate(args) => {
            let content = std::fs::read_to_string(&args.config)
                .map_err(|e| BreakdownError::io(&args.config, e, file!(), line!()))?;
            match Config::from_yaml(&content) {
                Ok(_) => {
                    println!("Configuration is valid: {}", args.config.display());
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    Ok(ExitCode::from(1))
                }
            }
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(ref config_path) = cli.config {
        tracing::debug!(path = %config_path.display(), "Loading configuration from explicit path");
        let content = std::fs::read_to_string(config_path)
            .map_err(|e| BreakdownError::io(config_path, e, file!(), line!()))?;
        return Ok(Config::from_yaml(&content)?);
    }

    for path in DEFAULT_CONFIG_FILES {
        if std::path::Path::new(path).exists() {
            tracing::debug!(path = %path, "Found configuration file");
            let content = std::fs::read_to_string(path)?;
            return Ok(Config::from_yaml(&content)?);
        }
    }

    tracing::debug!("No configuration file found, using default configuration");
    Ok(Config::default())
}
