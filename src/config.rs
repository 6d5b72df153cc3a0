//! Configuration module for tfbreakdown.
//!
//! This module handles loading and validating configuration from:
//! - YAML configuration files (`tfbreakdown.yaml`)
//! - Environment variables
//! - CLI arguments
//!
//! # Configuration File Format
//!
//! ```yaml
//! # tfbreakdown.yaml
//!
//! # Scanning options
//! scan:
//!   exclude_patterns:
//!     - ".terraform"
//!     - "*.auto.tfvars"
//!   max_depth: 10
//!   follow_links: false
//!
//! # Output options
//! output:
//!   format: json
//!   pretty: true
//!   colored: true
//! ```

use crate::error::{BreakdownError, Result};
use crate::types::ReportFormat;
use serde::{Deserialize, Serialize};

/// Default configuration file names, searched in the working directory.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["tfbreakdown.yaml", "tfbreakdown.yml", ".tfbreakdown.yaml"];

/// Scanning options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanOptions {
    /// Glob patterns matched against file and directory names; matches
    /// are not scanned (directories are not descended into).
    pub exclude_patterns: Vec<String>,

    /// Maximum depth for recursive directory scanning (unlimited if unset).
    pub max_depth: Option<usize>,

    /// Follow symbolic links while walking.
    pub follow_links: bool,
}

/// Output options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Report format.
    pub format: ReportFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,

    /// Use colored output in text reports.
    pub colored: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: ReportFormat::Json,
            pretty: true,
            colored: true,
        }
    }
}

/// Main configuration structure with nested sections.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Scanning options
    pub scan: ScanOptions,

    /// Output options
    pub output: OutputOptions,
}

impl Config {
    /// Load configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or a value is out of range.
    pub fn from_yaml(content: &str) -> Result<Self> {
        tracing::debug!("Parsing configuration from YAML");
        let expanded = expand_env_vars(content)?;

        let config: Self = serde_yaml::from_str(&expanded).map_err(|e| {
            BreakdownError::config_parse(e.to_string(), Some(Box::new(e)), file!(), line!())
        })?;
        config.validate()?;

        tracing::debug!(
            exclude_patterns = config.scan.exclude_patterns.len(),
            max_depth = ?config.scan.max_depth,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Check values that deserialize fine but can't be used.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigValue` error for an invalid glob pattern or a zero
    /// `max_depth`.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.scan.exclude_patterns {
            glob::Pattern::new(pattern).map_err(|e| crate::err!(ConfigValue {
                key: "scan.exclude_patterns".to_string(),
                message: format!("invalid glob '{pattern}': {e}"),
            }))?;
        }

        if self.scan.max_depth == Some(0) {
            return Err(crate::err!(ConfigValue {
                key: "scan.max_depth".to_string(),
                message: "must be at least 1".to_string(),
            }));
        }

        Ok(())
    }

    /// Generate an example YAML configuration.
    #[must_use]
    pub fn example_yaml() -> String {
        r#"# tfbreakdown Configuration File

# Scanning options
scan:
  # Glob patterns matched against file and directory names
  exclude_patterns:
    - ".terraform"
    - ".terragrunt-cache"

  # Maximum depth for recursive directory scanning (unlimited if unset)
  # max_depth: 10

  # Follow symbolic links
  follow_links: false

# Output options
output:
  # Report format: json or text
  format: json

  # Pretty-print JSON output
  pretty: true

  # Use colored output in text reports
  colored: true
"#
        .to_string()
    }

    /// Merge CLI arguments into the configuration.
    pub fn merge_cli_args(&mut self, args: &crate::cli::ScanArgs) {
        if !args.exclude_patterns.is_empty() {
            self.scan
                .exclude_patterns
                .extend(args.exclude_patterns.iter().cloned());
        }
        if args.max_depth.is_some() {
            self.scan.max_depth = args.max_depth;
        }
        if args.follow_links {
            self.scan.follow_links = true;
        }
        if let Some(format) = args.format {
            self.output.format = format;
        }
        if let Some(pretty) = args.pretty {
            self.output.pretty = pretty;
        }
        if args.no_color {
            self.output.colored = false;
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. Unset variables are left as is.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = content.to_string();

    for pattern in [r"\$\{([^}]+)\}", r"\$([A-Za-z_][A-Za-z0-9_]*)"] {
        let re = regex::Regex::new(pattern).map_err(|e| {
            BreakdownError::config_parse(e.to_string(), Some(Box::new(e)), file!(), line!())
        })?;
        for cap in re.captures_iter(content) {
            if let Ok(value) = std::env::var(&cap[1]) {
                result = result.replace(&cap[0], &value);
            }
        }
    }

    Ok(result)
}
