//! # tfbreakdown
//!
//! A Terraform/OpenTofu inventory extractor.
//!
//! tfbreakdown walks a directory tree, parses the HCL files it finds and
//! produces a flat, JSON-serializable [`Breakdown`] of the code base
//! without executing it.
//!
//! ## Features
//!
//! - **Resources**: every `resource` block with its type, name and
//!   literal attributes
//! - **Modules**: module calls with their source and parameters
//! - **Providers**: explicit `provider` configurations plus providers
//!   required through `terraform.required_providers`
//! - **Variables**: declarations with type, description and default
//! - **Variable values**: `.tfvars` and `.tfvars.json` files
//!
//! Only literal expressions are resolved: attributes that reference
//! variables, resources or functions are left out.
//!
//! ## Example
//!
//! ```rust,no_run
//! fn main() -> anyhow::Result<()> {
//!     let breakdown = tfbreakdown::build_breakdown("./terraform")?;
//!     println!("{}", serde_json::to_string_pretty(&breakdown)?);
//!     Ok(())
//! }
//! ```

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use error::{BreakdownError, Result};
pub use types::{Breakdown, Module, Provider, ReportFormat, Resource, TfVars, Variable};

use std::path::Path;

/// Main scanner orchestrator.
///
/// The `Scanner` is the primary entry point for using tfbreakdown as a
/// library. It scans one directory at a time, strictly sequentially.
///
/// # Example
///
/// ```rust,no_run
/// use tfbreakdown::{Config, Scanner};
///
/// fn main() -> anyhow::Result<()> {
///     let scanner = Scanner::new(Config::default());
///     let breakdown = scanner.scan_path("./infra")?;
///
///     println!("Found {} modules", breakdown.modules.len());
///     Ok(())
/// }
/// ```
pub struct Scanner {
    config: Config,
}

impl Scanner {
    /// Create a new scanner with the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scan a local directory for Terraform/OpenTofu files.
    ///
    /// # Errors
    ///
    /// Returns an error if the path doesn't exist, isn't a directory or
    /// can't be walked. Individual files that fail to parse are skipped.
    pub fn scan_path<P: AsRef<Path>>(&self, path: P) -> Result<Breakdown> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Scanning path");

        parser::HclParser::new(&self.config).parse_directory(path)
    }
}

/// Build the breakdown of a directory with the default configuration.
///
/// # Errors
///
/// See [`Scanner::scan_path`].
pub fn build_breakdown<P: AsRef<Path>>(root: P) -> Result<Breakdown> {
    Scanner::new(Config::default()).scan_path(root)
}
