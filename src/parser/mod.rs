//! HCL parsing module for Terraform/OpenTofu files.
//!
//! This module walks a directory tree and extracts a [`Breakdown`] from
//! the files it finds.
//!
//! # Supported Constructs
//!
//! - `resource`, `module`, `provider` and `variable` blocks
//! - `terraform.required_providers` blocks
//! - `.tfvars` and `.tfvars.json` variable value files
//!
//! # Example
//!
//! ```rust,no_run
//! use tfbreakdown::parser::HclParser;
//! use tfbreakdown::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let parser = HclParser::new(&config);
//!
//!     let breakdown = parser.parse_directory("./terraform".as_ref())?;
//!     println!("Found {} resources", breakdown.resources.len());
//!     Ok(())
//! }
//! ```

pub mod attributes;
pub mod blocks;
mod hcl;
pub mod tfvars;
pub mod value;

pub use self::hcl::HclParser;
pub use attributes::extract_attributes;
pub use blocks::{classify, merge_required_providers};
pub use tfvars::{parse_value_file, tfvars_key};
pub use value::format_value;

use crate::types::Breakdown;
use std::path::Path;

/// Extension of Terraform configuration files.
pub const TERRAFORM_EXTENSION: &str = ".tf";

/// Suffixes of variable value files.
pub const TFVARS_SUFFIXES: &[&str] = &[".tfvars", ".tfvars.json"];

/// How a scanned file is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A `.tf` configuration document
    Configuration,
    /// A `.tfvars` / `.tfvars.json` value file
    VariableValues,
}

impl FileKind {
    /// Classify a path by its file name, `None` for files that are not scanned.
    #[must_use]
    pub fn of(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy();

        if TFVARS_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            Some(Self::VariableValues)
        } else if name.ends_with(TERRAFORM_EXTENSION) {
            Some(Self::Configuration)
        } else {
            None
        }
    }
}

/// Trait for parsing configuration documents.
///
/// This trait allows for different parsing implementations
/// (e.g., for testing with mock parsers).
pub trait Parser {
    /// Parse a single configuration file's contents into `breakdown`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid document; nothing
    /// is added to `breakdown` in that case.
    fn parse_content(
        &self,
        content: &str,
        file_path: &Path,
        breakdown: &mut Breakdown,
    ) -> crate::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind() {
        assert_eq!(FileKind::of(Path::new("main.tf")), Some(FileKind::Configuration));
        assert_eq!(FileKind::of(Path::new("env/prod.tfvars")), Some(FileKind::VariableValues));
        assert_eq!(FileKind::of(Path::new("prod.tfvars.json")), Some(FileKind::VariableValues));
        assert_eq!(FileKind::of(Path::new(".tfvars")), Some(FileKind::VariableValues));
        assert_eq!(FileKind::of(Path::new("main.tf.json")), None);
        assert_eq!(FileKind::of(Path::new("terraform.tfstate")), None);
        assert_eq!(FileKind::of(Path::new("README.md")), None);
    }
}
