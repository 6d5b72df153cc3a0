//! Error types for tfbreakdown.
//!
//! This module defines the error hierarchy using `thiserror`. Only a few
//! variants are fatal for a scan; the rest are raised inside the extractor
//! and absorbed where they are detected (the offending file, block or
//! attribute is skipped and the scan continues).
//!
//! # Error Categories
//!
//! - **Traversal errors**: root directory missing or unreadable (fatal)
//! - **Parse errors**: invalid HCL in a single `.tf` file (file skipped)
//! - **Schema errors**: a block with the wrong label count (block skipped)
//! - **Evaluation errors**: an attribute referencing variables (attribute omitted)
//! - **Value file errors**: a `.tfvars` file that can't be parsed (file skipped)
//! - **Config errors**: invalid configuration files
//! - **Serialization errors**: the report could not be rendered (fatal)
//!
//! # Example
//!
//! ```rust
//! use tfbreakdown::error::{BreakdownError, Result};
//!
//! fn read_file(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .map_err(|e| BreakdownError::io(path, e, file!(), line!()))
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Macro to create errors with automatic source location tracking.
///
/// Usage:
/// ```ignore
/// return Err(err!(DirectoryNotFound { path: root.to_path_buf() }));
/// ```
#[macro_export]
macro_rules! err {
    ($variant:ident { $($field:ident: $value:expr),* $(,)? }) => {
        $crate::error::BreakdownError::$variant {
            $($field: $value,)*
            src_path: file!(),
            src_line: line!(),
        }
    };
}

/// A specialized Result type for tfbreakdown operations.
pub type Result<T> = std::result::Result<T, BreakdownError>;

/// The main error type for tfbreakdown.
#[derive(Error, Debug)]
pub enum BreakdownError {
    // =========================================================================
    // Traversal Errors
    // =========================================================================
    /// Directory not found.
    #[error("Directory not found: {path} ({src_path}:{src_line})")]
    DirectoryNotFound {
        /// The missing directory path
        path: PathBuf,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Path exists but is not a directory.
    #[error("{path} is not a valid directory ({src_path}:{src_line})")]
    NotADirectory {
        /// The offending path
        path: PathBuf,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// The directory walk itself failed.
    #[error("Failed to walk '{path}' ({src_path}:{src_line}): {source}")]
    Walk {
        /// The path being walked
        path: PathBuf,
        /// The underlying walk error
        #[source]
        source: walkdir::Error,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// I/O error with path context.
    #[error("I/O error at '{path}' ({src_path}:{src_line}): {source}")]
    Io {
        /// The path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // HCL Parsing Errors
    // =========================================================================
    /// HCL parsing error.
    #[error("Failed to parse HCL in '{file}' \n\t({src_path}:{src_line}): {message}")]
    HclParse {
        /// The file being parsed
        file: PathBuf,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// A block does not match the shape its type requires.
    #[error("Block '{block}' in '{file}' does not match its schema ({src_path}:{src_line}): {message}")]
    SchemaMatch {
        /// The file containing the block
        file: PathBuf,
        /// Block type identifier
        block: String,
        /// Description of the mismatch
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// An attribute expression could not be evaluated without variables.
    #[error("Cannot evaluate attribute '{attribute}' ({src_path}:{src_line}): {message}")]
    Evaluation {
        /// Attribute name
        attribute: String,
        /// Evaluation failure message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Variable Value File Errors
    // =========================================================================
    /// The value file could not be parsed at all.
    #[error("parse error in '{file}' ({src_path}:{src_line}): {message}")]
    ValueFileParse {
        /// The value file
        file: PathBuf,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// The value file's top-level attributes could not be enumerated.
    #[error("attribute extraction error in '{file}' ({src_path}:{src_line}): {message}")]
    ValueFileAttributes {
        /// The value file
        file: PathBuf,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration parsing error.
    #[error("Failed to parse configuration ({src_path}:{src_line}): {message}")]
    ConfigParse {
        /// Error message
        message: String,
        /// The underlying error (if any)
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}' ({src_path}:{src_line}): {message}")]
    ConfigValue {
        /// The configuration key
        key: String,
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },

    // =========================================================================
    // Report Errors
    // =========================================================================
    /// The breakdown could not be serialized.
    #[error("Failed to serialize report ({src_path}:{src_line}): {message}")]
    Serialization {
        /// Error message
        message: String,
        /// Source file path
        src_path: &'static str,
        /// Source line number
        src_line: u32,
    },
}

impl BreakdownError {
    /// Creates an `Io` error.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error, src_path: &'static str, src_line: u32) -> Self {
        Self::Io { path: path.into(), source, src_path, src_line }
    }

    /// Creates an `HclParse` error.
    #[must_use]
    pub fn hcl_parse(file: impl Into<PathBuf>, message: String, src_path: &'static str, src_line: u32) -> Self {
        Self::HclParse { file: file.into(), message, src_path, src_line }
    }

    /// Creates a `ConfigParse` error.
    #[must_use]
    pub fn config_parse(message: String, source: Option<Box<dyn std::error::Error + Send + Sync>>, src_path: &'static str, src_line: u32) -> Self {
        Self::ConfigParse { message, source, src_path, src_line }
    }

    /// Whether the scan can carry on after this error.
    ///
    /// Per-file, per-block and per-attribute failures are recoverable;
    /// traversal, configuration and serialization failures are not.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Io { .. }
                | Self::HclParse { .. }
                | Self::SchemaMatch { .. }
                | Self::Evaluation { .. }
                | Self::ValueFileParse { .. }
                | Self::ValueFileAttributes { .. }
        )
    }

    /// Returns the appropriate exit code for the error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => 13,
            Self::DirectoryNotFound { .. } | Self::NotADirectory { .. } => 15,
            Self::ConfigParse { .. } => 18,
            Self::ConfigValue { .. } => 19,
            Self::Serialization { .. } => 21,
            _ => 1,
        }
    }
}

impl From<serde_json::Error> for BreakdownError {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization error: {source}"),
            src_path: file!(),
            src_line: line!(),
        }
    }
}

/// Collects the recoverable errors absorbed during a scan.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<BreakdownError>,
}

impl ErrorCollector {
    /// Create a new error collector.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn add(&mut self, error: BreakdownError) {
        self.errors.push(error);
    }

    /// Get the number of collected errors.
    #[must_use]
    pub fn count(&self) -> usize {
        self.errors.len()
    }

    /// Check if there are any errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The collected errors, in the order they were absorbed.
    #[must_use]
    pub fn errors(&self) -> &[BreakdownError] {
        &self.errors
    }
}
