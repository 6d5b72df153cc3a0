//! Report generation module.
//!
//! This module renders a [`Breakdown`] in one of the supported formats:
//! - JSON: the machine-readable breakdown itself
//! - Text: human-readable CLI summary
//!
//! # Example
//!
//! ```rust
//! use tfbreakdown::reporter::Reporter;
//! use tfbreakdown::{Breakdown, Config, ReportFormat};
//!
//! let config = Config::default();
//! let reporter = Reporter::new(&config);
//!
//! let json = reporter.generate(&Breakdown::new(), ReportFormat::Json).unwrap();
//! assert!(json.contains("\"resources\": []"));
//! ```

mod json;
mod text;

use crate::config::Config;
use crate::error::Result;
use crate::types::{Breakdown, ReportFormat};

pub use json::JsonReporter;
pub use text::TextReporter;

/// Report generator that supports multiple output formats.
pub struct Reporter {
    config: Config,
}

impl Reporter {
    /// Create a new reporter with the given configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Generate a report in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if report generation fails.
    pub fn generate(&self, breakdown: &Breakdown, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => JsonReporter::new(&self.config).generate(breakdown),
            ReportFormat::Text => TextReporter::new(&self.config).generate(breakdown),
        }
    }
}

/// Trait for report generators.
pub trait ReportGenerator {
    /// Generate a report from a breakdown.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails.
    fn generate(&self, breakdown: &Breakdown) -> Result<String>;
}
