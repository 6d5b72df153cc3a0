//! Plain text report generator.

use crate::config::Config;
use crate::error::Result;
use crate::reporter::ReportGenerator;
use crate::types::Breakdown;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use std::path::Path;

/// Width of section rules.
const RULE_WIDTH: usize = 80;

/// Text report generator for CLI output.
pub struct TextReporter {
    /// Whether to use colors
    use_colors: bool,
}

impl TextReporter {
    /// Create a new text reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            use_colors: config.output.colored,
        }
    }
}

impl ReportGenerator for TextReporter {
    fn generate(&self, breakdown: &Breakdown) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header());
        output.push_str(&self.format_summary(breakdown));

        if !breakdown.resources.is_empty() {
            let mut table = new_table(vec!["Type", "Name", "Attributes", "File"]);
            for resource in &breakdown.resources {
                table.add_row(vec![
                    resource.kind.clone(),
                    resource.name.clone(),
                    resource.attributes.len().to_string(),
                    display_path(&resource.file),
                ]);
            }
            output.push_str(&self.format_section("Resources", &table));
        }

        if !breakdown.modules.is_empty() {
            let mut table = new_table(vec!["Name", "Source", "File"]);
            for module in &breakdown.modules {
                table.add_row(vec![
                    module.name.clone(),
                    truncate(&module.source, 60),
                    display_path(&module.file),
                ]);
            }
            output.push_str(&self.format_section("Modules", &table));
        }

        if !breakdown.providers.is_empty() {
            let mut table = new_table(vec!["Name", "Alias", "File"]);
            for provider in &breakdown.providers {
                table.add_row(vec![
                    provider.name.clone(),
                    provider.alias.clone().unwrap_or_default(),
                    display_path(&provider.file),
                ]);
            }
            output.push_str(&self.format_section("Providers", &table));
        }

        if !breakdown.variables.is_empty() {
            let mut table = new_table(vec!["Name", "Type", "Default", "File"]);
            for variable in &breakdown.variables {
                table.add_row(vec![
                    variable.name.clone(),
                    variable.type_constraint.clone().unwrap_or_default(),
                    truncate(variable.default.as_deref().unwrap_or_default(), 40),
                    display_path(&variable.file),
                ]);
            }
            output.push_str(&self.format_section("Variables", &table));
        }

        if !breakdown.tfvars.is_empty() {
            let mut table = new_table(vec!["Key", "Values", "File"]);
            for (key, tfvars) in &breakdown.tfvars {
                table.add_row(vec![
                    key.clone(),
                    tfvars.values.len().to_string(),
                    display_path(&tfvars.file),
                ]);
            }
            output.push_str(&self.format_section("Variable Values", &table));
        }

        Ok(output)
    }
}

impl TextReporter {
    /// Format the report header.
    fn format_header(&self) -> String {
        let title = "Terraform Breakdown";
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));

        if self.use_colors {
            format!(
                "\n{} {}\n{}\n",
                title.bright_white().bold(),
                version.dimmed(),
                "=".repeat(RULE_WIDTH).bright_blue(),
            )
        } else {
            format!("\n{} {}\n{}\n", title, version, "=".repeat(RULE_WIDTH))
        }
    }

    /// Format the summary counts.
    fn format_summary(&self, breakdown: &Breakdown) -> String {
        let mut output = self.format_title("Summary");

        let counts = [
            ("Resources", breakdown.resources.len()),
            ("Modules", breakdown.modules.len()),
            ("Providers", breakdown.providers.len()),
            ("Variables", breakdown.variables.len()),
            ("Variable files", breakdown.tfvars.len()),
        ];
        for (label, count) in counts {
            output.push_str(&format!("  {label:<16}{count}\n"));
        }

        output
    }

    fn format_section(&self, title: &str, table: &Table) -> String {
        let mut output = self.format_title(title);
        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    fn format_title(&self, title: &str) -> String {
        let title = if self.use_colors {
            title.bright_cyan().bold().to_string()
        } else {
            title.to_string()
        };
        format!("\n{title}\n{}\n", "-".repeat(RULE_WIDTH))
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Truncate a string to a maximum number of characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Module, Provider};
    use std::path::PathBuf;

    fn plain_config() -> Config {
        let mut config = Config::default();
        config.output.colored = false;
        config
    }

    #[test]
    fn test_text_report_generation() {
        let mut breakdown = Breakdown::new();
        breakdown.modules.push(Module {
            name: "vpc".to_string(),
            source: "terraform-aws-modules/vpc/aws".to_string(),
            file: PathBuf::from("main.tf"),
            attributes: Default::default(),
        });
        breakdown.providers.push(Provider::required("aws", "versions.tf"));

        let text = TextReporter::new(&plain_config()).generate(&breakdown).unwrap();

        assert!(text.contains("Terraform Breakdown"));
        assert!(text.contains("Summary"));
        assert!(text.contains("terraform-aws-modules/vpc/aws"));
        assert!(text.contains("versions.tf"));
        assert!(!text.contains("Resources\n---"));
    }

    #[test]
    fn test_empty_report_has_summary_only() {
        let text = TextReporter::new(&plain_config()).generate(&Breakdown::new()).unwrap();
        assert!(text.contains("Summary"));
        assert!(!text.contains("Variable Values"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }
}
