//! JSON report generator.

use crate::config::Config;
use crate::error::Result;
use crate::reporter::ReportGenerator;
use crate::types::Breakdown;

/// JSON report generator.
pub struct JsonReporter {
    /// Whether to pretty-print the output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            pretty: config.output.pretty,
        }
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, breakdown: &Breakdown) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(breakdown)
        } else {
            serde_json::to_string(breakdown)
        };

        json.map_err(|e| crate::err!(Serialization {
            message: format!("Failed to serialize JSON report: {e}"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attributes, Provider, Resource, TfVars, Variable};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn create_test_breakdown() -> Breakdown {
        let mut breakdown = Breakdown::new();
        breakdown.resources.push(Resource {
            kind: "aws_instance".to_string(),
            name: "web".to_string(),
            file: PathBuf::from("main.tf"),
            attributes: Attributes::from([("ami".to_string(), "ami-1".to_string())]),
        });
        breakdown.providers.push(Provider::required("aws", "versions.tf"));
        breakdown.variables.push(Variable {
            name: "region".to_string(),
            type_constraint: Some("string".to_string()),
            description: None,
            default: None,
            file: PathBuf::from("variables.tf"),
        });
        breakdown.tfvars.insert(
            "prod".to_string(),
            TfVars {
                file: PathBuf::from("prod.tfvars"),
                values: Attributes::from([("region".to_string(), "us-east-1".to_string())]),
            },
        );
        breakdown
    }

    #[test]
    fn test_json_report_generation() {
        let mut config = Config::default();
        config.output.pretty = false;
        let json = JsonReporter::new(&config).generate(&create_test_breakdown()).unwrap();

        assert_eq!(
            json,
            concat!(
                r#"{"resources":[{"type":"aws_instance","name":"web","file":"main.tf","attributes":{"ami":"ami-1"}}],"#,
                r#""modules":[],"#,
                r#""providers":[{"name":"aws","file":"versions.tf"}],"#,
                r#""variables":[{"name":"region","type":"string","file":"variables.tf"}],"#,
                r#""tfvars":{"prod":{"file":"prod.tfvars","values":{"region":"us-east-1"}}}}"#,
            )
        );
    }

    #[test]
    fn test_json_report_pretty() {
        let config = Config::default();
        let json = JsonReporter::new(&config).generate(&create_test_breakdown()).unwrap();

        assert!(json.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["modules"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let breakdown = create_test_breakdown();
        let json = JsonReporter::new(&Config::default()).generate(&breakdown).unwrap();
        let parsed: Breakdown = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, breakdown);
    }
}
