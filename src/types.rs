//! Core data types used throughout tfbreakdown.
//!
//! This module defines the records extracted from a Terraform/OpenTofu
//! code base:
//! - resources, module calls, provider configurations and variable
//!   declarations found in `.tf` files
//! - variable values found in `.tfvars` / `.tfvars.json` files
//! - the [`Breakdown`] aggregate collecting all of them

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Attribute name to formatted value.
///
/// Only attributes whose expression is fully literal are present.
/// Keys are kept sorted so that reports are stable across runs.
pub type Attributes = BTreeMap<String, String>;

/// Storage key used for a value file whose name normalizes to nothing
/// (for example a file literally named `.tfvars`).
pub const DEFAULT_TFVARS_KEY: &str = "terraform";

/// Represents a Terraform resource block.
///
/// # Example HCL
///
/// ```hcl
/// resource "aws_instance" "web" {
///   ami           = "ami-123456"
///   instance_type = "t3.micro"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource type label (e.g., "aws_instance")
    #[serde(rename = "type")]
    pub kind: String,

    /// Resource name label (e.g., "web")
    pub name: String,

    /// File where this resource is declared
    pub file: PathBuf,

    /// Literal attributes of the block
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

/// Represents a Terraform module call.
///
/// # Example HCL
///
/// ```hcl
/// module "vpc" {
///   source  = "terraform-aws-modules/vpc/aws"
///   version = "~> 5.0"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// The name/label of the module block (e.g., "vpc")
    pub name: String,

    /// The `source` attribute, empty when not a literal
    #[serde(default)]
    pub source: String,

    /// File where this module is called
    pub file: PathBuf,

    /// Literal attributes of the block, `source` included
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

/// Represents a provider, either configured by a `provider` block or
/// required by `terraform.required_providers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Provider local name (e.g., "aws")
    pub name: String,

    /// The `alias` attribute of the configuration, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// File where this provider is declared
    pub file: PathBuf,

    /// Literal attributes of the `provider` block
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

impl Provider {
    /// A provider known only from `required_providers`.
    #[must_use]
    pub fn required(name: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            file: file.into(),
            attributes: Attributes::new(),
        }
    }

    /// Whether this entry was declared in `file` under `name`.
    #[must_use]
    pub fn is_declared(&self, name: &str, file: &Path) -> bool {
        self.name == name && self.file == file
    }
}

/// Represents a Terraform variable declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name
    pub name: String,

    /// Type constraint (e.g., "string", "list(string)")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_constraint: Option<String>,

    /// Description, if it is a literal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default value, formatted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// File where this variable is declared
    pub file: PathBuf,
}

/// Variable values read from a `.tfvars` or `.tfvars.json` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TfVars {
    /// The value file
    pub file: PathBuf,

    /// Variable name to formatted value
    pub values: Attributes,
}

/// The complete inventory of a scanned directory tree.
///
/// Sequences keep block order within a file and file order within the
/// scan. Nothing is de-duplicated across files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Resource blocks
    pub resources: Vec<Resource>,
    /// Module calls
    pub modules: Vec<Module>,
    /// Provider configurations and requirements
    pub providers: Vec<Provider>,
    /// Variable declarations
    pub variables: Vec<Variable>,
    /// Value files keyed by normalized file name
    pub tfvars: BTreeMap<String, TfVars>,
}

impl Breakdown {
    /// Create an empty breakdown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
            && self.modules.is_empty()
            && self.providers.is_empty()
            && self.variables.is_empty()
            && self.tfvars.is_empty()
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// JSON format
    #[default]
    Json,
    /// Plain text summary
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_breakdown_serialization() {
        let json = serde_json::to_string(&Breakdown::new()).unwrap();
        assert_eq!(
            json,
            r#"{"resources":[],"modules":[],"providers":[],"variables":[],"tfvars":{}}"#
        );
    }

    #[test]
    fn test_optional_fields_omitted() {
        let variable = Variable {
            name: "region".to_string(),
            type_constraint: Some("string".to_string()),
            description: None,
            default: Some("us-east-1".to_string()),
            file: PathBuf::from("main.tf"),
        };

        let value = serde_json::to_value(&variable).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "region",
                "type": "string",
                "default": "us-east-1",
                "file": "main.tf",
            })
        );
    }

    #[test]
    fn test_provider_without_alias_or_attributes() {
        let provider = Provider::required("aws", "versions.tf");
        let value = serde_json::to_value(&provider).unwrap();
        assert_eq!(value, serde_json::json!({ "name": "aws", "file": "versions.tf" }));
    }

    #[test]
    fn test_resource_type_field_name() {
        let resource = Resource {
            kind: "aws_instance".to_string(),
            name: "web".to_string(),
            file: PathBuf::from("main.tf"),
            attributes: Attributes::from([("ami".to_string(), "ami-1".to_string())]),
        };
        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["type"], "aws_instance");
        assert_eq!(value["attributes"]["ami"], "ami-1");
    }

    #[test]
    fn test_is_declared() {
        let provider = Provider::required("aws", "a/versions.tf");
        assert!(provider.is_declared("aws", Path::new("a/versions.tf")));
        assert!(!provider.is_declared("aws", Path::new("b/versions.tf")));
        assert!(!provider.is_declared("google", Path::new("a/versions.tf")));
    }
}
