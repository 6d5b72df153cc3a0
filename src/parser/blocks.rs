//! Top-level block classification.
//!
//! A fixed table maps each recognized block type to its label count and
//! the builder that turns it into a record. Unrecognized blocks and
//! top-level attributes are ignored; a recognized block with the wrong
//! number of labels is skipped.

use crate::error::Result;
use crate::parser::attributes::{expression_source, extract_attributes};
use crate::types::{Breakdown, Module, Provider, Resource, Variable};

use hcl::{Block, Body};
use std::path::Path;

/// Turns a matched block into records on the breakdown.
type RecordBuilder = fn(&Block, &Path, &mut Breakdown);

/// A recognized top-level block type.
struct BlockSchema {
    identifier: &'static str,
    labels: usize,
    build: RecordBuilder,
}

/// Block types extracted from configuration files, in matching order.
const BLOCK_SCHEMA: &[BlockSchema] = &[
    BlockSchema { identifier: "resource", labels: 2, build: build_resource },
    BlockSchema { identifier: "module", labels: 1, build: build_module },
    BlockSchema { identifier: "provider", labels: 1, build: build_provider },
    BlockSchema { identifier: "terraform", labels: 0, build: build_terraform },
    BlockSchema { identifier: "variable", labels: 1, build: build_variable },
    BlockSchema { identifier: "output", labels: 0, build: ignore_block },
    BlockSchema { identifier: "data", labels: 2, build: ignore_block },
];

impl BlockSchema {
    fn find(identifier: &str) -> Option<&'static Self> {
        BLOCK_SCHEMA.iter().find(|s| s.identifier == identifier)
    }

    fn check_labels(&self, block: &Block, file_path: &Path) -> Result<()> {
        if block.labels.len() == self.labels {
            return Ok(());
        }
        Err(crate::err!(SchemaMatch {
            file: file_path.to_path_buf(),
            block: self.identifier.to_string(),
            message: format!("expected {} label(s), found {}", self.labels, block.labels.len()),
        }))
    }
}

/// Classify every top-level block of a document into `breakdown`.
///
/// Never fails: mismatched blocks are logged and skipped, and whatever
/// was extracted before them is kept.
pub fn classify(body: &Body, file_path: &Path, breakdown: &mut Breakdown) {
    for block in body.blocks() {
        let Some(schema) = BlockSchema::find(block.identifier.as_str()) else {
            continue;
        };

        if let Err(e) = schema.check_labels(block, file_path) {
            tracing::debug!(file = %file_path.display(), error = %e, "Skipping block");
            continue;
        }

        (schema.build)(block, file_path, breakdown);
    }
}

fn label(block: &Block, index: usize) -> String {
    block.labels[index].as_str().to_string()
}

fn build_resource(block: &Block, file_path: &Path, breakdown: &mut Breakdown) {
    breakdown.resources.push(Resource {
        kind: label(block, 0),
        name: label(block, 1),
        file: file_path.to_path_buf(),
        attributes: extract_attributes(&block.body),
    });
}

fn build_module(block: &Block, file_path: &Path, breakdown: &mut Breakdown) {
    let attributes = extract_attributes(&block.body);
    let source = attributes.get("source").cloned().unwrap_or_default();

    if source.is_empty() {
        tracing::debug!(
            module = %label(block, 0),
            file = %file_path.display(),
            "Module block has no literal source"
        );
    }

    breakdown.modules.push(Module {
        name: label(block, 0),
        source,
        file: file_path.to_path_buf(),
        attributes,
    });
}

fn build_provider(block: &Block, file_path: &Path, breakdown: &mut Breakdown) {
    let attributes = extract_attributes(&block.body);
    let provider = Provider {
        name: label(block, 0),
        alias: attributes.get("alias").cloned(),
        file: file_path.to_path_buf(),
        attributes,
    };
    record_provider(breakdown, provider);
}

/// Append an explicit provider configuration.
///
/// An unaliased configuration whose name was already recorded for the
/// same file (typically from `required_providers`) fills in that entry
/// instead of adding a second one. Aliased configurations are distinct.
fn record_provider(breakdown: &mut Breakdown, provider: Provider) {
    if provider.alias.is_none() {
        if let Some(existing) = breakdown
            .providers
            .iter_mut()
            .find(|p| p.alias.is_none() && p.is_declared(&provider.name, &provider.file))
        {
            if existing.attributes.is_empty() {
                existing.attributes = provider.attributes;
            } else {
                tracing::debug!(
                    provider = %provider.name,
                    file = %provider.file.display(),
                    "Duplicate provider configuration, keeping the first"
                );
            }
            return;
        }
    }

    breakdown.providers.push(provider);
}

fn build_variable(block: &Block, file_path: &Path, breakdown: &mut Breakdown) {
    let mut attributes = extract_attributes(&block.body);

    // Type constraints are keywords and calls, not literals.
    let type_constraint = attributes.remove("type").or_else(|| {
        block
            .body
            .attributes()
            .find(|attr| attr.key() == "type")
            .and_then(|attr| expression_source(attr.expr()))
    });

    breakdown.variables.push(Variable {
        name: label(block, 0),
        type_constraint,
        description: attributes.remove("description"),
        default: attributes.remove("default"),
        file: file_path.to_path_buf(),
    });
}

fn build_terraform(block: &Block, file_path: &Path, breakdown: &mut Breakdown) {
    merge_required_providers(&block.body, file_path, breakdown);
}

fn ignore_block(block: &Block, file_path: &Path, _breakdown: &mut Breakdown) {
    tracing::trace!(
        block = %block.identifier.as_str(),
        file = %file_path.display(),
        "Ignoring block"
    );
}

/// Record providers named in `required_providers` blocks of a
/// `terraform` block.
///
/// Only the names matter; version and source constraints are dropped.
/// A name already recorded for the same file is not added again.
pub fn merge_required_providers(body: &Body, file_path: &Path, breakdown: &mut Breakdown) {
    for nested in body.blocks() {
        if nested.identifier.as_str() != "required_providers" {
            continue;
        }
        if !nested.labels.is_empty() {
            tracing::debug!(file = %file_path.display(), "Skipping labelled required_providers block");
            continue;
        }

        for name in extract_attributes(&nested.body).into_keys() {
            if breakdown.providers.iter().any(|p| p.is_declared(&name, file_path)) {
                continue;
            }
            breakdown.providers.push(Provider::required(name, file_path));
        }
    }
}
