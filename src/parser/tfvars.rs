//! Variable value files (`.tfvars` and `.tfvars.json`).
//!
//! A value file is a flat list of top-level attributes rather than a
//! block-structured document. Each attribute that evaluates without
//! variables is recorded, formatted, under a key derived from the file
//! name.

use crate::error::Result;
use crate::parser::attributes::{evaluate_expression, just_attributes};
use crate::parser::value::format_value;
use crate::types::{Attributes, Breakdown, TfVars, DEFAULT_TFVARS_KEY};

use hcl::expr::TemplateExpr;
use hcl::{Expression, Number, Value};
use std::path::Path;

/// Structural syntax of a value file, chosen by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFileSyntax {
    /// Native HCL attribute syntax (`.tfvars`)
    Hcl,
    /// JSON object syntax (`.tfvars.json`)
    Json,
}

impl ValueFileSyntax {
    /// Pick the syntax for a file path.
    #[must_use]
    pub fn of(path: &Path) -> Self {
        if path.to_string_lossy().ends_with(".json") {
            Self::Json
        } else {
            Self::Hcl
        }
    }
}

/// Parse a value file from disk and store it in `breakdown`.
///
/// Any previous entry under the same key is replaced.
///
/// # Errors
///
/// Returns `ValueFileParse` if the file can't be read or parsed, and
/// `ValueFileAttributes` if its top-level attributes can't be enumerated.
/// Nothing is stored in either case.
pub fn parse_value_file(file_path: &Path, breakdown: &mut Breakdown) -> Result<()> {
    let content = std::fs::read_to_string(file_path).map_err(|e| crate::err!(ValueFileParse {
        file: file_path.to_path_buf(),
        message: e.to_string(),
    }))?;

    let tfvars = parse_value_content(&content, file_path)?;
    let key = tfvars_key(file_path);

    if breakdown.tfvars.contains_key(&key) {
        tracing::debug!(key = %key, file = %file_path.display(), "Value file replaces an earlier one");
    }
    breakdown.tfvars.insert(key, tfvars);

    Ok(())
}

/// Parse value file content into a record for `file_path`.
///
/// # Errors
///
/// See [`parse_value_file`].
pub fn parse_value_content(content: &str, file_path: &Path) -> Result<TfVars> {
    let values = match ValueFileSyntax::of(file_path) {
        ValueFileSyntax::Hcl => hcl_values(content, file_path)?,
        ValueFileSyntax::Json => json_values(content, file_path)?,
    };

    Ok(TfVars {
        file: file_path.to_path_buf(),
        values,
    })
}

fn hcl_values(content: &str, file_path: &Path) -> Result<Attributes> {
    let body = hcl::parse(content).map_err(|e| crate::err!(ValueFileParse {
        file: file_path.to_path_buf(),
        message: e.to_string(),
    }))?;

    if let Some(block) = body.blocks().next() {
        return Err(crate::err!(ValueFileAttributes {
            file: file_path.to_path_buf(),
            message: format!("unexpected '{}' block, blocks are not allowed here", block.identifier.as_str()),
        }));
    }

    let attrs = just_attributes(&body).map_err(|reason| crate::err!(ValueFileAttributes {
        file: file_path.to_path_buf(),
        message: reason,
    }))?;

    let mut values = Attributes::new();
    for attr in attrs {
        match evaluate_expression(attr.key(), attr.expr()) {
            Ok(value) => {
                values.insert(attr.key().to_string(), format_value(&value));
            }
            Err(e) => tracing::debug!(file = %file_path.display(), error = %e, "Skipping value"),
        }
    }

    Ok(values)
}

fn json_values(content: &str, file_path: &Path) -> Result<Attributes> {
    let document: serde_json::Value = serde_json::from_str(content).map_err(|e| crate::err!(ValueFileParse {
        file: file_path.to_path_buf(),
        message: e.to_string(),
    }))?;

    let serde_json::Value::Object(object) = document else {
        return Err(crate::err!(ValueFileAttributes {
            file: file_path.to_path_buf(),
            message: "the root of a JSON value file must be an object".to_string(),
        }));
    };

    let mut values = Attributes::new();
    for (name, json) in object {
        match json_to_value(&name, json) {
            Ok(value) => {
                values.insert(name, format_value(&value));
            }
            Err(e) => tracing::debug!(file = %file_path.display(), error = %e, "Skipping value"),
        }
    }

    Ok(values)
}

/// Convert a JSON value, evaluating strings that contain template
/// sequences the way HCL's JSON syntax does.
fn json_to_value(name: &str, json: serde_json::Value) -> Result<Value> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(json_number(name, &n)?),
        serde_json::Value::String(s) if s.contains("${") || s.contains("%{") => {
            let template = Expression::TemplateExpr(Box::new(TemplateExpr::QuotedString(s)));
            evaluate_expression(name, &template)?
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| json_to_value(name, item))
                .collect::<Result<_>>()?,
        ),
        serde_json::Value::Object(object) => Value::Object(
            object
                .into_iter()
                .map(|(key, item)| Ok((key, json_to_value(name, item)?)))
                .collect::<Result<_>>()?,
        ),
    })
}

fn json_number(name: &str, n: &serde_json::Number) -> Result<Number> {
    if let Some(i) = n.as_i64() {
        return Ok(Number::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Number::from(u));
    }
    n.as_f64().and_then(Number::from_f64).ok_or_else(|| crate::err!(Evaluation {
        attribute: name.to_string(),
        message: format!("unsupported number {n}"),
    }))
}

/// Derive the storage key for a value file.
///
/// The last extension is dropped, then a remaining `.tfvars` suffix, so
/// `prod.tfvars` and `prod.tfvars.json` both map to `prod`. A name that
/// normalizes to nothing maps to [`DEFAULT_TFVARS_KEY`].
#[must_use]
pub fn tfvars_key(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stem = base.rfind('.').map_or(base.as_str(), |dot| &base[..dot]);
    let key = stem.strip_suffix(".tfvars").unwrap_or(stem);

    if key.is_empty() {
        DEFAULT_TFVARS_KEY.to_string()
    } else {
        key.to_string()
    }
}
