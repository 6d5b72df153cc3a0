//! Literal attribute extraction.
//!
//! Attributes are evaluated with an empty [`Context`]: literals and
//! literal composites (`[1, 2]`, `{ a = "b" }`, `"x-${"y"}"`, `1 + 2`)
//! succeed, anything referencing a variable, resource, local or function
//! fails and is left out of the result.

use crate::error::Result;
use crate::parser::value::format_value;
use crate::types::Attributes;

use hcl::eval::{Context, Evaluate};
use hcl::{Attribute, Body, Expression, Value};
use std::collections::HashSet;

/// Enumerate the attributes directly present in a body.
///
/// Nested blocks are not attributes and are skipped. A body that repeats
/// an attribute key has no well-defined attribute set and is rejected.
/// `hcl::parse` already refuses such documents, so this only matters for
/// bodies assembled in code.
///
/// # Errors
///
/// Returns the name of the first duplicated key.
pub fn just_attributes(body: &Body) -> std::result::Result<Vec<&Attribute>, String> {
    let mut seen = HashSet::new();
    let mut attributes = Vec::new();

    for attr in body.attributes() {
        if !seen.insert(attr.key()) {
            return Err(format!("duplicate attribute '{}'", attr.key()));
        }
        attributes.push(attr);
    }

    Ok(attributes)
}

/// Evaluate an expression without any variables or functions in scope.
///
/// # Errors
///
/// Returns an `Evaluation` error if the expression is not self-contained.
pub fn evaluate_expression(name: &str, expr: &Expression) -> Result<Value> {
    expr.evaluate(&Context::new()).map_err(|e| crate::err!(Evaluation {
        attribute: name.to_string(),
        message: e.to_string(),
    }))
}

/// Extract every literal attribute of a block body as formatted strings.
///
/// Attributes that don't evaluate, or that format to an empty string,
/// are omitted. A malformed body yields an empty mapping.
#[must_use]
pub fn extract_attributes(body: &Body) -> Attributes {
    let mut attrs = Attributes::new();

    let body_attrs = match just_attributes(body) {
        Ok(attrs) => attrs,
        Err(message) => {
            tracing::debug!(reason = %message, "Body has no usable attribute set");
            return attrs;
        }
    };

    for attr in body_attrs {
        match evaluate_expression(attr.key(), attr.expr()) {
            Ok(value) => {
                let formatted = format_value(&value);
                if !formatted.is_empty() {
                    attrs.insert(attr.key().to_string(), formatted);
                }
            }
            Err(e) => {
                tracing::trace!(error = %e, "Skipping non-literal attribute");
            }
        }
    }

    attrs
}

/// Render an expression back to HCL source on a single line.
///
/// Used for expressions that are meaningful as written but never
/// evaluate, such as variable type constraints (`list(string)`).
#[must_use]
pub fn expression_source(expr: &Expression) -> Option<String> {
    let source = hcl::format::to_string(expr).ok()?;
    let source = source.split_whitespace().collect::<Vec<_>>().join(" ");
    (!source.is_empty()).then_some(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BreakdownError;
    use pretty_assertions::assert_eq;

    fn body(content: &str) -> Body {
        hcl::parse(content).unwrap()
    }

    #[test]
    fn test_extract_literals_only() {
        let body = body(
            r#"
a = 1
b = var.x
"#,
        );

        let attrs = extract_attributes(&body);
        assert_eq!(attrs, Attributes::from([("a".to_string(), "1".to_string())]));
    }

    #[test]
    fn test_extract_skips_references_and_functions() {
        let body = body(
            r#"
name     = "web"
ami      = data.aws_ami.ubuntu.id
subnet   = aws_subnet.main.id
tags     = merge(local.tags, { Name = "web" })
greeting = "hello ${var.name}"
count    = 2 + 1
ports    = [80, 443]
"#,
        );

        let attrs = extract_attributes(&body);
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs["name"], "web");
        assert_eq!(attrs["count"], "3");
        assert_eq!(attrs["ports"], "[80, 443]");
    }

    #[test]
    fn test_extract_omits_empty_strings() {
        let body = body(
            r#"
description = ""
enabled     = false
"#,
        );

        let attrs = extract_attributes(&body);
        assert!(!attrs.contains_key("description"));
        assert_eq!(attrs["enabled"], "false");
    }

    #[test]
    fn test_extract_ignores_nested_blocks() {
        let body = body(
            r#"
instance_type = "t3.micro"

ebs_block_device {
  volume_size = 20
}
"#,
        );

        let attrs = extract_attributes(&body);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["instance_type"], "t3.micro");
    }

    #[test]
    fn test_duplicate_keys_rejected_by_parser() {
        assert!(hcl::parse("a = 1\na = 2\n").is_err());
    }

    #[test]
    fn test_built_body_with_duplicate_keys_yields_empty() {
        let body = Body::builder()
            .add_attribute(Attribute::new("a", "x"))
            .add_attribute(Attribute::new("a", "y"))
            .build();

        assert!(just_attributes(&body).is_err());
        assert!(extract_attributes(&body).is_empty());
    }

    #[test]
    fn test_evaluate_expression_error_names_attribute() {
        let body = body("region = var.region\n");
        let attr = body.attributes().next().unwrap();

        let err = evaluate_expression(attr.key(), attr.expr()).unwrap_err();
        assert!(matches!(err, BreakdownError::Evaluation { ref attribute, .. } if attribute == "region"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_expression_source() {
        let body = body(
            r#"
simple  = string
complex = list(string)
"#,
        );
        let mut attrs = body.attributes();

        assert_eq!(expression_source(attrs.next().unwrap().expr()).as_deref(), Some("string"));
        assert_eq!(expression_source(attrs.next().unwrap().expr()).as_deref(), Some("list(string)"));
    }
}
