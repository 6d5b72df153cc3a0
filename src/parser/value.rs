//! Canonical string rendering of evaluated HCL values.
//!
//! Every literal attribute ends up in the breakdown as a string, so this
//! is where the display rules live: integers without a fractional part,
//! floats in `%g` style, lists as `[a, b]` and objects as `{k: v}`.

use hcl::{Number, Value};

/// Largest exponent still rendered in positional notation (`%g` with
/// shortest precision switches to exponent form at 6).
const MAX_POSITIONAL_EXPONENT: i32 = 5;
const MIN_POSITIONAL_EXPONENT: i32 = -4;

/// Format a value into its canonical display string.
///
/// Total over every value: never fails and never panics.
#[must_use]
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(key, value)| {
                    format!(
                        "{}: {}",
                        format_value(&Value::String(key.clone())),
                        format_value(value)
                    )
                })
                .collect();
            format!("{{{}}}", pairs.join(", "))
        }
    }
}

/// Integers that fit `i64` print plainly, everything else as a float.
///
/// `as_i64` saturates floats, so the integer branch is only taken for
/// numbers stored as integers.
fn format_number(n: &Number) -> String {
    let int = if n.is_i64() {
        n.as_i64()
    } else if n.is_u64() {
        n.as_u64().and_then(|u| i64::try_from(u).ok())
    } else {
        None
    };
    if let Some(i) = int {
        return i.to_string();
    }

    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && fits_i64(f) => {
            #[allow(clippy::cast_possible_truncation)]
            let i = f as i64;
            i.to_string()
        }
        Some(f) => format_float(f),
        // No float view of the number: fall back to its serialized form.
        None => serde_json::to_string(n).unwrap_or_else(|_| n.to_string()),
    }
}

#[allow(clippy::cast_precision_loss)]
fn fits_i64(f: f64) -> bool {
    f >= i64::MIN as f64 && f < i64::MAX as f64
}

/// Shortest round-trippable float in `%g` style: positional notation for
/// moderate exponents, `d.ddde±XX` otherwise.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let scientific = format!("{f:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return f.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return f.to_string();
    };

    if (MIN_POSITIONAL_EXPONENT..=MAX_POSITIONAL_EXPONENT).contains(&exponent) {
        f.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}
