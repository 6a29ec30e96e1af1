//! Canonical JSON serialization.
//!
//! The hash of a snapshot is only meaningful if every implementation
//! serializes the same value to the same bytes. Canonical form pins
//! that down:
//!
//! - object keys sorted lexicographically, recursively, at every level;
//! - array order preserved verbatim (order is semantically significant
//!   and is the generator's responsibility, not ours);
//! - compact output, no insignificant whitespace;
//! - `null` as the literal;
//! - numbers in their shortest round-trip decimal form, with integral
//!   floats printed without a fractional part.
//!
//! Key sorting (but not array reordering) is the deliberate choice that
//! makes the hash independent of field-insertion order across language
//! runtimes.

use serde::Serialize;
use serde_json::Value;
use std::fmt::Write as _;
use thiserror::Error;

/// Errors from canonical serialization.
#[derive(Debug, Error)]
pub enum CanonicalizeError {
    /// The value could not be converted into a JSON tree (e.g. a map
    /// with non-string keys).
    #[error("value cannot be represented as canonical JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Serialize `value` to its canonical JSON string.
///
/// # Examples
///
/// ```
/// use auditseal::commitment::canonicalize;
/// use serde_json::json;
///
/// let s = canonicalize(&json!({"z": 1, "a": 2, "m": 3})).unwrap();
/// assert_eq!(s, r#"{"a":2,"m":3,"z":1}"#);
/// ```
///
/// # Errors
///
/// [`CanonicalizeError::Serialization`] if `value` has no JSON
/// representation. The crate's own snapshot types always do.
pub fn canonicalize<T: Serialize>(value: &T) -> Result<String, CanonicalizeError> {
    let tree = serde_json::to_value(value)?;
    let mut out = String::new();
    write_canonical(&tree, &mut out);
    Ok(out)
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(n, out),
        Value::String(s) => write_escaped(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            // serde_json's default map is already key-ordered, but the
            // sort is re-applied here so canonical form does not depend
            // on a feature flag of the JSON library.
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_escaped(key, out);
                out.push(':');
                // Key came from the map, so the value is present.
                if let Some(v) = map.get(*key) {
                    write_canonical(v, out);
                }
            }
            out.push('}');
        }
    }
}

/// Numbers print in shortest round-trip decimal form. Rust's `Display`
/// for `f64` already produces the shortest representation that parses
/// back exactly, and prints integral floats without a fractional part —
/// both required for cross-runtime byte equality.
fn write_number(n: &serde_json::Number, out: &mut String) {
    if let Some(i) = n.as_i64() {
        let _ = write!(out, "{i}");
    } else if let Some(u) = n.as_u64() {
        let _ = write!(out, "{u}");
    } else if let Some(f) = n.as_f64() {
        let _ = write!(out, "{f}");
    }
}

/// Standard JSON string escaping: `"` `\` and control characters, with
/// `\u00xx` for the controls that have no short form. Non-ASCII passes
/// through as raw UTF-8.
fn write_escaped(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sorts_keys_lexicographically() {
        let s = canonicalize(&json!({"z": 1, "a": 2, "m": 3})).unwrap();
        assert_eq!(s, r#"{"a":2,"m":3,"z":1}"#);
    }

    #[test]
    fn sorts_nested_keys() {
        let s = canonicalize(&json!({"b": {"z": 1, "a": 2}, "a": 1})).unwrap();
        assert_eq!(s, r#"{"a":1,"b":{"a":2,"z":1}}"#);
    }

    #[test]
    fn preserves_array_order() {
        let s = canonicalize(&json!({"arr": [3, 1, 2]})).unwrap();
        assert_eq!(s, r#"{"arr":[3,1,2]}"#);
    }

    #[test]
    fn sorts_keys_inside_arrays_of_objects() {
        let s = canonicalize(&json!({"items": [{"z": 1, "a": 2}, {"b": 3, "a": 4}]})).unwrap();
        assert_eq!(s, r#"{"items":[{"a":2,"z":1},{"a":4,"b":3}]}"#);
    }

    #[test]
    fn compact_output_has_no_whitespace() {
        let s = canonicalize(&json!({"key": "value", "nested": {"inner": true}})).unwrap();
        assert!(!s.contains(' '));
        assert!(!s.contains('\n'));
    }

    #[test]
    fn null_serializes_as_literal() {
        let s = canonicalize(&json!({"a": null, "b": 1})).unwrap();
        assert_eq!(s, r#"{"a":null,"b":1}"#);
    }

    #[test]
    fn integral_floats_print_without_fraction() {
        // 5000.0 must print as "5000" — amounts that round to a whole
        // number still have to hash identically across runtimes.
        let s = canonicalize(&json!({"amount": 5000.0})).unwrap();
        assert_eq!(s, r#"{"amount":5000}"#);
    }

    #[test]
    fn fractional_floats_print_shortest_roundtrip() {
        assert_eq!(canonicalize(&json!({"amount": 1234.56})).unwrap(), r#"{"amount":1234.56}"#);
        assert_eq!(canonicalize(&json!({"amount": 0.1})).unwrap(), r#"{"amount":0.1}"#);
    }

    #[test]
    fn escapes_strings_like_standard_json() {
        let s = canonicalize(&json!({"a": "line\nbreak \"quoted\" \\ \u{1}"})).unwrap();
        assert_eq!(s, r#"{"a":"line\nbreak \"quoted\" \\ \u0001"}"#);
    }

    #[test]
    fn deterministic_across_calls() {
        let value = json!({"z": 1, "a": 2, "m": {"x": 1, "y": 2}});
        assert_eq!(canonicalize(&value).unwrap(), canonicalize(&value).unwrap());
    }

    #[test]
    fn works_on_serde_structs() {
        #[derive(serde::Serialize)]
        struct Sample {
            zulu: u32,
            alpha: &'static str,
        }
        let s = canonicalize(&Sample { zulu: 1, alpha: "x" }).unwrap();
        assert_eq!(s, r#"{"alpha":"x","zulu":1}"#);
    }
}
