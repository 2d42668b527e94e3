//! Structural matcher: recursively compares an expected pattern tree against
//! an actual result tree, honoring wildcard tokens, and appends one
//! [`Mismatch`] per discrepancy in depth-first, left-to-right order of the
//! expected tree. Diagnostics are purely additive; nothing is deduplicated.

use crate::wildcard::Wildcard;
use serde_json::Value;
use std::fmt;

/// Path prefix of the call-under-test result in diagnostics.
pub const ROOT_PATH: &str = "testOutput";

/// One discrepancy between expected and actual, tagged with the property
/// path where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub path: String,
    pub expecting: String,
    pub found: String,
}

impl Mismatch {
    fn new(path: &str, expecting: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            expecting: expecting.into(),
            found: found.into(),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Property: {} - Expecting {} - Found {}",
            self.path, self.expecting, self.found
        )
    }
}

/// Compare `expected` against `actual` starting at [`ROOT_PATH`].
pub fn verify_root(expected: &Value, actual: &Value) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();
    verify(ROOT_PATH, expected, actual, &mut mismatches);
    mismatches
}

/// Compare one node pair, appending mismatches to `out`.
///
/// Precedence: null handling first, then wildcard recognition on the
/// expected side, then array / object / scalar comparison. Arrays and
/// objects are never wildcards themselves; only a scalar leaf can declare a
/// wildcard for the subtree it sits at.
pub fn verify(path: &str, expected: &Value, actual: &Value, out: &mut Vec<Mismatch>) {
    if expected.is_null() && actual.is_null() {
        return;
    }
    if expected.is_null() {
        out.push(Mismatch::new(path, "null value", describe(actual)));
        return;
    }
    // Only a scalar leaf can declare a wildcard; arrays and objects are
    // always compared structurally.
    if let Some(token) = expected.as_str().and_then(Wildcard::recognize) {
        verify_wildcard(path, token, actual, out);
        return;
    }
    match expected {
        Value::Array(expected_items) => {
            let expecting = || {
                format!(
                    "an array of size {}:\n\n{}\n\n",
                    expected_items.len(),
                    Wildcard::strip_markers(&expected.to_string())
                )
            };
            match actual {
                Value::Array(actual_items) if actual_items.len() == expected_items.len() => {
                    for (i, (exp, act)) in expected_items.iter().zip(actual_items).enumerate() {
                        verify(&format!("{path}[{i}]"), exp, act, out);
                    }
                }
                // Size mismatch: one whole-array diagnostic, no recursion.
                Value::Array(_) => out.push(Mismatch::new(path, expecting(), describe(actual))),
                other => out.push(Mismatch::new(path, expecting(), describe(other))),
            }
        }
        Value::Object(expected_props) => {
            if !actual.is_object() {
                let expecting = format!(
                    "a JSON object:\n\n{}\n\n",
                    Wildcard::strip_markers(&expected.to_string())
                );
                out.push(Mismatch::new(path, expecting, describe(actual)));
                return;
            }
            // Properties absent from the expected pattern are never checked,
            // even when the actual object carries extras.
            for (name, expected_child) in expected_props {
                let actual_child = actual.get(name).unwrap_or(&Value::Null);
                verify(&format!("{path}.{name}"), expected_child, actual_child, out);
            }
        }
        _ => {
            if expected.to_string() != actual.to_string() {
                out.push(Mismatch::new(path, expected.to_string(), actual.to_string()));
            }
        }
    }
}

fn verify_wildcard(path: &str, token: Wildcard, actual: &Value, out: &mut Vec<Mismatch>) {
    match token {
        Wildcard::Any => {
            if actual.is_array() {
                out.push(Mismatch::new(path, token.label(), describe(actual)));
            }
        }
        Wildcard::Some => {
            if actual.is_null() || actual.is_array() {
                out.push(Mismatch::new(path, token.label(), describe(actual)));
            }
        }
        Wildcard::ArrayUndeterminedLength
        | Wildcard::ArrayExactlyOne
        | Wildcard::ArrayMoreThanOne => {
            let Value::Array(items) = actual else {
                out.push(Mismatch::new(path, token.label(), describe(actual)));
                return;
            };
            // No per-element recursion for wildcard arrays.
            let length_ok = match token {
                Wildcard::ArrayUndeterminedLength => true,
                Wildcard::ArrayExactlyOne => items.len() == 1,
                _ => items.len() > 1,
            };
            if !length_ok {
                out.push(Mismatch::new(path, token.label(), describe(actual)));
            }
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null value".to_string(),
        Value::Array(items) => format!("an array of size {}:\n\n{}\n\n", items.len(), value),
        Value::Object(_) => format!("a JSON object:\n\n{}\n\n", value),
        scalar => scalar.to_string(),
    }
}
