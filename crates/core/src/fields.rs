//! Lenient JSON field access
//!
//! Every read the normalizer and aggregator make goes through these helpers,
//! so a missing or mistyped field degrades to `None`/empty instead of failing.

use serde_json::Value;

/// Walk `path` through nested objects.
pub(crate) fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// First path that resolves to a non-null value.
pub(crate) fn first_at<'a>(value: &'a Value, paths: &[&[&str]]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| at(value, path))
        .find(|v| !v.is_null())
}

/// String at `path`, or `None` when absent or not a string.
pub(crate) fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    at(value, path).and_then(Value::as_str)
}

/// Trimmed-non-empty string at `path`.
pub(crate) fn non_empty_at(value: &Value, path: &[&str]) -> Option<String> {
    non_empty(at(value, path))
}

/// A string value that is not blank.
pub(crate) fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// A string value, or `""` for anything else.
pub(crate) fn string_or_empty(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}

/// String entries of an array; other entries are skipped.
pub(crate) fn string_list(value: Option<&Value>) -> Vec<String> {
    array(value)
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

/// The elements of an array, or an empty slice for anything else.
pub(crate) fn array(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// A 0-100 score from an integer, float or numeric string.
///
/// Floats are rounded, then everything is clamped into range. Non-finite or
/// non-numeric input yields `None`.
pub(crate) fn score(value: Option<&Value>) -> Option<u8> {
    let raw = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.round().clamp(0.0, 100.0) as u8)
}

/// Identifier rendered as a string; integers and strings are accepted.
pub(crate) fn id_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Display text for a scalar (used for key-metric values).
pub(crate) fn display_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
