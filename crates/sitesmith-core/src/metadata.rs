//! Per-file metadata records.
//!
//! Metadata is whatever the upstream pipeline attached to a file, usually
//! parsed frontmatter. Values are duck-typed, so the helpers here follow the
//! loose conventions plugins expect: dotted property paths, truthiness, and
//! numbers that may arrive as strings.

use serde_json::Value;

/// Frontmatter-like record of arbitrary keys attached to a file.
pub type Metadata = serde_json::Map<String, Value>;

/// Look up a property, accepting dotted paths such as `seo.canonical`.
///
/// An exact key wins over a dotted walk, so `{"a.b": 1}` resolves `"a.b"`
/// without descending into `a`.
pub fn lookup<'a>(metadata: &'a Metadata, property: &str) -> Option<&'a Value> {
    if let Some(value) = metadata.get(property) {
        return Some(value);
    }

    let mut segments = property.split('.');
    let mut current = metadata.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Like [`lookup`], but treats an explicit `null` as absent.
pub fn lookup_present<'a>(metadata: &'a Metadata, property: &str) -> Option<&'a Value> {
    lookup(metadata, property).filter(|value| !value.is_null())
}

/// Loose truthiness: `null`, `false`, zero and the empty string are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Interpret a value as a finite number.
///
/// Numeric strings (`"0.8"`) are accepted; anything else yields `None`.
pub fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}
