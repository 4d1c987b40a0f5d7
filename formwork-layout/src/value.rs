//! Field values as seen by renderers and visibility rules.

use indexmap::IndexMap;
use serde_json::Value;

/// Snapshot of every current field value, keyed by field key.
pub type Values = IndexMap<String, Value>;

/// Per-key validation messages reported by a validator.
pub type FieldErrors = IndexMap<String, String>;

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Text shown inside a controlled input for a value.
///
/// Strings are shown verbatim, `null` as empty, everything else in its JSON form.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
