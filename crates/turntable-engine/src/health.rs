//! Health readout formatting.

use serde_json::Value;

/// Text shown for a health probe result.
///
/// Falsy values (`null`, `false`, `0`, `""`) show nothing. Objects and
/// arrays render as compact JSON, strings render without quotes.
pub fn health_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(_) | Value::Array(_) | Value::Bool(true) | Value::Number(_) => {
            Some(value.to_string())
        }
    }
}
