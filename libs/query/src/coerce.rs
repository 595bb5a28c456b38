//! Literal value coercion.

use serde_json::Value as JsonValue;

/// Convert a raw literal string to a typed scalar.
///
/// `"null"`, `"true"` and `"false"` become the corresponding JSON
/// scalars; a string that parses in full as a number becomes a number.
/// Anything else (including partial numerics like `"42abc"` and
/// non-finite parses like `"inf"`) is passed through unchanged.
pub fn coerce(raw: &str) -> JsonValue {
    match raw {
        "null" => return JsonValue::Null,
        "true" => return JsonValue::Bool(true),
        "false" => return JsonValue::Bool(false),
        _ => {}
    }
    if let Ok(int) = raw.parse::<i64>() {
        return JsonValue::from(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        if float.is_finite() {
            if let Some(number) = serde_json::Number::from_f64(float) {
                return JsonValue::Number(number);
            }
        }
    }
    JsonValue::String(raw.to_string())
}
