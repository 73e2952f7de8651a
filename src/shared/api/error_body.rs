// src/shared/api/error_body.rs
use serde_json::Value;

/// Reduce a backend error body to a single user-facing message.
///
/// Shapes seen from the marketplace API:
/// - `{"errors": ["Phone number is invalid", ...]}`
/// - `{"errors": {"phone_number": ["is invalid"]}}`
/// - `{"message": "..."}`
/// - `{"status": {"code": 401, "message": "..."}}`
pub fn backend_error_message(body: &Value) -> Option<String> {
    if let Some(errors) = body.get("errors") {
        if let Some(msg) = errors_message(errors) {
            return Some(msg);
        }
    }

    if let Some(msg) = non_empty_str(body.get("message")) {
        return Some(msg);
    }

    if let Some(msg) = non_empty_str(body.get("error")) {
        return Some(msg);
    }

    body.get("status")
        .and_then(|status| non_empty_str(status.get("message")))
}

fn errors_message(errors: &Value) -> Option<String> {
    match errors {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(|item| match item {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }),
        Value::Object(fields) => fields.iter().find_map(|(field, detail)| {
            let detail = match detail {
                Value::Array(items) => items.iter().find_map(|v| v.as_str().map(str::to_string)),
                Value::String(s) => Some(s.clone()),
                _ => None,
            }?;
            Some(format!("{} {}", field.replace('_', " "), detail))
        }),
        _ => None,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
