use serde_json::Value;

/// Joins values the way a console prints them: strings verbatim, anything
/// else in its JSON form. Every `Value` has a JSON form, so no argument is
/// ever replaced or skipped.
pub fn safe_join(values: &[Value], delimiter: &str) -> String {
    values
        .iter()
        .map(stringify_value)
        .collect::<Vec<_>>()
        .join(delimiter)
}

fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
