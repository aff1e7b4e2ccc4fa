use serde_json::{Map, Value};

pub const OBJECT_PLACEHOLDER: &str = "[Object]";
pub const ARRAY_PLACEHOLDER: &str = "[Array]";

/// Returns a copy of `value` where containers nested deeper than `depth` are
/// replaced by a placeholder string. Primitives are kept at any depth, so a
/// truncated payload still shows the shape of what was logged.
pub fn normalize(value: &Value, depth: usize) -> Value {
    match value {
        Value::Object(map) => {
            if depth == 0 {
                return Value::String(OBJECT_PLACEHOLDER.to_string());
            }

            let normalized: Map<String, Value> = map
                .iter()
                .map(|(key, inner)| (key.clone(), normalize(inner, depth - 1)))
                .collect();
            Value::Object(normalized)
        }
        Value::Array(items) => {
            if depth == 0 {
                return Value::String(ARRAY_PLACEHOLDER.to_string());
            }

            Value::Array(items.iter().map(|i| normalize(i, depth - 1)).collect())
        }
        primitive => primitive.clone(),
    }
}

/// Normalizes a call's argument list as a single array value.
pub fn normalize_args(args: &[Value], depth: usize) -> Value {
    normalize(&Value::Array(args.to_vec()), depth)
}
