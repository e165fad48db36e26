//! Lenient field decoders for loosely typed JSON from the remote APIs.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Render a scalar JSON value as text; `null` becomes "".
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Integer from a JSON number or a numeric string.
pub fn value_to_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `deserialize_with` for string fields the server may send as a number or null.
pub fn text_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

/// `deserialize_with` for identifiers sent as a number, a string, or null.
pub fn opt_id_from_any<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_id(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(&json!("50")), "50");
        assert_eq!(value_to_text(&json!(50)), "50");
        assert_eq!(value_to_text(&json!(null)), "");
    }

    #[test]
    fn test_value_to_id() {
        assert_eq!(value_to_id(&json!(12)), Some(12));
        assert_eq!(value_to_id(&json!(" 12 ")), Some(12));
        assert_eq!(value_to_id(&json!("vlan added")), None);
        assert_eq!(value_to_id(&json!(-3)), None);
        assert_eq!(value_to_id(&json!(true)), None);
    }
}
