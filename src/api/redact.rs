//! Log-safe copies of request bodies.

use serde_json::Value;

/// Fields that must never reach the logs in clear text.
pub const SENSITIVE_FIELDS: &[&str] = &["name", "symptoms", "chronicConditionDetails"];

/// Copy of `body` with every sensitive string replaced by `*` of the same
/// length. Non-string sensitive values become `"[redacted]"`.
pub fn redact_sensitive(body: &Value) -> Value {
    let mut redacted = body.clone();
    if let Value::Object(map) = &mut redacted {
        for field in SENSITIVE_FIELDS {
            if let Some(value) = map.get_mut(*field) {
                *value = match value {
                    Value::Null => Value::Null,
                    Value::String(s) => Value::String("*".repeat(s.chars().count())),
                    _ => Value::String("[redacted]".into()),
                };
            }
        }
    }
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn masks_sensitive_strings_keeping_length() {
        let body = json!({
            "name": "John Doe",
            "age": 30,
            "symptoms": "Cough",
            "chronicConditionDetails": "Asthma"
        });
        let redacted = redact_sensitive(&body);
        assert_eq!(redacted["name"], "********");
        assert_eq!(redacted["symptoms"], "*****");
        assert_eq!(redacted["chronicConditionDetails"], "******");
        assert_eq!(redacted["age"], 30);
    }

    #[test]
    fn non_string_values_are_replaced() {
        let redacted = redact_sensitive(&json!({ "name": ["John"], "symptoms": null }));
        assert_eq!(redacted["name"], "[redacted]");
        assert!(redacted["symptoms"].is_null());
    }

    #[test]
    fn non_objects_pass_through() {
        assert_eq!(redact_sensitive(&json!([1, 2])), json!([1, 2]));
    }
}
