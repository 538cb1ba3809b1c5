//! Sensitive-value redaction for request/response logging.
//!
//! Log payloads pass through [`redact`] before they are emitted. Matching
//! is by exact key name, case-insensitive, at every nesting depth; the
//! structure of the payload is otherwise left intact.

use serde_json::Value;

/// Keys whose values must never appear in logs.
const SENSITIVE_KEYS: [&str; 6] = ["authorization", "secret", "password", "token", "cvv", "pin"];

/// Replacement marker for redacted values.
const REDACTED: &str = "***REDACTED***";

/// Returns a copy of `value` with every sensitive value replaced.
pub(crate) fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    if is_sensitive(key) {
                        (key.clone(), Value::String(REDACTED.to_owned()))
                    } else {
                        (key.clone(), redact(value))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

fn is_sensitive(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|sensitive| key.eq_ignore_ascii_case(sensitive))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn redacts_top_level_keys_case_insensitively() {
        let redacted = redact(&json!({
            "email": "user@example.com",
            "Authorization": "Bearer sk_test_x",
            "PIN": "1234"
        }));
        assert_eq!(redacted["email"], "user@example.com");
        assert_eq!(redacted["Authorization"], REDACTED);
        assert_eq!(redacted["PIN"], REDACTED);
    }

    #[test]
    fn redacts_nested_keys() {
        let redacted = redact(&json!({
            "card": { "number": "4084...", "cvv": "123" },
            "metadata": { "custom": [{ "token": "tok_x" }] }
        }));
        assert_eq!(redacted["card"]["cvv"], REDACTED);
        assert_eq!(redacted["card"]["number"], "4084...");
        assert_eq!(redacted["metadata"]["custom"][0]["token"], REDACTED);
    }

    #[test]
    fn redacts_entire_value_regardless_of_shape() {
        let redacted = redact(&json!({
            "secret": { "key": "sk_live_x", "other": 1 }
        }));
        assert_eq!(redacted["secret"], REDACTED);
    }

    #[test]
    fn leaves_structure_and_scalars_intact() {
        let input = json!({ "amount": 10050, "currency": "NGN", "channels": ["card", "bank"] });
        assert_eq!(redact(&input), input);
    }

    #[test]
    fn non_matching_substrings_are_not_redacted() {
        // Exact-name matching: "shipping" must not trip on "pin".
        let redacted = redact(&json!({ "shipping": "express" }));
        assert_eq!(redacted["shipping"], "express");
    }
}
