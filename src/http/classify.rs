//! Failure classification.
//!
//! Every failed API call is classified exactly once, through one of three
//! entry points:
//!
//! - [`body_failure`] — a 2xx response whose envelope carried
//!   `status: false`; classification keys off the message text.
//! - [`transport_failure`] — a non-2xx HTTP status; classification follows
//!   a fixed status table.
//! - [`network_failure`] — no HTTP response at all.
//!
//! Message-keyword checks run in a fixed priority order so classification
//! is deterministic when multiple keywords match.

use std::collections::HashMap;

use serde_json::Value;

use crate::{
    error::{NetworkErrorKind, PaystackError},
    http::RawResponse,
};

/// Classifies a logical failure reported inside a 2xx response body.
///
/// Priority: "authorization" → `Authentication`; "validation" or "invalid"
/// → `Validation` (with field errors lifted from the body); anything else
/// → `Api`.
#[must_use]
pub fn body_failure(body: &Value) -> PaystackError {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Request failed")
        .to_owned();
    let code = body
        .get("code")
        .and_then(Value::as_u64)
        .and_then(|code| u16::try_from(code).ok())
        .unwrap_or(0);
    let lower = message.to_lowercase();

    if lower.contains("authorization") {
        PaystackError::Authentication { message, code, response: Some(body.clone()) }
    } else if lower.contains("validation") || lower.contains("invalid") {
        PaystackError::Validation {
            message,
            code,
            errors: field_errors(body),
            response: Some(body.clone()),
        }
    } else {
        PaystackError::Api { message, code, response: Some(body.clone()) }
    }
}

/// Classifies a non-2xx HTTP response.
///
/// 401 → `Authentication`, 404 → `NotFound`, 422 → `Validation`, 429 →
/// `RateLimit` (with `Retry-After` and the `x-ratelimit-*` headers lifted),
/// 5xx → `Server` (maintenance when 503 or the message says so), anything
/// else → `Api`.
#[must_use]
pub fn transport_failure(raw: &RawResponse, body: Option<Value>) -> PaystackError {
    let message = body
        .as_ref()
        .and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("HTTP {}", raw.status));

    match raw.status {
        401 => PaystackError::Authentication { message, code: 401, response: body },
        404 => PaystackError::NotFound { message, resource_type: None, resource_id: None },
        422 => PaystackError::Validation {
            message,
            code: 422,
            errors: body.as_ref().map(field_errors).unwrap_or_default(),
            response: body,
        },
        429 => PaystackError::RateLimit {
            message,
            retry_after_secs: header_u64(raw, "retry-after"),
            limit: header_u64(raw, "x-ratelimit-limit"),
            remaining: header_u64(raw, "x-ratelimit-remaining"),
        },
        status if (500..600).contains(&status) => {
            let maintenance = status == 503 || message.to_lowercase().contains("maintenance");
            PaystackError::Server { message, code: status, maintenance }
        }
        status => PaystackError::Api { message, code: status, response: body },
    }
}

/// Classifies a transport error that produced no HTTP response.
///
/// reqwest's own timeout flag takes precedence; otherwise the subkind comes
/// from the error text.
#[must_use]
pub fn network_failure(error: reqwest::Error) -> PaystackError {
    let message = error.to_string();
    let kind = if error.is_timeout() {
        NetworkErrorKind::Timeout
    } else {
        NetworkErrorKind::from_message(&message)
    };
    PaystackError::Network { message, kind }
}

/// Lifts per-field error messages from the body's `errors` object.
///
/// Values may be a single string or an array of strings.
fn field_errors(body: &Value) -> HashMap<String, Vec<String>> {
    match body.get("errors") {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(field, value)| {
                let messages = match value {
                    Value::String(message) => vec![message.clone()],
                    Value::Array(items) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_owned)
                        .collect(),
                    other => vec![other.to_string()],
                };
                (field.clone(), messages)
            })
            .collect(),
        _ => HashMap::new(),
    }
}

fn header_u64(raw: &RawResponse, name: &str) -> Option<u64> {
    raw.header(name).and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(status: u16, headers: Vec<(&str, &str)>) -> RawResponse {
        RawResponse {
            status,
            body: vec![],
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        }
    }

    #[test]
    fn body_authorization_beats_invalid() {
        // Both keywords present; "authorization" is checked first.
        let err = body_failure(&json!({
            "status": false,
            "message": "Invalid authorization code"
        }));
        assert!(matches!(err, PaystackError::Authentication { .. }));
    }

    #[test]
    fn body_validation_lifts_field_errors() {
        let err = body_failure(&json!({
            "status": false,
            "message": "Validation failed",
            "errors": {
                "email": ["email is required"],
                "amount": "amount must be positive"
            }
        }));
        match err {
            PaystackError::Validation { errors, .. } => {
                assert_eq!(errors["email"], vec!["email is required"]);
                assert_eq!(errors["amount"], vec!["amount must be positive"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn body_unrecognized_message_is_generic() {
        let err = body_failure(&json!({ "status": false, "message": "Duplicate reference" }));
        match err {
            PaystackError::Api { message, code, response } => {
                assert_eq!(message, "Duplicate reference");
                assert_eq!(code, 0);
                assert!(response.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn body_without_message_uses_fallback_text() {
        let err = body_failure(&json!({ "status": false }));
        assert!(matches!(err, PaystackError::Api { .. }));
        assert!(err.to_string().contains("Request failed"));
    }

    #[test]
    fn status_401_is_authentication() {
        let err = transport_failure(&raw(401, vec![]), Some(json!({ "message": "Invalid key" })));
        assert!(matches!(err, PaystackError::Authentication { code: 401, .. }));
    }

    #[test]
    fn status_404_is_not_found() {
        let err = transport_failure(&raw(404, vec![]), None);
        assert!(matches!(err, PaystackError::NotFound { .. }));
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[test]
    fn status_422_is_validation() {
        let err = transport_failure(
            &raw(422, vec![]),
            Some(json!({
                "message": "Unprocessable",
                "errors": { "plan": "plan code is unknown" }
            })),
        );
        match err {
            PaystackError::Validation { code, errors, .. } => {
                assert_eq!(code, 422);
                assert_eq!(errors["plan"], vec!["plan code is unknown"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn status_429_lifts_rate_limit_headers() {
        let headers =
            vec![("Retry-After", "90"), ("x-ratelimit-limit", "100"), ("x-ratelimit-remaining", "0")];
        let err = transport_failure(&raw(429, headers), None);
        match err {
            PaystackError::RateLimit { retry_after_secs, limit, remaining, .. } => {
                assert_eq!(retry_after_secs, Some(90));
                assert_eq!(limit, Some(100));
                assert_eq!(remaining, Some(0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn status_429_with_unparsable_headers_leaves_fields_unset() {
        let err = transport_failure(&raw(429, vec![("Retry-After", "soon")]), None);
        match err {
            PaystackError::RateLimit { retry_after_secs, .. } => {
                assert_eq!(retry_after_secs, None);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn status_503_is_maintenance() {
        let err = transport_failure(&raw(503, vec![]), None);
        assert!(matches!(err, PaystackError::Server { maintenance: true, code: 503, .. }));
    }

    #[test]
    fn status_500_maintenance_from_message() {
        let err = transport_failure(
            &raw(500, vec![]),
            Some(json!({ "message": "Scheduled maintenance in progress" })),
        );
        assert!(matches!(err, PaystackError::Server { maintenance: true, code: 500, .. }));
    }

    #[test]
    fn status_500_without_maintenance_hint() {
        let err = transport_failure(&raw(500, vec![]), Some(json!({ "message": "boom" })));
        assert!(matches!(err, PaystackError::Server { maintenance: false, .. }));
    }

    #[test]
    fn unmapped_status_is_generic() {
        let err = transport_failure(&raw(418, vec![]), None);
        assert!(matches!(err, PaystackError::Api { code: 418, .. }));
    }
}
