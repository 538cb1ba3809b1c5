//! Request parameter filtering and validation.
//!
//! Resource façades accept caller-supplied `serde_json::Map` parameter sets.
//! Before a request is built, parameters pass through an allow-list filter
//! (unknown keys are silently dropped, never errors) and a required-field
//! check that reports the complete missing set in one failure.
//!
//! Maps preserve insertion order (serde_json's `preserve_order` feature), so
//! filtered output keeps the allow-list's relative order of surviving keys.

use serde_json::{Map, Value};

use crate::error::{PaystackError, Result};

/// Parameter map type used throughout the resource façades.
pub type Params = Map<String, Value>;

/// Returns a new map containing only the keys named in `allowed`, in the
/// order the input map held them.
///
/// Unknown keys are dropped silently. Keys are matched exactly.
#[must_use]
pub fn filter_allowed(params: &Params, allowed: &[&str]) -> Params {
    params
        .iter()
        .filter(|(key, _)| allowed.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Checks that every field in `required` is present and non-empty.
///
/// A field is missing when the key is absent, the value is `null`, or the
/// value is an empty string. All offenders are collected before failing.
///
/// # Errors
///
/// Returns [`PaystackError::MissingParams`] naming every missing field.
pub fn require_fields(params: &Params, required: &[&str]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|field| {
            match params.get(**field) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            }
        })
        .map(|field| (*field).to_owned())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PaystackError::MissingParams { fields: missing })
    }
}

/// Removes entries whose value is `null`, preserving the order of the rest.
///
/// Used on query parameter sets where `null` means "not supplied" rather
/// than an explicit empty value.
#[must_use]
pub fn clean_nulls(params: &Params) -> Params {
    params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Converts a parameter map into query string pairs.
///
/// `null` values are skipped; strings pass through unquoted and every other
/// value uses its JSON rendering.
#[must_use]
pub fn to_query(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}
