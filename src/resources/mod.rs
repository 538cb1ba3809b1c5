//! Per-resource API façades.
//!
//! Each façade borrows the client and composes the shared building blocks:
//! required-field validation, allow-list filtering, major-to-subunit amount
//! conversion, and (for read-mostly endpoints) the response cache. Façades
//! never interpret responses beyond the envelope; callers read `data`.
//!
//! Caller-supplied parameters arrive as a `serde_json::Value` object so call
//! sites can use `json!` literals; unknown keys are dropped by the
//! allow-list, never forwarded.

use std::time::Duration;

use serde_json::Value;

use crate::{amount, params::Params};

mod customer;
mod dispute;
mod miscellaneous;
mod plan;
mod refund;
mod subscription;
mod transaction;
mod transfer;
mod verification;

pub use customer::Customer;
pub use dispute::Dispute;
pub use miscellaneous::Miscellaneous;
pub use plan::Plan;
pub use refund::Refund;
pub use subscription::Subscription;
pub use transaction::Transaction;
pub use transfer::Transfer;
pub use verification::Verification;

/// TTL for reference data that changes rarely (banks, countries, BINs).
pub(crate) const DAY: Duration = Duration::from_secs(86_400);

/// Coerces caller input into a parameter map.
///
/// Anything that is not a JSON object becomes an empty map, which the
/// required-field checks then report on.
pub(crate) fn into_params(data: Value) -> Params {
    match data {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

/// Converts a major-unit amount field to subunits in place.
///
/// Missing or non-numeric fields are left untouched; required-field
/// validation runs before this and owns that reporting.
pub(crate) fn convert_amount_field(params: &mut Params, field: &str) {
    if let Some(major) = params.get(field).and_then(Value::as_f64) {
        params.insert(field.to_owned(), Value::from(amount::to_subunit(major)));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn into_params_accepts_objects_only() {
        assert_eq!(into_params(json!({ "a": 1 })).len(), 1);
        assert!(into_params(json!([1, 2])).is_empty());
        assert!(into_params(Value::Null).is_empty());
    }

    #[test]
    fn convert_amount_field_multiplies_in_place() {
        let mut params = into_params(json!({ "amount": 100.50, "currency": "NGN" }));
        convert_amount_field(&mut params, "amount");
        assert_eq!(params["amount"], json!(10050));
        assert_eq!(params["currency"], json!("NGN"));
    }

    #[test]
    fn convert_amount_field_ignores_missing_and_non_numeric() {
        let mut params = into_params(json!({ "amount": "lots" }));
        convert_amount_field(&mut params, "amount");
        assert_eq!(params["amount"], json!("lots"));

        let mut empty = Params::new();
        convert_amount_field(&mut empty, "amount");
        assert!(empty.is_empty());
    }
}
