//! Amount conversion between major units and API subunits.
//!
//! The Paystack API expresses every amount in the smallest currency unit
//! (kobo for NGN, pesewas for GHS, cents for USD). Conversion is a uniform
//! multiply/divide by 100 for all currencies, including those without minor
//! units; this is the upstream convention and the API expects it.

/// Converts a major-unit amount to the API's subunit representation.
///
/// The fractional remainder beyond two decimal places is truncated, not
/// rounded; callers should round before converting.
///
/// # Examples
///
/// ```
/// use paystack_client::amount::to_subunit;
///
/// assert_eq!(to_subunit(100.50), 10050);
/// assert_eq!(to_subunit(1500.0), 150000);
/// ```
#[must_use]
pub fn to_subunit(amount: f64) -> i64 {
    (amount * 100.0) as i64
}

/// Converts a subunit amount back to major units.
#[must_use]
pub fn from_subunit(subunit: i64) -> f64 {
    subunit as f64 / 100.0
}
