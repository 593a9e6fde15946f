//! Decimal money amounts.
//!
//! The backend stores prices as fixed-point decimals and serializes them as
//! JSON strings (`"19.99"`) in most responses, but computed fields such as the
//! cart total can arrive as bare numbers (`42`). `rust_decimal::Decimal`
//! accepts both on deserialization, so response types use it directly.
//!
//! Request payloads that the backend expects as numbers serialize through
//! [`rust_decimal::serde::float`].

pub use rust_decimal::Decimal;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeAmount {
    Amount(Decimal),
    Other(IgnoredAny),
}

/// Deserialize an amount the backend may send as a non-numeric placeholder.
///
/// Numbers and numeric strings become `Some`; `null` and anything else
/// (e.g. `"<QuerySet []>"` for an empty checkout cart) become `None`.
/// Use with `#[serde(default, deserialize_with = "...")]`.
///
/// # Errors
///
/// Only fails if the underlying deserializer does.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<MaybeAmount>::deserialize(deserializer)? {
        Some(MaybeAmount::Amount(amount)) => Some(amount),
        Some(MaybeAmount::Other(_)) | None => None,
    })
}

/// Format an amount with two decimal places for display.
#[must_use]
pub fn display_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
