//! # Prices
//!
//! Raw price strings as reported by a platform, and their normalization into
//! comparable numbers.
//!
//! Platforms report prices as free-form text (`"₹15,999"`, `"$1,234.50"`).
//! [`PriceNormalizer`] turns such text into an `f64`, or `None` when nothing
//! numeric can be recovered.
//!
//! # Known limitation
//!
//! Commas are always treated as thousands separators. Locales that use a
//! comma as the decimal separator (`"1.234,50"`) are misparsed, and so is
//! text with a stray dot before the digits (`"Rs. 499"`).
//!
//! # Examples
//!
//! ```
//! use price_compare::domain::value_objects::price::{PriceNormalizer, RawPrice};
//!
//! assert_eq!(PriceNormalizer::normalize("₹15,999"), Some(15999.0));
//! assert_eq!(PriceNormalizer::normalize("N/A"), None);
//!
//! let raw = RawPrice::from("₹1,499");
//! assert_eq!(raw.normalized(), Some(1499.0));
//! assert!(RawPrice::from("N/A").is_not_available());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// The uniform sentinel for a price that could not be obtained.
pub const NOT_AVAILABLE: &str = "N/A";

/// A raw price for one platform: either the reported text or the sentinel.
///
/// Serializes as a plain string; [`RawPrice::NotAvailable`] is written as
/// `"N/A"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RawPrice {
    /// Price text as reported by the platform.
    Quoted(String),
    /// No price could be obtained, whatever the cause.
    NotAvailable,
}

impl RawPrice {
    /// Creates a quoted raw price, folding the sentinel and blank text into
    /// [`RawPrice::NotAvailable`].
    #[must_use]
    pub fn quoted(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() || text == NOT_AVAILABLE {
            Self::NotAvailable
        } else {
            Self::Quoted(text)
        }
    }

    /// Returns the raw text, `"N/A"` for the sentinel.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Quoted(text) => text,
            Self::NotAvailable => NOT_AVAILABLE,
        }
    }

    /// Returns true if this is the sentinel.
    #[inline]
    #[must_use]
    pub fn is_not_available(&self) -> bool {
        matches!(self, Self::NotAvailable)
    }

    /// Normalizes the raw price into a comparable number.
    #[must_use]
    pub fn normalized(&self) -> Option<f64> {
        match self {
            Self::Quoted(text) => PriceNormalizer::normalize(text),
            Self::NotAvailable => None,
        }
    }
}

impl From<String> for RawPrice {
    fn from(value: String) -> Self {
        Self::quoted(value)
    }
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        Self::quoted(value)
    }
}

impl From<RawPrice> for String {
    fn from(value: RawPrice) -> Self {
        match value {
            RawPrice::Quoted(text) => text,
            RawPrice::NotAvailable => NOT_AVAILABLE.to_string(),
        }
    }
}

impl fmt::Display for RawPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Converts free-form price text into a comparable number.
///
/// Total: any input that cannot be parsed yields `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceNormalizer;

impl PriceNormalizer {
    /// Normalizes a price string.
    ///
    /// Keeps only digits, `.` and `,`, drops the commas, and parses what is
    /// left as a float.
    #[must_use]
    pub fn normalize(raw: &str) -> Option<f64> {
        if raw.is_empty() || raw == NOT_AVAILABLE {
            return None;
        }

        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod normalize {
        use super::*;

        #[test]
        fn rupee_with_thousands_separator() {
            assert_eq!(PriceNormalizer::normalize("₹15,999"), Some(15999.0));
        }

        #[test]
        fn decimal_with_thousands_separator() {
            assert_eq!(PriceNormalizer::normalize("1,234.50"), Some(1234.50));
        }

        #[test]
        fn sentinel_is_no_value() {
            assert_eq!(PriceNormalizer::normalize("N/A"), None);
        }

        #[test]
        fn empty_is_no_value() {
            assert_eq!(PriceNormalizer::normalize(""), None);
        }

        #[test]
        fn letters_only_is_no_value() {
            assert_eq!(PriceNormalizer::normalize("abc"), None);
        }

        #[test]
        fn multiple_decimal_points_is_no_value() {
            assert_eq!(PriceNormalizer::normalize("1.2.3"), None);
        }

        #[test]
        fn currency_words_are_stripped() {
            assert_eq!(PriceNormalizer::normalize("INR 2,499 only"), Some(2499.0));
        }

        #[test]
        fn abbreviation_dot_is_misread() {
            assert_eq!(PriceNormalizer::normalize("Rs. 2,499"), Some(0.2499));
        }

        #[test]
        fn comma_decimal_locale_is_misread() {
            assert_eq!(PriceNormalizer::normalize("12,50"), Some(1250.0));
        }
    }

    mod raw_price {
        use super::*;

        #[test]
        fn sentinel_text_becomes_not_available() {
            assert_eq!(RawPrice::from("N/A"), RawPrice::NotAvailable);
            assert_eq!(RawPrice::from("   "), RawPrice::NotAvailable);
        }

        #[test]
        fn serializes_as_plain_string() {
            let json = serde_json::to_string(&RawPrice::NotAvailable).unwrap();
            assert_eq!(json, "\"N/A\"");

            let json = serde_json::to_string(&RawPrice::from("₹999")).unwrap();
            assert_eq!(json, "\"₹999\"");
        }

        #[test]
        fn deserializes_sentinel() {
            let price: RawPrice = serde_json::from_str("\"N/A\"").unwrap();
            assert!(price.is_not_available());
        }

        #[test]
        fn normalized_quoted() {
            assert_eq!(RawPrice::from("₹1,599").normalized(), Some(1599.0));
            assert_eq!(RawPrice::NotAvailable.normalized(), None);
        }
    }

    proptest! {
        #[test]
        fn plain_numbers_match_direct_parse(value in 0u32..10_000_000, cents in 0u32..100) {
            let text = format!("{value}.{cents:02}");
            let direct: f64 = text.parse().unwrap();
            prop_assert_eq!(PriceNormalizer::normalize(&text), Some(direct));
        }

        #[test]
        fn normalize_is_total(text in ".*") {
            let _ = PriceNormalizer::normalize(&text);
        }

        #[test]
        fn normalized_values_are_finite_and_non_negative(text in "[₹$ ,.0-9a-z]{0,16}") {
            if let Some(value) = PriceNormalizer::normalize(&text) {
                prop_assert!(value.is_finite());
                prop_assert!(value >= 0.0);
            }
        }
    }
}
