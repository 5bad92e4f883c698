//! # Comparison Result
//!
//! The outcome of one search across all configured platforms.

use crate::domain::value_objects::{PlatformId, RawPrice};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The cheapest platform and its normalized price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowestPrice {
    /// Platform offering the lowest price.
    pub platform: PlatformId,
    /// Normalized price.
    pub price: f64,
}

impl LowestPrice {
    /// Creates a new lowest-price pair.
    #[must_use]
    pub fn new(platform: PlatformId, price: f64) -> Self {
        Self { platform, price }
    }
}

impl fmt::Display for LowestPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {:.2}", self.platform, self.price)
    }
}

/// Result of comparing one product across platforms.
///
/// # Invariants
///
/// - `prices` holds every configured platform exactly once, in
///   configuration order.
/// - `valid_prices` holds a platform iff its raw price normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// The product searched for.
    pub product_name: String,
    /// Raw price or "N/A" per platform.
    pub prices: IndexMap<PlatformId, RawPrice>,
    /// Normalized prices of the platforms whose raw price parsed.
    pub valid_prices: IndexMap<PlatformId, f64>,
    /// Cheapest platform, if any price parsed.
    pub lowest: Option<LowestPrice>,
    /// When the search finished.
    pub searched_at: DateTime<Utc>,
}

impl ComparisonResult {
    /// Returns the raw price for a platform.
    #[must_use]
    pub fn raw_price(&self, platform: &PlatformId) -> Option<&RawPrice> {
        self.prices.get(platform)
    }

    /// Returns the number of platforms that produced a usable price.
    #[must_use]
    pub fn priced_count(&self) -> usize {
        self.valid_prices.len()
    }

    /// Returns true if no platform produced a usable price.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.valid_prices.is_empty()
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Comparison({}: {}/{} priced",
            self.product_name,
            self.valid_prices.len(),
            self.prices.len()
        )?;
        if let Some(lowest) = &self.lowest {
            write!(f, ", lowest {lowest}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ComparisonResult {
        let mut prices = IndexMap::new();
        prices.insert(PlatformId::new("amazon"), RawPrice::from("₹1,499"));
        prices.insert(PlatformId::new("myntra"), RawPrice::NotAvailable);

        let mut valid_prices = IndexMap::new();
        valid_prices.insert(PlatformId::new("amazon"), 1499.0);

        ComparisonResult {
            product_name: "boat headphones".to_string(),
            prices,
            valid_prices,
            lowest: Some(LowestPrice::new(PlatformId::new("amazon"), 1499.0)),
            searched_at: Utc::now(),
        }
    }

    #[test]
    fn serializes_with_wire_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["product_name"], json!("boat headphones"));
        assert_eq!(value["prices"]["amazon"], json!("₹1,499"));
        assert_eq!(value["prices"]["myntra"], json!("N/A"));
        assert_eq!(value["valid_prices"]["amazon"], json!(1499.0));
        assert_eq!(value["lowest"]["platform"], json!("amazon"));
    }

    #[test]
    fn priced_count() {
        let result = sample();
        assert_eq!(result.priced_count(), 1);
        assert!(!result.is_empty());
        assert!(
            result
                .raw_price(&PlatformId::new("myntra"))
                .unwrap()
                .is_not_available()
        );
    }

    #[test]
    fn display_mentions_lowest() {
        let display = sample().to_string();
        assert!(display.contains("1/2 priced"));
        assert!(display.contains("amazon @ 1499.00"));
    }
}
