//! # Price Aggregation
//!
//! Filters raw platform prices down to the comparable ones and picks the
//! cheapest.

use crate::domain::entities::comparison::LowestPrice;
use crate::domain::value_objects::{PlatformId, RawPrice};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Normalized prices and the lowest among them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregatedPrices {
    /// Normalized price per platform, only for raw prices that parsed.
    pub valid_prices: IndexMap<PlatformId, f64>,
    /// The cheapest platform, or `None` if nothing parsed.
    pub lowest: Option<LowestPrice>,
}

/// Selects the minimum normalized price across platforms.
///
/// Ties go to the platform seen first, so iteration order of the input
/// (configuration order for searches) decides.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceAggregator;

impl PriceAggregator {
    /// Creates a new aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Normalizes every raw price and finds the lowest.
    #[must_use]
    pub fn aggregate(&self, raw: &IndexMap<PlatformId, RawPrice>) -> AggregatedPrices {
        let valid_prices: IndexMap<PlatformId, f64> = raw
            .iter()
            .filter_map(|(platform, price)| price.normalized().map(|v| (platform.clone(), v)))
            .collect();

        let lowest = valid_prices
            .iter()
            .fold(None::<(&PlatformId, f64)>, |best, (platform, &price)| match best {
                Some((_, best_price)) if best_price <= price => best,
                _ => Some((platform, price)),
            })
            .map(|(platform, price)| LowestPrice::new(platform.clone(), price));

        AggregatedPrices {
            valid_prices,
            lowest,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn raw(entries: &[(&str, &str)]) -> IndexMap<PlatformId, RawPrice> {
        entries
            .iter()
            .map(|(p, v)| (PlatformId::new(*p), RawPrice::from(*v)))
            .collect()
    }

    #[test]
    fn filters_and_picks_lowest() {
        let result = PriceAggregator::new().aggregate(&raw(&[
            ("amazon", "15999"),
            ("flipkart", "16499"),
            ("myntra", "N/A"),
        ]));

        assert_eq!(result.valid_prices.len(), 2);
        assert_eq!(result.valid_prices[&PlatformId::new("amazon")], 15999.0);
        assert_eq!(result.valid_prices[&PlatformId::new("flipkart")], 16499.0);
        assert!(!result.valid_prices.contains_key(&PlatformId::new("myntra")));
        assert_eq!(
            result.lowest,
            Some(LowestPrice::new(PlatformId::new("amazon"), 15999.0))
        );
    }

    #[test]
    fn tie_goes_to_first_platform() {
        let result =
            PriceAggregator::new().aggregate(&raw(&[("amazon", "100"), ("flipkart", "100")]));
        assert_eq!(result.lowest.unwrap().platform, PlatformId::new("amazon"));

        let result =
            PriceAggregator::new().aggregate(&raw(&[("flipkart", "100"), ("amazon", "100")]));
        assert_eq!(result.lowest.unwrap().platform, PlatformId::new("flipkart"));
    }

    #[test]
    fn lowest_not_first() {
        let result = PriceAggregator::new().aggregate(&raw(&[
            ("amazon", "₹2,000"),
            ("flipkart", "₹1,999.99"),
            ("myntra", "₹2,500"),
        ]));
        let lowest = result.lowest.unwrap();
        assert_eq!(lowest.platform, PlatformId::new("flipkart"));
        assert_eq!(lowest.price, 1999.99);
    }

    #[test]
    fn nothing_parses() {
        let result = PriceAggregator::new().aggregate(&raw(&[("amazon", "N/A"), ("flipkart", "soon")]));
        assert!(result.valid_prices.is_empty());
        assert!(result.lowest.is_none());
    }

    #[test]
    fn empty_input() {
        let result = PriceAggregator::new().aggregate(&IndexMap::new());
        assert_eq!(result, AggregatedPrices::default());
    }

    #[test]
    fn preserves_input_order() {
        let result = PriceAggregator::new().aggregate(&raw(&[
            ("myntra", "3"),
            ("amazon", "1"),
            ("flipkart", "2"),
        ]));
        let order: Vec<&str> = result.valid_prices.keys().map(PlatformId::as_str).collect();
        assert_eq!(order, vec!["myntra", "amazon", "flipkart"]);
    }
}
