//! # Platform
//!
//! A retail storefront targeted for price lookup.
//!
//! # Examples
//!
//! ```
//! use price_compare::domain::entities::platform::PlatformSpec;
//!
//! let amazon = PlatformSpec::new("amazon", "com.amazon.mShop.android.shopping");
//! let prompt = amazon.render_prompt("boat headphones");
//! assert!(prompt.contains("amazon app"));
//! assert!(prompt.contains("boat headphones"));
//! ```

use crate::domain::value_objects::PlatformId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder replaced by the platform identifier in a prompt template.
pub const PLATFORM_PLACEHOLDER: &str = "{platform}";

/// Placeholder replaced by the product name in a prompt template.
pub const PRODUCT_PLACEHOLDER: &str = "{product}";

/// Prompt sent to the automation agent when a platform sets no template.
pub const DEFAULT_PROMPT_TEMPLATE: &str =
    "Open the {platform} app, search for {product}, and extract the price of the first product";

/// Static description of one platform.
///
/// Immutable once configured. The set of platforms is closed for the
/// lifetime of the process but its size is not fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSpec {
    /// Platform key (e.g. `amazon`).
    id: PlatformId,
    /// Application package opened on the device.
    app_id: String,
    /// Instruction template with `{platform}` and `{product}` placeholders.
    #[serde(default = "default_prompt_template")]
    prompt_template: String,
}

fn default_prompt_template() -> String {
    DEFAULT_PROMPT_TEMPLATE.to_string()
}

impl PlatformSpec {
    /// Creates a platform with the default prompt template.
    #[must_use]
    pub fn new(id: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            id: PlatformId::new(id),
            app_id: app_id.into(),
            prompt_template: default_prompt_template(),
        }
    }

    /// Replaces the prompt template.
    #[must_use]
    pub fn with_prompt_template(mut self, template: impl Into<String>) -> Self {
        self.prompt_template = template.into();
        self
    }

    /// Returns the platform identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &PlatformId {
        &self.id
    }

    /// Returns the application package.
    #[inline]
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Returns the prompt template.
    #[inline]
    #[must_use]
    pub fn prompt_template(&self) -> &str {
        &self.prompt_template
    }

    /// Renders the task instruction for a product.
    #[must_use]
    pub fn render_prompt(&self, product_name: &str) -> String {
        self.prompt_template
            .replace(PLATFORM_PLACEHOLDER, self.id.as_str())
            .replace(PRODUCT_PLACEHOLDER, product_name)
    }

    /// The storefronts searched out of the box: Amazon, Flipkart and Myntra.
    #[must_use]
    pub fn default_set() -> Vec<Self> {
        vec![
            Self::new("amazon", "com.amazon.mShop.android.shopping"),
            Self::new("flipkart", "com.flipkart.android"),
            Self::new("myntra", "com.myntra.android"),
        ]
    }
}

impl fmt::Display for PlatformSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Platform({} -> {})", self.id, self.app_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_set_order() {
        let ids: Vec<String> = PlatformSpec::default_set()
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids, vec!["amazon", "flipkart", "myntra"]);
    }

    #[test]
    fn render_default_prompt() {
        let platform = PlatformSpec::new("flipkart", "com.flipkart.android");
        assert_eq!(
            platform.render_prompt("iphone 15"),
            "Open the flipkart app, search for iphone 15, and extract the price of the first product"
        );
    }

    #[test]
    fn custom_template() {
        let platform = PlatformSpec::new("myntra", "com.myntra.android")
            .with_prompt_template("Find {product} on {platform}");
        assert_eq!(platform.render_prompt("shoes"), "Find shoes on myntra");
    }

    #[test]
    fn deserializes_without_template() {
        let platform: PlatformSpec =
            serde_json::from_str(r#"{"id":"amazon","app_id":"com.amazon"}"#).unwrap();
        assert_eq!(platform.prompt_template(), DEFAULT_PROMPT_TEMPLATE);
    }
}
