//! # Task Request
//!
//! A description of one remote automation task: which app to open, what to
//! ask the agent, which model to drive it with, and what output to return.
//!
//! # Examples
//!
//! ```
//! use price_compare::domain::entities::platform::PlatformSpec;
//! use price_compare::domain::entities::task_request::{ModelParams, TaskRequest};
//!
//! let platform = PlatformSpec::new("amazon", "com.amazon.mShop.android.shopping");
//! let request = TaskRequest::for_platform(&platform, "boat headphones", ModelParams::default());
//!
//! assert_eq!(request.apps(), ["com.amazon.mShop.android.shopping"]);
//! assert!(request.instruction().contains("boat headphones"));
//! ```

use crate::domain::entities::platform::PlatformSpec;
use crate::domain::value_objects::PlatformId;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Default language model driving the device agent.
pub const DEFAULT_LLM_MODEL: &str = "google/gemini-2.5-flash";

/// Default execution timeout advertised to the remote system, in seconds.
pub const DEFAULT_EXECUTION_TIMEOUT_SECS: u64 = 1800;

/// Default maximum number of agent steps.
pub const DEFAULT_MAX_STEPS: u32 = 150;

/// Name of the output field carrying the extracted price.
pub const PRICE_FIELD: &str = "price";

/// Model parameters shared by every task of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Model identifier.
    pub llm_model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Whether the agent reasons before acting.
    pub reasoning: bool,
    /// Whether the agent receives screenshots.
    pub vision: bool,
    /// Maximum number of agent steps.
    pub max_steps: u32,
    /// Execution timeout in seconds. Advisory to the remote system only.
    pub execution_timeout_secs: u64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            temperature: 0.5,
            reasoning: true,
            vision: true,
            max_steps: DEFAULT_MAX_STEPS,
            execution_timeout_secs: DEFAULT_EXECUTION_TIMEOUT_SECS,
        }
    }
}

/// Describes the structured output the agent must return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSchema {
    /// Names of the string fields expected in the output object.
    string_fields: Vec<String>,
}

impl OutputSchema {
    /// Schema expecting a single `price` string field.
    #[must_use]
    pub fn price() -> Self {
        Self {
            string_fields: vec![PRICE_FIELD.to_string()],
        }
    }

    /// Returns the expected string fields.
    #[must_use]
    pub fn string_fields(&self) -> &[String] {
        &self.string_fields
    }

    /// Renders the schema as a JSON Schema object.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let properties: serde_json::Map<String, Value> = self
            .string_fields
            .iter()
            .map(|name| (name.clone(), json!({ "type": "string" })))
            .collect();

        json!({
            "type": "object",
            "properties": properties,
        })
    }
}

/// One platform's task for one search. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRequest {
    platform: PlatformId,
    product_name: String,
    instruction: String,
    apps: Vec<String>,
    model: ModelParams,
    output_schema: OutputSchema,
}

impl TaskRequest {
    /// Builds the request for a platform, embedding the product name in the
    /// platform's prompt template.
    #[must_use]
    pub fn for_platform(platform: &PlatformSpec, product_name: &str, model: ModelParams) -> Self {
        Self {
            platform: platform.id().clone(),
            product_name: product_name.to_string(),
            instruction: platform.render_prompt(product_name),
            apps: vec![platform.app_id().to_string()],
            model,
            output_schema: OutputSchema::price(),
        }
    }

    /// Returns the target platform.
    #[inline]
    #[must_use]
    pub fn platform(&self) -> &PlatformId {
        &self.platform
    }

    /// Returns the product being searched.
    #[inline]
    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Returns the rendered free-text instruction.
    #[inline]
    #[must_use]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Returns the application packages the agent may open.
    #[inline]
    #[must_use]
    pub fn apps(&self) -> &[String] {
        &self.apps
    }

    /// Returns the model parameters.
    #[inline]
    #[must_use]
    pub fn model(&self) -> &ModelParams {
        &self.model
    }

    /// Returns the output schema.
    #[inline]
    #[must_use]
    pub fn output_schema(&self) -> &OutputSchema {
        &self.output_schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_schema_json() {
        let schema = OutputSchema::price().to_json_schema();
        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": { "price": { "type": "string" } }
            })
        );
    }

    #[test]
    fn model_defaults() {
        let model = ModelParams::default();
        assert_eq!(model.llm_model, DEFAULT_LLM_MODEL);
        assert_eq!(model.max_steps, 150);
        assert_eq!(model.execution_timeout_secs, 1800);
        assert!(model.reasoning);
        assert!(model.vision);
    }

    #[test]
    fn request_embeds_product_and_app() {
        let platform = PlatformSpec::new("myntra", "com.myntra.android");
        let request = TaskRequest::for_platform(&platform, "sneakers", ModelParams::default());

        assert_eq!(request.platform().as_str(), "myntra");
        assert_eq!(request.product_name(), "sneakers");
        assert_eq!(request.apps(), ["com.myntra.android"]);
        assert!(request.instruction().starts_with("Open the myntra app"));
        assert_eq!(request.output_schema().string_fields(), ["price"]);
    }
}
