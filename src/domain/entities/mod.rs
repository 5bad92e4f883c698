//! # Domain Entities
//!
//! - [`PlatformSpec`]: a configured retail platform
//! - [`TaskRequest`]: one platform's automation task for one search
//! - [`TaskOutcome`]: terminal result of a task
//! - [`ComparisonResult`]: the product comparison handed back to callers

pub mod comparison;
pub mod platform;
pub mod task_outcome;
pub mod task_request;

pub use comparison::{ComparisonResult, LowestPrice};
pub use platform::{DEFAULT_PROMPT_TEMPLATE, PlatformSpec};
pub use task_outcome::{TaskOutcome, TaskSnapshot};
pub use task_request::{ModelParams, OutputSchema, PRICE_FIELD, TaskRequest};
