//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! This module provides application-level services including:
//! - [`SearchOrchestrator`]: One remote task per platform, collected into a comparison
//! - [`TaskPoller`]: Bounded polling of a single remote task
//! - [`PriceAggregator`]: Normalization and lowest-price selection

pub mod price_aggregation;
pub mod search_orchestrator;
pub mod task_poller;

pub use price_aggregation::{AggregatedPrices, PriceAggregator};
pub use search_orchestrator::{ExecutionMode, SearchConfig, SearchOrchestrator};
pub use task_poller::{PollConfig, TaskPoller};
