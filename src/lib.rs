//! # price-compare
//!
//! Cross-platform retail price comparison driven by remote mobile-automation
//! tasks.
//!
//! For a product name, one automation task per configured platform is
//! submitted to the MobileRun task API. Each task opens the platform's app on
//! a device, searches the product and reports the first result's price. The
//! tasks are polled to completion, prices normalized and the cheapest
//! platform picked.
//!
//! # Architecture
//!
//! - [`domain`]: platforms, task requests and outcomes, prices, comparisons
//! - [`application`]: search orchestration, polling, aggregation, errors
//! - [`infrastructure`]: task API client and telemetry
//! - [`api`]: REST surface
//! - [`config`]: layered configuration
//!
//! # Example
//!
//! ```no_run
//! use price_compare::config::AppConfig;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = AppConfig::load()?;
//! let orchestrator = config.orchestrator()?;
//! let result = orchestrator.search("boat headphones").await?;
//! if let Some(lowest) = &result.lowest {
//!     println!("cheapest: {lowest}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
