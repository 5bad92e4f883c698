//! # Infrastructure
//!
//! Adapters to external systems.
//!
//! - [`task_api`]: the remote automation task API
//! - [`telemetry`]: tracing subscriber setup

pub mod task_api;
pub mod telemetry;
