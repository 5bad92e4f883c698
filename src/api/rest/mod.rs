//! # REST API
//!
//! HTTP surface over the search orchestrator, built with axum.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/search` - Search every platform for `{"product_name": ...}`
//!   and return the comparison; blocks until all platforms resolved
//! - `GET /api/task/{task_id}` - One-shot status of a remote task
//! - `POST /api/compare` - Compare caller-supplied `{"prices": {...}}`
//!
//! # Usage
//!
//! ```no_run
//! use price_compare::api::rest::{AppState, create_router};
//! use price_compare::config::AppConfig;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = AppConfig::load()?;
//! let router = create_router(AppState::new(config.orchestrator()?));
//!
//! let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    ApiError, AppState, CompareRequest, CompareResponse, ErrorResponse, HealthResponse,
    SearchRequest, TaskStatusResponse,
};
pub use routes::create_router;
