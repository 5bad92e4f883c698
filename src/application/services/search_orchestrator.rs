//! # Search Orchestrator
//!
//! Runs one remote task per configured platform and assembles the price
//! comparison.
//!
//! This module provides the [`SearchOrchestrator`], which for a product:
//! 1. builds a [`TaskRequest`] per platform from the platform's template
//! 2. submits it and hands the task to the [`TaskPoller`]
//! 3. records the reported price, or "N/A" for any failure
//! 4. aggregates the raw prices into a [`ComparisonResult`]
//!
//! A failing platform never affects the others. Platforms run one after
//! another or all at once depending on [`ExecutionMode`]; either way the
//! result is keyed by platform and listed in configuration order.

use crate::application::error::{ApplicationError, ApplicationResult, InfrastructureError};
use crate::application::services::price_aggregation::{AggregatedPrices, PriceAggregator};
use crate::application::services::task_poller::{PollConfig, TaskPoller};
use crate::domain::entities::comparison::ComparisonResult;
use crate::domain::entities::platform::PlatformSpec;
use crate::domain::entities::task_outcome::{TaskOutcome, TaskSnapshot};
use crate::domain::entities::task_request::{ModelParams, TaskRequest};
use crate::domain::value_objects::{PlatformId, RawPrice, TaskId};
use crate::infrastructure::task_api::traits::{RawStatus, RemoteTaskClient};
use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::Instrument;

/// How platform searches are scheduled within one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One platform at a time. Gentlest on a single shared device.
    #[default]
    Sequential,
    /// All platforms at once, one tokio task each.
    Concurrent,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Concurrent => write!(f, "concurrent"),
        }
    }
}

/// Configuration for searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Scheduling of platform searches.
    pub execution_mode: ExecutionMode,
    /// Optional deadline for a whole search in milliseconds.
    pub deadline_ms: Option<u64>,
}

impl SearchConfig {
    /// Creates a configuration with the given execution mode.
    #[must_use]
    pub fn with_mode(execution_mode: ExecutionMode) -> Self {
        Self {
            execution_mode,
            deadline_ms: None,
        }
    }

    /// Sets a deadline applied to every search.
    #[must_use]
    pub fn with_deadline(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}

/// Coordinates the per-platform tasks of a price search.
#[derive(Debug, Clone)]
pub struct SearchOrchestrator {
    client: Arc<dyn RemoteTaskClient>,
    poller: TaskPoller,
    aggregator: PriceAggregator,
    platforms: Arc<[PlatformSpec]>,
    model: ModelParams,
    config: SearchConfig,
}

impl SearchOrchestrator {
    /// Creates a new orchestrator.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no platform is configured or two
    /// platforms share an identifier.
    pub fn new(
        client: Arc<dyn RemoteTaskClient>,
        platforms: Vec<PlatformSpec>,
        model: ModelParams,
        poll_config: PollConfig,
        config: SearchConfig,
    ) -> ApplicationResult<Self> {
        validate_platforms(&platforms)?;

        Ok(Self {
            poller: TaskPoller::new(Arc::clone(&client), poll_config),
            client,
            aggregator: PriceAggregator::new(),
            platforms: platforms.into(),
            model,
            config,
        })
    }

    /// Returns the configured platforms in order.
    #[must_use]
    pub fn platforms(&self) -> &[PlatformSpec] {
        &self.platforms
    }

    /// Returns the search configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches every platform for a product and compares the prices.
    ///
    /// Uses the configured deadline, if any.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` if the product name is empty.
    /// Platform failures are not errors; they show up as "N/A".
    pub async fn search(&self, product_name: &str) -> ApplicationResult<ComparisonResult> {
        let product_name = validate_product_name(product_name)?;
        let deadline = self.config.deadline().and_then(deadline_after);
        self.run(product_name, deadline).await
    }

    /// Searches with a caller-supplied deadline over the whole search.
    ///
    /// Platforms still pending at the deadline are abandoned and recorded as
    /// "N/A"; their remote tasks keep running on the remote system. A deadline
    /// too far out to represent means no deadline.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` if the product name is empty.
    pub async fn search_with_deadline(
        &self,
        product_name: &str,
        deadline: Duration,
    ) -> ApplicationResult<ComparisonResult> {
        let product_name = validate_product_name(product_name)?;
        self.run(product_name, deadline_after(deadline)).await
    }

    /// Checks a task once, without polling.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Validation` for a blank task id and
    /// `ApplicationError::TaskApi` if the status request fails.
    pub async fn task_status(&self, task_id: &TaskId) -> ApplicationResult<TaskSnapshot> {
        if task_id.is_blank() {
            return Err(ApplicationError::validation("task id must not be empty"));
        }

        let snapshot = match self.client.poll(task_id).await? {
            RawStatus::Completed(output) => {
                TaskSnapshot::Finished(TaskOutcome::completed(RawStatus::price_from_output(&output)))
            }
            RawStatus::Failed(reason) => TaskSnapshot::Finished(TaskOutcome::failed(reason)),
            pending => TaskSnapshot::Pending(pending.state()),
        };

        Ok(snapshot)
    }

    /// Compares caller-supplied raw prices without running any task.
    #[must_use]
    pub fn compare(&self, raw: &IndexMap<PlatformId, RawPrice>) -> AggregatedPrices {
        self.aggregator.aggregate(raw)
    }

    async fn run(
        &self,
        product_name: &str,
        deadline: Option<Instant>,
    ) -> ApplicationResult<ComparisonResult> {
        tracing::info!(
            product = product_name,
            platforms = self.platforms.len(),
            mode = %self.config.execution_mode,
            "starting price search"
        );

        let requests: Vec<TaskRequest> = self
            .platforms
            .iter()
            .map(|platform| TaskRequest::for_platform(platform, product_name, self.model.clone()))
            .collect();

        let outcomes = match self.config.execution_mode {
            ExecutionMode::Sequential => self.run_sequential(requests, deadline).await,
            ExecutionMode::Concurrent => self.run_concurrent(requests, deadline).await,
        };

        let mut prices = IndexMap::with_capacity(outcomes.len());
        for (platform, outcome) in outcomes {
            tracing::info!(platform = %platform, %outcome, "platform resolved");
            prices.insert(platform, outcome.into_raw_price());
        }

        let aggregated = self.aggregator.aggregate(&prices);

        let result = ComparisonResult {
            product_name: product_name.to_string(),
            prices,
            valid_prices: aggregated.valid_prices,
            lowest: aggregated.lowest,
            searched_at: Utc::now(),
        };

        tracing::info!(
            product = product_name,
            priced = result.priced_count(),
            lowest = ?result.lowest.as_ref().map(ToString::to_string),
            "price search complete"
        );

        Ok(result)
    }

    async fn run_sequential(
        &self,
        requests: Vec<TaskRequest>,
        deadline: Option<Instant>,
    ) -> Vec<(PlatformId, TaskOutcome)> {
        let mut outcomes = Vec::with_capacity(requests.len());

        for request in requests {
            let platform = request.platform().clone();
            let outcome = resolve_platform(
                Arc::clone(&self.client),
                self.poller.clone(),
                request,
                deadline,
            )
            .await;
            outcomes.push((platform, outcome));
        }

        outcomes
    }

    async fn run_concurrent(
        &self,
        requests: Vec<TaskRequest>,
        deadline: Option<Instant>,
    ) -> Vec<(PlatformId, TaskOutcome)> {
        let platforms: Vec<PlatformId> = requests.iter().map(|r| r.platform().clone()).collect();

        // Dropping the set aborts every platform still in flight.
        let mut tasks = JoinSet::new();
        for (index, request) in requests.into_iter().enumerate() {
            let client = Arc::clone(&self.client);
            let poller = self.poller.clone();
            tasks.spawn(async move {
                (index, resolve_platform(client, poller, request, deadline).await)
            });
        }

        let mut outcomes: Vec<Option<TaskOutcome>> = vec![None; platforms.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => {
                    if let Some(slot) = outcomes.get_mut(index) {
                        *slot = Some(outcome);
                    }
                }
                Err(e) => tracing::error!(error = %e, "platform task aborted"),
            }
        }

        platforms
            .into_iter()
            .zip(outcomes)
            .map(|(platform, outcome)| {
                let outcome = outcome
                    .unwrap_or_else(|| TaskOutcome::failed("platform task panicked"));
                (platform, outcome)
            })
            .collect()
    }
}

/// Converts a relative deadline into an instant, `None` if it overflows.
fn deadline_after(deadline: Duration) -> Option<Instant> {
    Instant::now().checked_add(deadline)
}

/// Submits and polls one platform's task, honouring an optional deadline.
async fn resolve_platform(
    client: Arc<dyn RemoteTaskClient>,
    poller: TaskPoller,
    request: TaskRequest,
    deadline: Option<Instant>,
) -> TaskOutcome {
    let span = tracing::info_span!("platform", platform = %request.platform());

    async move {
        let Some(deadline) = deadline else {
            return drive_task(client.as_ref(), &poller, &request).await;
        };

        if Instant::now() >= deadline {
            tracing::warn!("search deadline passed, platform not started");
            return TaskOutcome::TimedOut;
        }

        match tokio::time::timeout_at(deadline, drive_task(client.as_ref(), &poller, &request))
            .await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!("search deadline reached, abandoning platform");
                TaskOutcome::TimedOut
            }
        }
    }
    .instrument(span)
    .await
}

async fn drive_task(
    client: &dyn RemoteTaskClient,
    poller: &TaskPoller,
    request: &TaskRequest,
) -> TaskOutcome {
    match client.submit(request).await {
        Ok(task_id) => {
            tracing::info!(%task_id, "task submitted");
            poller.await_result(&task_id).await
        }
        Err(error) => poller.reject_submission(&error).await,
    }
}

fn validate_product_name(product_name: &str) -> ApplicationResult<&str> {
    let trimmed = product_name.trim();
    if trimmed.is_empty() {
        return Err(ApplicationError::validation("product name required"));
    }
    Ok(trimmed)
}

fn validate_platforms(platforms: &[PlatformSpec]) -> Result<(), InfrastructureError> {
    if platforms.is_empty() {
        return Err(InfrastructureError::configuration("no platforms configured"));
    }

    let mut seen = HashSet::with_capacity(platforms.len());
    for platform in platforms {
        if !seen.insert(platform.id()) {
            return Err(InfrastructureError::configuration(format!(
                "duplicate platform '{}'",
                platform.id()
            )));
        }
    }

    Ok(())
}
