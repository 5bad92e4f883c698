//! `price-compare` command-line entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use price_compare::api::rest::{AppState, create_router};
use price_compare::application::services::search_orchestrator::ExecutionMode;
use price_compare::config::AppConfig;
use price_compare::domain::entities::comparison::ComparisonResult;
use price_compare::domain::entities::task_outcome::TaskSnapshot;
use price_compare::domain::value_objects::TaskId;
use price_compare::infrastructure::telemetry::init_tracing;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "price-compare",
    version,
    about = "Compare a product's price across shopping apps via remote automation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API server
    Serve {
        /// Address to listen on, overriding configuration
        #[arg(long)]
        bind: Option<String>,
    },
    /// Search every platform for a product and print the comparison
    Search {
        /// Product name
        product: String,
        /// Run all platforms at once instead of one after another
        #[arg(long)]
        concurrent: bool,
        /// Give up on pending platforms after this many seconds
        #[arg(long)]
        deadline_secs: Option<u64>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a remote task once
    Status {
        /// Task identifier returned by the task API
        task_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    if config.task_api.api_key.is_empty() {
        tracing::warn!("task_api.api_key is empty; requests will be rejected upstream");
    }

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind_addr = bind;
            }
            serve(&config).await
        }
        Commands::Search {
            product,
            concurrent,
            deadline_secs,
            json,
        } => {
            if concurrent {
                config.search.execution_mode = ExecutionMode::Concurrent;
            }
            let orchestrator = config.orchestrator()?;
            let result = match deadline_secs {
                Some(secs) => {
                    orchestrator
                        .search_with_deadline(&product, Duration::from_secs(secs))
                        .await?
                }
                None => orchestrator.search(&product).await?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_comparison(&result);
            }
            Ok(())
        }
        Commands::Status { task_id } => {
            let orchestrator = config.orchestrator()?;
            let snapshot = orchestrator.task_status(&TaskId::new(task_id)).await?;
            println!("{}", snapshot.state());
            if let TaskSnapshot::Finished(outcome) = snapshot {
                println!("{outcome}");
            }
            Ok(())
        }
    }
}

async fn serve(config: &AppConfig) -> Result<()> {
    let router = create_router(AppState::new(config.orchestrator()?));

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(addr = %config.server.bind_addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}

fn print_comparison(result: &ComparisonResult) {
    println!("{}", result.product_name);
    for (platform, price) in &result.prices {
        match result.valid_prices.get(platform) {
            Some(value) => println!("  {:<10} {:<16} {:.2}", platform.label(), price, value),
            None => println!("  {:<10} {}", platform.label(), price),
        }
    }
    match &result.lowest {
        Some(lowest) => println!("lowest: {lowest}"),
        None => println!("lowest: none"),
    }
}
