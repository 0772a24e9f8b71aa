mod handlers;
mod metrics;
mod routes;

use anyhow::Context;
use axum::Router;
use codeview_common::config::Config;
use codeview_pipeline::{Executor, PlagiarismAnalyzer};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub struct AppState {
    pub executor: Executor,
    pub analyzer: PlagiarismAnalyzer,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (LOG_FORMAT=json for log shippers)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    info!("Codeview API booting...");

    let config = Config::from_env().context("Invalid configuration")?;

    let executor = Executor::from_settings(&config.sandbox)
        .context("Failed to build sandbox client")?;
    info!("Execution sandbox: {}", config.sandbox.url);

    let analyzer = PlagiarismAnalyzer::from_settings(config.model.as_ref())
        .context("Failed to build model client")?;
    match &config.model {
        Some(model) => info!("Plagiarism analysis enabled (model: {})", model.model),
        None => warn!("GEMINI_API_KEY not set; plagiarism checks will be skipped"),
    }

    let state = Arc::new(AppState { executor, analyzer });

    // Build router
    let app = Router::new()
        .merge(routes::routes())
        .with_state(state);

    // Start server
    let listener = TcpListener::bind(&config.api_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.api_addr))?;

    info!("HTTP server listening on {}", config.api_addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
