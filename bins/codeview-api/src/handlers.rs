// HTTP route handlers for the Codeview API

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use codeview_common::types::{AnalysisRequest, Language, SubmissionInput};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::metrics;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<Language>,
}

/// POST /execute - Run a submission in the sandbox
///
/// Always 200: unsupported languages, program errors and sandbox outages
/// are all reported inside the result body.
pub async fn execute(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmissionInput>,
) -> impl IntoResponse {
    let start = Instant::now();
    let result = state.executor.execute(&payload).await;
    let elapsed = start.elapsed();

    metrics::record_execution(&result, elapsed.as_secs_f64());
    info!(
        language = %payload.language,
        success = result.is_success(),
        execution_ms = elapsed.as_millis() as u64,
        "Execute request served"
    );

    (StatusCode::OK, Json(result))
}

/// POST /analyze - Plagiarism check for a submission
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalysisRequest>,
) -> impl IntoResponse {
    let start = Instant::now();
    let result = state.analyzer.analyze(&payload).await;
    let elapsed = start.elapsed();

    metrics::record_analysis(&result, elapsed.as_secs_f64());
    info!(
        language = %payload.language,
        basis = result.basis.as_str(),
        analysis_ms = elapsed.as_millis() as u64,
        "Analyze request served"
    );

    (StatusCode::OK, Json(result))
}

/// GET /status - Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /languages - Languages the sandbox accepts
pub async fn languages() -> impl IntoResponse {
    Json(LanguagesResponse {
        languages: Language::all().to_vec(),
    })
}

/// GET /metrics - Prometheus scrape endpoint
pub async fn scrape_metrics() -> impl IntoResponse {
    match metrics::render() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}
