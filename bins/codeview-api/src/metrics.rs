// Prometheus metrics for the pipeline endpoints

use codeview_common::types::{AnalysisResult, ExecutionResult};
use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    pub static ref EXECUTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "codeview_executions_total",
        "Code executions by outcome",
        &["outcome"]
    )
    .expect("metric can be registered");
    pub static ref ANALYSES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "codeview_analyses_total",
        "Plagiarism checks by verdict basis",
        &["basis"]
    )
    .expect("metric can be registered");
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec!(
        "codeview_request_duration_seconds",
        "Pipeline call latency",
        &["operation"]
    )
    .expect("metric can be registered");
}

pub fn record_execution(result: &ExecutionResult, elapsed_secs: f64) {
    let outcome = match result.failure_kind() {
        None => "success",
        Some(kind) => kind.as_str(),
    };
    EXECUTIONS_TOTAL.with_label_values(&[outcome]).inc();
    REQUEST_DURATION
        .with_label_values(&["execute"])
        .observe(elapsed_secs);
}

pub fn record_analysis(result: &AnalysisResult, elapsed_secs: f64) {
    ANALYSES_TOTAL
        .with_label_values(&[result.basis.as_str()])
        .inc();
    REQUEST_DURATION
        .with_label_values(&["analyze"])
        .observe(elapsed_secs);
}

/// Render every registered metric in the text exposition format
pub fn render() -> Result<String, String> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| e.to_string())?;
    String::from_utf8(buffer).map_err(|e| e.to_string())
}
