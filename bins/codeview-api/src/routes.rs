use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/execute", post(handlers::execute))
        .route("/analyze", post(handlers::analyze))
        .route("/status", get(handlers::health_check))
        .route("/languages", get(handlers::languages))
        .route("/metrics", get(handlers::scrape_metrics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use codeview_pipeline::sandbox::{SandboxError, SandboxRequest, SandboxResponse, SandboxTransport};
    use codeview_pipeline::{Executor, PlagiarismAnalyzer};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct EchoSandbox;

    #[async_trait]
    impl SandboxTransport for EchoSandbox {
        async fn run(&self, request: &SandboxRequest) -> Result<SandboxResponse, SandboxError> {
            Ok(SandboxResponse {
                stdout: format!("{}\n", request.code),
                stderr: String::new(),
                exit_status: Some(0),
            })
        }
    }

    fn app() -> Router {
        let state = Arc::new(AppState {
            executor: Executor::with_transport(Arc::new(EchoSandbox)),
            analyzer: PlagiarismAnalyzer::Unconfigured,
        });
        routes().with_state(state)
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_execute_success() {
        let (status, body) = post_json("/execute", json!({"code": "hi", "language": "python"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "output": "hi\n"}));
    }

    #[tokio::test]
    async fn test_execute_unsupported_language() {
        let (status, body) = post_json("/execute", json!({"code": "x", "language": "cobol"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["failureKind"], json!("invalid_input"));
        assert!(body["error"].as_str().unwrap().contains("cobol"));
    }

    #[tokio::test]
    async fn test_analyze_unconfigured() {
        let (status, body) = post_json(
            "/analyze",
            json!({
                "code": "x",
                "language": "python",
                "questionTitle": "Two Sum",
                "questionDescription": "..."
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isPlagiarized"], json!(false));
        assert_eq!(body["confidence"], json!(0));
        assert_eq!(body["basis"], json!("skipped"));
    }

    #[tokio::test]
    async fn test_status_and_languages() {
        let response = app()
            .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app()
            .oneshot(Request::builder().uri("/languages").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"languages": ["javascript", "python", "java"]}));
    }

    #[tokio::test]
    async fn test_metrics_exposed() {
        post_json("/execute", json!({"code": "x", "language": "python"})).await;

        let response = app()
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("codeview_executions_total"));
    }
}
