/// Sandbox Transport - Remote Code Execution
///
/// **Core Responsibility:**
/// Ship (language, code, stdin) to the remote sandbox and hand back its raw
/// stdout/stderr/exit status.
///
/// **Critical Architectural Boundary:**
/// - Transport knows HOW to reach the sandbox (HTTP, in-process fake, ...)
/// - Transport does NOT decide what counts as success
/// - Transport never retries; one request per call
///
/// The executor turns raw responses into `ExecutionResult`s.

use async_trait::async_trait;
use codeview_common::config::SandboxSettings;
use codeview_common::types::Language;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Request body sent to the sandbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxRequest {
    pub language: Language,
    pub code: String,
    #[serde(default)]
    pub stdin: String,
}

/// What the sandbox reports for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxResponse {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    /// `None` when the process was killed before it could exit
    #[serde(default)]
    pub exit_status: Option<i64>,
}

#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("sandbox did not answer within {0:?}")]
    Timeout(Duration),
    #[error("failed to reach sandbox: {0}")]
    Connect(String),
    #[error("sandbox answered with HTTP status {0}")]
    Status(u16),
    #[error("sandbox reply could not be decoded: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait SandboxTransport: Send + Sync {
    async fn run(&self, request: &SandboxRequest) -> Result<SandboxResponse, SandboxError>;
}

/// reqwest-backed sandbox transport
#[derive(Debug, Clone)]
pub struct HttpSandbox {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpSandbox {
    pub fn new(settings: &SandboxSettings) -> Result<Self, SandboxError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| SandboxError::Connect(e.to_string()))?;

        Ok(Self {
            client,
            url: settings.url.clone(),
            timeout: settings.timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SandboxTransport for HttpSandbox {
    async fn run(&self, request: &SandboxRequest) -> Result<SandboxResponse, SandboxError> {
        debug!(url = %self.url, language = %request.language, "Dispatching to sandbox");

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SandboxError::Timeout(self.timeout)
                } else {
                    SandboxError::Connect(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SandboxError::Status(status.as_u16()));
        }

        // Read the body first so a slow body still maps to Timeout
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                SandboxError::Timeout(self.timeout)
            } else {
                SandboxError::Connect(e.to_string())
            }
        })?;

        serde_json::from_slice(&body).map_err(|e| SandboxError::Malformed(e.to_string()))
    }
}
