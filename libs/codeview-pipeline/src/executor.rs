/// Execution Runner Adapter
///
/// **Responsibility:**
/// Turn one `SubmissionInput` into exactly one `ExecutionResult`.
///
/// **Architecture:**
/// 1. Validate the language and source size locally (no remote call on failure)
/// 2. Dispatch once through a `SandboxTransport` (sandbox.rs)
/// 3. Classify the raw sandbox response
///
/// Every failure layer (input, program, transport) comes back as the same
/// result type. Nothing is retried: a rerun could hide a nondeterministic
/// program behind a lucky second attempt.

use crate::sandbox::{HttpSandbox, SandboxError, SandboxRequest, SandboxResponse, SandboxTransport};
use codeview_common::config::SandboxSettings;
use codeview_common::types::{ExecutionResult, FailureKind, Language, SubmissionInput};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Safety limit to keep pathological inputs away from the sandbox
pub const MAX_SOURCE_CODE_BYTES: usize = 1024 * 1024; // 1MB

pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Code execution service is unavailable. Please try again.";

#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn SandboxTransport>,
}

impl Executor {
    /// Executor backed by the HTTP sandbox described in `settings`
    pub fn from_settings(settings: &SandboxSettings) -> Result<Self, SandboxError> {
        Ok(Self::with_transport(Arc::new(HttpSandbox::new(settings)?)))
    }

    pub fn with_transport(transport: Arc<dyn SandboxTransport>) -> Self {
        Self { transport }
    }

    /// Run a submission. Total: never errors, never panics.
    #[instrument(skip(self, input), fields(language = %input.language, source_size = input.code.len()))]
    pub async fn execute(&self, input: &SubmissionInput) -> ExecutionResult {
        let language = match validate(input) {
            Ok(language) => language,
            Err(message) => {
                warn!(%message, "Rejected submission before dispatch");
                return ExecutionResult::failure(FailureKind::InvalidInput, "", message);
            }
        };

        let request = SandboxRequest {
            language,
            code: input.code.clone(),
            stdin: input.stdin.clone().unwrap_or_default(),
        };

        match self.transport.run(&request).await {
            Ok(response) => {
                let result = classify(response);
                info!(
                    success = result.is_success(),
                    output_size = result.output().len(),
                    "Execution completed"
                );
                result
            }
            Err(e) => {
                error!(error = %e, "Sandbox transport failed");
                ExecutionResult::failure(FailureKind::Transport, "", TRANSPORT_FAILURE_MESSAGE)
            }
        }
    }
}

fn validate(input: &SubmissionInput) -> Result<Language, String> {
    let language = Language::from_str(&input.language).ok_or_else(|| {
        let supported: Vec<&str> = Language::all().iter().map(|l| l.as_str()).collect();
        format!(
            "Unsupported language: '{}'. Supported languages: {}",
            input.language,
            supported.join(", ")
        )
    })?;

    if input.code.len() > MAX_SOURCE_CODE_BYTES {
        return Err(format!(
            "Source code exceeds maximum size of {} bytes",
            MAX_SOURCE_CODE_BYTES
        ));
    }

    Ok(language)
}

/// Map a raw sandbox response onto the result type
///
/// **Rules:**
/// - exit status 0: success, stdout is the output, stderr is dropped
/// - non-zero exit: program failure, stdout kept as partial output
/// - no exit status (killed): program failure
pub fn classify(response: SandboxResponse) -> ExecutionResult {
    let SandboxResponse {
        stdout,
        stderr,
        exit_status,
    } = response;

    match exit_status {
        Some(0) => ExecutionResult::success(stdout),
        Some(code) => {
            let error = if stderr.trim().is_empty() {
                format!("Process exited with status {}", code)
            } else {
                stderr
            };
            ExecutionResult::failure(FailureKind::Program, stdout, error)
        }
        None => {
            let error = if stderr.trim().is_empty() {
                "Process terminated without an exit status".to_string()
            } else {
                stderr
            };
            ExecutionResult::failure(FailureKind::Program, stdout, error)
        }
    }
}
