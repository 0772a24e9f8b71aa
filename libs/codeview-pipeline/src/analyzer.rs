/// Plagiarism Analyzer
///
/// **Modes (fixed at construction):**
/// - `Unconfigured`: no model credential. `analyze` is a pure default-returning
///   path, zero network calls.
/// - `Configured`: render prompt, one model call, interpret the reply.
///
/// `analyze` is total. "Not configured", "model unreachable" and "model
/// returned garbage" differ only in `basis` and `reasoning`.

use crate::model::{GeminiClient, ModelClient, ModelError};
use crate::prompt;
use crate::verdict::{self, Interpretation};
use codeview_common::config::ModelSettings;
use codeview_common::types::{AnalysisRequest, AnalysisResult};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub const NOT_CONFIGURED_REASONING: &str = "API key not configured. Analysis skipped.";
pub const UNKNOWN_ERROR_REASONING: &str = "Unknown error occurred";

#[derive(Clone)]
pub enum PlagiarismAnalyzer {
    Unconfigured,
    Configured { client: Arc<dyn ModelClient> },
}

impl PlagiarismAnalyzer {
    /// Pick the mode from the optional model settings
    pub fn from_settings(settings: Option<&ModelSettings>) -> Result<Self, ModelError> {
        match settings {
            Some(settings) => Ok(Self::with_client(Arc::new(GeminiClient::new(settings)?))),
            None => Ok(PlagiarismAnalyzer::Unconfigured),
        }
    }

    pub fn with_client(client: Arc<dyn ModelClient>) -> Self {
        PlagiarismAnalyzer::Configured { client }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, PlagiarismAnalyzer::Configured { .. })
    }

    /// Assess one submission. Total: never errors, never panics.
    #[instrument(skip(self, request), fields(language = %request.language, source_size = request.code.len()))]
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let client = match self {
            PlagiarismAnalyzer::Unconfigured => {
                warn!("GEMINI_API_KEY not configured. Skipping plagiarism check.");
                return AnalysisResult::skipped(NOT_CONFIGURED_REASONING);
            }
            PlagiarismAnalyzer::Configured { client } => client,
        };

        match assess(client.as_ref(), request).await {
            Ok(result) => {
                info!(
                    basis = result.basis.as_str(),
                    is_plagiarized = result.is_plagiarized,
                    confidence = %result.confidence,
                    "Plagiarism check completed"
                );
                result
            }
            Err(message) => {
                error!(error = %message, "Code analysis error");
                let reasoning = if message.trim().is_empty() {
                    UNKNOWN_ERROR_REASONING.to_string()
                } else {
                    message
                };
                AnalysisResult::failed(reasoning)
            }
        }
    }
}

async fn assess(client: &dyn ModelClient, request: &AnalysisRequest) -> Result<AnalysisResult, String> {
    let prompt = prompt::render(request).map_err(|e| e.to_string())?;
    let reply = client.generate(&prompt).await.map_err(|e| e.to_string())?;

    match verdict::interpret(&reply) {
        Interpretation::Parsed(result) => Ok(result),
        Interpretation::Fallback { result, parse_error } => {
            error!(error = %parse_error, "Failed to parse model response");
            debug!(raw_response = %reply, "Raw model response");
            Ok(result)
        }
    }
}
