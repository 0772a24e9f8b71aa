use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Languages the execution sandbox accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Python,
    Java,
}

impl Language {
    /// Parse a language identifier (case-insensitive, surrounding whitespace ignored)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "javascript" => Some(Language::JavaScript),
            "python" => Some(Language::Python),
            "java" => Some(Language::Java),
            _ => None,
        }
    }

    pub fn all() -> &'static [Language] {
        &[Language::JavaScript, Language::Python, Language::Java]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Java => "java",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::Python => "py",
            Language::Java => "java",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single "Run Code" request.
///
/// `language` stays raw text here: the execution adapter owns validation so
/// an unsupported identifier becomes a typed failure instead of a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionInput {
    pub code: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdin: Option<String>,
}

impl SubmissionInput {
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            stdin: None,
        }
    }

    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }
}

/// A single plagiarism-check request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub code: String,
    pub language: String,
    pub question_title: String,
    #[serde(default)]
    pub question_description: String,
}

/// Which layer a failed execution came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Rejected before any remote call (unsupported language, oversized source)
    InvalidInput,
    /// The sandbox ran the code and reported a compile or runtime error
    Program,
    /// The sandbox could not be reached or answered with garbage
    Transport,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidInput => "invalid_input",
            FailureKind::Program => "program",
            FailureKind::Transport => "transport",
        }
    }
}

/// Outcome of one execution.
///
/// Serializes to the flat `{success, output, error?, failureKind?}` shape the
/// front end renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ExecutionReport")]
pub enum ExecutionResult {
    Success {
        output: String,
    },
    Failure {
        kind: FailureKind,
        /// stdout captured up to the failure point, empty when nothing ran
        output: String,
        error: String,
    },
}

impl ExecutionResult {
    pub fn success(output: impl Into<String>) -> Self {
        ExecutionResult::Success {
            output: output.into(),
        }
    }

    pub fn failure(kind: FailureKind, output: impl Into<String>, error: impl Into<String>) -> Self {
        ExecutionResult::Failure {
            kind,
            output: output.into(),
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success { .. })
    }

    pub fn output(&self) -> &str {
        match self {
            ExecutionResult::Success { output } | ExecutionResult::Failure { output, .. } => output,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ExecutionResult::Success { .. } => None,
            ExecutionResult::Failure { error, .. } => Some(error),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ExecutionResult::Success { .. } => None,
            ExecutionResult::Failure { kind, .. } => Some(*kind),
        }
    }
}

/// Wire shape of [`ExecutionResult`]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub success: bool,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_kind: Option<FailureKind>,
}

impl From<ExecutionResult> for ExecutionReport {
    fn from(result: ExecutionResult) -> Self {
        match result {
            ExecutionResult::Success { output } => ExecutionReport {
                success: true,
                output,
                error: None,
                failure_kind: None,
            },
            ExecutionResult::Failure { kind, output, error } => ExecutionReport {
                success: false,
                output,
                error: Some(error),
                failure_kind: Some(kind),
            },
        }
    }
}

/// How an [`AnalysisResult`] was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisBasis {
    /// Parsed from the model's structured reply
    Model,
    /// Text-pattern guess after the structured parse failed
    Heuristic,
    /// No model configured, nothing was assessed
    Skipped,
    /// The model call failed, nothing was assessed
    Failed,
}

impl AnalysisBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisBasis::Model => "model",
            AnalysisBasis::Heuristic => "heuristic",
            AnalysisBasis::Skipped => "skipped",
            AnalysisBasis::Failed => "failed",
        }
    }
}

/// Outcome of one plagiarism check.
///
/// `confidence` is whatever number the verdict carried: a model reply keeps
/// its own value (fractions and out-of-range numbers included).
/// `confidence == 0` with a `Skipped`/`Failed` basis is a non-assessment,
/// not a "definitely original" verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_plagiarized: bool,
    pub confidence: Number,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<String>,
    pub basis: AnalysisBasis,
}

impl AnalysisResult {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            is_plagiarized: false,
            confidence: Number::from(0),
            reasoning: reason.into(),
            suggestions: None,
            basis: AnalysisBasis::Skipped,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            is_plagiarized: false,
            confidence: Number::from(0),
            reasoning: reason.into(),
            suggestions: None,
            basis: AnalysisBasis::Failed,
        }
    }

    /// True when a verdict was actually reached (model or heuristic)
    pub fn is_assessment(&self) -> bool {
        matches!(self.basis, AnalysisBasis::Model | AnalysisBasis::Heuristic)
    }
}
