/// Model Reply Interpreter - Two-Stage Parser
///
/// **Core Responsibility:**
/// Turn the model's free-form reply into an `AnalysisResult`.
///
/// **Stages (first success wins):**
/// 1. Strict: take the first fenced block holding a `{...}` object (or the
///    whole reply when there is none) and decode the four-field shape
/// 2. Heuristic: case-insensitive search for an affirmative plagiarism phrase
///    - hit:  is_plagiarized = true,  confidence = 70
///    - miss: is_plagiarized = false, confidence = 30
///
/// Heuristic verdicts carry `AnalysisBasis::Heuristic` and a fixed reasoning
/// text so they are never mistaken for a model verdict.
///
/// Pure functions only: no I/O, no logging of verdicts.

use codeview_common::types::{AnalysisBasis, AnalysisResult};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::Number;

pub const HEURISTIC_POSITIVE_CONFIDENCE: u64 = 70;
pub const HEURISTIC_NEGATIVE_CONFIDENCE: u64 = 30;

pub const HEURISTIC_REASONING: &str =
    "Failed to parse AI response properly. Please review the code manually.";
pub const HEURISTIC_SUGGESTIONS: &str =
    "Consider running the analysis again or manually reviewing the submission.";

lazy_static! {
    static ref FENCED_OBJECT: Regex =
        Regex::new(r"```(?:json)?\s*(\{[\s\S]*?\})\s*```").unwrap();
    static ref AFFIRMATIVE: [Regex; 2] = [
        Regex::new(r"(?i)plagiarized.*?:\s*true").unwrap(),
        Regex::new(r"(?i)is.*?plagiarized.*?yes").unwrap(),
    ];
}

/// The four-field object the prompt asks for.
///
/// Fields pass through untouched; `confidence` is not re-bounded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelVerdict {
    pub is_plagiarized: bool,
    pub confidence: Number,
    pub reasoning: String,
    #[serde(default)]
    pub suggestions: Option<String>,
}

impl ModelVerdict {
    pub fn into_result(self) -> AnalysisResult {
        AnalysisResult {
            is_plagiarized: self.is_plagiarized,
            confidence: self.confidence,
            reasoning: self.reasoning,
            suggestions: self.suggestions,
            basis: AnalysisBasis::Model,
        }
    }
}

/// Stage 1a: the JSON candidate inside the reply
pub fn extract_json_candidate(reply: &str) -> &str {
    FENCED_OBJECT
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(reply)
}

/// Stage 1b: strict decode of a candidate
pub fn parse_strict(candidate: &str) -> Result<ModelVerdict, serde_json::Error> {
    serde_json::from_str(candidate.trim())
}

/// Stage 2: phrase-matching fallback over the raw reply
pub fn heuristic(reply: &str) -> AnalysisResult {
    let is_plagiarized = AFFIRMATIVE.iter().any(|re| re.is_match(reply));

    AnalysisResult {
        is_plagiarized,
        confidence: Number::from(if is_plagiarized {
            HEURISTIC_POSITIVE_CONFIDENCE
        } else {
            HEURISTIC_NEGATIVE_CONFIDENCE
        }),
        reasoning: HEURISTIC_REASONING.to_string(),
        suggestions: Some(HEURISTIC_SUGGESTIONS.to_string()),
        basis: AnalysisBasis::Heuristic,
    }
}

/// Outcome of interpreting a reply, with the parse error kept for logging
pub enum Interpretation {
    Parsed(AnalysisResult),
    Fallback {
        result: AnalysisResult,
        parse_error: serde_json::Error,
    },
}

impl Interpretation {
    pub fn into_result(self) -> AnalysisResult {
        match self {
            Interpretation::Parsed(result) | Interpretation::Fallback { result, .. } => result,
        }
    }
}

/// Run both stages in order
pub fn interpret(reply: &str) -> Interpretation {
    match parse_strict(extract_json_candidate(reply)) {
        Ok(verdict) => Interpretation::Parsed(verdict.into_result()),
        Err(parse_error) => Interpretation::Fallback {
            result: heuristic(reply),
            parse_error,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_json_block() {
        let reply = "```json\n{\"isPlagiarized\":true,\"confidence\":85,\"reasoning\":\"matches known solution\"}\n```";
        let result = interpret(reply).into_result();

        assert_eq!(
            result,
            AnalysisResult {
                is_plagiarized: true,
                confidence: Number::from(85),
                reasoning: "matches known solution".to_string(),
                suggestions: None,
                basis: AnalysisBasis::Model,
            }
        );
    }

    #[test]
    fn test_untagged_fence_with_surrounding_prose() {
        let reply = r#"Here is my analysis:

```
{
  "isPlagiarized": false,
  "confidence": 90,
  "reasoning": "Idiomatic, incremental solution.",
  "suggestions": "Ask the candidate to explain the loop invariant."
}
```

Let me know if you need anything else."#;
        let result = interpret(reply).into_result();

        assert!(!result.is_plagiarized);
        assert_eq!(result.confidence, Number::from(90));
        assert_eq!(result.reasoning, "Idiomatic, incremental solution.");
        assert_eq!(
            result.suggestions.as_deref(),
            Some("Ask the candidate to explain the loop invariant.")
        );
        assert_eq!(result.basis, AnalysisBasis::Model);
    }

    #[test]
    fn test_bare_json_uses_whole_reply() {
        let reply = "  {\"isPlagiarized\": false, \"confidence\": 12, \"reasoning\": \"original\", \"suggestions\": \"none\"}\n";
        assert_eq!(extract_json_candidate(reply), reply);

        let result = interpret(reply).into_result();
        assert_eq!(result.confidence, Number::from(12));
        assert_eq!(result.basis, AnalysisBasis::Model);
    }

    #[test]
    fn test_nested_object_in_fence() {
        let reply = "```json\n{\"isPlagiarized\": true, \"confidence\": 60, \"reasoning\": \"see {details}\", \"suggestions\": null}\n```";
        let result = interpret(reply).into_result();
        assert_eq!(result.reasoning, "see {details}");
        assert_eq!(result.suggestions, None);
    }

    #[test]
    fn test_first_fenced_block_wins() {
        let reply = "```json\n{\"isPlagiarized\": true, \"confidence\": 80, \"reasoning\": \"first\"}\n```\n```json\n{\"isPlagiarized\": false, \"confidence\": 10, \"reasoning\": \"second\"}\n```";
        assert_eq!(interpret(reply).into_result().reasoning, "first");
    }

    #[test]
    fn test_no_json_no_phrase() {
        let reply = "I could not reach a conclusion about this submission.";
        let result = interpret(reply).into_result();

        assert!(!result.is_plagiarized);
        assert_eq!(result.confidence, Number::from(30));
        assert_eq!(result.reasoning, HEURISTIC_REASONING);
        assert_eq!(result.suggestions.as_deref(), Some(HEURISTIC_SUGGESTIONS));
        assert_eq!(result.basis, AnalysisBasis::Heuristic);
    }

    #[test]
    fn test_affirmative_phrase_with_broken_json() {
        let reply = "```json\n{\"isPlagiarized\": true, \"confidence\": 95, \"reasoning\": \"unterminated\n```";
        let result = interpret(reply).into_result();

        assert!(result.is_plagiarized);
        assert_eq!(result.confidence, Number::from(70));
        assert_eq!(result.basis, AnalysisBasis::Heuristic);
    }

    #[test]
    fn test_affirmative_phrase_wordings() {
        assert!(heuristic("Plagiarized: TRUE").is_plagiarized);
        assert!(heuristic("1. Is this code likely plagiarized? Yes.").is_plagiarized);
        assert!(!heuristic("Plagiarized: false").is_plagiarized);
        assert!(!heuristic("The code looks original to me.").is_plagiarized);
    }

    #[test]
    fn test_missing_required_field_falls_back() {
        let reply = "{\"isPlagiarized\": true, \"confidence\": 40}";
        match interpret(reply) {
            Interpretation::Fallback { result, .. } => {
                // `"isPlagiarized": true` is itself an affirmative phrase
                assert!(result.is_plagiarized);
                assert_eq!(result.confidence, Number::from(70));
            }
            Interpretation::Parsed(_) => panic!("reasoning is required"),
        }
    }

    #[test]
    fn test_wrong_field_type_falls_back() {
        let reply = "{\"isPlagiarized\": \"no\", \"confidence\": 40, \"reasoning\": \"x\"}";
        let result = interpret(reply).into_result();
        assert_eq!(result.basis, AnalysisBasis::Heuristic);
        assert!(!result.is_plagiarized);
    }

    #[test]
    fn test_model_confidence_kept_verbatim() {
        let reply = "```json\n{\"isPlagiarized\":true,\"confidence\":72.5,\"reasoning\":\"close match\"}\n```";
        let result = interpret(reply).into_result();
        assert_eq!(result.basis, AnalysisBasis::Model);
        assert_eq!(result.confidence.as_f64(), Some(72.5));

        let reply = "{\"isPlagiarized\":false,\"confidence\":150,\"reasoning\":\"overconfident\"}";
        let result = interpret(reply).into_result();
        assert_eq!(result.basis, AnalysisBasis::Model);
        assert_eq!(result.confidence, Number::from(150));

        let reply = "{\"isPlagiarized\":false,\"confidence\":-5,\"reasoning\":\"negative\"}";
        assert_eq!(interpret(reply).into_result().confidence, Number::from(-5));
    }

    #[test]
    fn test_model_confidence_json_unchanged() {
        let reply = "{\"isPlagiarized\":true,\"confidence\":99.9,\"reasoning\":\"r\"}";
        let value = serde_json::to_value(interpret(reply).into_result()).unwrap();
        assert_eq!(value["confidence"], serde_json::json!(99.9));
    }
}
