// Plagiarism prompt rendering

use codeview_common::types::AnalysisRequest;
use handlebars::Handlebars;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to render analysis prompt: {0}")]
pub struct PromptError(#[from] handlebars::RenderError);

const ANALYSIS_TEMPLATE: &str = r#"
You are an expert code reviewer for a coding interview platform. Your task is to analyze the following code submission and determine if it appears to be plagiarized or if the candidate is cheating.

Question Title: {{question_title}}
Question Description: {{question_description}}
Programming Language: {{language}}

Submitted Code:
```{{language}}
{{code}}
```

Please analyze this code and provide:
1. Is this code likely plagiarized or does it show signs of cheating? (Yes/No)
2. Confidence level in your assessment (0-100)
3. Reasoning for your assessment
4. If applicable, suggestions for the interviewer

Focus on these indicators of potential plagiarism:
- Code that's unnecessarily complex or advanced for the problem
- Solutions that use algorithms or approaches not typically known by candidates
- Unusual variable names or commenting styles
- Code that solves more than what was asked
- Patterns that match common online solutions for this problem

Provide your analysis in JSON format with the following structure exactly:
{
  "isPlagiarized": boolean,
  "confidence": number,
  "reasoning": "string",
  "suggestions": "string"
}

Make sure the response is valid JSON that can be parsed.
"#;

/// Render the single prompt sent to the model for one submission.
///
/// The code is embedded verbatim: no HTML escaping, no trimming.
pub fn render(request: &AnalysisRequest) -> Result<String, PromptError> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(handlebars::no_escape);

    let data = json!({
        "question_title": request.question_title,
        "question_description": request.question_description,
        "language": request.language.trim(),
        "code": request.code,
    });

    Ok(handlebars.render_template(ANALYSIS_TEMPLATE, &data)?)
}
