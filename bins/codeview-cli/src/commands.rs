// CLI commands for exercising the submission pipeline
use anyhow::{Context, Result, bail};
use codeview_common::types::{AnalysisRequest, ExecutionResult, AnalysisResult, Language, SubmissionInput};
use codeview_pipeline::{Executor, PlagiarismAnalyzer};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read a source file, refusing empty ones
fn read_source(path: &Path) -> Result<String> {
    let code = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if code.trim().is_empty() {
        bail!("{} is empty", path.display());
    }
    Ok(code)
}

/// Pick the language: explicit flag first, then the file extension
pub fn resolve_language(explicit: Option<&str>, path: &Path) -> Result<String> {
    if let Some(language) = explicit {
        return Ok(language.to_string());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    Language::all()
        .iter()
        .find(|lang| lang.file_extension().eq_ignore_ascii_case(ext))
        .map(|lang| lang.to_string())
        .with_context(|| {
            format!(
                "Cannot infer language from '{}'; pass --language",
                path.display()
            )
        })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{}", json);
    Ok(())
}

/// Build a submission from files on disk
pub fn load_submission(
    file: &Path,
    language: Option<&str>,
    stdin_file: Option<&Path>,
) -> Result<SubmissionInput> {
    let code = read_source(file)?;
    let language = resolve_language(language, file)?;
    let mut input = SubmissionInput::new(language, code);

    if let Some(stdin_path) = stdin_file {
        let stdin = fs::read_to_string(stdin_path)
            .with_context(|| format!("Failed to read stdin file {}", stdin_path.display()))?;
        input = input.with_stdin(stdin);
    }

    Ok(input)
}

/// Run a source file through the sandbox and print the result
pub async fn run_code(
    executor: &Executor,
    file: &Path,
    language: Option<&str>,
    stdin_file: Option<&Path>,
) -> Result<ExecutionResult> {
    let input = load_submission(file, language, stdin_file)?;

    println!("▶ Running {} ({})", file.display(), input.language);
    let result = executor.execute(&input).await;

    if result.is_success() {
        println!("✅ Execution succeeded");
    } else {
        println!("❌ Execution failed");
    }
    print_json(&result)?;

    Ok(result)
}

/// Ask the model whether a source file looks plagiarized
pub async fn analyze_code(
    analyzer: &PlagiarismAnalyzer,
    file: &Path,
    language: Option<&str>,
    title: &str,
    description: &str,
) -> Result<AnalysisResult> {
    let request = AnalysisRequest {
        code: read_source(file)?,
        language: resolve_language(language, file)?,
        question_title: title.to_string(),
        question_description: description.to_string(),
    };

    if !analyzer.is_configured() {
        println!("⚠ GEMINI_API_KEY not set - analysis will be skipped");
    }
    println!("🔍 Analyzing {} for \"{}\"", file.display(), title);

    let result = analyzer.analyze(&request).await;
    print_json(&result)?;

    Ok(result)
}

/// List languages the sandbox accepts
pub fn list_languages() {
    println!("Supported languages:");
    for lang in Language::all() {
        println!("  {:<12} .{}", lang.to_string(), lang.file_extension());
    }
}
