//! Evaluation pipeline — runs every uploaded resume through
//! extract → prompt → model call → parse → record, one at a time.
//!
//! Failures are contained per resume. A failed model call produces a
//! placeholder result; an unreadable document or unparseable reply skips the
//! resume. Only invalid run input rejects the whole run.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::evaluation::parser::parse_response;
use crate::evaluation::prompts::build_evaluation_prompt;
use crate::evaluation::reply::EvaluationReply;
use crate::extraction::extract_text;
use crate::llm_client::Evaluator;
use crate::models::evaluation::EvaluationResult;
use crate::models::upload::{EvaluationRequest, ResumeUpload};
use crate::report::{Report, ReportRow};

/// What happened to one resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResumeOutcome {
    /// Parsed into a report row. `service_error` is set when the model call
    /// failed and the result holds placeholders.
    Evaluated {
        result: EvaluationResult,
        service_error: Option<String>,
    },
    /// No report row was produced.
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedResume {
    pub file_name: String,
    /// 1-based position in upload order.
    pub position: usize,
    pub total: usize,
    #[serde(flatten)]
    pub outcome: ResumeOutcome,
}

impl ProcessedResume {
    /// Fraction of the run completed once this resume is done.
    pub fn progress(&self) -> f64 {
        self.position as f64 / self.total as f64
    }
}

#[derive(Debug, Clone)]
pub struct EvaluationRun {
    pub resumes: Vec<ProcessedResume>,
    pub report: Report,
}

/// Rejects runs that must not start: blank job description, no resumes, or
/// more resumes than one run accepts.
pub fn validate_request(request: &EvaluationRequest, max_resumes: usize) -> Result<(), AppError> {
    if request.job_description.trim().is_empty() || request.resumes.is_empty() {
        return Err(AppError::Validation(
            "Please provide both a job description and at least one resume.".to_string(),
        ));
    }
    if request.resumes.len() > max_resumes {
        return Err(AppError::Validation(format!(
            "At most {max_resumes} resumes can be evaluated per run, got {}.",
            request.resumes.len()
        )));
    }
    Ok(())
}

/// Runs a whole evaluation. Resume `i + 1` is not started until resume `i`
/// has been recorded.
pub async fn run_evaluation(
    evaluator: &dyn Evaluator,
    request: EvaluationRequest,
    max_resumes: usize,
) -> Result<EvaluationRun, AppError> {
    validate_request(&request, max_resumes)?;

    let total = request.resumes.len();
    info!("Evaluating {total} resume(s)");

    let mut resumes = Vec::with_capacity(total);
    let mut report = Report::default();

    for (idx, upload) in request.resumes.into_iter().enumerate() {
        let file_name = upload.file_name.clone();
        let outcome = evaluate_resume(
            evaluator,
            upload,
            &request.job_description,
            &request.profile_link,
        )
        .await;

        if let ResumeOutcome::Evaluated { result, .. } = &outcome {
            report.push(ReportRow::new(&file_name, result));
        }

        let processed = ProcessedResume {
            file_name,
            position: idx + 1,
            total,
            outcome,
        };
        info!(
            "Processed {}/{} ({:.0}%): {}",
            processed.position,
            processed.total,
            processed.progress() * 100.0,
            processed.file_name
        );
        resumes.push(processed);
    }

    info!(
        "Evaluation complete: {} of {total} resume(s) in report",
        report.len()
    );
    Ok(EvaluationRun { resumes, report })
}

async fn evaluate_resume(
    evaluator: &dyn Evaluator,
    upload: ResumeUpload,
    job_description: &str,
    profile_link: &str,
) -> ResumeOutcome {
    let ResumeUpload { file_name, bytes } = upload;

    let resume_text = match extract_text(&file_name, bytes).await {
        Ok(text) => text.to_lowercase(),
        Err(e) => {
            error!("Skipping '{file_name}': {e}");
            return ResumeOutcome::Skipped {
                reason: format!("Failed to read resume: {e}"),
            };
        }
    };

    let prompt = build_evaluation_prompt(&resume_text, job_description, profile_link);
    let reply = EvaluationReply::from(evaluator.generate(&prompt).await);
    if let Some(reason) = reply.error() {
        warn!("Model call failed for '{file_name}', using placeholder result: {reason}");
    }

    match parse_response(reply.text()) {
        Ok(result) => ResumeOutcome::Evaluated {
            result,
            service_error: reply.error().map(String::from),
        },
        Err(e) => {
            error!("Skipping '{file_name}': {e}");
            ResumeOutcome::Skipped {
                reason: format!("Failed to parse JSON: {e}"),
            }
        }
    }
}
