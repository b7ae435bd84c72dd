//! Axum route handlers for the Evaluation API.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::form::read_evaluation_form;
use crate::evaluation::pipeline::{run_evaluation, EvaluationRun, ProcessedResume};
use crate::models::upload::EvaluationRequest;
use crate::report::REPORT_FILE_NAME;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub resumes: Vec<ProcessedResume>,
    pub report_rows: usize,
    /// Absent when no resume made it into the report.
    pub report_id: Option<Uuid>,
    pub download_url: Option<String>,
}

pub fn download_url(report_id: Uuid) -> String {
    format!("/api/v1/reports/{report_id}")
}

/// Runs the pipeline and parks a non-empty report for download.
pub async fn evaluate_and_store(
    state: &AppState,
    request: EvaluationRequest,
) -> Result<(EvaluationRun, Option<Uuid>), AppError> {
    let run = run_evaluation(
        state.evaluator.as_ref(),
        request,
        state.config.max_resumes_per_run,
    )
    .await?;

    let report_id = (!run.report.is_empty()).then(|| state.reports.insert(run.report.clone()));
    Ok((run, report_id))
}

/// POST /api/v1/evaluations
///
/// Multipart form: `job_description`, optional `profile_link`, one or more `resumes`.
pub async fn handle_create_evaluation(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluationResponse>, AppError> {
    let request = read_evaluation_form(multipart).await?;
    let (run, report_id) = evaluate_and_store(&state, request).await?;

    Ok(Json(EvaluationResponse {
        report_rows: run.report.len(),
        resumes: run.resumes,
        report_id,
        download_url: report_id.map(download_url),
    }))
}

/// GET /api/v1/reports/:id
///
/// Returns the CSV once; the report is discarded after download.
pub async fn handle_download_report(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let report = state
        .reports
        .take(&report_id)
        .ok_or_else(|| AppError::NotFound(format!("Report {report_id} not found")))?;

    let csv = report.to_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        csv,
    ))
}
