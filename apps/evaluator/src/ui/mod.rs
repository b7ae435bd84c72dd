//! Server-rendered pages: the upload form and the per-resume results.

use askama::Template;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::errors::AppError;
use crate::evaluation::form::read_evaluation_form;
use crate::evaluation::handlers::{download_url, evaluate_and_store};
use crate::evaluation::pipeline::{ProcessedResume, ResumeOutcome};
use crate::report::REPORT_FILE_NAME;
use crate::state::AppState;

#[derive(Template, Default)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub error: Option<String>,
    pub job_description: String,
    pub profile_link: String,
    pub max_resumes: usize,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsPage {
    pub resumes: Vec<ResumeView>,
    pub report_rows: usize,
    pub download_url: Option<String>,
    pub report_file_name: &'static str,
}

/// Display-ready fields for one processed resume.
pub struct ResumeView {
    pub file_name: String,
    pub position: usize,
    pub total: usize,
    pub progress_percent: u32,
    pub evaluated: bool,
    pub jd_match: String,
    pub missing_count: usize,
    pub missing_keywords: String,
    pub candidate_name: String,
    pub role: String,
    pub current_company: String,
    pub duration: String,
    pub overall_experience: String,
    pub linkedin: String,
    /// Only http(s) links are rendered as anchors.
    pub linkedin_href: Option<String>,
    pub profile_summary: String,
    pub error: Option<String>,
}

impl From<&ProcessedResume> for ResumeView {
    fn from(processed: &ProcessedResume) -> Self {
        let mut view = ResumeView {
            file_name: processed.file_name.clone(),
            position: processed.position,
            total: processed.total,
            progress_percent: (processed.progress() * 100.0).round() as u32,
            evaluated: false,
            jd_match: String::new(),
            missing_count: 0,
            missing_keywords: String::new(),
            candidate_name: String::new(),
            role: String::new(),
            current_company: String::new(),
            duration: String::new(),
            overall_experience: String::new(),
            linkedin: String::new(),
            linkedin_href: None,
            profile_summary: String::new(),
            error: None,
        };

        match &processed.outcome {
            ResumeOutcome::Evaluated {
                result,
                service_error,
            } => {
                view.evaluated = true;
                view.jd_match = result.jd_match.clone();
                view.missing_count = result.missing_keywords.len();
                view.missing_keywords = result.missing_keywords.join(", ");
                view.candidate_name = result.candidate_name.clone();
                view.role = result.role.clone();
                view.current_company = result.current_company.clone();
                view.duration = result.duration.clone();
                view.overall_experience = result.overall_experience.clone();
                view.linkedin = result.linkedin.clone();
                view.linkedin_href = safe_href(&result.linkedin);
                view.profile_summary = result.profile_summary.clone();
                view.error = service_error
                    .as_ref()
                    .map(|e| format!("Model API error: {e}"));
            }
            ResumeOutcome::Skipped { reason } => view.error = Some(reason.clone()),
        }
        view
    }
}

fn safe_href(link: &str) -> Option<String> {
    let link = link.trim();
    let lower = link.to_ascii_lowercase();
    (lower.starts_with("https://") || lower.starts_with("http://")).then(|| link.to_string())
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let page = IndexPage {
        max_resumes: state.config.max_resumes_per_run,
        ..IndexPage::default()
    };
    Ok(Html(page.render()?))
}

/// POST /evaluate
///
/// Invalid input, including an unreadable or oversized upload, re-renders the
/// form with the message and the matching 4xx status.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (job_description, profile_link, outcome) = match read_evaluation_form(multipart).await {
        Ok(request) => (
            request.job_description.clone(),
            request.profile_link.clone(),
            evaluate_and_store(&state, request).await,
        ),
        Err(e) => (String::new(), String::new(), Err(e)),
    };

    let (run, report_id) = match outcome {
        Ok(outcome) => outcome,
        Err(AppError::Validation(message)) => {
            return rerender_form(
                &state,
                StatusCode::BAD_REQUEST,
                message,
                job_description,
                profile_link,
            );
        }
        Err(AppError::PayloadTooLarge(message)) => {
            return rerender_form(
                &state,
                StatusCode::PAYLOAD_TOO_LARGE,
                message,
                job_description,
                profile_link,
            );
        }
        Err(e) => return Err(e),
    };

    let page = ResultsPage {
        resumes: run.resumes.iter().map(ResumeView::from).collect(),
        report_rows: run.report.len(),
        download_url: report_id.map(download_url),
        report_file_name: REPORT_FILE_NAME,
    };
    Ok(Html(page.render()?).into_response())
}

fn rerender_form(
    state: &AppState,
    status: StatusCode,
    message: String,
    job_description: String,
    profile_link: String,
) -> Result<Response, AppError> {
    let page = IndexPage {
        error: Some(message),
        job_description,
        profile_link,
        max_resumes: state.config.max_resumes_per_run,
    };
    Ok((status, Html(page.render()?)).into_response())
}
