use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::errors::AppError;
use crate::models::upload::{EvaluationRequest, ResumeUpload};

pub const FIELD_JOB_DESCRIPTION: &str = "job_description";
pub const FIELD_PROFILE_LINK: &str = "profile_link";
pub const FIELD_RESUMES: &str = "resumes";

/// Reads an evaluation request out of a multipart form.
///
/// Unknown fields are ignored. File parts with neither a name nor content are
/// dropped; browsers send one when the file picker is left empty.
pub async fn read_evaluation_form(mut multipart: Multipart) -> Result<EvaluationRequest, AppError> {
    let mut request = EvaluationRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error("Malformed upload", e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FIELD_JOB_DESCRIPTION => request.job_description = read_text(field).await?,
            FIELD_PROFILE_LINK => request.profile_link = read_text(field).await?.trim().to_string(),
            FIELD_RESUMES => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| upload_error(&format!("Failed to read '{file_name}'"), e))?;
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                request.resumes.push(ResumeUpload { file_name, bytes });
            }
            _ => {}
        }
    }

    Ok(request)
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| upload_error("Malformed form field", e))
}

/// Keeps the 413 that multipart reports when the body limit is hit;
/// everything else is a bad request.
fn upload_error(context: &str, e: MultipartError) -> AppError {
    let message = format!("{context}: {}", e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}
