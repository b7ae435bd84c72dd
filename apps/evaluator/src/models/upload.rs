use bytes::Bytes;

/// One uploaded resume. Lives only for the duration of a run.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Everything a user submits for one evaluation run.
#[derive(Debug, Clone, Default)]
pub struct EvaluationRequest {
    pub job_description: String,
    /// Optional external profile link; empty when not supplied.
    pub profile_link: String,
    pub resumes: Vec<ResumeUpload>,
}
