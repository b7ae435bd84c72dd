use crate::llm_client::LlmError;

/// Placeholder reply used when the model call fails. Always parseable.
pub const FALLBACK_PAYLOAD: &str = r#"{"JD Match":"N/A","MissingKeywords":[],"Profile Summary":"Error","Candidate Name":"","Role":"","Current Company":"","Duration":"","Overall Experience":"","LinkedIn":""}"#;

/// Outcome of one model call: the generated text, or the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationReply {
    Generated(String),
    Failed(String),
}

impl EvaluationReply {
    /// Text handed to the parser. Failed calls substitute `FALLBACK_PAYLOAD`.
    pub fn text(&self) -> &str {
        match self {
            EvaluationReply::Generated(text) => text,
            EvaluationReply::Failed(_) => FALLBACK_PAYLOAD,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            EvaluationReply::Generated(_) => None,
            EvaluationReply::Failed(reason) => Some(reason),
        }
    }
}

impl From<Result<String, LlmError>> for EvaluationReply {
    fn from(result: Result<String, LlmError>) -> Self {
        match result {
            Ok(text) => EvaluationReply::Generated(text),
            Err(e) => EvaluationReply::Failed(e.to_string()),
        }
    }
}
