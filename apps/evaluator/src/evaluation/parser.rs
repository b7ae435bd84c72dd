//! Response Parser — best-effort decoding of the model's JSON-shaped reply.
//!
//! 1. Decode the whole reply as a JSON object.
//! 2. Otherwise take the greedy match from the first `{` to the last `}` and
//!    decode that. This is a pattern match, not a balanced-brace scan: a reply
//!    with two separate objects yields the text spanning both, which fails.
//! 3. Otherwise the resume is skipped.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::models::evaluation::EvaluationResult;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("response contains no JSON object")]
    NoJsonObject,

    #[error("embedded JSON object could not be decoded: {0}")]
    InvalidEmbeddedJson(#[source] serde_json::Error),
}

fn brace_span() -> &'static Regex {
    static BRACE_SPAN: OnceLock<Regex> = OnceLock::new();
    BRACE_SPAN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("brace pattern is valid"))
}

/// Parses a raw model reply into an `EvaluationResult`.
pub fn parse_response(text: &str) -> Result<EvaluationResult, ParseError> {
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(text) {
        return Ok(EvaluationResult::from_json(&obj));
    }

    let span = brace_span()
        .find(text)
        .ok_or(ParseError::NoJsonObject)?;

    match serde_json::from_str::<Value>(span.as_str()) {
        Ok(Value::Object(obj)) => Ok(EvaluationResult::from_json(&obj)),
        Ok(_) => Err(ParseError::NoJsonObject),
        Err(e) => Err(ParseError::InvalidEmbeddedJson(e)),
    }
}
