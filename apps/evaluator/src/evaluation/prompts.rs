// Evaluation prompt. The JSON keys listed here are the same keys the parser
// reads back (see models::evaluation).

use crate::models::evaluation::{
    KEY_CANDIDATE_NAME, KEY_CURRENT_COMPANY, KEY_DURATION, KEY_JD_MATCH, KEY_LINKEDIN,
    KEY_MISSING_KEYWORDS, KEY_OVERALL_EXPERIENCE, KEY_PROFILE_SUMMARY, KEY_ROLE,
};

/// Resume text is cut to this many characters before embedding.
pub const RESUME_CHAR_LIMIT: usize = 4000;
/// Job description text is cut to this many characters before embedding.
pub const JD_CHAR_LIMIT: usize = 1000;

/// Returns the longest prefix of `text` holding at most `limit` characters.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Builds the ATS evaluation prompt for one resume.
///
/// Inputs are inserted with `format!`, never by placeholder replacement, so text
/// inside a resume can't be mistaken for a template slot.
pub fn build_evaluation_prompt(resume_text: &str, jd_text: &str, profile_link: &str) -> String {
    let resume = truncate_chars(resume_text, RESUME_CHAR_LIMIT);
    let jd = truncate_chars(jd_text, JD_CHAR_LIMIT);
    // Encoded as a JSON string so quotes in the link can't break the example object.
    let link_json = serde_json::Value::String(profile_link.to_string()).to_string();

    format!(
        r#"Act like a skilled Applicant Tracking System (ATS) with deep knowledge of hiring for technical roles.
Evaluate the resume against the job description. Score how well the resume matches, list the important
job description keywords missing from the resume, and summarise the candidate's profile.

Return a single JSON object with exactly these keys and nothing else:
{{"{KEY_JD_MATCH}":"%","{KEY_MISSING_KEYWORDS}":[],"{KEY_PROFILE_SUMMARY}":"","{KEY_CANDIDATE_NAME}":"","{KEY_ROLE}":"","{KEY_CURRENT_COMPANY}":"","{KEY_DURATION}":"","{KEY_OVERALL_EXPERIENCE}":"","{KEY_LINKEDIN}":{link_json}}}

Resume: {resume}
Job Description: {jd}
LinkedIn: {profile_link}
"#
    )
}
