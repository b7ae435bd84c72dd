use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Keys the model is asked to return. These are wire names and must match the
// prompt template exactly.
pub const KEY_JD_MATCH: &str = "JD Match";
pub const KEY_MISSING_KEYWORDS: &str = "MissingKeywords";
pub const KEY_PROFILE_SUMMARY: &str = "Profile Summary";
pub const KEY_CANDIDATE_NAME: &str = "Candidate Name";
pub const KEY_ROLE: &str = "Role";
pub const KEY_CURRENT_COMPANY: &str = "Current Company";
pub const KEY_DURATION: &str = "Duration";
pub const KEY_OVERALL_EXPERIENCE: &str = "Overall Experience";
pub const KEY_LINKEDIN: &str = "LinkedIn";

/// Shown when the model omits the match score.
pub const NO_MATCH_SCORE: &str = "N/A";

/// Structured evaluation of one resume against one job description.
///
/// Every field is optional on the wire and falls back to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub jd_match: String,
    pub missing_keywords: Vec<String>,
    pub profile_summary: String,
    pub candidate_name: String,
    pub role: String,
    pub current_company: String,
    pub duration: String,
    pub overall_experience: String,
    pub linkedin: String,
}

impl Default for EvaluationResult {
    fn default() -> Self {
        Self {
            jd_match: NO_MATCH_SCORE.to_string(),
            missing_keywords: Vec::new(),
            profile_summary: String::new(),
            candidate_name: String::new(),
            role: String::new(),
            current_company: String::new(),
            duration: String::new(),
            overall_experience: String::new(),
            linkedin: String::new(),
        }
    }
}

impl EvaluationResult {
    /// Reads the fields out of a decoded response object.
    /// Missing keys and `null` values take the per-field default.
    pub fn from_json(obj: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            jd_match: field_text(obj, KEY_JD_MATCH).unwrap_or(defaults.jd_match),
            missing_keywords: keyword_list(obj.get(KEY_MISSING_KEYWORDS)),
            profile_summary: field_text(obj, KEY_PROFILE_SUMMARY).unwrap_or_default(),
            candidate_name: field_text(obj, KEY_CANDIDATE_NAME).unwrap_or_default(),
            role: field_text(obj, KEY_ROLE).unwrap_or_default(),
            current_company: field_text(obj, KEY_CURRENT_COMPANY).unwrap_or_default(),
            duration: field_text(obj, KEY_DURATION).unwrap_or_default(),
            overall_experience: field_text(obj, KEY_OVERALL_EXPERIENCE).unwrap_or_default(),
            linkedin: field_text(obj, KEY_LINKEDIN).unwrap_or_default(),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn field_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(scalar_text)
}

/// Models sometimes return the keyword list as one comma-separated string.
fn keyword_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_all_keys_are_read_verbatim() {
        let obj = object(json!({
            "JD Match": "85%",
            "MissingKeywords": ["Kubernetes", "gRPC"],
            "Profile Summary": "Backend engineer with 6 years in Rust.",
            "Candidate Name": "Jane Doe",
            "Role": "Senior Engineer",
            "Current Company": "Acme Corp",
            "Duration": "2019 - Present",
            "Overall Experience": "6 years",
            "LinkedIn": "https://linkedin.com/in/janedoe"
        }));

        let result = EvaluationResult::from_json(&obj);
        assert_eq!(result.jd_match, "85%");
        assert_eq!(result.missing_keywords, vec!["Kubernetes", "gRPC"]);
        assert_eq!(result.profile_summary, "Backend engineer with 6 years in Rust.");
        assert_eq!(result.candidate_name, "Jane Doe");
        assert_eq!(result.role, "Senior Engineer");
        assert_eq!(result.current_company, "Acme Corp");
        assert_eq!(result.duration, "2019 - Present");
        assert_eq!(result.overall_experience, "6 years");
        assert_eq!(result.linkedin, "https://linkedin.com/in/janedoe");
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let result = EvaluationResult::from_json(&Map::new());
        assert_eq!(result, EvaluationResult::default());
        assert_eq!(result.jd_match, "N/A");
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_null_values_take_defaults() {
        let obj = object(json!({"JD Match": null, "Role": null, "MissingKeywords": null}));
        let result = EvaluationResult::from_json(&obj);
        assert_eq!(result.jd_match, "N/A");
        assert_eq!(result.role, "");
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_numeric_match_score_is_rendered_as_text() {
        let obj = object(json!({"JD Match": 72, "Overall Experience": 4.5}));
        let result = EvaluationResult::from_json(&obj);
        assert_eq!(result.jd_match, "72");
        assert_eq!(result.overall_experience, "4.5");
    }

    #[test]
    fn test_keywords_as_single_string_are_split() {
        let obj = object(json!({"MissingKeywords": "Docker, AWS,  , Terraform"}));
        let result = EvaluationResult::from_json(&obj);
        assert_eq!(result.missing_keywords, vec!["Docker", "AWS", "Terraform"]);
    }

    #[test]
    fn test_duplicate_keywords_are_kept() {
        let obj = object(json!({"MissingKeywords": ["SQL", "SQL"]}));
        let result = EvaluationResult::from_json(&obj);
        assert_eq!(result.missing_keywords.len(), 2);
    }
}
