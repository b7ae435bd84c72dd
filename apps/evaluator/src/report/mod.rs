//! Report Aggregator — one row per successfully parsed resume, exported as CSV.

use crate::models::evaluation::EvaluationResult;

pub mod store;

/// File name offered to the browser for the CSV download.
pub const REPORT_FILE_NAME: &str = "ats_report.csv";

/// Column order of the exported CSV.
pub const CSV_HEADER: [&str; 10] = [
    "Resume File",
    "JD Match",
    "Candidate Name",
    "Role",
    "Current Company",
    "Duration",
    "Overall Experience",
    "LinkedIn",
    "Missing Keywords",
    "Profile Summary",
];

/// A flattened `EvaluationResult` plus the resume it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub resume_file: String,
    pub jd_match: String,
    pub candidate_name: String,
    pub role: String,
    pub current_company: String,
    pub duration: String,
    pub overall_experience: String,
    pub linkedin: String,
    /// Joined with ", ".
    pub missing_keywords: String,
    pub profile_summary: String,
}

impl ReportRow {
    pub fn new(resume_file: &str, result: &EvaluationResult) -> Self {
        Self {
            resume_file: resume_file.to_string(),
            jd_match: result.jd_match.clone(),
            candidate_name: result.candidate_name.clone(),
            role: result.role.clone(),
            current_company: result.current_company.clone(),
            duration: result.duration.clone(),
            overall_experience: result.overall_experience.clone(),
            linkedin: result.linkedin.clone(),
            missing_keywords: result.missing_keywords.join(", "),
            profile_summary: result.profile_summary.clone(),
        }
    }

    fn as_record(&self) -> [&str; 10] {
        [
            self.resume_file.as_str(),
            self.jd_match.as_str(),
            self.candidate_name.as_str(),
            self.role.as_str(),
            self.current_company.as_str(),
            self.duration.as_str(),
            self.overall_experience.as_str(),
            self.linkedin.as_str(),
            self.missing_keywords.as_str(),
            self.profile_summary.as_str(),
        ]
    }
}

/// Rows in the order the resumes were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    pub fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serializes the report as UTF-8 CSV with the fixed header row.
    pub fn to_csv(&self) -> Result<Vec<u8>, csv::Error> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(CSV_HEADER)?;
        for row in self.rows() {
            wtr.write_record(row.as_record())?;
        }
        wtr.flush()?;
        wtr.into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}
