use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::recovery::{FieldSchema, FieldSpec};

pub const UNKNOWN: &str = "Unknown";

pub const MAX_KEYWORDS: usize = 10;
pub const MAX_SUGGESTIONS: usize = 5;
pub const MAX_STRENGTHS: usize = 5;
pub const MAX_GAPS: usize = 5;
pub const MAX_KEYWORD_CHARS: usize = 60;
pub const MAX_ITEM_CHARS: usize = 200;
pub const DEFAULT_SCORE: u8 = 50;

/// Which target record a prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaTag {
    JobPosting,
    ResumeMatch,
}

const JOB_POSTING_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("company"),
    FieldSpec::text("role"),
    FieldSpec::text("package"),
    FieldSpec::text("deadline"),
    FieldSpec::text("assessmentDate"),
    FieldSpec::text("interviewDate"),
    FieldSpec::text("description"),
    FieldSpec::text("requirements"),
    FieldSpec::text("location"),
];

const RESUME_MATCH_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("score"),
    FieldSpec::list("keywords"),
    FieldSpec::list("suggestions"),
    FieldSpec::list("strengths"),
    FieldSpec::list("gaps"),
];

impl SchemaTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaTag::JobPosting => "job-posting",
            SchemaTag::ResumeMatch => "resume-match",
        }
    }

    /// Field layout used when the completion has to be recovered field by field.
    pub fn field_schema(&self) -> FieldSchema {
        match self {
            SchemaTag::JobPosting => FieldSchema {
                fields: JOB_POSTING_FIELDS,
                anchors: &["company", "role"],
            },
            SchemaTag::ResumeMatch => FieldSchema {
                fields: RESUME_MATCH_FIELDS,
                anchors: &["score"],
            },
        }
    }
}

/// One prompt, ready to send. Lives for a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub prompt: String,
    pub schema: SchemaTag,
    pub max_tokens: u32,
}

/// Job details pulled out of a recruiting email.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub company: String,
    pub role: String,
    #[serde(rename = "package")]
    pub compensation: Option<String>,
    #[serde(rename = "deadline")]
    pub application_deadline: Option<NaiveDate>,
    pub assessment_date: Option<NaiveDate>,
    pub interview_date: Option<NaiveDate>,
    pub description: String,
    pub requirements: String,
    pub location: Option<String>,
}

impl Default for JobPosting {
    fn default() -> Self {
        Self {
            company: UNKNOWN.to_string(),
            role: UNKNOWN.to_string(),
            compensation: None,
            application_deadline: None,
            assessment_date: None,
            interview_date: None,
            description: String::new(),
            requirements: String::new(),
            location: None,
        }
    }
}

/// Resume-vs-job analysis. `score` is always within 0–100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchAnalysis {
    pub score: u8,
    pub keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
}

impl Default for MatchAnalysis {
    fn default() -> Self {
        Self {
            score: DEFAULT_SCORE,
            keywords: vec![],
            suggestions: vec![],
            strengths: vec![],
            gaps: vec![],
        }
    }
}

/// The application fields a match analysis is run against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobDescriptionInput {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
}

impl JobDescriptionInput {
    /// Renders the application into the plain-text job description sent to the model.
    pub fn render(&self) -> String {
        fn or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(fallback)
        }

        [
            format!("Company: {}", or(&self.company, UNKNOWN)),
            format!("Role: {}", or(&self.role, UNKNOWN)),
            String::new(),
            "Description:".to_string(),
            or(&self.description, "No description provided").to_string(),
            String::new(),
            "Requirements:".to_string(),
            or(&self.requirements, "No requirements provided").to_string(),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_schema_tag_names() {
        assert_eq!(SchemaTag::JobPosting.as_str(), "job-posting");
        assert_eq!(SchemaTag::ResumeMatch.as_str(), "resume-match");
    }

    #[test]
    fn test_field_schema_anchors() {
        assert_eq!(SchemaTag::ResumeMatch.field_schema().anchors, &["score"]);
        assert_eq!(SchemaTag::JobPosting.field_schema().fields.len(), 9);
    }

    #[test]
    fn test_job_posting_wire_names() {
        let posting = JobPosting {
            company: "Acme".to_string(),
            compensation: Some("12 LPA".to_string()),
            application_deadline: NaiveDate::from_ymd_opt(2025, 1, 1),
            ..JobPosting::default()
        };
        let value = serde_json::to_value(&posting).unwrap();
        assert_eq!(value["package"], json!("12 LPA"));
        assert_eq!(value["deadline"], json!("2025-01-01"));
        assert_eq!(value["assessmentDate"], Value::Null);
        assert_eq!(value["role"], json!("Unknown"));
        assert_eq!(value["description"], json!(""));
    }

    #[test]
    fn test_match_analysis_default() {
        let analysis = MatchAnalysis::default();
        assert_eq!(analysis.score, 50);
        assert!(analysis.keywords.is_empty());
    }

    #[test]
    fn test_job_description_render_with_placeholders() {
        let input = JobDescriptionInput {
            company: Some("Acme".to_string()),
            role: Some("  ".to_string()),
            description: None,
            requirements: Some("Rust".to_string()),
        };
        assert_eq!(
            input.render(),
            "Company: Acme\nRole: Unknown\n\nDescription:\nNo description provided\n\nRequirements:\nRust"
        );
    }
}
