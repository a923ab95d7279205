//! Axum route handlers for the extraction API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extraction::models::{JobDescriptionInput, JobPosting, MatchAnalysis};
use crate::extraction::{analyze_resume_match, extract_job_posting};
use crate::state::AppState;

const MIN_RESUME_CHARS: usize = 50;
const LEGACY_PDF_PLACEHOLDER: &str = "PDF content extraction requires additional setup";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractJobRequest {
    #[serde(default)]
    pub email_content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorResumeRequest {
    #[serde(default)]
    pub resume_content: String,
    #[serde(default)]
    pub job: JobDescriptionInput,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/extract-job
///
/// Extracts structured job details from pasted email text.
pub async fn handle_extract_job(
    State(state): State<AppState>,
    payload: Result<Json<ExtractJobRequest>, JsonRejection>,
) -> Result<Json<JobPosting>, AppError> {
    let Json(request) = payload?;
    if request.email_content.trim().is_empty() {
        return Err(AppError::Validation("Email content is required".to_string()));
    }

    tracing::info!(
        "Extracting job from email, content length: {}",
        request.email_content.len()
    );

    let posting = extract_job_posting(&request.email_content, state.llm.as_ref()).await?;

    Ok(Json(posting))
}

/// POST /api/tailor-resume
///
/// Scores the resume against the application's job description.
pub async fn handle_tailor_resume(
    State(state): State<AppState>,
    payload: Result<Json<TailorResumeRequest>, JsonRejection>,
) -> Result<Json<MatchAnalysis>, AppError> {
    let Json(request) = payload?;
    let resume = request.resume_content.trim();

    if resume.chars().count() < MIN_RESUME_CHARS {
        return Err(AppError::Validation(
            "Resume content is empty or too short. Please upload a resume with actual content."
                .to_string(),
        ));
    }
    if resume.contains(LEGACY_PDF_PLACEHOLDER) {
        return Err(AppError::Validation(
            "This resume was uploaded before PDF parsing was enabled. Please delete it and upload again."
                .to_string(),
        ));
    }

    let job_description = request.job.render();
    tracing::info!(
        "Tailor request: resume {} chars, job description {} chars",
        resume.len(),
        job_description.len()
    );

    let analysis = analyze_resume_match(resume, &job_description, state.llm.as_ref()).await?;

    Ok(Json(analysis))
}
