// AI extraction: job postings from recruiting emails, resume-vs-job match analysis.
// All LLM calls go through a CompletionProvider; malformed model output is recovered
// or replaced by a default record, never surfaced as an error.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod validation;

use tracing::{debug, info, warn};

use crate::extraction::models::{ExtractionRequest, JobPosting, MatchAnalysis};
use crate::extraction::validation::{job_posting_from_fields, match_analysis_from_fields};
use crate::llm_client::{CompletionProvider, LlmError};
use crate::recovery::{RecoveryCascade, Recovered};

/// Sends one request and runs the completion through the recovery cascade.
/// `Ok(None)` means the model answered but nothing structured could be recovered.
async fn complete_and_recover(
    llm: &dyn CompletionProvider,
    request: &ExtractionRequest,
) -> Result<Option<Recovered>, LlmError> {
    let completion = llm.complete(&request.prompt, request.max_tokens).await?;
    debug!(
        "Raw {} completion: {}",
        request.schema.as_str(),
        completion
    );

    let cascade = RecoveryCascade::for_schema(request.schema.field_schema());
    Ok(cascade.recover(&completion))
}

/// Extracts job details from a recruiting email.
///
/// Fails only on transport errors; unusable model output yields `JobPosting::default()`.
pub async fn extract_job_posting(
    email_text: &str,
    llm: &dyn CompletionProvider,
) -> Result<JobPosting, LlmError> {
    let request = prompts::job_posting_request(email_text);

    let posting = match complete_and_recover(llm, &request).await? {
        Some(recovered) => {
            info!(
                "Job posting extracted via {}: company={}",
                recovered.stage,
                recovered
                    .fields
                    .get("company")
                    .and_then(|v| v.as_str())
                    .unwrap_or("?")
            );
            job_posting_from_fields(&recovered.fields)
        }
        None => {
            warn!("Job posting extraction fell back to defaults");
            JobPosting::default()
        }
    };

    Ok(posting)
}

/// Scores a resume against a job description.
///
/// Fails only on transport errors; unusable model output yields `MatchAnalysis::default()`.
pub async fn analyze_resume_match(
    resume_text: &str,
    job_description: &str,
    llm: &dyn CompletionProvider,
) -> Result<MatchAnalysis, LlmError> {
    let request = prompts::resume_match_request(resume_text, job_description);

    let analysis = match complete_and_recover(llm, &request).await? {
        Some(recovered) => {
            let analysis = match_analysis_from_fields(&recovered.fields);
            info!(
                "Match analysis recovered via {}: score={}",
                recovered.stage, analysis.score
            );
            analysis
        }
        None => {
            warn!("Match analysis fell back to defaults");
            MatchAnalysis::default()
        }
    };

    Ok(analysis)
}
