//! Prompt builder for the two extraction call sites.
//!
//! Pure functions: the same input always yields the same `ExtractionRequest`.
//! Oversized inputs are cut to a fixed character budget to bound token cost.

use crate::extraction::models::{
    ExtractionRequest, SchemaTag, MAX_GAPS, MAX_KEYWORDS, MAX_STRENGTHS, MAX_SUGGESTIONS,
};
use crate::llm_client::prompts::{BREVITY_INSTRUCTION, JSON_ONLY_INSTRUCTION};

pub const EMAIL_CHAR_BUDGET: usize = 4000;
pub const RESUME_CHAR_BUDGET: usize = 3000;
pub const JOB_DESCRIPTION_CHAR_BUDGET: usize = 2000;

pub const JOB_POSTING_MAX_TOKENS: u32 = 1024;
pub const RESUME_MATCH_MAX_TOKENS: u32 = 2048;

/// Per-item character budget the model is asked to respect for tailoring lists.
pub const PROMPT_ITEM_CHARS: usize = 100;

const JOB_POSTING_SCHEMA: &str = r#"{
  "company": "company name",
  "role": "job title / role",
  "package": "salary or stipend if mentioned, otherwise null",
  "deadline": "application deadline as YYYY-MM-DD, otherwise null",
  "assessmentDate": "online assessment / test date as YYYY-MM-DD, otherwise null",
  "interviewDate": "interview date as YYYY-MM-DD, otherwise null",
  "description": "brief job description",
  "requirements": "job requirements and eligibility",
  "location": "job location if mentioned, otherwise null"
}"#;

const RESUME_MATCH_SCHEMA: &str = r#"{
  "score": <integer 0-100>,
  "keywords": ["keyword1", "keyword2"],
  "suggestions": ["suggestion1", "suggestion2"],
  "strengths": ["strength1", "strength2"],
  "gaps": ["gap1", "gap2"]
}"#;

/// Cuts `text` to at most `max_chars` characters, never splitting a character.
pub fn truncate_input(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Prompt asking for the job details in a recruiting email.
pub fn job_posting_request(email_text: &str) -> ExtractionRequest {
    let email = truncate_input(email_text.trim(), EMAIL_CHAR_BUDGET);

    let prompt = format!(
        "Extract job information from this email. Return a JSON object with exactly this shape:\n\
         {JOB_POSTING_SCHEMA}\n\n\
         Use null for any date, package or location the email does not mention. \
         Dates MUST be formatted YYYY-MM-DD.\n\n\
         EMAIL CONTENT:\n{email}\n\n\
         {JSON_ONLY_INSTRUCTION}"
    );

    ExtractionRequest {
        prompt,
        schema: SchemaTag::JobPosting,
        max_tokens: JOB_POSTING_MAX_TOKENS,
    }
}

/// Prompt asking for a resume-vs-job match analysis.
pub fn resume_match_request(resume_text: &str, job_description: &str) -> ExtractionRequest {
    let resume = truncate_input(resume_text.trim(), RESUME_CHAR_BUDGET);
    let job = truncate_input(job_description.trim(), JOB_DESCRIPTION_CHAR_BUDGET);

    let prompt = format!(
        "Analyze this resume against the job description and provide:\n\
         1. A match score from 0-100\n\
         2. Relevant keywords found (at most {MAX_KEYWORDS})\n\
         3. Suggestions for improvement (at most {MAX_SUGGESTIONS})\n\
         4. Strengths that match the job (at most {MAX_STRENGTHS})\n\
         5. Gaps or missing qualifications (at most {MAX_GAPS})\n\n\
         RESUME:\n{resume}\n\n\
         JOB DESCRIPTION:\n{job}\n\n\
         Return a JSON object with this exact structure:\n\
         {RESUME_MATCH_SCHEMA}\n\n\
         Each list item MUST be under {PROMPT_ITEM_CHARS} characters. {BREVITY_INSTRUCTION}\n\
         {JSON_ONLY_INSTRUCTION}"
    );

    ExtractionRequest {
        prompt,
        schema: SchemaTag::ResumeMatch,
        max_tokens: RESUME_MATCH_MAX_TOKENS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_input_respects_char_boundaries() {
        assert_eq!(truncate_input("héllo", 2), "hé");
        assert_eq!(truncate_input("short", 100), "short");
        assert_eq!(truncate_input("", 10), "");
    }

    #[test]
    fn test_job_posting_request_shape() {
        let request = job_posting_request("Acme is hiring a Rust intern. Apply by 2025-01-10.");
        assert_eq!(request.schema, SchemaTag::JobPosting);
        assert_eq!(request.max_tokens, JOB_POSTING_MAX_TOKENS);
        assert!(request.prompt.contains("Acme is hiring a Rust intern"));
        assert!(request.prompt.contains("\"assessmentDate\""));
        assert!(request.prompt.contains("Return ONLY the JSON object"));
    }

    #[test]
    fn test_job_posting_request_truncates_email() {
        let email = format!("{}TAIL_MARKER", "x".repeat(EMAIL_CHAR_BUDGET));
        let request = job_posting_request(&email);
        assert!(!request.prompt.contains("TAIL_MARKER"));
        assert!(request.prompt.contains(&"x".repeat(EMAIL_CHAR_BUDGET)));
    }

    #[test]
    fn test_resume_match_request_truncates_each_input_independently() {
        let resume = format!("{}RESUME_TAIL", "r".repeat(RESUME_CHAR_BUDGET));
        let job = format!("{}JOB_TAIL", "j".repeat(JOB_DESCRIPTION_CHAR_BUDGET));
        let request = resume_match_request(&resume, &job);

        assert_eq!(request.schema, SchemaTag::ResumeMatch);
        assert_eq!(request.max_tokens, RESUME_MATCH_MAX_TOKENS);
        assert!(!request.prompt.contains("RESUME_TAIL"));
        assert!(!request.prompt.contains("JOB_TAIL"));
        assert!(request.prompt.contains(&"j".repeat(JOB_DESCRIPTION_CHAR_BUDGET)));
    }

    #[test]
    fn test_resume_match_request_states_limits() {
        let request = resume_match_request("Rust developer", "Backend engineer");
        assert!(request.prompt.contains("at most 10"));
        assert!(request.prompt.contains("at most 5"));
        assert!(request.prompt.contains("under 100 characters"));
        assert!(request.prompt.contains("\"score\": <integer 0-100>"));
    }

    #[test]
    fn test_prompts_are_deterministic() {
        assert_eq!(job_posting_request("same"), job_posting_request("same"));
        assert_eq!(
            resume_match_request("resume", "job"),
            resume_match_request("resume", "job")
        );
    }

    #[test]
    fn test_placeholder_text_in_input_is_not_substituted() {
        let request = resume_match_request("{job}", "{resume}");
        assert!(request.prompt.contains("RESUME:\n{job}"));
        assert!(request.prompt.contains("JOB DESCRIPTION:\n{resume}"));
    }
}
