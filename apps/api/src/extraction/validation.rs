//! Field validator / defaulter.
//!
//! Turns a (possibly partial) recovered object into a complete record. A missing
//! field and a field of the wrong shape are treated the same way: the default wins.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

use crate::extraction::models::{
    JobPosting, MatchAnalysis, DEFAULT_SCORE, MAX_GAPS, MAX_ITEM_CHARS, MAX_KEYWORDS,
    MAX_KEYWORD_CHARS, MAX_STRENGTHS, MAX_SUGGESTIONS, UNKNOWN,
};

const LIST_BULLETS: &[char] = &['-', '*', '•', '·', '–'];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y"];

pub fn job_posting_from_fields(fields: &Map<String, Value>) -> JobPosting {
    JobPosting {
        company: text_or(fields, "company", UNKNOWN),
        role: text_or(fields, "role", UNKNOWN),
        compensation: optional_text(fields, "package"),
        application_deadline: optional_date(fields, "deadline"),
        assessment_date: optional_date(fields, "assessmentDate"),
        interview_date: optional_date(fields, "interviewDate"),
        description: text_or(fields, "description", ""),
        requirements: text_or(fields, "requirements", ""),
        location: optional_text(fields, "location"),
    }
}

pub fn match_analysis_from_fields(fields: &Map<String, Value>) -> MatchAnalysis {
    MatchAnalysis {
        score: clamp_score(fields.get("score")),
        keywords: clean_list(fields.get("keywords"), MAX_KEYWORDS, MAX_KEYWORD_CHARS),
        suggestions: clean_list(fields.get("suggestions"), MAX_SUGGESTIONS, MAX_ITEM_CHARS),
        strengths: clean_list(fields.get("strengths"), MAX_STRENGTHS, MAX_ITEM_CHARS),
        gaps: clean_list(fields.get("gaps"), MAX_GAPS, MAX_ITEM_CHARS),
    }
}

/// Clamps a model-supplied score into 0–100. Non-numeric values get the default.
pub fn clamp_score(value: Option<&Value>) -> u8 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => n.round().clamp(0.0, 100.0) as u8,
        _ => DEFAULT_SCORE,
    }
}

/// Keeps the first `max_items` usable string items, each normalized and cut to `max_chars`.
pub fn clean_list(value: Option<&Value>, max_items: usize, max_chars: usize) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return vec![];
    };

    items
        .iter()
        .filter_map(Value::as_str)
        .map(|item| truncate_chars(&normalize_item(item), max_chars))
        .filter(|item| !item.is_empty())
        .take(max_items)
        .collect()
}

/// Strips markdown emphasis, leading bullets and leading enumeration from a list item.
pub fn normalize_item(item: &str) -> String {
    let without_emphasis: String = item
        .replace("**", "")
        .chars()
        .filter(|c| *c != '`')
        .collect();

    let mut rest = without_emphasis.trim();
    loop {
        let before = rest;
        rest = rest
            .trim_start_matches(LIST_BULLETS)
            .trim_start();
        // `+` is a bullet only when followed by a space: "+5 years" keeps its sign
        if let Some(after) = rest.strip_prefix("+ ") {
            rest = after.trim_start();
        }
        rest = strip_enumeration(rest).trim_start();
        if rest == before {
            break;
        }
    }

    // underscore emphasis counts only when it wraps the whole item: __foo__ / _foo_
    let rest = rest.trim_end_matches('*');
    let rest = strip_wrapping(rest, "__");
    let rest = strip_wrapping(rest, "_");

    rest.trim().to_string()
}

fn strip_wrapping<'a>(text: &'a str, marker: &str) -> &'a str {
    if text.len() > 2 * marker.len() {
        if let Some(inner) = text
            .strip_prefix(marker)
            .and_then(|t| t.strip_suffix(marker))
        {
            return inner;
        }
    }
    text
}

/// Removes a leading `1.` / `2)` / `10:` marker.
fn strip_enumeration(text: &str) -> &str {
    let digits = text.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return text;
    }
    let after = &text[digits..];
    match after.chars().next() {
        Some('.') | Some(')') | Some(':') => {
            let remainder = &after[1..];
            // "3.5 years" is content, not an enumeration marker
            if remainder.starts_with(|c: char| c.is_ascii_digit()) {
                text
            } else {
                remainder
            }
        }
        _ => text,
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}

fn text_or(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    optional_text(fields, key).unwrap_or_else(|| default.to_string())
}

fn optional_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match fields.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() || text.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(text)
    }
}

fn optional_date(fields: &Map<String, Value>, key: &str) -> Option<NaiveDate> {
    parse_date(fields.get(key)?.as_str()?)
}

/// Parses the date formats models tend to produce. Anything else counts as absent.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn test_job_posting_partial_fields_get_defaults() {
        let posting = job_posting_from_fields(&fields(json!({
            "company": "Acme",
            "role": "SWE",
            "package": null,
            "deadline": "2025-01-01"
        })));
        assert_eq!(posting.company, "Acme");
        assert_eq!(posting.role, "SWE");
        assert_eq!(posting.compensation, None);
        assert_eq!(posting.application_deadline, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(posting.location, None);
        assert_eq!(posting.description, "");
        assert_eq!(posting.requirements, "");
    }

    #[test]
    fn test_job_posting_wrong_shapes_treated_as_absent() {
        let posting = job_posting_from_fields(&fields(json!({
            "company": ["Acme"],
            "role": {"title": "SWE"},
            "deadline": 20250101,
            "location": "  ",
            "description": true
        })));
        assert_eq!(posting, JobPosting::default());
    }

    #[test]
    fn test_job_posting_numeric_package_and_date_formats() {
        let posting = job_posting_from_fields(&fields(json!({
            "company": "  Initech ",
            "package": 1200000,
            "assessmentDate": "March 5, 2025",
            "interviewDate": "2025-03-12T10:00:00+05:30",
            "deadline": "next Friday"
        })));
        assert_eq!(posting.company, "Initech");
        assert_eq!(posting.role, "Unknown");
        assert_eq!(posting.compensation.as_deref(), Some("1200000"));
        assert_eq!(posting.assessment_date, NaiveDate::from_ymd_opt(2025, 3, 5));
        assert_eq!(posting.interview_date, NaiveDate::from_ymd_opt(2025, 3, 12));
        assert_eq!(posting.application_deadline, None);
    }

    #[test]
    fn test_score_clamped() {
        assert_eq!(clamp_score(Some(&json!(120))), 100);
        assert_eq!(clamp_score(Some(&json!(-7))), 0);
        assert_eq!(clamp_score(Some(&json!(72.6))), 73);
        assert_eq!(clamp_score(Some(&json!("85%"))), 85);
        assert_eq!(clamp_score(Some(&json!("high"))), 50);
        assert_eq!(clamp_score(Some(&json!(null))), 50);
        assert_eq!(clamp_score(None), 50);
    }

    #[test]
    fn test_lists_capped() {
        let analysis = match_analysis_from_fields(&fields(json!({
            "score": 120,
            "keywords": ["Python","Go","Rust","SQL","Git","Docker","K8s","AWS","GCP","Java","Ruby"],
            "suggestions": ["a", "b", "c", "d", "e", "f", "g"]
        })));
        assert_eq!(analysis.score, 100);
        assert_eq!(analysis.keywords.len(), MAX_KEYWORDS);
        assert_eq!(analysis.keywords[0], "Python");
        assert_eq!(analysis.keywords[9], "Java");
        assert_eq!(analysis.suggestions.len(), MAX_SUGGESTIONS);
        assert!(analysis.strengths.is_empty());
        assert!(analysis.gaps.is_empty());
    }

    #[test]
    fn test_list_non_array_and_non_string_items() {
        let analysis = match_analysis_from_fields(&fields(json!({
            "keywords": "Rust, Go",
            "gaps": [1, null, "  ", "Kubernetes"]
        })));
        assert_eq!(analysis.score, 50);
        assert!(analysis.keywords.is_empty());
        assert_eq!(analysis.gaps, vec!["Kubernetes"]);
    }

    #[test]
    fn test_item_normalization() {
        assert_eq!(normalize_item("**Quantify impact**"), "Quantify impact");
        assert_eq!(normalize_item("- Add a projects section"), "Add a projects section");
        assert_eq!(normalize_item("1. Mention Docker"), "Mention Docker");
        assert_eq!(normalize_item("2) **Lead** with `Rust`"), "Lead with Rust");
        assert_eq!(normalize_item("• * 3. nested markers"), "nested markers");
        assert_eq!(normalize_item("*Strong SQL*"), "Strong SQL");
        assert_eq!(normalize_item("_Team player_"), "Team player");
        assert_eq!(normalize_item("3.5 years of Java"), "3.5 years of Java");
        assert_eq!(normalize_item("snake_case naming"), "snake_case naming");
        assert_eq!(normalize_item("__Ownership__"), "Ownership");
        assert_eq!(normalize_item("+ Led a team of 4"), "Led a team of 4");
    }

    #[test]
    fn test_item_content_underscores_and_signs_survive() {
        assert_eq!(normalize_item("__init__ methods"), "__init__ methods");
        assert_eq!(normalize_item("Python __slots__ usage"), "Python __slots__ usage");
        assert_eq!(normalize_item("+5 years Rust"), "+5 years Rust");
        assert_eq!(normalize_item("- +5 years Rust"), "+5 years Rust");
    }

    #[test]
    fn test_item_length_capped_on_char_boundary() {
        let long = "é".repeat(MAX_ITEM_CHARS + 20);
        let analysis = match_analysis_from_fields(&fields(json!({"strengths": [long]})));
        assert_eq!(analysis.strengths[0].chars().count(), MAX_ITEM_CHARS);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date("TBD"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2025-02-30"), None);
        assert_eq!(parse_date("Jan 9, 2026"), NaiveDate::from_ymd_opt(2026, 1, 9));
    }
}
