//! Recovery cascade: turns an untrusted completion into a JSON object.
//!
//! Stages run in order until one yields an object:
//! 1. `direct_parse`: first `{` to last `}`, parsed as-is
//! 2. `truncation_repair`: cut back to the last complete element, close open brackets
//! 3. `syntax_normalization`: drop trailing commas, quote bare keys, then parse / repair
//! 4. `manual_fields`: per-field regex extraction, gated on an anchor field
//!
//! Markdown fences are stripped once before the first stage. If every stage
//! fails the cascade returns `None` and the caller falls back to a default record.

use serde_json::{Map, Value};
use tracing::{debug, warn};

pub mod fences;
pub mod manual;
pub mod normalize;
pub mod repair;

use fences::{bracket_span, from_first_brace, strip_fences, BracketSpan};

// ────────────────────────────────────────────────────────────────────────────
// Schema description used by field-level recovery
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
        }
    }

    pub const fn number(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Number,
        }
    }

    pub const fn list(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::List,
        }
    }
}

/// The fields of a target record, plus the anchors of which at least one must be
/// found for a field-by-field recovery to count.
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    pub fields: &'static [FieldSpec],
    pub anchors: &'static [&'static str],
}

// ────────────────────────────────────────────────────────────────────────────
// Strategies
// ────────────────────────────────────────────────────────────────────────────

/// One stage of the cascade. Implementations are pure: same text, same answer.
pub trait RecoveryStrategy: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Attempts recovery on fence-stripped text. Only JSON objects count as success.
    fn recover(&self, text: &str) -> Option<Value>;
}

fn parse_object(text: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

fn parse_non_empty_object(text: &str) -> Option<Value> {
    parse_object(text).filter(|v| v.as_object().is_some_and(|m| !m.is_empty()))
}

#[derive(Debug, Default)]
pub struct DirectParse;

impl RecoveryStrategy for DirectParse {
    fn name(&self) -> &'static str {
        "direct_parse"
    }

    fn recover(&self, text: &str) -> Option<Value> {
        match bracket_span(text)? {
            BracketSpan::Closed(span) => parse_object(span),
            // no closing brace: go straight to repair
            BracketSpan::Truncated(_) => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct TruncationRepair;

impl RecoveryStrategy for TruncationRepair {
    fn name(&self) -> &'static str {
        "truncation_repair"
    }

    fn recover(&self, text: &str) -> Option<Value> {
        let repaired = repair::repair_truncated(from_first_brace(text)?)?;
        // `{}` after a cut means nothing survived; let later stages look at the raw text
        parse_non_empty_object(&repaired)
    }
}

#[derive(Debug, Default)]
pub struct SyntaxNormalization;

impl RecoveryStrategy for SyntaxNormalization {
    fn name(&self) -> &'static str {
        "syntax_normalization"
    }

    fn recover(&self, text: &str) -> Option<Value> {
        let normalized = normalize::normalize_syntax(from_first_brace(text)?);

        if let Some(BracketSpan::Closed(span)) = bracket_span(&normalized) {
            if let Some(value) = parse_object(span) {
                return Some(value);
            }
        }

        let repaired = repair::repair_truncated(&normalized)?;
        parse_non_empty_object(&repaired)
    }
}

#[derive(Debug)]
pub struct ManualFieldExtraction {
    schema: FieldSchema,
}

impl ManualFieldExtraction {
    pub fn new(schema: FieldSchema) -> Self {
        Self { schema }
    }
}

impl RecoveryStrategy for ManualFieldExtraction {
    fn name(&self) -> &'static str {
        "manual_fields"
    }

    fn recover(&self, text: &str) -> Option<Value> {
        manual::extract_fields(text, &self.schema)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cascade
// ────────────────────────────────────────────────────────────────────────────

/// An object recovered from a completion, and the stage that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub fields: Map<String, Value>,
    pub stage: &'static str,
}

#[derive(Debug)]
pub struct RecoveryCascade {
    stages: Vec<Box<dyn RecoveryStrategy>>,
}

impl RecoveryCascade {
    /// The standard four-stage cascade for a target schema.
    pub fn for_schema(schema: FieldSchema) -> Self {
        Self::with_stages(vec![
            Box::new(DirectParse),
            Box::new(TruncationRepair),
            Box::new(SyntaxNormalization),
            Box::new(ManualFieldExtraction::new(schema)),
        ])
    }

    pub fn with_stages(stages: Vec<Box<dyn RecoveryStrategy>>) -> Self {
        Self { stages }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Runs every stage in order. `None` means recovery was exhausted.
    pub fn recover(&self, completion: &str) -> Option<Recovered> {
        let text = strip_fences(completion);

        for stage in &self.stages {
            if let Some(Value::Object(fields)) = stage.recover(&text) {
                debug!(
                    "Recovered {} field(s) from completion via {}",
                    fields.len(),
                    stage.name()
                );
                return Some(Recovered {
                    fields,
                    stage: stage.name(),
                });
            }
        }

        warn!(
            "Could not recover structured data from completion ({} chars) after {}",
            completion.len(),
            self.stage_names().join(", ")
        );
        None
    }
}
