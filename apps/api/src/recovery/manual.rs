//! Last-resort recovery: pull individual fields out with regular expressions.
//!
//! Used when the completion never becomes valid JSON. Each field named in the
//! schema is searched for independently, so one mangled field does not cost the others.

use regex::Regex;
use serde_json::{Map, Value};

use super::{FieldKind, FieldSchema, FieldSpec};

/// Extracts every recoverable schema field. Returns `None` unless at least one anchor field was found.
pub fn extract_fields(text: &str, schema: &FieldSchema) -> Option<Value> {
    let mut map = Map::new();
    for field in schema.fields {
        if let Some(value) = extract_field(text, field) {
            map.insert(field.name.to_string(), value);
        }
    }

    if !schema.anchors.iter().any(|anchor| map.contains_key(*anchor)) {
        return None;
    }

    Some(Value::Object(map))
}

fn extract_field(text: &str, field: &FieldSpec) -> Option<Value> {
    let key = regex::escape(field.name);
    match field.kind {
        FieldKind::Number => {
            let re = Regex::new(&format!(r#""{key}"\s*:\s*"?(-?\d+(?:\.\d+)?)"#)).ok()?;
            number_value(re.captures(text)?.get(1)?.as_str())
        }
        FieldKind::Text => {
            // closed string | null | bare number | string running to the end of a truncated completion
            let re = Regex::new(&format!(
                r#""{key}"\s*:\s*(?:"((?:[^"\\]|\\.)*)"|(null)|(-?\d+(?:\.\d+)?)|"((?:[^"\\]|\\.)*)\z)"#
            ))
            .ok()?;
            let caps = re.captures(text)?;
            if caps.get(2).is_some() {
                return Some(Value::Null);
            }
            if let Some(number) = caps.get(3) {
                return number_value(number.as_str());
            }
            let raw = caps.get(1).or_else(|| caps.get(4))?.as_str();
            Some(Value::String(unescape(raw)))
        }
        FieldKind::List => {
            let re = Regex::new(&format!(r#""{key}"\s*:\s*\[([^\]]*)"#)).ok()?;
            let inner = re.captures(text)?.get(1)?.as_str();
            let item_re = Regex::new(r#""((?:[^"\\]|\\.)*)""#).ok()?;
            let items = item_re
                .captures_iter(inner)
                .filter_map(|c| c.get(1))
                .map(|m| Value::String(unescape(m.as_str())))
                .collect();
            Some(Value::Array(items))
        }
    }
}

fn number_value(raw: &str) -> Option<Value> {
    match raw.parse::<i64>() {
        Ok(n) => Some(Value::from(n)),
        Err(_) => raw.parse::<f64>().ok().map(Value::from),
    }
}

/// Decodes JSON escapes in a captured string body; falls back to the raw text.
fn unescape(raw: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.to_string())
}
