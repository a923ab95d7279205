//! Markdown fence stripping and bracket-span extraction.

/// Removes every ```` ```json ```` / ```` ``` ```` delimiter and trims the result.
///
/// Fences can appear anywhere (a prose preamble, a missing closing fence on a
/// truncated completion), so delimiters are removed wherever they occur rather
/// than only at the ends.
pub fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find("```") {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + 3..];
        // language tag directly after an opening fence
        let tag_len = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_alphanumeric())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        if rest[..tag_len].eq_ignore_ascii_case("json") {
            rest = &rest[tag_len..];
        }
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// Result of locating the JSON object inside a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketSpan<'a> {
    /// First `{` through last `}`.
    Closed(&'a str),
    /// An opening brace with no closing brace after it: the completion was cut off.
    Truncated(&'a str),
}

/// Locates the first `{` and the last `}`. Returns `None` when there is no `{` at all.
pub fn bracket_span(text: &str) -> Option<BracketSpan<'_>> {
    let start = text.find('{')?;
    match text.rfind('}') {
        Some(end) if end > start => Some(BracketSpan::Closed(&text[start..=end])),
        _ => Some(BracketSpan::Truncated(text[start..].trim_end())),
    }
}

/// Everything from the first `{` to the end of the text.
pub fn from_first_brace(text: &str) -> Option<&str> {
    text.find('{').map(|start| text[start..].trim_end())
}
