//! Truncation repair for completions cut off mid-object.
//!
//! The text is scanned once, string-aware, recording the last position where the
//! document was syntactically complete up to that point (after a value string,
//! after a closed `]`/`}`, right after an opening bracket, or just before a
//! separating comma) together with the brackets still open there. Everything
//! after that point is dropped and the open brackets are closed in reverse order.
//! A dangling key, a half-written string or number, and a trailing comma all fall
//! after the last complete point, so they disappear with the cut.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object { expect_key: bool },
    Array,
}

impl Frame {
    fn closer(self) -> char {
        match self {
            Frame::Object { .. } => '}',
            Frame::Array => ']',
        }
    }
}

#[derive(Debug, Clone)]
struct CutPoint {
    end: usize,
    open: Vec<Frame>,
}

/// Cuts `text` back to its last complete element and appends the missing closers.
///
/// `text` must start at the opening `{`. Returns `None` when nothing complete was found.
pub fn repair_truncated(text: &str) -> Option<String> {
    let text = text.trim();
    if !text.starts_with('{') {
        return None;
    }

    let mut stack: Vec<Frame> = Vec::new();
    let mut last_cut: Option<CutPoint> = None;
    let mut in_string = false;
    let mut escaped = false;
    let mut string_is_key = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '"' => {
                    in_string = false;
                    if !string_is_key {
                        last_cut = Some(CutPoint {
                            end: i + 1,
                            open: stack.clone(),
                        });
                    }
                }
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                string_is_key = matches!(stack.last(), Some(Frame::Object { expect_key: true }));
            }
            '{' | '[' => {
                stack.push(if c == '{' {
                    Frame::Object { expect_key: true }
                } else {
                    Frame::Array
                });
                last_cut = Some(CutPoint {
                    end: i + 1,
                    open: stack.clone(),
                });
            }
            '}' | ']' => {
                stack.pop();
                last_cut = Some(CutPoint {
                    end: i + 1,
                    open: stack.clone(),
                });
                if stack.is_empty() {
                    break;
                }
            }
            ':' => {
                if let Some(Frame::Object { expect_key }) = stack.last_mut() {
                    *expect_key = false;
                }
            }
            ',' => {
                last_cut = Some(CutPoint {
                    end: i,
                    open: stack.clone(),
                });
                if let Some(Frame::Object { expect_key }) = stack.last_mut() {
                    *expect_key = true;
                }
            }
            _ => {}
        }
    }

    let cut = last_cut?;
    let mut repaired = text[..cut.end].trim_end().to_string();
    repaired.extend(cut.open.iter().rev().map(|frame| frame.closer()));
    Some(repaired)
}
