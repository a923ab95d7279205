//! Conservative syntax normalization: trailing commas and unquoted object keys.
//!
//! Both fixes only touch text outside string literals.

/// Removes commas directly followed (ignoring whitespace) by `}` or `]`,
/// and wraps bare identifier keys in double quotes.
pub fn normalize_syntax(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 16);
    let mut in_string = false;
    let mut escaped = false;
    // last non-whitespace character emitted outside a string
    let mut last_structural: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
                last_structural = Some('"');
            }
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' if next_significant(&chars, i + 1).is_some_and(|n| n == '}' || n == ']') => {
                // trailing comma: drop it
            }
            c if is_identifier_start(c) && matches!(last_structural, Some('{') | Some(',')) => {
                let end = identifier_end(&chars, i);
                if next_significant(&chars, end) == Some(':') {
                    out.push('"');
                    out.extend(&chars[i..end]);
                    out.push('"');
                } else {
                    out.extend(&chars[i..end]);
                }
                last_structural = chars.get(end - 1).copied();
                i = end;
                continue;
            }
            _ => {
                out.push(c);
                if !c.is_whitespace() {
                    last_structural = Some(c);
                }
            }
        }
        i += 1;
    }

    out
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn identifier_end(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '_') {
        end += 1;
    }
    end
}

fn next_significant(chars: &[char], from: usize) -> Option<char> {
    chars[from.min(chars.len())..]
        .iter()
        .copied()
        .find(|c| !c.is_whitespace())
}
