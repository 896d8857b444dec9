//! Bracket-depth aware scanning of type and expression text.
//!
//! Type spellings nest arbitrarily (`Result<[String: (Int, Int)], Error>`), so
//! separators are only meaningful at depth zero. The scanner tracks `()`,
//! `[]`, `{}` and generic `<>` pairs, steps over `->` arrows, and skips the
//! contents of string literals so default values such as `"a, b"` stay whole.

/// Iterate over the characters of `text` that sit at nesting depth zero.
///
/// Bracket characters themselves are never yielded.
pub fn top_level_chars(text: &str) -> Vec<(usize, char)> {
    let mut out = Vec::new();
    let mut depth: usize = 0;
    let mut angle: usize = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            prev = Some(c);
            continue;
        }

        match c {
            '"' => in_string = true,
            '-' if matches!(chars.peek(), Some((_, '>'))) => {
                chars.next();
                prev = Some('>');
                continue;
            }
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            // `Array<Int>` opens a generic list, `a < b` does not
            '<' if prev.is_some_and(is_identifier_char) => angle += 1,
            '>' if angle > 0 => angle -= 1,
            _ => {
                if depth == 0 && angle == 0 {
                    out.push((idx, c));
                }
            }
        }
        prev = Some(c);
    }

    out
}

/// Split `text` on `separator` wherever it occurs at depth zero.
///
/// Pieces are trimmed; an all-whitespace input yields no pieces.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, c) in top_level_chars(text) {
        if c == separator {
            pieces.push(text[start..idx].trim());
            start = idx + c.len_utf8();
        }
    }
    pieces.push(text[start..].trim());
    pieces
}

/// Byte offset of the first depth-zero occurrence of `needle`.
pub fn find_top_level(text: &str, needle: char) -> Option<usize> {
    top_level_chars(text)
        .into_iter()
        .find(|(_, c)| *c == needle)
        .map(|(idx, _)| idx)
}

/// Byte offset of the bracket closing the one opened at `open_idx`.
///
/// `text[open_idx..]` must start with `(`, `[`, `{` or `<`.
pub fn matching_close(text: &str, open_idx: usize) -> Option<usize> {
    let open = text[open_idx..].chars().next()?;
    let close = match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        _ => return None,
    };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut prev: Option<char> = None;
    for (offset, c) in text[open_idx..].char_indices() {
        let idx = open_idx + offset;
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        } else if c == open {
            depth += 1;
        } else if c == close && !(close == '>' && prev == Some('-')) {
            depth -= 1;
            if depth == 0 {
                return Some(idx);
            }
        }
        prev = Some(c);
    }
    None
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '?' || c == '!' || c == '.'
}
