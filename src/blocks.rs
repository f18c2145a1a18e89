//! Brace-boundary scanning for HCL-shaped text.
//!
//! Not a parser: the scanner only tracks nesting, string literals (with
//! `${}` / `%{}` templates), heredocs and comments so a block body ends at its
//! own closing brace instead of at the first `}` in the file.

use regex::Regex;

use crate::error::{VerifyError, VerifyResult};

enum Frame {
    /// `{ ... }` in code, including template interpolations
    Code,
    /// `" ... "`
    Str,
}

/// Index of the `}` that closes the `{` at `open`.
///
/// Returns `None` when `open` is not a `{` or the block is unterminated.
pub fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut stack = vec![Frame::Code];
    let mut i = open + 1;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();

        match stack.last() {
            Some(Frame::Str) => match (b, next) {
                (b'\\', _) => i += 1,
                (b'$', Some(b'$')) | (b'%', Some(b'%')) => i += 1,
                (b'$', Some(b'{')) | (b'%', Some(b'{')) => {
                    stack.push(Frame::Code);
                    i += 1;
                }
                (b'"', _) => {
                    stack.pop();
                }
                (b'\n', _) => {
                    // HCL strings are single-line; recover at the newline.
                    stack.pop();
                }
                _ => {}
            },
            Some(Frame::Code) => match (b, next) {
                (b'"', _) => stack.push(Frame::Str),
                (b'{', _) => stack.push(Frame::Code),
                (b'}', _) => {
                    stack.pop();
                    if stack.is_empty() {
                        return Some(i);
                    }
                }
                (b'#', _) | (b'/', Some(b'/')) => {
                    i = line_end(bytes, i);
                    continue;
                }
                (b'/', Some(b'*')) => {
                    i = comment_end(bytes, i + 2);
                    continue;
                }
                (b'<', Some(b'<')) => {
                    if let Some(end) = heredoc_end(bytes, i) {
                        i = end;
                        continue;
                    }
                }
                _ => {}
            },
            None => return None,
        }

        i += 1;
    }

    None
}

fn line_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| from + p)
}

/// Index just past the closing marker of a `<<TAG` / `<<-TAG` heredoc that
/// opens at `start`, or the end of input when it never closes.
///
/// `None` when `start` does not open a heredoc.
fn heredoc_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start + 2;
    if bytes.get(pos) == Some(&b'-') {
        pos += 1;
    }

    let tag_start = pos;
    while bytes
        .get(pos)
        .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'-')
    {
        pos += 1;
    }
    let tag = &bytes[tag_start..pos];
    match tag.first() {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {}
        _ => return None,
    }

    let mut line = match (bytes.get(pos), bytes.get(pos + 1)) {
        (Some(b'\n'), _) => pos + 1,
        (Some(b'\r'), Some(b'\n')) => pos + 2,
        _ => return None,
    };
    while line < bytes.len() {
        let end = line_end(bytes, line);
        if trim_ascii_whitespace(&bytes[line..end]) == tag {
            return Some(end);
        }
        line = end + 1;
    }
    Some(bytes.len())
}

fn trim_ascii_whitespace(mut s: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = s {
        if !first.is_ascii_whitespace() {
            break;
        }
        s = rest;
    }
    while let [rest @ .., last] = s {
        if !last.is_ascii_whitespace() {
            break;
        }
        s = rest;
    }
    s
}

fn comment_end(bytes: &[u8], from: usize) -> usize {
    bytes
        .get(from..)
        .and_then(|rest| rest.windows(2).position(|w| w == b"*/"))
        .map_or(bytes.len(), |p| from + p + 2)
}

/// Header regex for `<block_type> "<name>" {`.
pub fn header_pattern(block_type: &str, name: &str) -> VerifyResult<Regex> {
    let pattern = format!(
        r#"\b{}\s+"{}"\s*\{{"#,
        regex::escape(block_type),
        regex::escape(name)
    );
    Regex::new(&pattern).map_err(|source| VerifyError::Pattern { pattern, source })
}

/// Body of the first `<block_type> "<name>" { ... }` in `text`, braces excluded.
///
/// An unterminated block runs to the end of the text.
pub fn find_block<'a>(text: &'a str, block_type: &str, name: &str) -> VerifyResult<Option<&'a str>> {
    let header = header_pattern(block_type, name)?;
    let Some(found) = header.find(text) else {
        return Ok(None);
    };

    Ok(Some(body_from(text, found.end() - 1)))
}

/// Body of the first `<key> = { ... }` object value in `text`.
pub fn find_object<'a>(text: &'a str, key: &str) -> VerifyResult<Option<&'a str>> {
    let pattern = format!(r"\b{}\s*=\s*\{{", regex::escape(key));
    let header = Regex::new(&pattern).map_err(|source| VerifyError::Pattern { pattern, source })?;
    Ok(header
        .find(text)
        .map(|found| body_from(text, found.end() - 1)))
}

fn body_from(text: &str, open: usize) -> &str {
    match matching_brace(text, open) {
        Some(close) => &text[open + 1..close],
        None => &text[open + 1..],
    }
}
