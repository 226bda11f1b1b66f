// src/core/sanitize.rs
use crate::error::FormatError;

/// Collapse every whitespace run (spaces, tabs, newlines) into one `sep` and trim.
pub fn collapse_ws(s: &str, sep: char) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.trim().chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(sep); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out
}

/// Collapse whitespace runs into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    collapse_ws(s, ' ')
}

/// Split `"A<delim>B"` on the first delimiter and parse both sides.
pub fn split_pair(s: &str, delim: char) -> Result<(u32, u32), FormatError> {
    let (a, b) = s.split_once(delim).ok_or_else(|| FormatError::MissingDelimiter {
        input: s!(s),
        delim,
    })?;
    let parse = |part: &str| {
        part.trim().parse::<u32>().map_err(|_| FormatError::NotANumber {
            input: s!(s),
            part: s!(part),
        })
    };
    Ok((parse(a)?, parse(b)?))
}
