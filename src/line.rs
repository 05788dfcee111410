//! Line classification.
//!
//! Each physical line is either skipped (blank or comment) or turned into a
//! [`Line`]: its nesting depth plus one of three [`LineKind`]s. Depth is the
//! number of leading whitespace characters plus one; a tab and a space each
//! count as one unit.

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// `[[key]]`
    ArrayHeader(&'a str),
    /// `[key]`
    SectionHeader(&'a str),
    /// `key = value`
    Assignment(&'a str, &'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    pub depth: usize,
    pub kind: LineKind<'a>,
}

/// Classifies `raw` (which may still carry its line terminator).
///
/// Returns `Ok(None)` for lines that carry nothing.
pub(crate) fn classify(raw: &str, line: usize, comment_prefix: char) -> Result<Option<Line<'_>>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with(comment_prefix) {
        return Ok(None);
    }

    let depth = indentation(raw) + 1;

    let kind = if let Some(key) = strip_brackets(trimmed, "[[", "]]") {
        LineKind::ArrayHeader(key)
    } else if let Some(key) = strip_brackets(trimmed, "[", "]") {
        LineKind::SectionHeader(key)
    } else if let Some((key, value)) = trimmed.split_once('=') {
        LineKind::Assignment(key.trim(), value.trim())
    } else {
        return Err(Error::missing_separator(line, trimmed));
    };

    Ok(Some(Line { depth, kind }))
}

/// Counts whitespace characters before the first non-whitespace character.
fn indentation(raw: &str) -> usize {
    raw.chars().take_while(|c| c.is_whitespace()).count()
}

fn strip_brackets<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    if text.len() < open.len() + close.len() {
        return None;
    }
    text.strip_prefix(open)?.strip_suffix(close).map(str::trim)
}
