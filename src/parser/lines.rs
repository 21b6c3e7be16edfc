//! Comment decoration stripping
//!
//! Takes the raw comment span including its delimiters (`/**`, per-line
//! leading `*`, `*/`) and produces ordered line ranges containing only the
//! semantic content. Every line range still indexes into the original
//! buffer, so error locations and excerpts stay addressable against the
//! source the caller supplied.

use std::sync::Arc;

use tracing::trace;

use crate::base::{TextRange, TextSize};
use crate::parser::errors::{Diagnostic, ErrorCode};

/// Extract de-commented content lines from a raw comment block
///
/// Missing delimiters are recorded as diagnostics and extraction proceeds
/// best-effort; this never fails. Leading and trailing all-blank lines are
/// dropped (they are decoration, not content); interior blank lines are
/// preserved as empty ranges.
pub fn extract_lines(buffer: &Arc<str>, diagnostics: &mut Vec<Diagnostic>) -> Vec<TextRange> {
    let text: &str = buffer;

    // Locate the opening delimiter, allowing leading whitespace
    let trimmed_start = text.len() - text.trim_start().len();
    let mut content_start = if text[trimmed_start..].starts_with("/**") {
        trimmed_start + 3
    } else {
        diagnostics.push(Diagnostic::error(
            ErrorCode::E0201,
            TextRange::from_str_range(buffer.clone(), TextSize::new(0), TextSize::new(0)),
        ));
        trimmed_start
    };

    // Locate the closing delimiter, allowing trailing whitespace
    let trimmed_end = text.trim_end().len();
    let content_end = if text[..trimmed_end].ends_with("*/") && trimmed_end - 2 >= content_start {
        trimmed_end - 2
    } else {
        let at = TextSize::new(trimmed_end as u32);
        diagnostics.push(Diagnostic::error(
            ErrorCode::E0202,
            TextRange::from_str_range(buffer.clone(), at, at),
        ));
        text.len()
    };

    // `/***/` and similar degenerate comments have no content region
    if content_start > content_end {
        content_start = content_end;
    }

    let mut lines: Vec<TextRange> = Vec::new();
    let mut row_start = content_start;
    let mut first_row = true;
    while row_start <= content_end {
        let row_end = text[row_start..content_end]
            .find('\n')
            .map(|i| {
                // exclude a \r that precedes the \n
                let end = row_start + i;
                if end > row_start && text.as_bytes()[end - 1] == b'\r' {
                    end - 1
                } else {
                    end
                }
            })
            .unwrap_or(content_end);
        let next_row = text[row_start..content_end]
            .find('\n')
            .map(|i| row_start + i + 1);

        let content = strip_decoration(text, row_start, row_end, first_row);
        lines.push(TextRange::from_str_range(
            buffer.clone(),
            TextSize::new(content.0 as u32),
            TextSize::new(content.1 as u32),
        ));
        first_row = false;

        match next_row {
            Some(next) => row_start = next,
            None => break,
        }
    }

    // Trim blank lines at both ends - they belong to the comment frame
    while lines.first().is_some_and(|l| l.as_str().trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.as_str().trim().is_empty()) {
        lines.pop();
    }

    trace!(count = lines.len(), "extracted comment lines");
    lines
}

/// Strip leading decoration from one raw row: spacing, then `*`, then at
/// most one space. The opening row (the one carrying `/**`) only strips a
/// single leading space, since `/**` itself was already consumed.
fn strip_decoration(text: &str, row_start: usize, row_end: usize, first_row: bool) -> (usize, usize) {
    let bytes = text.as_bytes();
    let mut pos = row_start;

    if first_row {
        if pos < row_end && bytes[pos] == b' ' {
            pos += 1;
        }
        return (pos, row_end);
    }

    while pos < row_end && (bytes[pos] == b' ' || bytes[pos] == b'\t') {
        pos += 1;
    }
    if pos < row_end && bytes[pos] == b'*' {
        pos += 1;
        if pos < row_end && bytes[pos] == b' ' {
            pos += 1;
        }
    } else {
        // no star decoration: the raw row is content as-is
        pos = row_start;
    }
    (pos, row_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> (Vec<String>, Vec<Diagnostic>) {
        let buffer: Arc<str> = Arc::from(text);
        let mut diagnostics = Vec::new();
        let lines = extract_lines(&buffer, &mut diagnostics);
        (
            lines.iter().map(|l| l.as_str().to_string()).collect(),
            diagnostics,
        )
    }

    #[test]
    fn test_single_line_comment() {
        let (lines, diags) = extract("/** Summary. */");
        assert_eq!(lines, vec!["Summary. "]);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_multi_line_comment() {
        let (lines, diags) = extract("/**\n * First\n * Second\n */");
        assert_eq!(lines, vec!["First", "Second"]);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_offsets_point_into_original_buffer() {
        let text = "/**\n * Hello\n */";
        let buffer: Arc<str> = Arc::from(text);
        let mut diagnostics = Vec::new();
        let lines = extract_lines(&buffer, &mut diagnostics);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_str(), "Hello");
        assert_eq!(&text[usize::from(lines[0].pos())..usize::from(lines[0].end())], "Hello");
    }

    #[test]
    fn test_at_most_one_space_stripped() {
        let (lines, _) = extract("/**\n *   indented\n */");
        // one space after '*' is decoration, the rest is content
        assert_eq!(lines, vec!["  indented"]);
    }

    #[test]
    fn test_interior_blank_lines_preserved() {
        let (lines, _) = extract("/**\n * a\n *\n * b\n */");
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_missing_open_delimiter() {
        let (lines, diags) = extract("* Hello */");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code(), ErrorCode::E0201);
        assert!(!lines.is_empty());
    }

    #[test]
    fn test_missing_close_delimiter() {
        let (lines, diags) = extract("/** Hello");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code(), ErrorCode::E0202);
        assert_eq!(lines, vec!["Hello"]);
    }

    #[test]
    fn test_empty_comment() {
        let (lines, diags) = extract("/***/");
        assert!(lines.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_line_without_star_kept_verbatim() {
        let (lines, _) = extract("/**\n * a\nraw line\n */");
        assert_eq!(lines, vec!["a", "raw line"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let (lines, diags) = extract("/**\r\n * a\r\n * b\r\n */");
        assert_eq!(lines, vec!["a", "b"]);
        assert!(diags.is_empty());
    }
}
