//! Fenced code blocks and inline code spans

use super::NodeParser;
use crate::parser::errors::ErrorCode;
use crate::parser::lexer::TokenKind;
use crate::syntax::excerpt::ExcerptKind;
use crate::syntax::nodes::{DocCodeSpan, DocErrorText, DocFencedCode, DocNode};

/// Check whether the cursor sits at three-or-more consecutive backticks
///
/// The caller has already established line-start position.
pub(crate) fn at_fence_start(p: &NodeParser<'_>) -> bool {
    let mut count = 0;
    while p.reader.peek_kind(count) == TokenKind::Backtick {
        count += 1;
    }
    count >= 3
}

/// Parse a fenced code block
///
/// The opening fence line is `N >= 3` backticks plus an optional language
/// tag. Content is captured verbatim, line by line, until a line of at least
/// `N` backticks (and nothing else) closes the fence. A missing closing
/// fence consumes the rest of the input as content and logs a diagnostic.
pub(crate) fn parse_fenced_code(p: &mut NodeParser<'_>) -> DocNode {
    debug_assert_eq!(p.reader.kind(), TokenKind::Backtick);

    let mut open_count = 0usize;
    while p.reader.kind() == TokenKind::Backtick {
        p.reader.read();
        open_count += 1;
    }
    while p.reader.kind() == TokenKind::Spacing {
        p.reader.read();
    }
    let open_fence = p.reader.extract_accumulated(ExcerptKind::FenceDelimiter);
    let open_range = p.excerpt_range(Some(&open_fence));

    // language tag: everything up to spacing or the end of the fence line
    let mut language = None;
    if !matches!(
        p.reader.kind(),
        TokenKind::Spacing | TokenKind::Newline | TokenKind::EndOfInput | TokenKind::Backtick
    ) {
        while !matches!(
            p.reader.kind(),
            TokenKind::Spacing | TokenKind::Newline | TokenKind::EndOfInput | TokenKind::Backtick
        ) {
            p.reader.read();
        }
        language = Some(p.reader.extract_accumulated(ExcerptKind::FenceLanguage));
    }

    // the rest of the fence line must be spacing
    let mut junk = false;
    while !matches!(p.reader.kind(), TokenKind::Newline | TokenKind::EndOfInput) {
        if p.reader.kind() != TokenKind::Spacing {
            junk = true;
        }
        p.reader.read();
    }
    if p.reader.kind() == TokenKind::Newline {
        p.reader.read();
    }
    let after_language = p.reader.try_extract_accumulated(ExcerptKind::Spacing);
    if junk {
        let range = p.excerpt_range(after_language.as_ref());
        p.error_with_message(
            ErrorCode::E0901,
            range,
            "unexpected characters after the code fence language",
        );
    }

    let mut close_fence = None;
    loop {
        if p.reader.at_end() {
            p.error(ErrorCode::E0203, open_range);
            break;
        }
        if at_closing_fence(p, open_count) {
            break;
        }
        // consume one content line including its newline
        loop {
            match p.reader.kind() {
                TokenKind::Newline => {
                    p.reader.read();
                    break;
                }
                TokenKind::EndOfInput => break,
                _ => {
                    p.reader.read();
                }
            }
        }
    }
    let code = p.reader.extract_accumulated(ExcerptKind::CodeContent);

    if !p.reader.at_end() {
        // consume the closing fence line (spacing and backticks only)
        while matches!(p.reader.kind(), TokenKind::Spacing | TokenKind::Backtick) {
            p.reader.read();
        }
        close_fence = Some(p.reader.extract_accumulated(ExcerptKind::FenceDelimiter));
    }

    DocNode::FencedCode(DocFencedCode::from_excerpts(
        open_fence,
        language,
        after_language,
        code,
        close_fence,
    ))
}

/// Check whether the cursor (at line start) sits at a closing fence line
fn at_closing_fence(p: &NodeParser<'_>, open_count: usize) -> bool {
    let mut i = 0;
    while p.reader.peek_kind(i) == TokenKind::Spacing {
        i += 1;
    }
    let mut count = 0;
    while p.reader.peek_kind(i) == TokenKind::Backtick {
        i += 1;
        count += 1;
    }
    if count < open_count.max(3) {
        return false;
    }
    while p.reader.peek_kind(i) == TokenKind::Spacing {
        i += 1;
    }
    matches!(
        p.reader.peek_kind(i),
        TokenKind::Newline | TokenKind::EndOfInput
    )
}

/// Parse a single-backtick code span within a line
///
/// The interior must not contain a backtick or a line break; a span left
/// open at the end of the line becomes an error-text node and scanning
/// resumes on the next line.
pub(crate) fn parse_code_span(p: &mut NodeParser<'_>, sink: &mut Vec<DocNode>) {
    debug_assert_eq!(p.reader.kind(), TokenKind::Backtick);
    let marker = p.reader.mark();

    p.reader.read();
    let open = p.reader.extract_accumulated(ExcerptKind::CodeDelimiter);

    loop {
        match p.reader.kind() {
            TokenKind::Backtick => {
                let code = p.reader.extract_accumulated(ExcerptKind::CodeContent);
                p.reader.read();
                let close = p.reader.extract_accumulated(ExcerptKind::CodeDelimiter);
                sink.push(DocNode::CodeSpan(DocCodeSpan::from_excerpts(
                    open, code, close,
                )));
                return;
            }
            TokenKind::Newline | TokenKind::EndOfInput => {
                // unterminated: the whole run from the opening backtick to
                // the end of the line becomes error text
                p.reader.rollback(marker);
                while !matches!(
                    p.reader.kind(),
                    TokenKind::Newline | TokenKind::EndOfInput
                ) {
                    p.reader.read();
                }
                let excerpt = p.reader.extract_accumulated(ExcerptKind::ErrorText);
                let range = p.excerpt_range(Some(&excerpt));
                p.error(ErrorCode::E0102, range);
                sink.push(DocNode::ErrorText(DocErrorText::new(
                    excerpt,
                    ErrorCode::E0102,
                    ErrorCode::E0102.default_message(),
                )));
                return;
            }
            _ => {
                p.reader.read();
            }
        }
    }
}
