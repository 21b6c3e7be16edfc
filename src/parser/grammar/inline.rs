//! Inline tag parsing: `{@name ...}`, `{@link ...}`, `{@inheritDoc ...}`
//!
//! A malformed specialized tag never aborts the parse: it degrades to a
//! generic inline tag or an error-text node wrapping the exact offending
//! excerpt, and scanning resumes after the matching closing brace or at the
//! end of the line when none is found.

use tracing::trace;

use super::reference::parse_declaration_reference;
use super::NodeParser;
use crate::config::UnknownTagPolicy;
use crate::parser::errors::ErrorCode;
use crate::parser::lexer::TokenKind;
use crate::parser::reader::Marker;
use crate::syntax::excerpt::{Excerpt, ExcerptKind};
use crate::syntax::nodes::{
    DocErrorText, DocInheritDocTag, DocInlineTag, DocLinkTag, DocNode, LinkDestination, TextSource,
};

/// Parse an inline construct opening at `{`
pub(crate) fn parse_inline_construct(p: &mut NodeParser<'_>, sink: &mut Vec<DocNode>) {
    debug_assert_eq!(p.reader.kind(), TokenKind::LeftBrace);
    let marker = p.reader.mark();

    if p.reader.peek_kind(1) != TokenKind::AtSign {
        let token = p.reader.read();
        let range = p.reader.token_range(&token);
        let excerpt = p.reader.extract_accumulated(ExcerptKind::ErrorText);
        let message = "the '{' character should be escaped with a backslash";
        p.error_with_message(ErrorCode::E0205, range, message);
        sink.push(DocNode::ErrorText(DocErrorText::new(
            excerpt,
            ErrorCode::E0205,
            message,
        )));
        return;
    }

    p.reader.read(); // {
    let open = p.reader.extract_accumulated(ExcerptKind::TagOpen);
    p.reader.read(); // @

    let name_ok = p.reader.kind() == TokenKind::AsciiWord
        && p
            .reader
            .token_text(&p.reader.current())
            .starts_with(|c: char| c.is_ascii_alphabetic());
    if !name_ok {
        recover_inline(p, marker, ErrorCode::E0302, None, sink);
        return;
    }
    p.reader.read(); // name word
    let name = p.reader.extract_accumulated(ExcerptKind::TagName);
    let normalized = name.text().to_ascii_lowercase();
    trace!(tag = name.text(), "inline tag");

    match normalized.as_str() {
        "@link" => parse_link_rest(p, marker, open, name, sink),
        "@inheritdoc" => parse_inherit_doc_rest(p, marker, open, name, sink),
        _ => {
            if p.config.try_get_tag(name.text()).is_none()
                && p.config.unknown_tag_policy() == UnknownTagPolicy::Warn
            {
                let range = p.excerpt_range(Some(&name));
                p.warning(ErrorCode::E0503, range);
            }
            let separator = p.take_spacing();
            parse_generic_rest(p, marker, open, name, separator, sink);
        }
    }
}

/// Parse the interior of a generic inline tag after its name
///
/// Content is captured verbatim up to the closing brace and may span lines;
/// a backslash keeps its following punctuation from terminating the scan.
fn parse_generic_rest(
    p: &mut NodeParser<'_>,
    marker: Marker,
    open: Excerpt,
    name: Excerpt,
    separator: Option<Excerpt>,
    sink: &mut Vec<DocNode>,
) {
    loop {
        match p.reader.kind() {
            TokenKind::RightBrace => {
                let content = p.reader.try_extract_accumulated(ExcerptKind::TagContent);
                p.reader.read();
                let close = p.reader.extract_accumulated(ExcerptKind::TagClose);
                sink.push(DocNode::InlineTag(DocInlineTag::from_excerpts(
                    open,
                    name,
                    separator,
                    content,
                    Some(close),
                )));
                return;
            }
            TokenKind::EndOfInput => {
                recover_inline(p, marker, ErrorCode::E0204, None, sink);
                return;
            }
            TokenKind::LeftBrace => {
                recover_inline(
                    p,
                    marker,
                    ErrorCode::E0205,
                    Some("a nested '{' must be escaped within an inline tag"),
                    sink,
                );
                return;
            }
            TokenKind::Backslash if p.reader.peek_kind(1).is_punctuation() => {
                p.reader.read();
                p.reader.read();
            }
            _ => {
                p.reader.read();
            }
        }
    }
}

/// Parse `{@link url-or-reference [| display text]}` after the tag name
fn parse_link_rest(
    p: &mut NodeParser<'_>,
    marker: Marker,
    open: Excerpt,
    name: Excerpt,
    sink: &mut Vec<DocNode>,
) {
    let separator = p.take_spacing();

    if matches!(p.reader.kind(), TokenKind::RightBrace | TokenKind::Pipe)
        || p.reader.at_end()
        || p.reader.kind() == TokenKind::Newline
    {
        recover_inline(p, marker, ErrorCode::E0402, None, sink);
        return;
    }

    // scan the destination run once to decide URL vs declaration reference
    let destination_marker = p.reader.mark();
    while !matches!(
        p.reader.kind(),
        TokenKind::Spacing
            | TokenKind::Pipe
            | TokenKind::RightBrace
            | TokenKind::Newline
            | TokenKind::EndOfInput
    ) {
        p.reader.read();
    }
    let destination_run = p.reader.extract_accumulated(ExcerptKind::LinkUrl);

    let destination = if destination_run.text().contains("://") {
        if is_valid_url(destination_run.text()) {
            LinkDestination::Url(TextSource::Parsed(destination_run))
        } else {
            recover_inline(p, marker, ErrorCode::E0403, None, sink);
            return;
        }
    } else {
        p.reader.rollback(destination_marker);
        match parse_declaration_reference(p) {
            Ok(reference) => LinkDestination::Declaration(Box::new(reference)),
            Err(()) => {
                // fall back to a generic inline tag carrying the raw content
                p.reader.rollback(destination_marker);
                let range = p.current_range();
                p.error(ErrorCode::E0401, range);
                parse_generic_rest(p, marker, open, name, separator, sink);
                return;
            }
        }
    };

    let after_destination = p.take_spacing();
    let mut pipe = None;
    let mut link_text = None;
    match p.reader.kind() {
        TokenKind::Pipe => {
            p.reader.read();
            pipe = Some(p.reader.extract_accumulated(ExcerptKind::LinkPipe));
            loop {
                match p.reader.kind() {
                    TokenKind::RightBrace => break,
                    TokenKind::EndOfInput => {
                        recover_inline(p, marker, ErrorCode::E0204, None, sink);
                        return;
                    }
                    TokenKind::LeftBrace => {
                        recover_inline(
                            p,
                            marker,
                            ErrorCode::E0205,
                            Some("a nested '{' must be escaped within an inline tag"),
                            sink,
                        );
                        return;
                    }
                    TokenKind::Backslash if p.reader.peek_kind(1).is_punctuation() => {
                        p.reader.read();
                        p.reader.read();
                    }
                    _ => {
                        p.reader.read();
                    }
                }
            }
            link_text = p.reader.try_extract_accumulated(ExcerptKind::LinkText);
        }
        TokenKind::RightBrace => {}
        TokenKind::EndOfInput => {
            recover_inline(p, marker, ErrorCode::E0204, None, sink);
            return;
        }
        _ => {
            recover_inline(
                p,
                marker,
                ErrorCode::E0401,
                Some("unexpected text after the link target"),
                sink,
            );
            return;
        }
    }

    p.reader.read(); // }
    let close = p.reader.extract_accumulated(ExcerptKind::TagClose);
    sink.push(DocNode::LinkTag(DocLinkTag::from_excerpts(
        open,
        name,
        separator,
        destination,
        after_destination,
        pipe,
        link_text,
        Some(close),
    )));
}

/// Parse `{@inheritDoc [reference]}` after the tag name
fn parse_inherit_doc_rest(
    p: &mut NodeParser<'_>,
    marker: Marker,
    open: Excerpt,
    name: Excerpt,
    sink: &mut Vec<DocNode>,
) {
    let separator = p.take_spacing();

    if p.reader.kind() == TokenKind::RightBrace {
        p.reader.read();
        let close = p.reader.extract_accumulated(ExcerptKind::TagClose);
        sink.push(DocNode::InheritDocTag(DocInheritDocTag::from_excerpts(
            open,
            name,
            separator,
            None,
            Some(close),
        )));
        return;
    }

    match parse_declaration_reference(p) {
        Ok(reference) if p.reader.kind() == TokenKind::RightBrace => {
            p.reader.read();
            let close = p.reader.extract_accumulated(ExcerptKind::TagClose);
            sink.push(DocNode::InheritDocTag(DocInheritDocTag::from_excerpts(
                open,
                name,
                separator,
                Some(reference),
                Some(close),
            )));
        }
        _ => recover_inline(p, marker, ErrorCode::E0401, None, sink),
    }
}

/// Roll back to the opening brace and consume through the matching `}` on
/// the same line, or to the end of the line when none is found, producing an
/// error-text node and a diagnostic
fn recover_inline(
    p: &mut NodeParser<'_>,
    marker: Marker,
    code: ErrorCode,
    message: Option<&str>,
    sink: &mut Vec<DocNode>,
) {
    p.reader.rollback(marker);
    loop {
        match p.reader.kind() {
            TokenKind::RightBrace => {
                p.reader.read();
                break;
            }
            TokenKind::Newline | TokenKind::EndOfInput => break,
            TokenKind::Backslash if p.reader.peek_kind(1).is_punctuation() => {
                p.reader.read();
                p.reader.read();
            }
            _ => {
                p.reader.read();
            }
        }
    }
    let excerpt = p.reader.extract_accumulated(ExcerptKind::ErrorText);
    let range = p.excerpt_range(Some(&excerpt));
    let message = message.unwrap_or_else(|| code.default_message());
    p.error_with_message(code, range, message);
    sink.push(DocNode::ErrorText(DocErrorText::new(excerpt, code, message)));
}

/// Check `scheme://rest` shape: a letter-led scheme and a non-empty remainder
fn is_valid_url(text: &str) -> bool {
    let Some((scheme, rest)) = text.split_once("://") else {
        return false;
    };
    !scheme.is_empty()
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
}

#[cfg(test)]
mod tests {
    use super::is_valid_url;

    #[test]
    fn test_url_validation() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("custom+scheme://x"));
        assert!(!is_valid_url("://missing-scheme"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("1http://x"));
        assert!(!is_valid_url("no-url"));
    }
}
