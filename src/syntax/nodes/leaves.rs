//! Leaf nodes: plain text, breaks, escapes, code, and error text

use crate::parser::errors::ErrorCode;
use crate::syntax::excerpt::Excerpt;

use super::TextSource;

/// A run of plain text within a paragraph
///
/// A plain-text value never contains a line break; an in-paragraph break is
/// represented by [`super::DocSoftBreak`] so renderers can choose between
/// whitespace and a hard break.
#[derive(Debug, Clone)]
pub struct DocPlainText {
    source: TextSource,
}

impl DocPlainText {
    /// Construct from a literal value
    ///
    /// # Panics
    /// Panics if `text` contains `\n` or `\r`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        assert!(
            !text.contains('\n') && !text.contains('\r'),
            "DocPlainText must not contain a line break; use DocSoftBreak"
        );
        Self {
            source: TextSource::Literal(text),
        }
    }

    /// Construct from a parsed excerpt
    pub fn from_excerpt(excerpt: Excerpt) -> Self {
        Self {
            source: TextSource::Parsed(excerpt),
        }
    }

    pub fn text(&self) -> &str {
        self.source.text()
    }

    pub fn excerpt(&self) -> Option<&Excerpt> {
        self.source.excerpt()
    }
}

/// An explicit in-paragraph line break
#[derive(Debug, Clone, Default)]
pub struct DocSoftBreak {
    excerpt: Option<Excerpt>,
}

impl DocSoftBreak {
    pub fn new() -> Self {
        Self { excerpt: None }
    }

    pub fn from_excerpt(excerpt: Excerpt) -> Self {
        Self {
            excerpt: Some(excerpt),
        }
    }

    pub fn excerpt(&self) -> Option<&Excerpt> {
        self.excerpt.as_ref()
    }
}

/// A backslash escape: `\` followed by a non-alphanumeric character
///
/// The encoded form keeps both characters; the decoded form is the single
/// escaped character. A backslash before an alphanumeric character or at end
/// of line is not an escape and stays plain text.
#[derive(Debug, Clone)]
pub struct DocEscapedText {
    source: TextSource,
    decoded: String,
}

impl DocEscapedText {
    /// Construct from a literal escaped character
    ///
    /// # Panics
    /// Panics if `ch` is alphanumeric - such sequences are not escapes.
    pub fn new(ch: char) -> Self {
        assert!(
            !ch.is_ascii_alphanumeric(),
            "DocEscapedText: '{ch}' cannot be escaped"
        );
        Self {
            source: TextSource::Literal(format!("\\{ch}")),
            decoded: ch.to_string(),
        }
    }

    /// Construct from a parsed excerpt covering the backslash and the
    /// escaped character
    pub fn from_excerpt(excerpt: Excerpt) -> Self {
        let decoded = excerpt.text().chars().skip(1).collect();
        Self {
            source: TextSource::Parsed(excerpt),
            decoded,
        }
    }

    /// The escaped character without its backslash
    pub fn decoded_text(&self) -> &str {
        &self.decoded
    }

    /// The two-character source form including the backslash
    pub fn encoded_text(&self) -> &str {
        self.source.text()
    }

    pub fn excerpt(&self) -> Option<&Excerpt> {
        self.source.excerpt()
    }
}

/// A location where grammar matching failed
///
/// Retains the exact offending text, the diagnostic code, and the message
/// that was logged; the parser resynchronized immediately after it.
#[derive(Debug, Clone)]
pub struct DocErrorText {
    excerpt: Excerpt,
    code: ErrorCode,
    message: String,
}

impl DocErrorText {
    pub fn new(excerpt: Excerpt, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            excerpt,
            code,
            message: message.into(),
        }
    }

    /// The offending source text
    pub fn text(&self) -> &str {
        self.excerpt.text()
    }

    pub fn excerpt(&self) -> &Excerpt {
        &self.excerpt
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A single-backtick code span within a line
#[derive(Debug, Clone)]
pub struct DocCodeSpan {
    open: Option<Excerpt>,
    code: TextSource,
    close: Option<Excerpt>,
}

impl DocCodeSpan {
    /// Construct from a literal code string
    ///
    /// # Panics
    /// Panics if `code` contains a backtick or a line break.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        assert!(
            !code.contains('`') && !code.contains('\n') && !code.contains('\r'),
            "DocCodeSpan must not contain a backtick or a line break"
        );
        Self {
            open: None,
            code: TextSource::Literal(code),
            close: None,
        }
    }

    /// Construct from parsed excerpts: opening backtick, interior, closing
    /// backtick
    pub fn from_excerpts(open: Excerpt, code: Excerpt, close: Excerpt) -> Self {
        Self {
            open: Some(open),
            code: TextSource::Parsed(code),
            close: Some(close),
        }
    }

    /// The code between the backticks
    pub fn code(&self) -> &str {
        self.code.text()
    }

    pub fn code_excerpt(&self) -> Option<&Excerpt> {
        self.code.excerpt()
    }

    pub(crate) fn all_excerpts(&self) -> Vec<&Excerpt> {
        let mut out = Vec::new();
        out.extend(self.open.as_ref());
        out.extend(self.code.excerpt());
        out.extend(self.close.as_ref());
        out
    }
}

/// A fenced code block: three-or-more backticks with an optional language
/// tag, capturing verbatim content until the closing fence
#[derive(Debug, Clone)]
pub struct DocFencedCode {
    open_fence: Option<Excerpt>,
    language: Option<TextSource>,
    after_language: Option<Excerpt>,
    code: TextSource,
    close_fence: Option<Excerpt>,
}

impl DocFencedCode {
    /// Construct from literal code and an optional language tag
    ///
    /// # Panics
    /// Panics if `language` contains whitespace, a backtick, or a line break.
    pub fn new(code: impl Into<String>, language: Option<&str>) -> Self {
        if let Some(language) = language {
            assert!(
                !language.contains(char::is_whitespace) && !language.contains('`'),
                "DocFencedCode language must be a single word"
            );
        }
        Self {
            open_fence: None,
            language: language.map(|l| TextSource::Literal(l.to_string())),
            after_language: None,
            code: TextSource::Literal(code.into()),
            close_fence: None,
        }
    }

    /// Construct from parsed excerpts
    pub fn from_excerpts(
        open_fence: Excerpt,
        language: Option<Excerpt>,
        after_language: Option<Excerpt>,
        code: Excerpt,
        close_fence: Option<Excerpt>,
    ) -> Self {
        Self {
            open_fence: Some(open_fence),
            language: language.map(TextSource::Parsed),
            after_language,
            code: TextSource::Parsed(code),
            close_fence,
        }
    }

    /// The verbatim content between the fences, exactly as written
    pub fn code(&self) -> &str {
        self.code.text()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_ref().map(TextSource::text)
    }

    pub fn code_excerpt(&self) -> Option<&Excerpt> {
        self.code.excerpt()
    }

    pub(crate) fn all_excerpts(&self) -> Vec<&Excerpt> {
        let mut out = Vec::new();
        out.extend(self.open_fence.as_ref());
        out.extend(self.language.as_ref().and_then(TextSource::excerpt));
        out.extend(self.after_language.as_ref());
        out.extend(self.code.excerpt());
        out.extend(self.close_fence.as_ref());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::excerpt::ExcerptKind;
    use std::sync::Arc;

    #[test]
    fn test_plain_text_literal() {
        let text = DocPlainText::new("hello");
        assert_eq!(text.text(), "hello");
        assert!(text.excerpt().is_none());
    }

    #[test]
    #[should_panic(expected = "must not contain a line break")]
    fn test_plain_text_rejects_newline() {
        DocPlainText::new("hello\nworld");
    }

    #[test]
    #[should_panic(expected = "must not contain a line break")]
    fn test_plain_text_rejects_carriage_return() {
        DocPlainText::new("hello\rworld");
    }

    #[test]
    fn test_escaped_text_decodes() {
        let escaped = DocEscapedText::new('{');
        assert_eq!(escaped.decoded_text(), "{");
        assert_eq!(escaped.encoded_text(), "\\{");
    }

    #[test]
    #[should_panic(expected = "cannot be escaped")]
    fn test_escaped_alphanumeric_panics() {
        DocEscapedText::new('a');
    }

    #[test]
    fn test_escaped_from_excerpt() {
        let buffer: Arc<str> = Arc::from("\\}");
        let excerpt = Excerpt::from_parts(
            ExcerptKind::EscapedText,
            buffer,
            vec![crate::base::Span::new(0.into(), 2.into())],
        );
        let escaped = DocEscapedText::from_excerpt(excerpt);
        assert_eq!(escaped.decoded_text(), "}");
        assert_eq!(escaped.encoded_text(), "\\}");
    }

    #[test]
    #[should_panic(expected = "backtick or a line break")]
    fn test_code_span_rejects_backtick() {
        DocCodeSpan::new("a`b");
    }

    #[test]
    fn test_fenced_code_literal() {
        let fence = DocFencedCode::new("let x = 1;\n", Some("ts"));
        assert_eq!(fence.code(), "let x = 1;\n");
        assert_eq!(fence.language(), Some("ts"));
    }

    #[test]
    #[should_panic(expected = "single word")]
    fn test_fenced_code_rejects_spaced_language() {
        DocFencedCode::new("x", Some("a b"));
    }
}
