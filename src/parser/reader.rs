//! Token cursor with bookmarking and excerpt accumulation
//!
//! The grammar walks the token list strictly forward, reading tokens into an
//! implicit accumulation run. Extracting the run produces an excerpt tagged
//! with a semantic role; bookmarks allow a grammar rule to roll the cursor
//! back and re-consume the same tokens under a different interpretation
//! (error recovery), which is the only backtracking in the engine.

use std::sync::Arc;

use crate::base::{Span, TextRange};
use crate::parser::lexer::{Token, TokenKind};
use crate::syntax::excerpt::{Excerpt, ExcerptKind};

/// A bookmark into the token stream
///
/// Created only when the accumulation run is empty, so rolling back never
/// splits a run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Marker {
    index: usize,
}

pub(crate) struct TokenReader<'a> {
    buffer: &'a Arc<str>,
    tokens: &'a [Token],
    index: usize,
    accum_start: usize,
}

impl<'a> TokenReader<'a> {
    pub fn new(buffer: &'a Arc<str>, tokens: &'a [Token]) -> Self {
        assert!(
            tokens.last().is_some_and(|t| t.kind == TokenKind::EndOfInput),
            "token stream must end with EndOfInput"
        );
        Self {
            buffer,
            tokens,
            index: 0,
            accum_start: 0,
        }
    }

    pub fn buffer(&self) -> &Arc<str> {
        self.buffer
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn current(&self) -> Token {
        self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Look ahead without consuming; clamps to the end-of-input sentinel
    pub fn peek(&self, ahead: usize) -> Token {
        let index = (self.index + ahead).min(self.tokens.len() - 1);
        self.tokens[index]
    }

    pub fn peek_kind(&self, ahead: usize) -> TokenKind {
        self.peek(ahead).kind
    }

    pub fn at_end(&self) -> bool {
        self.kind() == TokenKind::EndOfInput
    }

    pub fn token_text(&self, token: &Token) -> &'a str {
        &self.buffer[usize::from(token.span.start())..usize::from(token.span.end())]
    }

    /// Check whether only spacing separates the cursor from the start of the
    /// current line
    pub fn is_line_start(&self) -> bool {
        let mut back = self.index;
        while back > 0 {
            back -= 1;
            match self.tokens[back].kind {
                TokenKind::Spacing => continue,
                TokenKind::Newline => return true,
                _ => return false,
            }
        }
        true
    }

    // =========================================================================
    // Consumption
    // =========================================================================

    /// Consume the current token into the accumulation run
    pub fn read(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::EndOfInput {
            self.index += 1;
        }
        token
    }

    // =========================================================================
    // Bookmarking
    // =========================================================================

    /// Create a bookmark at the cursor
    ///
    /// # Panics
    /// Panics if tokens have been accumulated but not extracted - a rule must
    /// settle its run before speculating.
    pub fn mark(&self) -> Marker {
        assert!(
            self.accum_start == self.index,
            "cannot bookmark with an open accumulation run"
        );
        Marker { index: self.index }
    }

    /// Move the cursor back to a bookmark, discarding the accumulation run
    pub fn rollback(&mut self, marker: Marker) {
        debug_assert!(marker.index <= self.index);
        self.index = marker.index;
        self.accum_start = marker.index;
    }

    // =========================================================================
    // Excerpt extraction
    // =========================================================================

    pub fn has_accumulated(&self) -> bool {
        self.accum_start < self.index
    }

    /// Extract the accumulated tokens as an excerpt, merging adjacent spans
    ///
    /// Token spans that touch merge into one part; gaps (the comment
    /// decoration between lines) start a new part, so the excerpt text never
    /// contains decoration.
    pub fn extract_accumulated(&mut self, kind: ExcerptKind) -> Excerpt {
        let mut parts: Vec<Span> = Vec::new();
        for token in &self.tokens[self.accum_start..self.index] {
            if token.span.is_empty() {
                continue;
            }
            match parts.last_mut() {
                Some(last) if last.end() == token.span.start() => {
                    *last = Span::new(last.start(), token.span.end());
                }
                _ => parts.push(token.span),
            }
        }
        // an all-empty run still produces a zero-width excerpt at the cursor
        if parts.is_empty() {
            let offset = self.tokens[self.accum_start.min(self.tokens.len() - 1)]
                .span
                .start();
            parts.push(Span::at(offset, 0.into()));
        }
        self.accum_start = self.index;
        Excerpt::from_parts(kind, self.buffer.clone(), parts)
    }

    /// Extract the accumulated run, or `None` when nothing was consumed
    pub fn try_extract_accumulated(&mut self, kind: ExcerptKind) -> Option<Excerpt> {
        if self.has_accumulated() {
            Some(self.extract_accumulated(kind))
        } else {
            None
        }
    }

    /// A buffer-backed range for a single token
    pub fn token_range(&self, token: &Token) -> TextRange {
        TextRange::from_str_range(self.buffer.clone(), token.span.start(), token.span.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::TextSize;
    use crate::parser::lexer::tokenize_lines;

    fn reader_fixture(text: &str) -> (Arc<str>, Vec<Token>) {
        let buffer: Arc<str> = Arc::from(text);
        let line = TextRange::from_str_range(buffer.clone(), TextSize::new(0), TextSize::of(text));
        let tokens = tokenize_lines(&buffer, &[line]);
        (buffer, tokens)
    }

    #[test]
    fn test_read_and_extract() {
        let (buffer, tokens) = reader_fixture("abc def");
        let mut reader = TokenReader::new(&buffer, &tokens);
        reader.read(); // abc
        reader.read(); // spacing
        reader.read(); // def
        let excerpt = reader.extract_accumulated(ExcerptKind::PlainText);
        assert_eq!(excerpt.text(), "abc def");
        assert_eq!(excerpt.parts().len(), 1);
        assert!(!reader.has_accumulated());
    }

    #[test]
    fn test_rollback() {
        let (buffer, tokens) = reader_fixture("abc def");
        let mut reader = TokenReader::new(&buffer, &tokens);
        let marker = reader.mark();
        reader.read();
        reader.read();
        reader.rollback(marker);
        assert_eq!(reader.kind(), TokenKind::AsciiWord);
        assert!(!reader.has_accumulated());
    }

    #[test]
    #[should_panic(expected = "open accumulation run")]
    fn test_mark_with_open_run_panics() {
        let (buffer, tokens) = reader_fixture("abc");
        let mut reader = TokenReader::new(&buffer, &tokens);
        reader.read();
        let _ = reader.mark();
    }

    #[test]
    fn test_line_start_detection() {
        let buffer: Arc<str> = Arc::from("ab\n  cd");
        let lines = vec![
            TextRange::from_str_range(buffer.clone(), TextSize::new(0), TextSize::new(2)),
            TextRange::from_str_range(buffer.clone(), TextSize::new(3), TextSize::new(7)),
        ];
        let tokens = tokenize_lines(&buffer, &lines);
        let mut reader = TokenReader::new(&buffer, &tokens);
        assert!(reader.is_line_start()); // at "ab"
        reader.read();
        let _ = reader.extract_accumulated(ExcerptKind::PlainText);
        assert!(!reader.is_line_start()); // at newline, after "ab"
        reader.read(); // newline
        reader.read(); // spacing
        let _ = reader.extract_accumulated(ExcerptKind::PlainText);
        assert!(reader.is_line_start()); // at "cd" with only spacing before
    }

    #[test]
    fn test_eoi_is_sticky() {
        let (buffer, tokens) = reader_fixture("x");
        let mut reader = TokenReader::new(&buffer, &tokens);
        reader.read();
        assert!(reader.at_end());
        reader.read();
        assert!(reader.at_end());
        assert_eq!(reader.peek_kind(5), TokenKind::EndOfInput);
    }
}
