//! Logos-based tokenizer for extracted comment lines
//!
//! Single left-to-right pass over each extracted line. Characters are
//! classified by class: letter/digit runs become word tokens, space/tab runs
//! become spacing tokens, and every ASCII punctuation character gets its own
//! distinct kind so the grammar can test for specific delimiters without
//! re-scanning. The tokenizer never backtracks; the grammar bookmarks over
//! the emitted token list instead.

use logos::Logos;

use crate::base::{Span, TextRange, TextSize};

/// All token kinds produced by the tokenizer
///
/// The stream for a parse is always terminated by a single `EndOfInput`
/// sentinel. Newline tokens sit between lines and cover the actual newline
/// bytes in the original buffer (empty when the content was cut short by the
/// closing comment delimiter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    EndOfInput,
    Newline,
    /// Run of spaces and/or tabs
    Spacing,
    /// Run of ASCII letters and digits
    AsciiWord,
    /// Run of characters outside the ASCII range
    OtherText,

    // =========================================================================
    // ASCII punctuation - one kind per character
    // =========================================================================
    Exclamation,  // !
    DoubleQuote,  // "
    Pound,        // #
    Dollar,       // $
    Percent,      // %
    Ampersand,    // &
    SingleQuote,  // '
    LeftParen,    // (
    RightParen,   // )
    Star,         // *
    Plus,         // +
    Comma,        // ,
    Hyphen,       // -
    Period,       // .
    Slash,        // /
    Colon,        // :
    Semicolon,    // ;
    LessThan,     // <
    Equals,       // =
    GreaterThan,  // >
    Question,     // ?
    AtSign,       // @
    LeftBracket,  // [
    Backslash,    // \
    RightBracket, // ]
    Caret,        // ^
    Underscore,   // _
    Backtick,     // `
    LeftBrace,    // {
    Pipe,         // |
    RightBrace,   // }
    Tilde,        // ~
}

impl TokenKind {
    /// Check whether this kind is a single ASCII punctuation character
    pub fn is_punctuation(self) -> bool {
        !matches!(
            self,
            TokenKind::EndOfInput
                | TokenKind::Newline
                | TokenKind::Spacing
                | TokenKind::AsciiWord
                | TokenKind::OtherText
        )
    }
}

/// A classified, contiguous slice of one extracted line
///
/// The concatenation of all tokens of a line reproduces that line's text
/// exactly; spans are absolute offsets into the original buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Index into the extracted line sequence this token belongs to
    pub line_index: u32,
}

impl Token {
    /// The text this token covers in `buffer`
    pub fn text<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[usize::from(self.span.start())..usize::from(self.span.end())]
    }
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    #[regex(r"[ \t]+")]
    Spacing,

    #[regex(r"[A-Za-z0-9]+")]
    AsciiWord,

    #[regex(r"[^\x00-\x7F]+")]
    OtherText,

    #[token("!")]
    Exclamation,
    #[token("\"")]
    DoubleQuote,
    #[token("#")]
    Pound,
    #[token("$")]
    Dollar,
    #[token("%")]
    Percent,
    #[token("&")]
    Ampersand,
    #[token("'")]
    SingleQuote,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token(",")]
    Comma,
    #[token("-")]
    Hyphen,
    #[token(".")]
    Period,
    #[token("/")]
    Slash,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("<")]
    LessThan,
    #[token("=")]
    Equals,
    #[token(">")]
    GreaterThan,
    #[token("?")]
    Question,
    #[token("@")]
    AtSign,
    #[token("[")]
    LeftBracket,
    #[token("\\")]
    Backslash,
    #[token("]")]
    RightBracket,
    #[token("^")]
    Caret,
    #[token("_")]
    Underscore,
    #[token("`")]
    Backtick,
    #[token("{")]
    LeftBrace,
    #[token("|")]
    Pipe,
    #[token("}")]
    RightBrace,
    #[token("~")]
    Tilde,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Spacing => TokenKind::Spacing,
            LogosToken::AsciiWord => TokenKind::AsciiWord,
            LogosToken::OtherText => TokenKind::OtherText,
            LogosToken::Exclamation => TokenKind::Exclamation,
            LogosToken::DoubleQuote => TokenKind::DoubleQuote,
            LogosToken::Pound => TokenKind::Pound,
            LogosToken::Dollar => TokenKind::Dollar,
            LogosToken::Percent => TokenKind::Percent,
            LogosToken::Ampersand => TokenKind::Ampersand,
            LogosToken::SingleQuote => TokenKind::SingleQuote,
            LogosToken::LeftParen => TokenKind::LeftParen,
            LogosToken::RightParen => TokenKind::RightParen,
            LogosToken::Star => TokenKind::Star,
            LogosToken::Plus => TokenKind::Plus,
            LogosToken::Comma => TokenKind::Comma,
            LogosToken::Hyphen => TokenKind::Hyphen,
            LogosToken::Period => TokenKind::Period,
            LogosToken::Slash => TokenKind::Slash,
            LogosToken::Colon => TokenKind::Colon,
            LogosToken::Semicolon => TokenKind::Semicolon,
            LogosToken::LessThan => TokenKind::LessThan,
            LogosToken::Equals => TokenKind::Equals,
            LogosToken::GreaterThan => TokenKind::GreaterThan,
            LogosToken::Question => TokenKind::Question,
            LogosToken::AtSign => TokenKind::AtSign,
            LogosToken::LeftBracket => TokenKind::LeftBracket,
            LogosToken::Backslash => TokenKind::Backslash,
            LogosToken::RightBracket => TokenKind::RightBracket,
            LogosToken::Caret => TokenKind::Caret,
            LogosToken::Underscore => TokenKind::Underscore,
            LogosToken::Backtick => TokenKind::Backtick,
            LogosToken::LeftBrace => TokenKind::LeftBrace,
            LogosToken::Pipe => TokenKind::Pipe,
            LogosToken::RightBrace => TokenKind::RightBrace,
            LogosToken::Tilde => TokenKind::Tilde,
        }
    }
}

/// Tokenize a sequence of extracted lines into one token stream
///
/// Each line is lexed independently; a newline token is emitted between
/// lines, covering the real newline bytes that follow the line's content.
/// The stream ends with an `EndOfInput` sentinel.
pub fn tokenize_lines(buffer: &str, lines: &[TextRange]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line_index = index as u32;
        let start = line.pos();
        let slice = line.as_str();

        let mut lexer = LogosToken::lexer(slice);
        while let Some(result) = lexer.next() {
            let lexed = lexer.span();
            let span = Span::new(
                start + TextSize::new(lexed.start as u32),
                start + TextSize::new(lexed.end as u32),
            );
            let kind = match result {
                Ok(t) => TokenKind::from(t),
                // Unmatched chunks (control characters) are carried as text
                Err(()) => TokenKind::OtherText,
            };
            // Merge adjacent OtherText runs so callers see one token per run
            if kind == TokenKind::OtherText {
                if let Some(last) = tokens.last_mut() {
                    if last.kind == TokenKind::OtherText
                        && last.line_index == line_index
                        && last.span.end() == span.start()
                    {
                        last.span = Span::new(last.span.start(), span.end());
                        continue;
                    }
                }
            }
            tokens.push(Token {
                kind,
                span,
                line_index,
            });
        }

        if index + 1 < lines.len() {
            let nl_start = line.end();
            let rest = &buffer[usize::from(nl_start)..];
            let nl_len = if rest.starts_with("\r\n") {
                2
            } else if rest.starts_with('\n') || rest.starts_with('\r') {
                1
            } else {
                0
            };
            tokens.push(Token {
                kind: TokenKind::Newline,
                span: Span::at(nl_start, TextSize::new(nl_len)),
                line_index,
            });
        }
    }

    let eof_offset = lines.last().map(|l| l.end()).unwrap_or_default();
    tokens.push(Token {
        kind: TokenKind::EndOfInput,
        span: Span::at(eof_offset, TextSize::new(0)),
        line_index: lines.len().saturating_sub(1) as u32,
    });

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn lex_single(text: &str) -> Vec<(TokenKind, String)> {
        let buffer: Arc<str> = Arc::from(text);
        let line = TextRange::from_str_range(buffer.clone(), TextSize::new(0), TextSize::of(text));
        tokenize_lines(&buffer, &[line])
            .into_iter()
            .map(|t| (t.kind, t.text(&buffer).to_string()))
            .collect()
    }

    #[test]
    fn test_word_spacing_punctuation() {
        let tokens = lex_single("abc 12  {@x}");
        let kinds: Vec<TokenKind> = tokens.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::AsciiWord,
                TokenKind::Spacing,
                TokenKind::AsciiWord,
                TokenKind::Spacing,
                TokenKind::LeftBrace,
                TokenKind::AtSign,
                TokenKind::AsciiWord,
                TokenKind::RightBrace,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_tokens_reproduce_line_exactly() {
        let text = "a `code`  \\- {@link http://x|y} *";
        let tokens = lex_single(text);
        let rebuilt: String = tokens.iter().map(|(_, t)| t.as_str()).collect::<String>();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_non_ascii_runs_merge() {
        let tokens = lex_single("héllo wörld");
        // "h", "éllo" etc: ASCII letters and non-ASCII runs alternate
        assert!(tokens.iter().any(|(k, _)| *k == TokenKind::OtherText));
        let rebuilt: String = tokens.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(rebuilt, "héllo wörld");
    }

    #[test]
    fn test_newline_token_between_lines() {
        let text = "ab\ncd";
        let buffer: Arc<str> = Arc::from(text);
        let lines = vec![
            TextRange::from_str_range(buffer.clone(), TextSize::new(0), TextSize::new(2)),
            TextRange::from_str_range(buffer.clone(), TextSize::new(3), TextSize::new(5)),
        ];
        let tokens = tokenize_lines(&buffer, &lines);
        let newline = tokens.iter().find(|t| t.kind == TokenKind::Newline).unwrap();
        assert_eq!(newline.text(&buffer), "\n");
        assert_eq!(tokens.last().unwrap().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_punctuation_classification() {
        assert!(TokenKind::Backtick.is_punctuation());
        assert!(TokenKind::AtSign.is_punctuation());
        assert!(!TokenKind::AsciiWord.is_punctuation());
        assert!(!TokenKind::Spacing.is_punctuation());
        assert!(!TokenKind::Newline.is_punctuation());
        assert!(!TokenKind::EndOfInput.is_punctuation());
    }

    #[test]
    fn test_empty_input_yields_only_sentinel() {
        let buffer: Arc<str> = Arc::from("");
        let tokens = tokenize_lines(&buffer, &[]);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndOfInput);
    }
}
