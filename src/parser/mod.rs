//! Doc comment parser
//!
//! This module provides the full parsing pipeline:
//! - **logos** tokenizer over extracted comment lines
//! - line extractor stripping comment decoration
//! - recursive-descent node parser with error recovery
//!
//! ```text
//! Raw comment text + ParserConfiguration
//!     ↓
//! LineExtractor → Line ranges into the original buffer
//!     ↓
//! Tokenizer (logos) → Tokens with TokenKind
//!     ↓
//! NodeParser → DocComment tree + diagnostic log
//!     ↓
//! ParserContext (buffer, lines, tokens, tree, diagnostics)
//! ```
//!
//! Malformed content never raises: every input yields a complete tree, with
//! problems surfaced through the diagnostic log and error-text nodes.

mod context;
pub mod errors;
mod grammar;
mod lexer;
mod lines;
mod reader;

pub use context::ParserContext;
pub use errors::{Diagnostic, ErrorCode, Severity};
pub use lexer::{tokenize_lines, Token, TokenKind};
pub use lines::extract_lines;

use std::sync::Arc;

use crate::config::ParserConfiguration;

/// A reusable parser bound to a configuration
///
/// The parser holds no per-parse state: it may be reused across sequential
/// calls, and independent parses on other threads are safe as long as each
/// owns its own `ParserContext` and the shared configuration is not mutated.
#[derive(Debug, Clone, Default)]
pub struct DocParser {
    config: ParserConfiguration,
}

impl DocParser {
    pub fn new(config: ParserConfiguration) -> Self {
        Self { config }
    }

    pub fn configuration(&self) -> &ParserConfiguration {
        &self.config
    }

    /// Parse one raw comment block (including `/**` and `*/` delimiters)
    pub fn parse_str(&self, text: &str) -> ParserContext {
        let buffer: Arc<str> = Arc::from(text);
        let mut diagnostics = Vec::new();

        let lines = lines::extract_lines(&buffer, &mut diagnostics);
        let tokens = lexer::tokenize_lines(&buffer, &lines);
        let doc_comment =
            grammar::parse_doc_comment(&buffer, &tokens, &self.config, &mut diagnostics);

        ParserContext::new(buffer, lines, tokens, diagnostics, doc_comment)
    }
}

/// Parse a comment with the standard tag configuration
pub fn parse_comment(text: &str) -> ParserContext {
    DocParser::default().parse_str(text)
}
