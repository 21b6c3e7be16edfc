//! Per-parse state and the parse result aggregate

use std::sync::Arc;

use crate::base::TextRange;
use crate::parser::errors::Diagnostic;
use crate::parser::lexer::Token;
use crate::syntax::comment::DocComment;

/// The complete result of one parse call
///
/// Exposes every intermediate product of the pipeline: the original buffer,
/// the extracted lines, the full token stream, the root DocComment tree, and
/// the ordered diagnostic log. All of it addresses the same shared buffer.
#[derive(Debug)]
pub struct ParserContext {
    buffer: Arc<str>,
    lines: Vec<TextRange>,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    doc_comment: DocComment,
}

impl ParserContext {
    pub(crate) fn new(
        buffer: Arc<str>,
        lines: Vec<TextRange>,
        tokens: Vec<Token>,
        diagnostics: Vec<Diagnostic>,
        doc_comment: DocComment,
    ) -> Self {
        Self {
            buffer,
            lines,
            tokens,
            diagnostics,
            doc_comment,
        }
    }

    /// The original text buffer the caller supplied
    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn buffer(&self) -> &Arc<str> {
        &self.buffer
    }

    /// The extracted content lines, in order, addressing the original buffer
    pub fn lines(&self) -> &[TextRange] {
        &self.lines
    }

    /// The full token stream, ending with the end-of-input sentinel
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The ordered diagnostic log; never fatal by construction
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// `true` when no diagnostics were logged
    pub fn ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The parsed comment tree
    pub fn doc_comment(&self) -> &DocComment {
        &self.doc_comment
    }

    /// Consume the context, keeping only the tree
    pub fn into_doc_comment(self) -> DocComment {
        self.doc_comment
    }
}
