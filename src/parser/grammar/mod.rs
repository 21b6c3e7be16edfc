//! Recursive-descent grammar over the token stream
//!
//! The parsing functions are organized by construct, mirroring the grammar:
//! - `blocks` - block tags, parameter blocks, comment assembly
//! - `inline` - inline tags: generic, link, inherit-doc
//! - `code` - fenced code blocks and code spans
//! - `reference` - declaration reference expressions
//!
//! The engine makes a single forward pass with bookmark-based local
//! lookahead. A grammar mismatch never unwinds: the offending tokens become
//! an error-text node, a diagnostic is logged, and scanning resumes at a
//! well-defined resynchronization point (matching delimiter or end of line).

mod blocks;
mod code;
mod inline;
mod reference;

use std::sync::Arc;

use tracing::trace;

use crate::base::{TextRange, TextSize};
use crate::config::{ParserConfiguration, TagSyntaxKind};
use crate::parser::errors::{Diagnostic, ErrorCode, Severity};
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::reader::TokenReader;
use crate::syntax::comment::{DocComment, ModifierTagSet};
use crate::syntax::excerpt::{Excerpt, ExcerptKind};
use crate::syntax::nodes::{
    DocErrorText, DocEscapedText, DocNode, DocParagraph, DocPlainText, DocSection, DocSoftBreak,
};

/// Parse the token stream into a DocComment, appending to the diagnostic log
pub(crate) fn parse_doc_comment(
    buffer: &Arc<str>,
    tokens: &[Token],
    config: &ParserConfiguration,
    diagnostics: &mut Vec<Diagnostic>,
) -> DocComment {
    let parser = NodeParser {
        reader: TokenReader::new(buffer, tokens),
        config,
        diagnostics,
        modifier_tags: ModifierTagSet::new(),
    };
    parser.parse()
}

pub(crate) struct NodeParser<'a> {
    pub(crate) reader: TokenReader<'a>,
    pub(crate) config: &'a ParserConfiguration,
    diagnostics: &'a mut Vec<Diagnostic>,
    modifier_tags: ModifierTagSet,
}

impl<'a> NodeParser<'a> {
    fn parse(mut self) -> DocComment {
        let mut comment = DocComment::new();

        let summary = self.parse_section();
        comment.set_summary_section(summary);

        // parse_section stops only at end-of-input or at a section-opening
        // block tag, so each iteration consumes at least the tag
        while !self.reader.at_end() {
            blocks::parse_block(&mut self, &mut comment);
        }

        *comment.modifier_tags_mut() = std::mem::take(&mut self.modifier_tags);
        comment
    }

    /// Parse section content: paragraphs and fenced code, up to the next
    /// section-opening block tag or end of input
    ///
    /// Modifier tags do not open a section; they are recorded into the
    /// modifier tag set and the surrounding content continues.
    pub(crate) fn parse_section(&mut self) -> DocSection {
        let mut section_nodes: Vec<DocNode> = Vec::new();
        let mut inline_nodes: Vec<DocNode> = Vec::new();

        loop {
            match self.reader.kind() {
                TokenKind::EndOfInput => {
                    self.flush_text(&mut inline_nodes);
                    break;
                }
                TokenKind::Newline => {
                    self.flush_text(&mut inline_nodes);
                    self.reader.read();
                    let excerpt = self.reader.extract_accumulated(ExcerptKind::SoftBreak);
                    inline_nodes.push(DocNode::SoftBreak(DocSoftBreak::from_excerpt(excerpt)));
                }
                TokenKind::AtSign if self.at_block_tag_boundary() => {
                    self.flush_text(&mut inline_nodes);
                    let marker = self.reader.mark();
                    let tag = blocks::read_block_tag(self);
                    let is_modifier = self
                        .config
                        .try_get_tag(tag.name())
                        .is_some_and(|d| d.syntax_kind() == TagSyntaxKind::Modifier);
                    if is_modifier {
                        trace!(tag = tag.name(), "modifier tag");
                        let range = self.excerpt_range(tag.excerpt());
                        if !self.modifier_tags.add(tag) {
                            self.warning(ErrorCode::E0502, range);
                        }
                    } else {
                        self.reader.rollback(marker);
                        break;
                    }
                }
                TokenKind::Backslash => {
                    if self.reader.peek_kind(1).is_punctuation() {
                        self.flush_text(&mut inline_nodes);
                        self.reader.read();
                        self.reader.read();
                        let excerpt = self.reader.extract_accumulated(ExcerptKind::EscapedText);
                        inline_nodes.push(DocNode::EscapedText(DocEscapedText::from_excerpt(
                            excerpt,
                        )));
                    } else {
                        // backslash before an alphanumeric character or at
                        // end of line stays literal text
                        self.reader.read();
                    }
                }
                TokenKind::Backtick => {
                    if self.reader.is_line_start() && code::at_fence_start(self) {
                        self.flush_text(&mut inline_nodes);
                        section_nodes
                            .extend(split_into_paragraphs(std::mem::take(&mut inline_nodes)));
                        let fence = code::parse_fenced_code(self);
                        section_nodes.push(fence);
                    } else {
                        self.flush_text(&mut inline_nodes);
                        code::parse_code_span(self, &mut inline_nodes);
                    }
                }
                TokenKind::LeftBrace => {
                    self.flush_text(&mut inline_nodes);
                    inline::parse_inline_construct(self, &mut inline_nodes);
                }
                TokenKind::RightBrace => {
                    self.flush_text(&mut inline_nodes);
                    let token = self.reader.read();
                    let excerpt = self.reader.extract_accumulated(ExcerptKind::ErrorText);
                    let range = self.reader.token_range(&token);
                    let message = "the '}' character should be escaped with a backslash";
                    self.error_with_message(ErrorCode::E0205, range, message);
                    inline_nodes.push(DocNode::ErrorText(DocErrorText::new(
                        excerpt,
                        ErrorCode::E0205,
                        message,
                    )));
                }
                _ => {
                    self.reader.read();
                }
            }
        }

        section_nodes.extend(split_into_paragraphs(inline_nodes));
        DocSection::from_nodes(section_nodes)
    }

    /// Check whether the cursor sits at `@name` in line-start position
    fn at_block_tag_boundary(&self) -> bool {
        if !self.reader.is_line_start() {
            return false;
        }
        let next = self.reader.peek(1);
        next.kind == TokenKind::AsciiWord
            && self
                .reader
                .token_text(&next)
                .starts_with(|c: char| c.is_ascii_alphabetic())
    }

    // =========================================================================
    // Helpers shared by the grammar submodules
    // =========================================================================

    /// Flush the accumulation run into a plain-text node
    pub(crate) fn flush_text(&mut self, sink: &mut Vec<DocNode>) {
        if let Some(excerpt) = self.reader.try_extract_accumulated(ExcerptKind::PlainText) {
            sink.push(DocNode::PlainText(DocPlainText::from_excerpt(excerpt)));
        }
    }

    /// Consume a run of spacing tokens, if any
    pub(crate) fn take_spacing(&mut self) -> Option<Excerpt> {
        while self.reader.kind() == TokenKind::Spacing {
            self.reader.read();
        }
        self.reader.try_extract_accumulated(ExcerptKind::Spacing)
    }

    pub(crate) fn error(&mut self, code: ErrorCode, range: TextRange) {
        self.diagnostics.push(Diagnostic::error(code, range));
    }

    pub(crate) fn error_with_message(&mut self, code: ErrorCode, range: TextRange, message: &str) {
        self.diagnostics
            .push(Diagnostic::new(Severity::Error, code, message, range));
    }

    pub(crate) fn warning(&mut self, code: ErrorCode, range: TextRange) {
        self.diagnostics.push(Diagnostic::warning(code, range));
    }

    /// Range of an excerpt for diagnostics; degenerates to the buffer start
    pub(crate) fn excerpt_range(&self, excerpt: Option<&Excerpt>) -> TextRange {
        excerpt
            .and_then(Excerpt::covering_range)
            .unwrap_or_else(|| {
                TextRange::from_str_range(
                    self.reader.buffer().clone(),
                    TextSize::new(0),
                    TextSize::new(0),
                )
            })
    }

    /// Range of the current token
    pub(crate) fn current_range(&self) -> TextRange {
        let token = self.reader.current();
        self.reader.token_range(&token)
    }
}

/// Check whether a node is spacing-only: a soft break or whitespace text
fn is_whitespace_node(node: &DocNode) -> bool {
    match node {
        DocNode::SoftBreak(_) => true,
        DocNode::PlainText(text) => text.text().trim().is_empty(),
        _ => false,
    }
}

fn paragraph_has_content(paragraph: &DocParagraph) -> bool {
    paragraph.nodes().iter().any(|n| !is_whitespace_node(n))
}

/// Split a flat run of inline nodes into paragraphs at blank lines
///
/// A boundary is a whitespace run containing at least two soft breaks with
/// real content on both sides. Boundary whitespace stays attached to the
/// preceding paragraph so the excerpt stream remains complete.
fn split_into_paragraphs(nodes: Vec<DocNode>) -> Vec<DocNode> {
    let mut paragraphs: Vec<DocNode> = Vec::new();
    let mut current = DocParagraph::new();
    let mut whitespace_run: Vec<DocNode> = Vec::new();

    for node in nodes {
        if is_whitespace_node(&node) {
            whitespace_run.push(node);
            continue;
        }
        let breaks = whitespace_run
            .iter()
            .filter(|n| matches!(n, DocNode::SoftBreak(_)))
            .count();
        let boundary = breaks >= 2 && paragraph_has_content(&current);
        for ws in whitespace_run.drain(..) {
            current.append(ws);
        }
        if boundary {
            paragraphs.push(DocNode::Paragraph(std::mem::take(&mut current)));
        }
        current.append(node);
    }
    for ws in whitespace_run {
        current.append(ws);
    }
    if !current.is_empty() {
        paragraphs.push(DocNode::Paragraph(current));
    }
    paragraphs
}
