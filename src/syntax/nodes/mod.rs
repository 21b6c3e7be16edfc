//! The DocNode AST
//!
//! The node set is a closed tagged union: every variant is listed in
//! [`DocNode`] and [`DocNodeKind`], and cross-cutting behavior (child
//! enumeration, text flattening) is implemented by exhaustive matching, so
//! adding a variant breaks every walker at compile time instead of silently
//! missing it.
//!
//! Each node comes in two construction shapes that share one immutable core:
//! *parsed* nodes hold excerpts of the original buffer, *constructed* nodes
//! hold literal values supplied by the caller. Shape validation on
//! constructed values (a plain-text value must not contain a newline) panics
//! at the call site - that is a programmer error, not a content error.

mod containers;
mod leaves;
mod reference;
mod tags;

pub use containers::{DocBlock, DocParagraph, DocParamBlock, DocSection};
pub use leaves::{DocCodeSpan, DocErrorText, DocEscapedText, DocFencedCode, DocPlainText, DocSoftBreak};
pub use reference::{
    DocDeclarationReference, DocMemberIdentifier, DocMemberReference, DocMemberSelector,
    DocMemberSymbol, SelectorKind,
};
pub use tags::{DocBlockTag, DocInheritDocTag, DocInlineTag, DocLinkTag, LinkDestination};

use crate::syntax::comment::{DocComment, DocParamCollection};
use crate::syntax::excerpt::Excerpt;

/// The closed set of node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocNodeKind {
    Comment,
    Section,
    Paragraph,
    PlainText,
    SoftBreak,
    EscapedText,
    ErrorText,
    CodeSpan,
    FencedCode,
    BlockTag,
    Block,
    ParamBlock,
    ParamCollection,
    InlineTag,
    LinkTag,
    InheritDocTag,
    DeclarationReference,
    MemberReference,
    MemberIdentifier,
    MemberSymbol,
    MemberSelector,
}

/// The text backing a node: an excerpt of the parsed buffer, or a literal
/// value supplied when the node was constructed programmatically.
#[derive(Debug, Clone, PartialEq)]
pub enum TextSource {
    Parsed(Excerpt),
    Literal(String),
}

impl TextSource {
    pub fn text(&self) -> &str {
        match self {
            TextSource::Parsed(excerpt) => excerpt.text(),
            TextSource::Literal(value) => value,
        }
    }

    /// The backing excerpt, when this node was parsed from source
    pub fn excerpt(&self) -> Option<&Excerpt> {
        match self {
            TextSource::Parsed(excerpt) => Some(excerpt),
            TextSource::Literal(_) => None,
        }
    }
}

/// A documentation AST node
///
/// Owned tagged union over the closed kind set. Trees are strictly
/// parent-to-child owned and acyclic; nodes hold no parent references.
#[derive(Debug, Clone)]
pub enum DocNode {
    Comment(DocComment),
    Section(DocSection),
    Paragraph(DocParagraph),
    PlainText(DocPlainText),
    SoftBreak(DocSoftBreak),
    EscapedText(DocEscapedText),
    ErrorText(DocErrorText),
    CodeSpan(DocCodeSpan),
    FencedCode(DocFencedCode),
    BlockTag(DocBlockTag),
    Block(DocBlock),
    ParamBlock(DocParamBlock),
    ParamCollection(DocParamCollection),
    InlineTag(DocInlineTag),
    LinkTag(DocLinkTag),
    InheritDocTag(DocInheritDocTag),
    DeclarationReference(DocDeclarationReference),
    MemberReference(DocMemberReference),
    MemberIdentifier(DocMemberIdentifier),
    MemberSymbol(DocMemberSymbol),
    MemberSelector(DocMemberSelector),
}

/// A borrowed view of a node, used for generic tree walking
///
/// Mirrors [`DocNode`] variant-for-variant; aggregates that store typed
/// fields (rather than `DocNode` children) expose them through this view.
#[derive(Debug, Clone, Copy)]
pub enum DocNodeRef<'a> {
    Comment(&'a DocComment),
    Section(&'a DocSection),
    Paragraph(&'a DocParagraph),
    PlainText(&'a DocPlainText),
    SoftBreak(&'a DocSoftBreak),
    EscapedText(&'a DocEscapedText),
    ErrorText(&'a DocErrorText),
    CodeSpan(&'a DocCodeSpan),
    FencedCode(&'a DocFencedCode),
    BlockTag(&'a DocBlockTag),
    Block(&'a DocBlock),
    ParamBlock(&'a DocParamBlock),
    ParamCollection(&'a DocParamCollection),
    InlineTag(&'a DocInlineTag),
    LinkTag(&'a DocLinkTag),
    InheritDocTag(&'a DocInheritDocTag),
    DeclarationReference(&'a DocDeclarationReference),
    MemberReference(&'a DocMemberReference),
    MemberIdentifier(&'a DocMemberIdentifier),
    MemberSymbol(&'a DocMemberSymbol),
    MemberSelector(&'a DocMemberSelector),
}

impl DocNode {
    pub fn kind(&self) -> DocNodeKind {
        self.as_ref().kind()
    }

    /// Borrowed view of this node for generic walking
    pub fn as_ref(&self) -> DocNodeRef<'_> {
        match self {
            DocNode::Comment(n) => DocNodeRef::Comment(n),
            DocNode::Section(n) => DocNodeRef::Section(n),
            DocNode::Paragraph(n) => DocNodeRef::Paragraph(n),
            DocNode::PlainText(n) => DocNodeRef::PlainText(n),
            DocNode::SoftBreak(n) => DocNodeRef::SoftBreak(n),
            DocNode::EscapedText(n) => DocNodeRef::EscapedText(n),
            DocNode::ErrorText(n) => DocNodeRef::ErrorText(n),
            DocNode::CodeSpan(n) => DocNodeRef::CodeSpan(n),
            DocNode::FencedCode(n) => DocNodeRef::FencedCode(n),
            DocNode::BlockTag(n) => DocNodeRef::BlockTag(n),
            DocNode::Block(n) => DocNodeRef::Block(n),
            DocNode::ParamBlock(n) => DocNodeRef::ParamBlock(n),
            DocNode::ParamCollection(n) => DocNodeRef::ParamCollection(n),
            DocNode::InlineTag(n) => DocNodeRef::InlineTag(n),
            DocNode::LinkTag(n) => DocNodeRef::LinkTag(n),
            DocNode::InheritDocTag(n) => DocNodeRef::InheritDocTag(n),
            DocNode::DeclarationReference(n) => DocNodeRef::DeclarationReference(n),
            DocNode::MemberReference(n) => DocNodeRef::MemberReference(n),
            DocNode::MemberIdentifier(n) => DocNodeRef::MemberIdentifier(n),
            DocNode::MemberSymbol(n) => DocNodeRef::MemberSymbol(n),
            DocNode::MemberSelector(n) => DocNodeRef::MemberSelector(n),
        }
    }

    /// Ordered child nodes; absent optional children are skipped
    pub fn children(&self) -> Vec<DocNodeRef<'_>> {
        self.as_ref().children()
    }

    /// Flatten the subtree to its plain-text content
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.as_ref().append_text_content(&mut out);
        out
    }

    /// Every backing excerpt in the subtree
    ///
    /// For a tree parsed from source, concatenating these in buffer order
    /// reproduces the extracted line content exactly (round-trip fidelity).
    pub fn excerpts(&self) -> Vec<&Excerpt> {
        self.as_ref().excerpts()
    }
}

impl<'a> DocNodeRef<'a> {
    pub fn kind(&self) -> DocNodeKind {
        match self {
            DocNodeRef::Comment(_) => DocNodeKind::Comment,
            DocNodeRef::Section(_) => DocNodeKind::Section,
            DocNodeRef::Paragraph(_) => DocNodeKind::Paragraph,
            DocNodeRef::PlainText(_) => DocNodeKind::PlainText,
            DocNodeRef::SoftBreak(_) => DocNodeKind::SoftBreak,
            DocNodeRef::EscapedText(_) => DocNodeKind::EscapedText,
            DocNodeRef::ErrorText(_) => DocNodeKind::ErrorText,
            DocNodeRef::CodeSpan(_) => DocNodeKind::CodeSpan,
            DocNodeRef::FencedCode(_) => DocNodeKind::FencedCode,
            DocNodeRef::BlockTag(_) => DocNodeKind::BlockTag,
            DocNodeRef::Block(_) => DocNodeKind::Block,
            DocNodeRef::ParamBlock(_) => DocNodeKind::ParamBlock,
            DocNodeRef::ParamCollection(_) => DocNodeKind::ParamCollection,
            DocNodeRef::InlineTag(_) => DocNodeKind::InlineTag,
            DocNodeRef::LinkTag(_) => DocNodeKind::LinkTag,
            DocNodeRef::InheritDocTag(_) => DocNodeKind::InheritDocTag,
            DocNodeRef::DeclarationReference(_) => DocNodeKind::DeclarationReference,
            DocNodeRef::MemberReference(_) => DocNodeKind::MemberReference,
            DocNodeRef::MemberIdentifier(_) => DocNodeKind::MemberIdentifier,
            DocNodeRef::MemberSymbol(_) => DocNodeKind::MemberSymbol,
            DocNodeRef::MemberSelector(_) => DocNodeKind::MemberSelector,
        }
    }

    /// Ordered child nodes; absent optional children are skipped
    pub fn children(&self) -> Vec<DocNodeRef<'a>> {
        match *self {
            DocNodeRef::Comment(comment) => {
                let mut children: Vec<DocNodeRef<'a>> =
                    vec![DocNodeRef::Section(comment.summary_section())];
                children.push(DocNodeRef::ParamCollection(comment.params()));
                if let Some(block) = comment.returns_block() {
                    children.push(DocNodeRef::Block(block));
                }
                if let Some(block) = comment.remarks_block() {
                    children.push(DocNodeRef::Block(block));
                }
                if let Some(block) = comment.deprecated_block() {
                    children.push(DocNodeRef::Block(block));
                }
                children.extend(comment.see_blocks().iter().map(DocNodeRef::Block));
                children.extend(comment.custom_blocks().iter().map(DocNodeRef::Block));
                children.extend(
                    comment
                        .modifier_tags()
                        .iter()
                        .map(DocNodeRef::BlockTag),
                );
                children
            }
            DocNodeRef::Section(section) => section.nodes().iter().map(DocNode::as_ref).collect(),
            DocNodeRef::Paragraph(paragraph) => {
                paragraph.nodes().iter().map(DocNode::as_ref).collect()
            }
            DocNodeRef::Block(block) => vec![
                DocNodeRef::BlockTag(block.block_tag()),
                DocNodeRef::Section(block.content()),
            ],
            DocNodeRef::ParamBlock(param) => vec![
                DocNodeRef::BlockTag(param.block_tag()),
                DocNodeRef::Section(param.content()),
            ],
            DocNodeRef::ParamCollection(collection) => {
                collection.blocks().iter().map(DocNodeRef::ParamBlock).collect()
            }
            DocNodeRef::LinkTag(link) => link
                .code_destination()
                .map(DocNodeRef::DeclarationReference)
                .into_iter()
                .collect(),
            DocNodeRef::InheritDocTag(tag) => tag
                .declaration_reference()
                .map(DocNodeRef::DeclarationReference)
                .into_iter()
                .collect(),
            DocNodeRef::DeclarationReference(reference) => reference
                .member_references()
                .iter()
                .map(DocNodeRef::MemberReference)
                .collect(),
            DocNodeRef::MemberReference(member) => {
                let mut children: Vec<DocNodeRef<'a>> = Vec::new();
                if let Some(identifier) = member.member_identifier() {
                    children.push(DocNodeRef::MemberIdentifier(identifier));
                }
                if let Some(symbol) = member.member_symbol() {
                    children.push(DocNodeRef::MemberSymbol(symbol));
                }
                if let Some(selector) = member.selector() {
                    children.push(DocNodeRef::MemberSelector(selector));
                }
                children
            }
            DocNodeRef::MemberSymbol(symbol) => {
                vec![DocNodeRef::DeclarationReference(symbol.symbol_reference())]
            }
            DocNodeRef::PlainText(_)
            | DocNodeRef::SoftBreak(_)
            | DocNodeRef::EscapedText(_)
            | DocNodeRef::ErrorText(_)
            | DocNodeRef::CodeSpan(_)
            | DocNodeRef::FencedCode(_)
            | DocNodeRef::BlockTag(_)
            | DocNodeRef::InlineTag(_)
            | DocNodeRef::MemberIdentifier(_)
            | DocNodeRef::MemberSelector(_) => Vec::new(),
        }
    }

    /// Every backing excerpt in the subtree, including delimiter and spacing
    /// excerpts that carry no content of their own
    pub fn excerpts(&self) -> Vec<&'a Excerpt> {
        match *self {
            DocNodeRef::PlainText(text) => text.excerpt().into_iter().collect(),
            DocNodeRef::SoftBreak(soft_break) => soft_break.excerpt().into_iter().collect(),
            DocNodeRef::EscapedText(escaped) => escaped.excerpt().into_iter().collect(),
            DocNodeRef::ErrorText(error) => vec![error.excerpt()],
            DocNodeRef::CodeSpan(code) => code.all_excerpts(),
            DocNodeRef::FencedCode(fence) => fence.all_excerpts(),
            DocNodeRef::BlockTag(tag) => tag.excerpt().into_iter().collect(),
            DocNodeRef::InlineTag(tag) => tag.all_excerpts(),
            DocNodeRef::LinkTag(link) => link.all_excerpts(),
            DocNodeRef::InheritDocTag(tag) => tag.all_excerpts(),
            DocNodeRef::DeclarationReference(reference) => reference.all_excerpts(),
            DocNodeRef::MemberReference(member) => member.all_excerpts(),
            DocNodeRef::MemberIdentifier(identifier) => identifier.excerpt().into_iter().collect(),
            DocNodeRef::MemberSymbol(symbol) => symbol.all_excerpts(),
            DocNodeRef::MemberSelector(selector) => selector.all_excerpts(),
            DocNodeRef::Block(block) => {
                let mut out: Vec<&'a Excerpt> = block.block_tag().excerpt().into_iter().collect();
                out.extend(DocNodeRef::Section(block.content()).excerpts());
                out
            }
            DocNodeRef::ParamBlock(param) => {
                let mut out = param.header_excerpts();
                out.extend(DocNodeRef::Section(param.content()).excerpts());
                out
            }
            DocNodeRef::Comment(_)
            | DocNodeRef::Section(_)
            | DocNodeRef::Paragraph(_)
            | DocNodeRef::ParamCollection(_) => {
                let mut out = Vec::new();
                for child in self.children() {
                    out.extend(child.excerpts());
                }
                out
            }
        }
    }

    pub(crate) fn append_text_content(&self, out: &mut String) {
        match *self {
            DocNodeRef::PlainText(text) => out.push_str(text.text()),
            DocNodeRef::EscapedText(escaped) => out.push_str(escaped.decoded_text()),
            DocNodeRef::SoftBreak(_) => out.push('\n'),
            DocNodeRef::CodeSpan(code) => out.push_str(code.code()),
            DocNodeRef::FencedCode(fence) => out.push_str(fence.code()),
            DocNodeRef::ErrorText(error) => out.push_str(error.text()),
            DocNodeRef::LinkTag(link) => {
                if let Some(display) = link.effective_display_text() {
                    out.push_str(&display);
                }
            }
            DocNodeRef::MemberIdentifier(identifier) => out.push_str(identifier.identifier()),
            // Tag machinery contributes no prose of its own
            DocNodeRef::BlockTag(_)
            | DocNodeRef::InlineTag(_)
            | DocNodeRef::InheritDocTag(_)
            | DocNodeRef::DeclarationReference(_)
            | DocNodeRef::MemberReference(_)
            | DocNodeRef::MemberSymbol(_)
            | DocNodeRef::MemberSelector(_) => {}
            DocNodeRef::Comment(_)
            | DocNodeRef::Section(_)
            | DocNodeRef::Paragraph(_)
            | DocNodeRef::Block(_)
            | DocNodeRef::ParamBlock(_)
            | DocNodeRef::ParamCollection(_) => {
                for child in self.children() {
                    child.append_text_content(out);
                }
            }
        }
    }
}

/// Collapse whitespace runs to single spaces and trim the ends
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
