//! Container nodes: paragraphs, sections, and tag blocks

use smol_str::SmolStr;

use crate::syntax::excerpt::Excerpt;

use super::tags::DocBlockTag;
use super::{normalize_whitespace, DocNode, DocNodeKind, DocPlainText};

/// A paragraph of inline content
///
/// Children are inline nodes only: plain text, soft breaks, escapes, code
/// spans, inline tags, and error text.
#[derive(Debug, Clone, Default)]
pub struct DocParagraph {
    nodes: Vec<DocNode>,
}

impl DocParagraph {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append an inline child node
    ///
    /// # Panics
    /// Panics if `node` is not an inline kind.
    pub fn append(&mut self, node: DocNode) {
        assert!(
            matches!(
                node.kind(),
                DocNodeKind::PlainText
                    | DocNodeKind::SoftBreak
                    | DocNodeKind::EscapedText
                    | DocNodeKind::ErrorText
                    | DocNodeKind::CodeSpan
                    | DocNodeKind::InlineTag
                    | DocNodeKind::LinkTag
                    | DocNodeKind::InheritDocTag
            ),
            "DocParagraph cannot contain a {:?} node",
            node.kind()
        );
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[DocNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Paragraph text with whitespace collapsed and the ends trimmed
    pub fn text(&self) -> String {
        normalize_whitespace(&DocNode::Paragraph(self.clone()).text_content())
    }

    /// Produce a derived copy with spacing normalized for rendering:
    /// runs of spacing and soft breaks collapse to a single space, and
    /// boundary spacing is trimmed. The original paragraph is untouched and
    /// keeps its excerpts, so the transform is idempotent and round-tripping
    /// remains possible from the parsed tree.
    pub fn with_normalized_spacing(&self) -> DocParagraph {
        let mut out: Vec<DocNode> = Vec::new();
        let mut acc = String::new();
        let mut pending_space = false;

        let has_output = |out: &Vec<DocNode>, acc: &String| !out.is_empty() || !acc.is_empty();

        for node in &self.nodes {
            match node {
                DocNode::PlainText(text) => {
                    let raw = text.text();
                    if raw.trim().is_empty() {
                        if has_output(&out, &acc) {
                            pending_space = true;
                        }
                        continue;
                    }
                    if raw.starts_with(|c: char| c.is_whitespace()) && has_output(&out, &acc) {
                        pending_space = true;
                    }
                    for word in raw.split_whitespace() {
                        if pending_space && has_output(&out, &acc) {
                            acc.push(' ');
                        }
                        acc.push_str(word);
                        pending_space = true;
                    }
                    pending_space = raw.ends_with(|c: char| c.is_whitespace());
                }
                DocNode::SoftBreak(_) => {
                    if has_output(&out, &acc) {
                        pending_space = true;
                    }
                }
                other => {
                    if pending_space && has_output(&out, &acc) {
                        acc.push(' ');
                        pending_space = false;
                    }
                    if !acc.is_empty() {
                        out.push(DocNode::PlainText(DocPlainText::new(std::mem::take(
                            &mut acc,
                        ))));
                    }
                    out.push(other.clone());
                }
            }
        }
        if !acc.is_empty() {
            out.push(DocNode::PlainText(DocPlainText::new(acc)));
        }

        DocParagraph { nodes: out }
    }
}

/// A section: the top-level content container of a summary or a block
///
/// Children are paragraphs and fenced code blocks, in document order.
#[derive(Debug, Clone, Default)]
pub struct DocSection {
    nodes: Vec<DocNode>,
}

impl DocSection {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn from_nodes(nodes: Vec<DocNode>) -> Self {
        let mut section = Self::new();
        for node in nodes {
            section.append(node);
        }
        section
    }

    /// Append a section-level child node
    ///
    /// # Panics
    /// Panics if `node` is not a paragraph or fenced code block.
    pub fn append(&mut self, node: DocNode) {
        assert!(
            matches!(
                node.kind(),
                DocNodeKind::Paragraph | DocNodeKind::FencedCode
            ),
            "DocSection cannot contain a {:?} node",
            node.kind()
        );
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[DocNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Section text with whitespace collapsed and the ends trimmed
    pub fn text(&self) -> String {
        normalize_whitespace(&DocNode::Section(self.clone()).text_content())
    }
}

/// A block tag together with its content section
#[derive(Debug, Clone)]
pub struct DocBlock {
    tag: DocBlockTag,
    content: DocSection,
}

impl DocBlock {
    pub fn new(tag: DocBlockTag) -> Self {
        Self {
            tag,
            content: DocSection::new(),
        }
    }

    pub fn with_content(tag: DocBlockTag, content: DocSection) -> Self {
        Self { tag, content }
    }

    pub fn block_tag(&self) -> &DocBlockTag {
        &self.tag
    }

    pub fn content(&self) -> &DocSection {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut DocSection {
        &mut self.content
    }
}

/// A `@param name - description` block
#[derive(Debug, Clone)]
pub struct DocParamBlock {
    tag: DocBlockTag,
    after_tag: Option<Excerpt>,
    name_excerpt: Option<Excerpt>,
    parameter_name: SmolStr,
    after_name: Option<Excerpt>,
    separator: Option<Excerpt>,
    after_separator: Option<Excerpt>,
    content: DocSection,
}

impl DocParamBlock {
    /// Construct from a literal parameter name
    ///
    /// # Panics
    /// Panics if `parameter_name` is empty.
    pub fn new(parameter_name: &str) -> Self {
        assert!(!parameter_name.is_empty(), "parameter name must not be empty");
        Self {
            tag: DocBlockTag::new("@param"),
            after_tag: None,
            name_excerpt: None,
            parameter_name: SmolStr::new(parameter_name),
            after_name: None,
            separator: None,
            after_separator: None,
            content: DocSection::new(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_excerpts(
        tag: DocBlockTag,
        after_tag: Option<Excerpt>,
        name_excerpt: Excerpt,
        after_name: Option<Excerpt>,
        separator: Option<Excerpt>,
        after_separator: Option<Excerpt>,
        content: DocSection,
    ) -> Self {
        let parameter_name = SmolStr::new(name_excerpt.text());
        Self {
            tag,
            after_tag,
            name_excerpt: Some(name_excerpt),
            parameter_name,
            after_name,
            separator,
            after_separator,
            content,
        }
    }

    pub fn block_tag(&self) -> &DocBlockTag {
        &self.tag
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    pub fn content(&self) -> &DocSection {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut DocSection {
        &mut self.content
    }

    pub(crate) fn header_excerpts(&self) -> Vec<&Excerpt> {
        let mut out = Vec::new();
        out.extend(self.tag.excerpt());
        out.extend(self.after_tag.as_ref());
        out.extend(self.name_excerpt.as_ref());
        out.extend(self.after_name.as_ref());
        out.extend(self.separator.as_ref());
        out.extend(self.after_separator.as_ref());
        out
    }
}
