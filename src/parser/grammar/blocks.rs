//! Block tag parsing and comment assembly
//!
//! A `@name` at the start of a line (after spacing) opens a section whose
//! content runs to the next section-opening tag or end of input. Dispatch on
//! the tag name routes blocks into the dedicated DocComment slots; singleton
//! slots keep their first occurrence and later occurrences are logged.

use tracing::trace;

use super::NodeParser;
use crate::config::UnknownTagPolicy;
use crate::parser::errors::ErrorCode;
use crate::parser::lexer::TokenKind;
use crate::syntax::comment::DocComment;
use crate::syntax::excerpt::ExcerptKind;
use crate::syntax::nodes::{DocBlock, DocBlockTag, DocParamBlock};

/// Read `@name` at the cursor into a block tag node
///
/// Precondition (checked by the section loop): the cursor is at `@` followed
/// by a word starting with a letter.
pub(crate) fn read_block_tag(p: &mut NodeParser<'_>) -> DocBlockTag {
    debug_assert_eq!(p.reader.kind(), TokenKind::AtSign);
    p.reader.read();
    debug_assert_eq!(p.reader.kind(), TokenKind::AsciiWord);
    p.reader.read();
    let excerpt = p.reader.extract_accumulated(ExcerptKind::BlockTag);
    DocBlockTag::from_excerpt(excerpt)
}

/// Parse one block (tag + content section) and attach it to the comment
///
/// Precondition: the cursor is at a section-opening (non-modifier) block tag.
pub(crate) fn parse_block(p: &mut NodeParser<'_>, comment: &mut DocComment) {
    let tag = read_block_tag(p);
    let tag_range = p.excerpt_range(tag.excerpt());
    trace!(tag = tag.name(), "block tag");

    if p.config.try_get_tag(tag.name()).is_none()
        && p.config.unknown_tag_policy() == UnknownTagPolicy::Warn
    {
        p.warning(ErrorCode::E0503, tag_range.clone());
    }

    let normalized = tag.normalized_name();
    if normalized.as_str() == "@param" {
        parse_param_block(p, comment, tag);
        return;
    }

    let content = p.parse_section();
    let block = DocBlock::with_content(tag, content);

    match normalized.as_str() {
        "@returns" => {
            if !comment.try_set_returns_block(block) {
                p.error(ErrorCode::E0501, tag_range);
            }
        }
        "@remarks" => {
            if !comment.try_set_remarks_block(block) {
                p.error(ErrorCode::E0501, tag_range);
            }
        }
        "@deprecated" => {
            if !comment.try_set_deprecated_block(block) {
                p.error(ErrorCode::E0501, tag_range);
            }
        }
        "@see" => comment.add_see_block(block),
        _ => comment.add_custom_block(block),
    }
}

/// Parse `@param <name> [- ] <content>`
///
/// The optional hyphen separator between the name and the description is
/// stripped into its own excerpt. A missing name degrades the block to a
/// generic custom block with a diagnostic.
fn parse_param_block(p: &mut NodeParser<'_>, comment: &mut DocComment, tag: DocBlockTag) {
    let tag_range = p.excerpt_range(tag.excerpt());
    let after_tag = p.take_spacing();

    if !at_param_name(p) {
        p.error(ErrorCode::E0303, tag_range);
        let content = p.parse_section();
        comment.add_custom_block(DocBlock::with_content(tag, content));
        return;
    }

    while at_param_name(p) {
        p.reader.read();
    }
    let name_excerpt = p.reader.extract_accumulated(ExcerptKind::ParamName);

    let after_name = p.take_spacing();
    let mut separator = None;
    let mut after_separator = None;
    if p.reader.kind() == TokenKind::Hyphen {
        p.reader.read();
        separator = Some(p.reader.extract_accumulated(ExcerptKind::ParamSeparator));
        after_separator = p.take_spacing();
    }

    let content = p.parse_section();
    comment.params_mut().add(DocParamBlock::from_excerpts(
        tag,
        after_tag,
        name_excerpt,
        after_name,
        separator,
        after_separator,
        content,
    ));
}

/// Token kinds that may appear in an unquoted parameter name
fn at_param_name(p: &NodeParser<'_>) -> bool {
    matches!(
        p.reader.kind(),
        TokenKind::AsciiWord | TokenKind::Underscore | TokenKind::Period | TokenKind::Dollar
    )
}
