//! Syntax layer: the DocNode AST, excerpts, and the DocComment root
//!
//! Nodes are immutable after construction except for compute-once text
//! caches. Trees are strictly parent-to-child owned; downstream consumers
//! walk them read-only, dispatching on [`nodes::DocNodeKind`].

pub mod comment;
pub mod excerpt;
pub mod nodes;

pub use comment::{DocComment, DocParamCollection, ModifierTagSet};
pub use excerpt::{Excerpt, ExcerptKind};
pub use nodes::{
    DocBlock, DocBlockTag, DocCodeSpan, DocDeclarationReference, DocErrorText, DocEscapedText,
    DocFencedCode, DocInheritDocTag, DocInlineTag, DocLinkTag, DocMemberIdentifier,
    DocMemberReference, DocMemberSelector, DocMemberSymbol, DocNode, DocNodeKind, DocNodeRef,
    DocParagraph, DocParamBlock, DocPlainText, DocSection, DocSoftBreak, LinkDestination,
    SelectorKind, TextSource,
};
