//! # docblock-base
//!
//! Core library for parsing structured documentation comments into a
//! navigable, lossless syntax tree.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser    → Logos lexer, line extractor, recursive-descent node parser,
//!             diagnostics, ParserContext
//!   ↓
//! syntax    → DocNode AST, excerpts, containers, DocComment root
//!   ↓
//! config    → ParserConfiguration, tag registry, standard tag library
//!   ↓
//! base      → Primitives (TextRange, LineCol)
//! ```
//!
//! ## Example
//!
//! ```
//! use docblock::parser::parse_comment;
//!
//! let context = parse_comment("/** Adds one.\n * @param x - the input\n */");
//! assert!(context.ok());
//! assert_eq!(context.doc_comment().summary_section().text(), "Adds one.");
//! let param = context.doc_comment().params().try_get_block_by_name("x").unwrap();
//! assert_eq!(param.content().text(), "the input");
//! ```

// ============================================================================
// MODULES (dependency order: base → config → syntax → parser)
// ============================================================================

/// Foundation types: TextRange, LineCol
pub mod base;

/// Parser configuration: tag registry, standard tags, strictness
pub mod config;

/// Syntax: DocNode AST, excerpts, DocComment root aggregate
pub mod syntax;

/// Parser: logos lexer, line extractor, node parser, diagnostics
pub mod parser;

// Re-export the types most callers need
pub use base::{LineCol, Span, TextRange, TextSize};
pub use config::{ParserConfiguration, TagDefinition, TagSyntaxKind, UnknownTagPolicy};
pub use parser::{parse_comment, Diagnostic, DocParser, ErrorCode, ParserContext, Severity};
pub use syntax::{DocComment, DocNode, DocNodeKind};
