//! Foundation types for the docblock engine.
//!
//! This module provides fundamental types used throughout the parser:
//! - [`TextRange`] - An immutable view into a shared source buffer
//! - [`LineCol`] - 1-based line/column positions for diagnostics
//! - [`Span`], [`TextSize`] - Byte-offset arithmetic (from text-size)
//!
//! This module has NO dependencies on other docblock modules.

mod text_range;

pub use text_range::{LineCol, TextRange};

/// Byte-offset range within a buffer, without the buffer itself.
pub type Span = text_size::TextRange;

pub use text_size::TextSize;

// Re-export text-size for callers that work with raw offsets
pub use text_size;
