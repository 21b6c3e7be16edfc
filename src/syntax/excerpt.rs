//! Excerpts: named slices of original source text backing parsed nodes
//!
//! An excerpt attaches a semantic role to one or more spans of the shared
//! buffer. Most excerpts cover a single contiguous run; multi-part excerpts
//! occur when content spans lines (fenced code), where the decoration
//! between lines must not leak into the content.

use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

use crate::base::{Span, TextRange, TextSize};

/// The semantic role an excerpt plays in the node that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExcerptKind {
    PlainText,
    SoftBreak,
    EscapedText,
    ErrorText,
    Spacing,

    // Block tags
    BlockTag,
    ParamName,
    ParamSeparator,

    // Inline tags
    TagOpen,
    TagName,
    TagContent,
    TagClose,
    LinkPipe,
    LinkUrl,
    LinkText,

    // Code
    CodeDelimiter,
    CodeContent,
    FenceDelimiter,
    FenceLanguage,

    // Declaration references
    PackageName,
    ImportPath,
    ImportHash,
    MemberDot,
    MemberIdentifier,
    MemberSymbolBracket,
    MemberSelector,
    SelectorColon,
}

/// A semantic slice of the original buffer
///
/// Parts are ordered and non-overlapping. `text()` for a single-part excerpt
/// slices the buffer directly; multi-part excerpts join their parts through
/// a compute-once cell. The cell is not thread-safe across concurrent first
/// access; a parsed tree must be externally synchronized to share across
/// threads.
#[derive(Clone)]
pub struct Excerpt {
    kind: ExcerptKind,
    buffer: Arc<str>,
    parts: Vec<Span>,
    cache: OnceCell<String>,
}

impl Excerpt {
    /// Create an excerpt from ordered parts
    ///
    /// # Panics
    /// Panics if any part lies outside the buffer or the parts are not in
    /// ascending order.
    pub fn from_parts(kind: ExcerptKind, buffer: Arc<str>, parts: Vec<Span>) -> Self {
        let len = TextSize::of(&*buffer);
        let mut previous_end = TextSize::new(0);
        for part in &parts {
            assert!(part.end() <= len, "Excerpt: part {part:?} exceeds buffer length");
            assert!(
                part.start() >= previous_end,
                "Excerpt: parts must be ordered and non-overlapping"
            );
            previous_end = part.end();
        }
        Self {
            kind,
            buffer,
            parts,
            cache: OnceCell::new(),
        }
    }

    /// Create a single-part excerpt from a buffer-backed range
    pub fn from_range(kind: ExcerptKind, range: TextRange) -> Self {
        let span = range.span();
        Self::from_parts(kind, range.buffer().clone(), vec![span])
    }

    pub fn kind(&self) -> ExcerptKind {
        self.kind
    }

    pub fn buffer(&self) -> &Arc<str> {
        &self.buffer
    }

    pub fn parts(&self) -> &[Span] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|p| p.is_empty())
    }

    /// The text of this excerpt
    ///
    /// Single-part excerpts borrow from the buffer; multi-part excerpts are
    /// joined lazily once and cached.
    pub fn text(&self) -> &str {
        match self.parts.len() {
            0 => "",
            1 => {
                let span = self.parts[0];
                &self.buffer[usize::from(span.start())..usize::from(span.end())]
            }
            _ => self.cache.get_or_init(|| {
                let mut out = String::new();
                for span in &self.parts {
                    out.push_str(&self.buffer[usize::from(span.start())..usize::from(span.end())]);
                }
                out
            }),
        }
    }

    /// A buffer-backed range covering the whole excerpt (first part start to
    /// last part end); `None` when the excerpt has no parts.
    pub fn covering_range(&self) -> Option<TextRange> {
        let first = self.parts.first()?;
        let last = self.parts.last()?;
        Some(TextRange::from_str_range(
            self.buffer.clone(),
            first.start(),
            last.end(),
        ))
    }
}

impl fmt::Debug for Excerpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Excerpt({:?}, {:?})", self.kind, self.text())
    }
}

impl PartialEq for Excerpt {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.parts == other.parts
            && Arc::ptr_eq(&self.buffer, &other.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_part_text() {
        let buffer: Arc<str> = Arc::from("hello world");
        let excerpt = Excerpt::from_parts(
            ExcerptKind::PlainText,
            buffer,
            vec![Span::new(TextSize::new(6), TextSize::new(11))],
        );
        assert_eq!(excerpt.text(), "world");
    }

    #[test]
    fn test_multi_part_joins_without_gap_content() {
        let buffer: Arc<str> = Arc::from("aaa|XX|bbb");
        let excerpt = Excerpt::from_parts(
            ExcerptKind::CodeContent,
            buffer,
            vec![
                Span::new(TextSize::new(0), TextSize::new(3)),
                Span::new(TextSize::new(7), TextSize::new(10)),
            ],
        );
        assert_eq!(excerpt.text(), "aaabbb");
        // second call hits the cache
        assert_eq!(excerpt.text(), "aaabbb");
    }

    #[test]
    #[should_panic(expected = "ordered and non-overlapping")]
    fn test_unordered_parts_panic() {
        let buffer: Arc<str> = Arc::from("abcdef");
        Excerpt::from_parts(
            ExcerptKind::PlainText,
            buffer,
            vec![
                Span::new(TextSize::new(3), TextSize::new(4)),
                Span::new(TextSize::new(0), TextSize::new(2)),
            ],
        );
    }

    #[test]
    fn test_covering_range() {
        let buffer: Arc<str> = Arc::from("aaa|XX|bbb");
        let excerpt = Excerpt::from_parts(
            ExcerptKind::CodeContent,
            buffer,
            vec![
                Span::new(TextSize::new(0), TextSize::new(3)),
                Span::new(TextSize::new(7), TextSize::new(10)),
            ],
        );
        let covering = excerpt.covering_range().unwrap();
        assert_eq!(covering.as_str(), "aaa|XX|bbb");
    }
}
