//! Immutable views into a shared source buffer.
//!
//! Every line, token, and excerpt produced by the parser addresses the
//! original buffer the caller supplied, so locations reported anywhere in
//! the pipeline can always be traced back to real source coordinates.

use std::fmt;
use std::sync::Arc;

use crate::base::{Span, TextSize};

/// A 1-based line/column position.
///
/// `LineCol::NONE` (line 0, column 0) is the sentinel returned for an empty
/// buffer or an out-of-range offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    /// Sentinel for "no location": an empty buffer or an out-of-range offset.
    pub const NONE: LineCol = LineCol { line: 0, col: 0 };

    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Check whether this is the degenerate sentinel position.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// An immutable view of a range within a shared text buffer.
///
/// The buffer is reference-counted, so sub-ranging never copies text and a
/// range can outlive the parse that produced it. Construction validates the
/// bounds and panics on violation: a bad range is a programmer error, not a
/// content error.
#[derive(Clone)]
pub struct TextRange {
    buffer: Arc<str>,
    span: Span,
}

impl TextRange {
    /// Create a range covering an entire buffer.
    pub fn from_str(text: impl Into<Arc<str>>) -> Self {
        let buffer: Arc<str> = text.into();
        let span = Span::new(TextSize::new(0), TextSize::of(&*buffer));
        Self { buffer, span }
    }

    /// Create a range covering `pos..end` of `buffer`.
    ///
    /// # Panics
    /// Panics if `end < pos` or either offset lies outside the buffer.
    pub fn from_str_range(buffer: Arc<str>, pos: TextSize, end: TextSize) -> Self {
        let len = TextSize::of(&*buffer);
        assert!(pos <= end, "TextRange: pos {pos:?} exceeds end {end:?}");
        assert!(end <= len, "TextRange: end {end:?} exceeds buffer length {len:?}");
        Self {
            buffer,
            span: Span::new(pos, end),
        }
    }

    /// The shared buffer this range points into.
    pub fn buffer(&self) -> &Arc<str> {
        &self.buffer
    }

    /// Start offset, absolute within the buffer.
    pub fn pos(&self) -> TextSize {
        self.span.start()
    }

    /// End offset (exclusive), absolute within the buffer.
    pub fn end(&self) -> TextSize {
        self.span.end()
    }

    /// The underlying offset pair.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn len(&self) -> TextSize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// The text this range covers.
    pub fn as_str(&self) -> &str {
        &self.buffer[usize::from(self.span.start())..usize::from(self.span.end())]
    }

    /// Create a new range into the same buffer with different absolute bounds.
    ///
    /// # Panics
    /// Panics under the same conditions as [`TextRange::from_str_range`].
    pub fn sub_range(&self, pos: TextSize, end: TextSize) -> Self {
        Self::from_str_range(self.buffer.clone(), pos, end)
    }

    /// Resolve an absolute offset to a 1-based line/column position.
    ///
    /// Returns [`LineCol::NONE`] for an empty buffer or an offset past the
    /// end. Newlines advance the line counter; `\r` does not advance the
    /// column, and a tab counts as a single column.
    ///
    /// This walks the buffer from the start on every call - O(offset), with
    /// no caching. Callers that need many lookups should batch them.
    pub fn location_of(&self, offset: TextSize) -> LineCol {
        let text = &*self.buffer;
        if text.is_empty() || offset > TextSize::of(text) {
            return LineCol::NONE;
        }
        let target = usize::from(offset);
        let mut line = 1u32;
        let mut col = 1u32;
        for (idx, ch) in text.char_indices() {
            if idx >= target {
                break;
            }
            match ch {
                '\n' => {
                    line += 1;
                    col = 1;
                }
                '\r' => {}
                _ => col += 1,
            }
        }
        LineCol::new(line, col)
    }

    /// Render the buffer with `left`/`right` delimiters inserted around this
    /// range. Intended for test assertions and debug output.
    pub fn debug_dump(&self, left: &str, right: &str) -> String {
        let pos = usize::from(self.span.start());
        let end = usize::from(self.span.end());
        let mut out = String::with_capacity(self.buffer.len() + left.len() + right.len());
        out.push_str(&self.buffer[..pos]);
        out.push_str(left);
        out.push_str(&self.buffer[pos..end]);
        out.push_str(right);
        out.push_str(&self.buffer[end..]);
        out
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TextRange({:?}..{:?} {:?})",
            u32::from(self.span.start()),
            u32::from(self.span.end()),
            self.as_str()
        )
    }
}

impl PartialEq for TextRange {
    fn eq(&self, other: &Self) -> bool {
        self.span == other.span && Arc::ptr_eq(&self.buffer, &other.buffer)
    }
}

impl Eq for TextRange {}
