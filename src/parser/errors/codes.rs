//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Code span errors
//! - E02xx: Delimiter errors (comment markers, fences, braces)
//! - E03xx: Tag syntax errors
//! - E04xx: Link/reference errors
//! - E05xx: Structural errors (duplicate tags)
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
///
/// Each error code represents a specific category of parse problem,
/// enabling filtering, documentation, and IDE integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Code span errors
    // =========================================================================
    /// Disallowed character inside a code span
    E0101,
    /// Code span opened but not closed on the same line
    E0102,

    // =========================================================================
    // E02xx: Delimiter errors
    // =========================================================================
    /// Missing `/**` comment opening delimiter
    E0201,
    /// Missing `*/` comment closing delimiter
    E0202,
    /// Code fence opened but never closed
    E0203,
    /// Inline tag `{...}` opened but never closed
    E0204,
    /// Stray delimiter character that should be escaped
    E0205,

    // =========================================================================
    // E03xx: Tag syntax errors
    // =========================================================================
    /// Malformed tag name after `@`
    E0301,
    /// Inline tag missing its `@name`
    E0302,
    /// Parameter block missing a parameter name
    E0303,

    // =========================================================================
    // E04xx: Link/reference errors
    // =========================================================================
    /// Malformed declaration reference
    E0401,
    /// Link tag with no target
    E0402,
    /// Malformed URL in a link tag
    E0403,

    // =========================================================================
    // E05xx: Structural errors
    // =========================================================================
    /// Duplicate occurrence of a singleton block tag
    E0501,
    /// Duplicate modifier tag
    E0502,
    /// Tag not defined in the parser configuration
    E0503,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected content
    E0901,
}

impl ErrorCode {
    /// Default human-readable message for this code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "disallowed character in code span",
            Self::E0102 => "code span is missing its closing backtick",
            Self::E0201 => "expecting a leading '/**' delimiter",
            Self::E0202 => "expecting a trailing '*/' delimiter",
            Self::E0203 => "code fence is missing its closing delimiter",
            Self::E0204 => "inline tag is missing its closing '}'",
            Self::E0205 => "this character should be escaped with a backslash",
            Self::E0301 => "malformed tag name",
            Self::E0302 => "expecting a tag name after '{@'",
            Self::E0303 => "expecting a parameter name after the tag",
            Self::E0401 => "malformed declaration reference",
            Self::E0402 => "link tag has no target",
            Self::E0403 => "malformed URL",
            Self::E0501 => "this block tag may only appear once",
            Self::E0502 => "duplicate modifier tag",
            Self::E0503 => "tag is not defined in the configuration",
            Self::E0901 => "unexpected content",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
