//! Diagnostic entries collected during a parse
//!
//! Content problems never abort parsing; they are recorded here and the
//! offending text is embedded in the tree as an error-text node. A caller
//! always receives a complete tree plus this log.

use crate::base::{LineCol, TextRange};

use super::codes::ErrorCode;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Malformed content that produced an error-text node
    #[default]
    Error,
    /// Suspicious but tolerated content (duplicate modifier, unknown tag)
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A single entry in the parse log
///
/// Carries the severity, a categorized code, a human-readable message, and
/// the source range of the offending text in the original buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: ErrorCode,
    message: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        code: ErrorCode,
        message: impl Into<String>,
        range: TextRange,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            range,
        }
    }

    /// Create an error diagnostic with the code's default message
    pub fn error(code: ErrorCode, range: TextRange) -> Self {
        Self::new(Severity::Error, code, code.default_message(), range)
    }

    /// Create a warning diagnostic with the code's default message
    pub fn warning(code: ErrorCode, range: TextRange) -> Self {
        Self::new(Severity::Warning, code, code.default_message(), range)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> &TextRange {
        &self.range
    }

    /// Resolve the start of the offending range to line/column
    pub fn location(&self) -> LineCol {
        self.range.location_of(self.range.pos())
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        let loc = self.location();
        format!(
            "{} {} at {}: {}",
            self.severity.as_str(),
            self.code,
            loc,
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::TextSize;

    #[test]
    fn test_diagnostic_format() {
        let range = TextRange::from_str("abc def").sub_range(TextSize::new(4), TextSize::new(7));
        let diag = Diagnostic::error(ErrorCode::E0901, range);
        let formatted = diag.format();
        assert!(formatted.contains("E0901"));
        assert!(formatted.contains("error"));
        assert!(formatted.contains("1:5"));
    }

    #[test]
    fn test_severity() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
        assert_eq!(Severity::Warning.as_str(), "warning");
    }
}
