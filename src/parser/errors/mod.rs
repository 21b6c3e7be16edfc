//! Parser diagnostics module
//!
//! This module provides the non-fatal error surface of the parser:
//! - Categorized error codes for filtering and documentation
//! - Severity levels (content errors vs. tolerated warnings)
//! - Range-carrying diagnostic entries collected in the parse log

mod codes;
mod diagnostic;

pub use codes::ErrorCode;
pub use diagnostic::{Diagnostic, Severity};
