//! Located parse errors
//!
//! Provides:
//! - Error codes for categorization
//! - File name and line range of the offending statement
//! - Hints/suggestions for fixes

use std::sync::Arc;

use thiserror::Error;

use super::codes::{ErrorCode, ErrorKind};
use super::context::ParseContext;
use crate::base::{SourceLocation, Span};

/// A fatal front-end error
///
/// Lexical errors, syntax errors and semantic validation errors all share this
/// type; [`ParseError::kind`] tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {code}: {message}")]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,
    /// Categorized error code
    pub code: ErrorCode,
    /// File and line range
    pub location: SourceLocation,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
}

impl ParseError {
    /// Create a new error with minimal information
    pub fn new(message: impl Into<String>, code: ErrorCode, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            code,
            location,
            hint: None,
        }
    }

    /// Create a builder for more complex error construction
    pub fn builder(code: ErrorCode) -> ParseErrorBuilder {
        ParseErrorBuilder::new(code)
    }

    /// Unknown character in the source
    pub fn lex(ch: char, location: SourceLocation) -> Self {
        Self::new(format!("unrecognized character {ch:?}"), ErrorCode::E0101, location)
    }

    /// A closing bracket that does not close the innermost open bracket
    pub fn unmatched_bracket(
        found: &str,
        open: Option<&str>,
        location: SourceLocation,
    ) -> Self {
        match open {
            Some(open) => Self::new(
                format!("'{found}' does not match '{open}'"),
                ErrorCode::E0207,
                location,
            ),
            None => Self::new(
                format!("unexpected closing '{found}'"),
                ErrorCode::E0205,
                location,
            ),
        }
    }

    /// Stream ended while a bracket was still open
    pub fn unclosed_bracket(open: &str, location: SourceLocation) -> Self {
        let code = match open {
            "{" => ErrorCode::E0202,
            "(" => ErrorCode::E0203,
            "[" => ErrorCode::E0204,
            _ => ErrorCode::E0210,
        };
        Self::new(format!("unclosed '{open}'"), code, location)
    }

    /// Context-aware "unexpected token" error
    pub fn unexpected(found: &str, context: ParseContext, location: SourceLocation) -> Self {
        Self::new(
            format!(
                "unexpected {} {}, expected {}",
                found,
                context.description(),
                context.expected_description()
            ),
            ErrorCode::E0901,
            location,
        )
    }

    /// Add a hint to this error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Check if this error has a hint
    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }

    /// Lexical, syntax or semantic
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// Format the error for display with its category and hint
    pub fn format(&self) -> String {
        let mut result = format!("{self} ({})", self.code.category_description());
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }
}

/// Builder for creating complex parse errors
pub struct ParseErrorBuilder {
    code: ErrorCode,
    message: Option<String>,
    file: Option<Arc<str>>,
    span: Span,
    hint: Option<String>,
}

impl ParseErrorBuilder {
    /// Create a new builder with an error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            file: None,
            span: Span::default(),
            hint: None,
        }
    }

    /// Set the error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the file name
    pub fn file(mut self, file: Arc<str>) -> Self {
        self.file = Some(file);
        self
    }

    /// Set the source span
    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Set file and span from a location
    pub fn location(mut self, location: SourceLocation) -> Self {
        self.file = Some(location.file);
        self.span = location.span;
        self
    }

    /// Add a hint
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Build the parse error, falling back to the code's default message
    pub fn build(self) -> ParseError {
        ParseError {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            code: self.code,
            location: SourceLocation::new(
                self.file.unwrap_or_else(|| Arc::from("<input>")),
                self.span,
            ),
            hint: self.hint,
        }
    }
}
