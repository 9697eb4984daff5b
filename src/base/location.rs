use std::fmt;
use std::sync::Arc;

use super::Span;

/// A file name plus a span inside it.
///
/// Displayed as `file:line` or `file:first-last` with 1-based line numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: Arc<str>,
    pub span: Span,
}

impl SourceLocation {
    pub fn new(file: Arc<str>, span: Span) -> Self {
        Self { file, span }
    }

    /// 1-based first line
    pub fn first_line(&self) -> usize {
        self.span.start.line + 1
    }

    /// 1-based last line
    pub fn last_line(&self) -> usize {
        self.span.end.line + 1
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first_line() == self.last_line() {
            write!(f, "{}:{}", self.file, self.first_line())
        } else {
            write!(f, "{}:{}-{}", self.file, self.first_line(), self.last_line())
        }
    }
}
