//! Parser error handling module
//!
//! Every failure of the DSL front-end is reported as a single [`ParseError`]:
//! - Categorized error codes for filtering and documentation
//! - A source location (file name and line range)
//! - Context-aware messages ("unexpected ',' in pattern children")
//! - Optional hints for common mistakes
//!
//! Parsing is fail-fast: the first error aborts the whole program.

mod codes;
mod context;
mod error;

pub use codes::{ErrorCode, ErrorKind};
pub use context::ParseContext;
pub use error::{ParseError, ParseErrorBuilder};
