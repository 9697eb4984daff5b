//! Foundation types for the treeforge toolchain.
//!
//! This module provides the source-position primitives used by every later stage:
//! - [`Position`], [`Span`] - Line/column positions for tokens and rules
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`SourceLocation`] - File name plus span, attached to every parse error
//! - [`Quoted`] - Text written back as a DSL string literal
//!
//! This module has NO dependencies on other treeforge modules.

mod line_index;
mod location;
mod position;
mod quoted;

pub use line_index::LineIndex;
pub use location::SourceLocation;
pub use position::{Position, Span};
pub use quoted::Quoted;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
