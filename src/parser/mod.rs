//! Parser for the rule DSL
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Comment pre-pass → comments blanked out, offsets preserved
//!     ↓
//! Lexer (logos) → Tokens with TokenKind
//!     ↓
//! Statement split (';') → Bracket matcher → TokenTree per statement
//!     ↓
//! Grammar → NodeDescriptor / TransformationDescriptor
//!     ↓
//! Program::resolve → type names bound, inheritance wired
//! ```
//!
//! Parsing stops at the first error; no partial program is returned.

mod brackets;
mod comments;
mod cursor;
pub mod errors;
mod grammar;
mod lexer;
mod token;

pub use brackets::{Group, TokenTree, match_brackets, span_of};
pub use comments::strip_comments;
pub use errors::{ErrorCode, ErrorKind, ParseContext, ParseError, ParseErrorBuilder};
pub use grammar::{ParseOptions, parse_program, parse_program_with};
pub use lexer::{Lexer, tokenize};
pub use token::{Token, TokenKind};
