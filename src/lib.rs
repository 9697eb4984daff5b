//! # treeforge
//!
//! A DSL for syntax-tree node hierarchies and tree transformations, with the
//! engine that runs them.
//!
//! ```text
//! Expression <- Binary | Literal;
//! Binary     <- left@Expression, op@Operator, right@Expression;
//! Expression#1, Operator<#2>, Expression#3 -> Binary(#1, Operator<#2>, #3);
//! ```
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! engine    → Matcher, Converter, Transformer, runtime Node
//!   ↓
//! parser    → Comment pre-pass, Logos lexer, bracket matcher, statement grammar
//!   ↓
//! model     → Node descriptors, topology, tag merge, rule items, Program
//!   ↓
//! base      → Primitives (Position, Span, LineIndex, SourceLocation)
//! ```

// ============================================================================
// MODULES (dependency order: base → model → parser → engine)
// ============================================================================

/// Foundation types: Span, Position, LineIndex, SourceLocation
pub mod base;

/// Rule model: descriptors, items, Program
pub mod model;

/// Parser: comment pre-pass, lexer, bracket matcher, grammar, errors
pub mod parser;

/// Engine: matching, conversion, transformation
pub mod engine;

// Re-export the entry points
pub use base::{LineIndex, Position, SourceLocation, Span, TextRange, TextSize};
pub use engine::{
    Bindings, BuildError, Converter, DescriptorFactory, Matcher, Node, NodeType, SyntaxNode,
    TransformOptions, Transformer,
};
pub use model::{Program, Rule, UnknownTypes};
pub use parser::{ErrorCode, ParseError, ParseOptions, parse_program, parse_program_with};
