//! Pattern matching and tree reconstruction.
//!
//! ```text
//! input tree ──Matcher──▶ Bindings ──Converter──▶ output tree
//!                 ▲                      │
//!             LeftItem             NodeFactory / NodeBuilder
//! ```
//!
//! [`Transformer`] drives both over whole trees: every sibling list is
//! searched for windows matching a rule's left side, and each window is
//! replaced by the node built from the right side.
//!
//! A non-match is `false`/`None` and a failed build is a [`BuildError`];
//! neither aborts the surrounding traversal.

mod bindings;
mod converter;
mod factory;
mod matcher;
mod transformer;
mod tree;

pub use bindings::Bindings;
pub use converter::{BuildError, Converter, NodeBuilder, NodeFactory};
pub use factory::{DescriptorBuilder, DescriptorFactory};
pub use matcher::Matcher;
pub use transformer::{CompiledRule, TransformOptions, Transformer, WindowMatch};
pub use tree::{Node, NodeType, SyntaxNode};
