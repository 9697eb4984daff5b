//! Rule model: what a parsed program means.
//!
//! - [`NodeDescriptor`] / [`NodeRegistry`] - declared node types, inheritance
//!   topology and tag merging
//! - [`LeftItem`] / [`RightItem`] - pattern and reconstruction trees of a
//!   [`TransformationDescriptor`]
//! - [`Program`] - every rule of a parsed source, bucketed by language
//!
//! All objects are built once by the parser and are read-only afterwards,
//! apart from memoized topologies.

mod error;
mod hole;
mod items;
mod merge;
mod node;
mod program;
mod registry;
mod template;
mod transformation;

pub use error::{LiteralError, ModelError};
pub use hole::{Hole, HoleRole, TypedHole};
pub use items::{DataDescriptor, LeftItem, LeftItemKind, MatchMode, PatternDescriptor, SymbolDescriptor};
pub use node::{
    COMMON_LANGUAGE, ChildDescriptor, DescriptorId, LiteralDescriptor, NodeDescriptor, NodeKind,
};
pub use program::{Program, Rule};
pub use registry::{NodeRegistry, UnknownTypes};
pub use template::{ResultingSubtree, RightItem};
pub use transformation::TransformationDescriptor;
