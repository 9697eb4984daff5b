//! Error types for rule-model operations.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::Span;

/// Invalid combination of literal descriptor parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("literal type must not be empty")]
    MissingType,

    #[error("a serializer requires an initial value")]
    SerializerWithoutInitial,

    #[error("serializer and parser must be given together")]
    UnpairedSerializer,

    #[error("an exception type requires a parser")]
    ExceptionWithoutParser,
}

/// Errors raised while building or resolving the rule model.
///
/// Every variant carries the span of the rule that caused it so the parser
/// can turn it into a located error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Adding the base would make a descriptor its own ancestor.
    #[error("adding base '{base}' to '{descriptor}' creates an inheritance cycle")]
    Cycle {
        descriptor: SmolStr,
        base: SmolStr,
        span: Span,
    },

    /// A referenced type is not declared in the rule's language or in `common`.
    #[error("unknown node type '{name}' referenced by '{referenced_by}'")]
    UnknownType {
        name: SmolStr,
        referenced_by: SmolStr,
        span: Span,
    },

    /// Two descriptors with the same name in one language.
    #[error("node '{name}' is already declared for language '{language}'")]
    Duplicate {
        name: SmolStr,
        language: SmolStr,
        span: Span,
    },

    /// A template asks to build a type that has no builder.
    #[error("'{name}' is abstract and cannot be built")]
    NotInstantiable { name: SmolStr, span: Span },
}

impl ModelError {
    pub fn span(&self) -> Span {
        match self {
            Self::Cycle { span, .. }
            | Self::UnknownType { span, .. }
            | Self::Duplicate { span, .. }
            | Self::NotInstantiable { span, .. } => *span,
        }
    }
}
