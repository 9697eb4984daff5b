//! Parse context tracking for context-aware error messages
//!
//! Each grammar function knows which part of a rule it is reading; the context
//! is folded into messages such as "unexpected ',' in pattern children".

/// Represents the current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// Left side of a node rule (`Name <- ...`)
    NodeName,
    /// Right side of a node rule
    NodeBody,
    /// A single child declaration (`[tag@]Type`)
    ChildDeclaration,
    /// Left side of a transformation
    LeftSide,
    /// Children of a pattern (`Type(...)`)
    PatternChildren,
    /// Operands of `|(...)` or `&(...)`
    LogicalOperands,
    /// `<...>` data descriptor
    DataDescriptor,
    /// Right side of a transformation
    RightSide,
    /// Children of a resulting subtree
    TemplateChildren,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::NodeName => "in node name",
            Self::NodeBody => "in node body",
            Self::ChildDeclaration => "in child declaration",
            Self::LeftSide => "in left side",
            Self::PatternChildren => "in pattern children",
            Self::LogicalOperands => "in logical expression",
            Self::DataDescriptor => "in data descriptor",
            Self::RightSide => "in right side",
            Self::TemplateChildren => "in template children",
        }
    }

    /// Get a description of what is expected in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::NodeName => "a capitalized node name",
            Self::NodeBody => "'0', '{Type}', alternatives or child declarations",
            Self::ChildDeclaration => "'Type', 'tag@Type' or '[tag@Type]'",
            Self::LeftSide | Self::LogicalOperands => "a pattern, hole, symbol or modifier",
            Self::PatternChildren => "a pattern or '#N'",
            Self::DataDescriptor => "'#N' or a string literal",
            Self::RightSide | Self::TemplateChildren => "a subtree template or '#N'",
        }
    }
}
