//! Node descriptors: the node types a program declares.

use std::fmt;
use std::sync::OnceLock;

use smol_str::SmolStr;

use super::error::LiteralError;
use crate::base::{Quoted, Span};

/// Language bucket for rules without a `language:` prefix
pub const COMMON_LANGUAGE: &str = "common";

/// Stable index of a descriptor inside a [`super::NodeRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(pub(crate) u32);

impl DescriptorId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One child slot of a regular node (or the element type of a list node)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildDescriptor {
    pub optional: bool,
    /// Name used to retrieve the child; empty when untagged
    pub tag: SmolStr,
    pub type_name: SmolStr,
    /// Filled in by the resolve pass
    pub(crate) resolved: Option<DescriptorId>,
}

impl ChildDescriptor {
    pub fn new(tag: impl Into<SmolStr>, type_name: impl Into<SmolStr>, optional: bool) -> Self {
        Self {
            optional,
            tag: tag.into(),
            type_name: type_name.into(),
            resolved: None,
        }
    }

    pub fn is_tagged(&self) -> bool {
        !self.tag.is_empty()
    }

    pub fn resolved(&self) -> Option<DescriptorId> {
        self.resolved
    }
}

impl fmt::Display for ChildDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            f.write_str("[")?;
        }
        if self.is_tagged() {
            write!(f, "{}@", self.tag)?;
        }
        f.write_str(&self.type_name)?;
        if self.optional {
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// A node that carries one native-typed data value and no children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralDescriptor {
    pub native_type: SmolStr,
    pub initial: Option<SmolStr>,
    pub serializer: Option<SmolStr>,
    pub parser: Option<SmolStr>,
    /// Exception caught when the parser rejects a value
    pub exception: Option<SmolStr>,
}

impl LiteralDescriptor {
    /// Validate and build. Empty strings count as absent.
    pub fn new(
        native_type: &str,
        initial: Option<&str>,
        serializer: Option<&str>,
        parser: Option<&str>,
        exception: Option<&str>,
    ) -> Result<Self, LiteralError> {
        let present = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(SmolStr::new);
        let literal = Self {
            native_type: SmolStr::new(native_type),
            initial: present(initial),
            serializer: present(serializer),
            parser: present(parser),
            exception: present(exception),
        };

        if literal.native_type.is_empty() {
            return Err(LiteralError::MissingType);
        }
        if literal.serializer.is_some() && literal.initial.is_none() {
            return Err(LiteralError::SerializerWithoutInitial);
        }
        if literal.serializer.is_some() != literal.parser.is_some() {
            return Err(LiteralError::UnpairedSerializer);
        }
        if literal.exception.is_some() && literal.parser.is_none() {
            return Err(LiteralError::ExceptionWithoutParser);
        }
        Ok(literal)
    }
}

impl fmt::Display for LiteralDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            &self.initial,
            &self.serializer,
            &self.parser,
            &self.exception,
        ];
        let used = fields
            .iter()
            .rposition(|field| field.is_some())
            .map_or(0, |last| last + 1);

        write!(f, "{}", Quoted::double(&self.native_type))?;
        for field in &fields[..used] {
            write!(f, ", {}", Quoted::double(field.as_deref().unwrap_or("")))?;
        }
        Ok(())
    }
}

/// The four node kinds of the DSL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// `Name <- A | B | ...`; not instantiable
    Abstract {
        subtypes: Vec<SmolStr>,
        /// Alternative marked with `&`
        extension: Option<SmolStr>,
    },
    /// `Name <- {Type}`
    List { element: ChildDescriptor },
    /// `Name <- "type", ...`
    Literal(LiteralDescriptor),
    /// `Name <- 0` or `Name <- child, child, ...`
    Regular { children: Vec<ChildDescriptor> },
}

/// A declared node type
#[derive(Debug, Clone)]
pub struct NodeDescriptor {
    name: SmolStr,
    language: SmolStr,
    kind: NodeKind,
    span: Span,
    pub(crate) bases: Vec<DescriptorId>,
    pub(crate) dependencies: Vec<DescriptorId>,
    pub(crate) subtype_ids: Vec<DescriptorId>,
    pub(crate) topology: OnceLock<Vec<DescriptorId>>,
}

impl NodeDescriptor {
    pub fn new(
        name: impl Into<SmolStr>,
        language: impl Into<SmolStr>,
        kind: NodeKind,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            kind,
            span,
            bases: Vec::new(),
            dependencies: Vec::new(),
            subtype_ids: Vec::new(),
            topology: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Direct base (abstract) descriptors, in the order they were added
    pub fn bases(&self) -> &[DescriptorId] {
        &self.bases
    }

    /// Descriptors this one references (children, list element, subtypes, bases)
    pub fn dependencies(&self) -> &[DescriptorId] {
        &self.dependencies
    }

    /// Resolved subtypes of an abstract descriptor
    pub fn subtypes(&self) -> &[DescriptorId] {
        &self.subtype_ids
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self.kind, NodeKind::Abstract { .. })
    }

    /// Only non-abstract descriptors can be built
    pub fn is_instantiable(&self) -> bool {
        !self.is_abstract()
    }

    /// A green node belongs to the language-agnostic bucket
    pub fn is_green(&self) -> bool {
        self.language == COMMON_LANGUAGE
    }

    /// Child slots of a regular descriptor; empty for every other kind
    pub fn children(&self) -> &[ChildDescriptor] {
        match &self.kind {
            NodeKind::Regular { children } => children,
            _ => &[],
        }
    }

    /// The child with the given tag
    pub fn child(&self, tag: &str) -> Option<&ChildDescriptor> {
        self.children().iter().find(|c| c.is_tagged() && c.tag == tag)
    }
}

impl fmt::Display for NodeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- ", self.name)?;
        match &self.kind {
            NodeKind::Abstract { subtypes, extension } => {
                for (i, subtype) in subtypes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    if extension.as_ref() == Some(subtype) {
                        f.write_str("&")?;
                    }
                    f.write_str(subtype)?;
                }
                Ok(())
            }
            NodeKind::List { element } => write!(f, "{{{}}}", element.type_name),
            NodeKind::Literal(literal) => write!(f, "{literal}"),
            NodeKind::Regular { children } if children.is_empty() => f.write_str("0"),
            NodeKind::Regular { children } => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{child}")?;
                }
                Ok(())
            }
        }
    }
}
