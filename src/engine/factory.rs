//! A [`NodeFactory`] driven by the node rules of a [`Program`].

use smol_str::SmolStr;
use text_size::TextRange;

use super::converter::{NodeBuilder, NodeFactory};
use super::tree::{Node, NodeType, SyntaxNode};
use crate::model::{
    COMMON_LANGUAGE, ChildDescriptor, LiteralDescriptor, NodeDescriptor, NodeKind, Program,
};

/// Builds [`Node`]s whose shape follows the declared descriptors of one
/// language (and the common ones)
#[derive(Debug, Clone)]
pub struct DescriptorFactory<'p> {
    program: &'p Program,
    language: SmolStr,
}

impl<'p> DescriptorFactory<'p> {
    pub fn new(program: &'p Program, language: impl Into<SmolStr>) -> Self {
        Self {
            program,
            language: language.into(),
        }
    }

    pub fn common(program: &'p Program) -> Self {
        Self::new(program, SmolStr::new_static(COMMON_LANGUAGE))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// The runtime type of a declared node, with its ancestors
    pub fn node_type(&self, type_name: &str) -> Option<NodeType> {
        let registry = self.program.registry();
        let id = registry.lookup(&self.language, type_name)?;
        Some(NodeType::from_registry(registry, id))
    }
}

impl<'p> NodeFactory<Node> for DescriptorFactory<'p> {
    type Builder = DescriptorBuilder<'p>;

    fn create_builder(&self, type_name: &str) -> Option<DescriptorBuilder<'p>> {
        let registry = self.program.registry();
        let id = registry.lookup(&self.language, type_name)?;
        let descriptor = registry.get(id);
        if !descriptor.is_instantiable() {
            return None;
        }
        let valid_children = match descriptor.kind() {
            NodeKind::Regular { children } => fits(children, &[]),
            _ => true,
        };
        Some(DescriptorBuilder {
            descriptor,
            node_type: NodeType::from_registry(registry, id),
            fragment: None,
            data: None,
            children: Vec::new(),
            valid_children,
        })
    }
}

/// Builder for one declared node type
#[derive(Debug)]
pub struct DescriptorBuilder<'p> {
    descriptor: &'p NodeDescriptor,
    node_type: NodeType,
    fragment: Option<TextRange>,
    data: Option<SmolStr>,
    children: Vec<Node>,
    valid_children: bool,
}

impl NodeBuilder<Node> for DescriptorBuilder<'_> {
    fn set_fragment(&mut self, fragment: Option<TextRange>) {
        self.fragment = fragment;
    }

    fn set_data(&mut self, data: &str) -> bool {
        let accepted = match self.descriptor.kind() {
            NodeKind::Literal(literal) => accepts_native(&literal.native_type, data),
            _ => data.is_empty(),
        };
        if accepted {
            self.data = Some(data.into());
        }
        accepted
    }

    fn set_children(&mut self, children: Vec<Node>) -> bool {
        self.valid_children = match self.descriptor.kind() {
            NodeKind::Regular { children: slots } => fits(slots, &children),
            NodeKind::List { element } => children.iter().all(|c| c.is_of_type(&element.type_name)),
            NodeKind::Literal(_) | NodeKind::Abstract { .. } => children.is_empty(),
        };
        self.children = children;
        self.valid_children
    }

    fn is_valid(&self) -> bool {
        match self.descriptor.kind() {
            NodeKind::Literal(literal) => self.valid_children && self.value(literal).is_some(),
            NodeKind::Abstract { .. } => false,
            NodeKind::Regular { .. } | NodeKind::List { .. } => self.valid_children,
        }
    }

    fn create_node(self) -> Node {
        let data = match self.descriptor.kind() {
            NodeKind::Literal(literal) => self.value(literal).cloned().unwrap_or_default(),
            _ => SmolStr::default(),
        };
        Node::new(self.node_type, data, self.children).with_fragment(self.fragment)
    }
}

impl DescriptorBuilder<'_> {
    /// Explicit data, else the declared initial value
    fn value<'a>(&'a self, literal: &'a LiteralDescriptor) -> Option<&'a SmolStr> {
        self.data.as_ref().or(literal.initial.as_ref())
    }
}

/// Whether `nodes` fill `slots` in order, optional slots may stay empty
fn fits(slots: &[ChildDescriptor], nodes: &[Node]) -> bool {
    let Some((slot, rest)) = slots.split_first() else {
        return nodes.is_empty();
    };
    let taken = nodes
        .first()
        .is_some_and(|node| node.is_of_type(&slot.type_name))
        && fits(rest, &nodes[1..]);
    taken || (slot.optional && fits(rest, nodes))
}

/// Whether `value` parses as the literal's native type. Unknown types take anything.
fn accepts_native(native_type: &str, value: &str) -> bool {
    match native_type {
        "int" | "Integer" => value.parse::<i32>().is_ok(),
        "long" | "Long" => value.parse::<i64>().is_ok(),
        "short" | "Short" => value.parse::<i16>().is_ok(),
        "byte" | "Byte" => value.parse::<i8>().is_ok(),
        "double" | "Double" => value.parse::<f64>().is_ok(),
        "float" | "Float" => value.parse::<f32>().is_ok(),
        "boolean" | "Boolean" => matches!(value, "true" | "false"),
        "char" | "Character" => value.chars().count() == 1,
        _ => true,
    }
}
