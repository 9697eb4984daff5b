//! Syntax trees the engine consumes and produces.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;
use text_size::TextRange;

use crate::base::Quoted;
use crate::model::{DescriptorId, NodeRegistry};

/// A concrete syntax-tree node, as seen by the matcher.
///
/// Nodes are never mutated by the engine. `Clone` must be cheap: matches
/// bind clones of the input nodes.
pub trait SyntaxNode: Clone {
    fn type_name(&self) -> &str;

    /// Leaf payload; empty for nodes that carry none
    fn data(&self) -> &str;

    fn child_count(&self) -> usize;

    fn child(&self, index: usize) -> Option<Self>;

    /// Whether the node's type is `name` or inherits from it
    fn is_of_type(&self, name: &str) -> bool {
        self.type_name() == name
    }

    /// Source range the node was parsed from
    fn fragment(&self) -> Option<TextRange> {
        None
    }

    fn children(&self) -> Vec<Self> {
        (0..self.child_count()).filter_map(|i| self.child(i)).collect()
    }
}

/// A node type name with its ancestors, most derived first
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NodeType {
    topology: Arc<[SmolStr]>,
}

impl NodeType {
    /// A type with no ancestors
    pub fn new(name: impl Into<SmolStr>) -> Self {
        let name: SmolStr = name.into();
        Self {
            topology: Arc::from([name]),
        }
    }

    pub fn with_ancestors<I, S>(name: impl Into<SmolStr>, ancestors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let topology: Vec<SmolStr> = std::iter::once(name.into())
            .chain(ancestors.into_iter().map(Into::into))
            .collect();
        Self {
            topology: topology.into(),
        }
    }

    /// The type of a declared descriptor, ancestors taken from its topology
    pub fn from_registry(registry: &NodeRegistry, id: DescriptorId) -> Self {
        Self {
            topology: registry.topology_names(id).into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.topology[0]
    }

    pub fn ancestors(&self) -> &[SmolStr] {
        &self.topology[1..]
    }

    pub fn is_a(&self, name: &str) -> bool {
        self.topology.iter().any(|t| t == name)
    }
}

impl fmt::Debug for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, PartialEq, Eq)]
struct NodeData {
    node_type: NodeType,
    data: SmolStr,
    children: Vec<Node>,
    fragment: Option<TextRange>,
}

/// Immutable, reference-counted tree node
#[derive(Clone, PartialEq, Eq)]
pub struct Node(Arc<NodeData>);

impl Node {
    pub fn new(node_type: NodeType, data: impl Into<SmolStr>, children: Vec<Node>) -> Self {
        Self(Arc::new(NodeData {
            node_type,
            data: data.into(),
            children,
            fragment: None,
        }))
    }

    /// A childless node carrying `data`
    pub fn leaf(node_type: NodeType, data: impl Into<SmolStr>) -> Self {
        Self::new(node_type, data, Vec::new())
    }

    /// An interior node without data
    pub fn branch(node_type: NodeType, children: Vec<Node>) -> Self {
        Self::new(node_type, SmolStr::default(), children)
    }

    pub fn with_fragment(self, fragment: Option<TextRange>) -> Self {
        let data = Arc::unwrap_or_clone(self.0);
        Self(Arc::new(NodeData { fragment, ..data }))
    }

    pub fn node_type(&self) -> &NodeType {
        &self.0.node_type
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.0.children
    }

    /// Same allocation, not just equal contents
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl SyntaxNode for Node {
    fn type_name(&self) -> &str {
        self.0.node_type.name()
    }

    fn data(&self) -> &str {
        &self.0.data
    }

    fn child_count(&self) -> usize {
        self.0.children.len()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.0.children.get(index).cloned()
    }

    fn is_of_type(&self, name: &str) -> bool {
        self.0.node_type.is_a(name)
    }

    fn fragment(&self) -> Option<TextRange> {
        self.0.fragment
    }

    fn children(&self) -> Vec<Self> {
        self.0.children.clone()
    }
}

/// Same notation as rule templates: `Type<"data">(child, ...)`
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())?;
        if !self.data().is_empty() {
            write!(f, "<{}>", Quoted::double(self.data()))?;
        }
        if let Some((first, rest)) = self.0.children.split_first() {
            write!(f, "({first}")?;
            for child in rest {
                write!(f, ", {child}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
