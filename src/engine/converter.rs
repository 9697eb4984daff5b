//! Building new trees from right-side templates.

use smol_str::SmolStr;
use text_size::TextRange;
use thiserror::Error;
use tracing::debug;

use super::bindings::Bindings;
use super::tree::SyntaxNode;
use crate::model::{DataDescriptor, Hole, ResultingSubtree, RightItem};

/// Accumulates the parts of one node
pub trait NodeBuilder<N> {
    fn set_fragment(&mut self, fragment: Option<TextRange>);

    /// `false` when the node type rejects the value
    fn set_data(&mut self, data: &str) -> bool;

    /// `false` when the children do not fit the node type
    fn set_children(&mut self, children: Vec<N>) -> bool;

    fn is_valid(&self) -> bool;

    fn create_node(self) -> N;
}

/// Hands out builders by type name
pub trait NodeFactory<N> {
    type Builder: NodeBuilder<N>;

    /// `None` for unknown or non-instantiable types
    fn create_builder(&self, type_name: &str) -> Option<Self::Builder>;
}

/// Why no tree was produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("no builder for type '{0}'")]
    NoBuilder(SmolStr),

    #[error("type '{type_name}' rejected data {data:?}")]
    InvalidData { type_name: SmolStr, data: SmolStr },

    #[error("type '{0}' rejected its children")]
    InvalidChildren(SmolStr),

    #[error("node of type '{0}' is incomplete")]
    Incomplete(SmolStr),

    #[error("hole {0} has no binding")]
    UnboundHole(Hole),

    #[error("hole {hole} must produce exactly one node, it holds {count}")]
    NotSingle { hole: Hole, count: usize },
}

/// Turns a template plus bindings into a tree through a [`NodeFactory`].
///
/// Any failure anywhere aborts the whole construction; no partial tree is
/// ever returned.
pub struct Converter<'f, F> {
    factory: &'f F,
    fragment: Option<TextRange>,
}

impl<'f, F> Converter<'f, F> {
    pub fn new(factory: &'f F) -> Self {
        Self {
            factory,
            fragment: None,
        }
    }

    /// Source range given to every built node
    pub fn with_fragment(mut self, fragment: Option<TextRange>) -> Self {
        self.fragment = fragment;
        self
    }

    pub fn convert<N>(&self, template: &RightItem, bindings: &Bindings<N>) -> Result<N, BuildError>
    where
        N: SyntaxNode,
        F: NodeFactory<N>,
    {
        let result = match template {
            RightItem::Hole(hole) => match bindings.nodes(*hole) {
                Some([node]) => Ok(node.clone()),
                Some(nodes) => Err(BuildError::NotSingle {
                    hole: *hole,
                    count: nodes.len(),
                }),
                None => Err(BuildError::UnboundHole(*hole)),
            },
            RightItem::Subtree(subtree) => self.build(subtree, bindings),
        };
        if let Err(err) = &result {
            debug!(template = %template, error = %err, "conversion failed");
        }
        result
    }

    fn build<N>(&self, subtree: &ResultingSubtree, bindings: &Bindings<N>) -> Result<N, BuildError>
    where
        N: SyntaxNode,
        F: NodeFactory<N>,
    {
        let data = match &subtree.data {
            Some(DataDescriptor::Static(text)) => Some(text.as_str()),
            Some(DataDescriptor::Hole(hole)) => Some(
                bindings
                    .data(*hole)
                    .ok_or(BuildError::UnboundHole(*hole))?,
            ),
            None => None,
        };

        let mut children = Vec::with_capacity(subtree.children.len());
        for child in &subtree.children {
            match child {
                RightItem::Hole(hole) => {
                    let nodes = bindings
                        .nodes(*hole)
                        .ok_or(BuildError::UnboundHole(*hole))?;
                    children.extend(nodes.iter().cloned());
                }
                RightItem::Subtree(nested) => children.push(self.build(nested, bindings)?),
            }
        }

        assemble(self.factory, &subtree.type_name, self.fragment, data, children)
    }
}

/// Run one builder to completion
pub(crate) fn assemble<N, F>(
    factory: &F,
    type_name: &str,
    fragment: Option<TextRange>,
    data: Option<&str>,
    children: Vec<N>,
) -> Result<N, BuildError>
where
    F: NodeFactory<N>,
{
    let mut builder = factory
        .create_builder(type_name)
        .ok_or_else(|| BuildError::NoBuilder(type_name.into()))?;
    builder.set_fragment(fragment);
    if let Some(data) = data {
        if !builder.set_data(data) {
            return Err(BuildError::InvalidData {
                type_name: type_name.into(),
                data: data.into(),
            });
        }
    }
    if !builder.set_children(children) {
        return Err(BuildError::InvalidChildren(type_name.into()));
    }
    if !builder.is_valid() {
        return Err(BuildError::Incomplete(type_name.into()));
    }
    Ok(builder.create_node())
}
