use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::model::Hole;

/// What a successful match captured: nodes per node hole, text per data hole
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings<N> {
    nodes: FxHashMap<Hole, Vec<N>>,
    data: FxHashMap<Hole, SmolStr>,
}

impl<N> Default for Bindings<N> {
    fn default() -> Self {
        Self {
            nodes: FxHashMap::default(),
            data: FxHashMap::default(),
        }
    }
}

impl<N> Bindings<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node; a repeated item binds several nodes to one hole
    pub fn bind_node(&mut self, hole: Hole, node: N) {
        self.nodes.entry(hole).or_default().push(node);
    }

    pub fn bind_data(&mut self, hole: Hole, data: impl Into<SmolStr>) {
        self.data.insert(hole, data.into());
    }

    pub fn nodes(&self, hole: Hole) -> Option<&[N]> {
        self.nodes.get(&hole).map(Vec::as_slice)
    }

    /// The first node bound to `hole`
    pub fn node(&self, hole: Hole) -> Option<&N> {
        self.nodes.get(&hole)?.first()
    }

    pub fn data(&self, hole: Hole) -> Option<&str> {
        self.data.get(&hole).map(SmolStr::as_str)
    }

    pub fn node_holes(&self) -> Vec<Hole> {
        let mut holes: Vec<_> = self.nodes.keys().copied().collect();
        holes.sort();
        holes
    }

    pub fn data_holes(&self) -> Vec<Hole> {
        let mut holes: Vec<_> = self.data.keys().copied().collect();
        holes.sort();
        holes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.data.is_empty()
    }

    /// Take over everything `other` captured
    pub fn merge(&mut self, other: Bindings<N>) {
        for (hole, nodes) in other.nodes {
            self.nodes.entry(hole).or_default().extend(nodes);
        }
        self.data.extend(other.data);
    }
}
