//! Structural matching of one node against one left-side item.
//!
//! Every check works on a scratch [`Bindings`] that is merged into the
//! caller's bindings only when the whole item matched. A failed AND operand,
//! an OR alternative that did not match or a negated item therefore never
//! leaves captures behind.

use std::sync::OnceLock;

use tracing::trace;

use super::bindings::Bindings;
use super::tree::SyntaxNode;
use crate::model::{DataDescriptor, LeftItem, LeftItemKind, PatternDescriptor};

/// Compiled form of a [`LeftItem`].
///
/// Sub-matchers for pattern children and logical operands are created on
/// first use and reused by later calls.
#[derive(Debug)]
pub struct Matcher<'r> {
    item: &'r LeftItem,
    nested: OnceLock<Vec<Matcher<'r>>>,
}

impl<'r> Matcher<'r> {
    pub fn new(item: &'r LeftItem) -> Self {
        Self {
            item,
            nested: OnceLock::new(),
        }
    }

    pub fn item(&self) -> &'r LeftItem {
        self.item
    }

    fn nested(&self) -> &[Matcher<'r>] {
        self.nested
            .get_or_init(|| self.item.nested().iter().map(Matcher::new).collect())
    }

    /// Match `node` and, on success, add the captures to `bindings`.
    ///
    /// The item's mode is not looked at: a single node is matched.
    pub fn matches<N: SyntaxNode>(&self, node: &N, bindings: &mut Bindings<N>) -> bool {
        let mut scratch = Bindings::new();
        let matched = self.match_kind(node, &mut scratch);
        trace!(item = %self.item, node = node.type_name(), matched, "match");
        if self.item.negated {
            return !matched;
        }
        if matched {
            bindings.merge(scratch);
        }
        matched
    }

    /// Match with fresh bindings
    pub fn find<N: SyntaxNode>(&self, node: &N) -> Option<Bindings<N>> {
        let mut bindings = Bindings::new();
        self.matches(node, &mut bindings).then_some(bindings)
    }

    fn match_kind<N: SyntaxNode>(&self, node: &N, out: &mut Bindings<N>) -> bool {
        match &self.item.kind {
            LeftItemKind::Pattern(pattern) => self.match_pattern(pattern, node, out),
            LeftItemKind::Symbol(symbol) => node.child_count() == 0 && symbol.accepts(node.data()),
            LeftItemKind::TypedHole(typed) => {
                if !node.is_of_type(&typed.type_name) {
                    return false;
                }
                out.bind_node(typed.hole, node.clone());
                true
            }
            LeftItemKind::ChildHole(hole) => {
                out.bind_node(*hole, node.clone());
                true
            }
            LeftItemKind::And(_) => self.nested().iter().all(|m| m.matches(node, out)),
            LeftItemKind::Or(_) => self.nested().iter().any(|m| m.matches(node, out)),
        }
    }

    fn match_pattern<N: SyntaxNode>(
        &self,
        pattern: &PatternDescriptor,
        node: &N,
        out: &mut Bindings<N>,
    ) -> bool {
        if node.type_name() != pattern.type_name.as_str() {
            return false;
        }
        if node.child_count() != pattern.children.len() {
            return false;
        }
        match &pattern.data {
            Some(DataDescriptor::Static(text)) if node.data() != text.as_str() => return false,
            Some(DataDescriptor::Static(_)) => {}
            Some(DataDescriptor::Hole(hole)) => out.bind_data(*hole, node.data()),
            None if !node.data().is_empty() => return false,
            None => {}
        }
        self.nested()
            .iter()
            .enumerate()
            .all(|(i, matcher)| node.child(i).is_some_and(|child| matcher.matches(&child, out)))
    }
}
