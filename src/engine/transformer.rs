//! Applying transformations to whole trees.
//!
//! The left side of a transformation matches a window of consecutive
//! siblings. Each left item consumes nodes according to its mode:
//!
//! | mode     | nodes consumed                                   |
//! |----------|--------------------------------------------------|
//! | normal   | exactly one                                      |
//! | `[x]`    | one if it matches, else none (present tried first) |
//! | `{x}`    | one or more, longest run first                   |
//!
//! The window is replaced by the node built from the right side.

use rayon::prelude::*;
use smol_str::SmolStr;
use text_size::TextRange;
use tracing::{debug, trace};

use super::bindings::Bindings;
use super::converter::{BuildError, Converter, NodeFactory, assemble};
use super::factory::DescriptorFactory;
use super::matcher::Matcher;
use super::tree::SyntaxNode;
use crate::model::{COMMON_LANGUAGE, MatchMode, Program, TransformationDescriptor};

/// Which rules a [`Transformer`] applies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Rules of this language plus the common ones
    pub language: SmolStr,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            language: SmolStr::new_static(COMMON_LANGUAGE),
        }
    }
}

impl TransformOptions {
    pub fn for_language(language: impl Into<SmolStr>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

/// One transformation with its compiled left side
#[derive(Debug)]
pub struct CompiledRule<'p> {
    descriptor: &'p TransformationDescriptor,
    matchers: Vec<Matcher<'p>>,
}

/// A successful window match
#[derive(Debug, Clone)]
pub struct WindowMatch<N> {
    pub start: usize,
    pub len: usize,
    pub bindings: Bindings<N>,
}

impl<'p> CompiledRule<'p> {
    pub fn new(descriptor: &'p TransformationDescriptor) -> Self {
        Self {
            descriptor,
            matchers: descriptor.left().iter().map(Matcher::new).collect(),
        }
    }

    pub fn descriptor(&self) -> &'p TransformationDescriptor {
        self.descriptor
    }

    /// Match the left side against a window starting at `start`
    pub fn match_at<N: SyntaxNode>(&self, nodes: &[N], start: usize) -> Option<WindowMatch<N>> {
        let (end, bindings) = self.match_items(0, nodes, start, Bindings::new(), None)?;
        (end > start).then(|| WindowMatch {
            start,
            len: end - start,
            bindings,
        })
    }

    /// Match the left side against a window ending exactly at `end`
    pub fn match_ending_at<N: SyntaxNode>(
        &self,
        nodes: &[N],
        start: usize,
        end: usize,
    ) -> Option<WindowMatch<N>> {
        if end > nodes.len() {
            return None;
        }
        let (_, bindings) = self.match_items(0, nodes, start, Bindings::new(), Some(end))?;
        (end > start).then(|| WindowMatch {
            start,
            len: end - start,
            bindings,
        })
    }

    /// Backtracking over the item list. Returns the position after the window.
    fn match_items<N: SyntaxNode>(
        &self,
        index: usize,
        nodes: &[N],
        pos: usize,
        bindings: Bindings<N>,
        end: Option<usize>,
    ) -> Option<(usize, Bindings<N>)> {
        let Some(matcher) = self.matchers.get(index) else {
            return match end {
                Some(end) if end != pos => None,
                _ => Some((pos, bindings)),
            };
        };
        let limit = end.unwrap_or(nodes.len()).min(nodes.len());
        let single = |bindings: &Bindings<N>| {
            let node = nodes[..limit].get(pos)?;
            let mut next = bindings.clone();
            matcher.matches(node, &mut next).then_some(next)
        };

        match matcher.item().mode {
            MatchMode::Normal => {
                let next = single(&bindings)?;
                self.match_items(index + 1, nodes, pos + 1, next, end)
            }
            MatchMode::Optional => single(&bindings)
                .and_then(|next| self.match_items(index + 1, nodes, pos + 1, next, end))
                .or_else(|| self.match_items(index + 1, nodes, pos, bindings, end)),
            MatchMode::Repeated => {
                let mut runs = Vec::new();
                let mut current = bindings;
                while let Some(node) = nodes[..limit].get(pos + runs.len()) {
                    if !matcher.matches(node, &mut current) {
                        break;
                    }
                    runs.push(current.clone());
                }
                runs.into_iter()
                    .enumerate()
                    .rev()
                    .find_map(|(i, run)| self.match_items(index + 1, nodes, pos + i + 1, run, end))
            }
        }
    }
}

/// Rewrites trees with the transformations of one language
pub struct Transformer<'p, F> {
    factory: F,
    rules: Vec<CompiledRule<'p>>,
}

impl<'p> Transformer<'p, DescriptorFactory<'p>> {
    /// Transformer that builds nodes from the program's own node rules
    pub fn new(program: &'p Program, options: &TransformOptions) -> Self {
        let factory = DescriptorFactory::new(program, options.language.clone());
        Self::with_factory(program, options, factory)
    }
}

impl<'p, F> Transformer<'p, F> {
    pub fn with_factory(program: &'p Program, options: &TransformOptions, factory: F) -> Self {
        let rules: Vec<_> = program
            .transformations_for(&options.language)
            .map(CompiledRule::new)
            .collect();
        debug!(language = %options.language, rules = rules.len(), "transformer ready");
        Self { factory, rules }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn rules(&self) -> &[CompiledRule<'p>] {
        &self.rules
    }

    /// Rewrite one tree bottom-up
    pub fn rewrite<N>(&self, root: &N) -> N
    where
        N: SyntaxNode,
        F: NodeFactory<N>,
    {
        self.rewrite_sequence(std::slice::from_ref(root))
            .into_iter()
            .next()
            .unwrap_or_else(|| root.clone())
    }

    /// Rewrite independent trees in parallel
    pub fn rewrite_forest<N>(&self, roots: &[N]) -> Vec<N>
    where
        N: SyntaxNode + Send + Sync,
        F: NodeFactory<N> + Sync,
    {
        roots.par_iter().map(|root| self.rewrite(root)).collect()
    }

    /// Rewrite every node's subtree, then apply the rules to the sequence itself
    pub fn rewrite_sequence<N>(&self, nodes: &[N]) -> Vec<N>
    where
        N: SyntaxNode,
        F: NodeFactory<N>,
    {
        let mut siblings: Vec<N> = nodes
            .iter()
            .map(|node| self.rewrite_subtree(node).unwrap_or_else(|| node.clone()))
            .collect();
        for rule in &self.rules {
            if let Some(next) = self.apply(rule, &siblings) {
                siblings = next;
            }
        }
        siblings
    }

    /// `None` when nothing below `node` changed
    fn rewrite_subtree<N>(&self, node: &N) -> Option<N>
    where
        N: SyntaxNode,
        F: NodeFactory<N>,
    {
        if node.child_count() == 0 {
            return None;
        }
        let mut changed = false;
        let mut children: Vec<N> = node
            .children()
            .into_iter()
            .map(|child| match self.rewrite_subtree(&child) {
                Some(rewritten) => {
                    changed = true;
                    rewritten
                }
                None => child,
            })
            .collect();
        for rule in &self.rules {
            if let Some(next) = self.apply(rule, &children) {
                children = next;
                changed = true;
            }
        }
        if !changed {
            return None;
        }

        let data = Some(node.data()).filter(|data| !data.is_empty());
        match assemble(&self.factory, node.type_name(), node.fragment(), data, children) {
            Ok(rebuilt) => Some(rebuilt),
            Err(err) => {
                debug!(node = node.type_name(), error = %err, "parent kept unchanged");
                None
            }
        }
    }

    /// One pass of one rule over a sibling list; `None` when nothing changed
    pub fn apply<N>(&self, rule: &CompiledRule<'p>, siblings: &[N]) -> Option<Vec<N>>
    where
        N: SyntaxNode,
        F: NodeFactory<N>,
    {
        if rule.descriptor.right_to_left() {
            self.apply_backward(rule, siblings)
        } else {
            self.apply_forward(rule, siblings)
        }
    }

    fn apply_forward<N>(&self, rule: &CompiledRule<'p>, siblings: &[N]) -> Option<Vec<N>>
    where
        N: SyntaxNode,
        F: NodeFactory<N>,
    {
        let mut out = Vec::with_capacity(siblings.len());
        let mut changed = false;
        let mut pos = 0;
        while pos < siblings.len() {
            if let Some(window) = rule.match_at(siblings, pos) {
                if let Ok(node) = self.replace(rule, siblings, &window) {
                    out.push(node);
                    pos += window.len;
                    changed = true;
                    continue;
                }
            }
            out.push(siblings[pos].clone());
            pos += 1;
        }
        changed.then_some(out)
    }

    fn apply_backward<N>(&self, rule: &CompiledRule<'p>, siblings: &[N]) -> Option<Vec<N>>
    where
        N: SyntaxNode,
        F: NodeFactory<N>,
    {
        let mut out = Vec::with_capacity(siblings.len());
        let mut changed = false;
        let mut end = siblings.len();
        while end > 0 {
            // longest window first
            let replaced = (0..end)
                .filter_map(|start| rule.match_ending_at(siblings, start, end))
                .find_map(|window| {
                    self.replace(rule, siblings, &window)
                        .ok()
                        .map(|node| (window.start, node))
                });
            match replaced {
                Some((start, node)) => {
                    out.push(node);
                    end = start;
                    changed = true;
                }
                None => {
                    out.push(siblings[end - 1].clone());
                    end -= 1;
                }
            }
        }
        out.reverse();
        changed.then_some(out)
    }

    fn replace<N>(
        &self,
        rule: &CompiledRule<'p>,
        siblings: &[N],
        window: &WindowMatch<N>,
    ) -> Result<N, BuildError>
    where
        N: SyntaxNode,
        F: NodeFactory<N>,
    {
        let matched = &siblings[window.start..window.start + window.len];
        let fragment = matched
            .iter()
            .filter_map(|node| node.fragment())
            .reduce(TextRange::cover);
        trace!(rule = %rule.descriptor, start = window.start, len = window.len, "window matched");
        Converter::new(&self.factory)
            .with_fragment(fragment)
            .convert(rule.descriptor.right(), &window.bindings)
    }
}
