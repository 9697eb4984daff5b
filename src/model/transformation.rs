use std::fmt;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::hole::Hole;
use super::items::{LeftItem, write_list};
use super::template::RightItem;
use crate::base::Span;

/// `left, left, ... -> right`
///
/// Construction goes through the parser, which guarantees that node holes and
/// data holes are disjoint and that every hole bound on the left is used
/// exactly once on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationDescriptor {
    language: SmolStr,
    left: Vec<LeftItem>,
    right: RightItem,
    right_to_left: bool,
    span: Span,
}

impl TransformationDescriptor {
    pub(crate) fn new(
        language: impl Into<SmolStr>,
        left: Vec<LeftItem>,
        right: RightItem,
        right_to_left: bool,
        span: Span,
    ) -> Self {
        debug_assert!(!left.is_empty());
        Self {
            language: language.into(),
            left,
            right,
            right_to_left,
            span,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn left(&self) -> &[LeftItem] {
        &self.left
    }

    pub fn right(&self) -> &RightItem {
        &self.right
    }

    /// Search the input from its end (`..., ` prefix)
    pub fn right_to_left(&self) -> bool {
        self.right_to_left
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Holes that capture nodes
    pub fn node_holes(&self) -> FxHashSet<Hole> {
        self.left_holes(false)
    }

    /// Holes that capture data
    pub fn data_holes(&self) -> FxHashSet<Hole> {
        self.left_holes(true)
    }

    fn left_holes(&self, data: bool) -> FxHashSet<Hole> {
        self.left
            .iter()
            .flat_map(LeftItem::holes)
            .filter(|(_, is_data)| *is_data == data)
            .map(|(hole, _)| hole)
            .collect()
    }
}

impl fmt::Display for TransformationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.right_to_left {
            f.write_str("..., ")?;
        }
        write_list(f, &self.left)?;
        write!(f, " -> {}", self.right)
    }
}
