//! Right-side (reconstruction) items of a transformation.

use std::fmt;

use smol_str::SmolStr;

use super::hole::Hole;
use super::items::{DataDescriptor, write_list};
use crate::base::Span;

/// `Type<data>(children...)` on the right side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultingSubtree {
    pub type_name: SmolStr,
    pub data: Option<DataDescriptor>,
    pub children: Vec<RightItem>,
    pub span: Span,
}

/// What a transformation builds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RightItem {
    Subtree(ResultingSubtree),
    /// Re-insert the node(s) bound to this hole
    Hole(Hole),
}

impl RightItem {
    /// Every hole used, with whether it is used as data
    pub fn holes(&self) -> Vec<(Hole, bool)> {
        let mut holes = Vec::new();
        self.collect_holes(&mut holes);
        holes
    }

    fn collect_holes(&self, out: &mut Vec<(Hole, bool)>) {
        match self {
            Self::Hole(hole) => out.push((*hole, false)),
            Self::Subtree(subtree) => {
                if let Some(DataDescriptor::Hole(hole)) = &subtree.data {
                    out.push((*hole, true));
                }
                for child in &subtree.children {
                    child.collect_holes(out);
                }
            }
        }
    }

    /// Every type name the template builds
    pub fn type_names(&self) -> Vec<(&SmolStr, Span)> {
        let mut names = Vec::new();
        let mut stack = vec![self];
        while let Some(item) = stack.pop() {
            if let Self::Subtree(subtree) = item {
                names.push((&subtree.type_name, subtree.span));
                stack.extend(subtree.children.iter().rev());
            }
        }
        names
    }
}

impl fmt::Display for ResultingSubtree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name)?;
        if let Some(data) = &self.data {
            write!(f, "{data}")?;
        }
        if !self.children.is_empty() {
            f.write_str("(")?;
            write_list(f, &self.children)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for RightItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subtree(subtree) => write!(f, "{subtree}"),
            Self::Hole(hole) => write!(f, "{hole}"),
        }
    }
}
