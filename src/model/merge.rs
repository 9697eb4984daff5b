//! Tag merging across the subtypes of an abstract descriptor.
//!
//! When every concrete subtype of an abstract node declares a child with the
//! same tag, that child can be exposed on the abstract node itself. Its type is
//! the nearest common ancestor of the subtypes' declared child types.

use smol_str::SmolStr;

use super::node::{ChildDescriptor, DescriptorId, NodeKind};
use super::registry::NodeRegistry;

impl ChildDescriptor {
    /// Merge two same-tagged child slots.
    ///
    /// Identical types keep the type; different types resolve to the first
    /// entry of `self`'s topology that also appears in `other`'s. Returns
    /// `None` when the tags differ or the types have no common ancestor.
    pub fn merge(&self, other: &ChildDescriptor, registry: &NodeRegistry) -> Option<ChildDescriptor> {
        if self.tag != other.tag {
            return None;
        }
        let optional = self.optional || other.optional;

        let (ours, theirs) = match (self.resolved, other.resolved) {
            (Some(ours), Some(theirs)) => (ours, theirs),
            _ if self.type_name == other.type_name => {
                return Some(ChildDescriptor {
                    optional,
                    ..self.clone()
                });
            }
            _ => return None,
        };

        let ancestor = registry.common_ancestor(ours, theirs)?;
        Some(ChildDescriptor {
            optional,
            tag: self.tag.clone(),
            type_name: SmolStr::new(registry.get(ancestor).name()),
            resolved: Some(ancestor),
        })
    }
}

impl NodeRegistry {
    /// Nearest common ancestor, in `a`'s topology order
    pub fn common_ancestor(&self, a: DescriptorId, b: DescriptorId) -> Option<DescriptorId> {
        if a == b {
            return Some(a);
        }
        let theirs = self.topology(b);
        self.topology(a)
            .iter()
            .copied()
            .find(|candidate| theirs.contains(candidate))
    }

    /// Tagged children shared by every subtype of `id`.
    ///
    /// For a regular descriptor these are its own tagged children; for an
    /// abstract one, the tags present in all subtypes, merged pairwise. Order
    /// follows the first subtype.
    pub fn shared_children(&self, id: DescriptorId) -> Vec<ChildDescriptor> {
        match self.get(id).kind() {
            NodeKind::Regular { children } => {
                children.iter().filter(|c| c.is_tagged()).cloned().collect()
            }
            NodeKind::Abstract { .. } => {
                let mut subtypes = self.get(id).subtypes().iter();
                let Some(&first) = subtypes.next() else {
                    return Vec::new();
                };
                let mut shared = self.shared_children(first);
                for &subtype in subtypes {
                    let theirs = self.shared_children(subtype);
                    shared = shared
                        .into_iter()
                        .filter_map(|ours| {
                            theirs
                                .iter()
                                .find(|c| c.tag == ours.tag)
                                .and_then(|other| ours.merge(other, self))
                        })
                        .collect();
                }
                shared
            }
            NodeKind::List { .. } | NodeKind::Literal(_) => Vec::new(),
        }
    }
}
