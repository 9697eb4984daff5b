//! Arena of node descriptors with inheritance topology.
//!
//! Descriptors reference each other by name while a program is parsed. Once
//! every statement has been read, [`NodeRegistry::resolve`] binds those names
//! to [`DescriptorId`]s, wires abstract descriptors to their subtypes as bases
//! and records the dependency sets.

use std::collections::VecDeque;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::{debug, trace};

use super::error::ModelError;
use super::node::{COMMON_LANGUAGE, DescriptorId, NodeDescriptor, NodeKind};

/// How [`NodeRegistry::resolve`] treats type names that nothing declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnknownTypes {
    /// Leave them unbound; the descriptor keeps the name only
    #[default]
    Ignore,
    /// Fail with [`ModelError::UnknownType`]
    Reject,
}

#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    descriptors: Vec<NodeDescriptor>,
    /// (language, name) -> descriptor, in declaration order
    by_name: IndexMap<(SmolStr, SmolStr), DescriptorId>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor. Names are unique per language.
    pub fn insert(&mut self, descriptor: NodeDescriptor) -> Result<DescriptorId, ModelError> {
        let key = (
            SmolStr::new(descriptor.language()),
            SmolStr::new(descriptor.name()),
        );
        if self.by_name.contains_key(&key) {
            return Err(ModelError::Duplicate {
                name: key.1,
                language: key.0,
                span: descriptor.span(),
            });
        }
        let id = DescriptorId(self.descriptors.len() as u32);
        self.descriptors.push(descriptor);
        self.by_name.insert(key, id);
        Ok(id)
    }

    pub fn get(&self, id: DescriptorId) -> &NodeDescriptor {
        &self.descriptors[id.index()]
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DescriptorId, &NodeDescriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (DescriptorId(i as u32), d))
    }

    /// Resolve a type name as seen from `language`: the language's own
    /// descriptor first, then the green (common) one.
    pub fn lookup(&self, language: &str, name: &str) -> Option<DescriptorId> {
        self.by_name
            .get(&(SmolStr::new(language), SmolStr::new(name)))
            .or_else(|| {
                self.by_name
                    .get(&(SmolStr::new_static(COMMON_LANGUAGE), SmolStr::new(name)))
            })
            .copied()
    }

    /// Make `base` a direct base of `id`.
    ///
    /// Fails with [`ModelError::Cycle`] when `id` is `base` or already one of
    /// `base`'s ancestors. Adding an existing base is a no-op.
    pub fn add_base(&mut self, id: DescriptorId, base: DescriptorId) -> Result<(), ModelError> {
        if id == base || self.is_ancestor(id, base) {
            let descriptor = self.get(id);
            return Err(ModelError::Cycle {
                descriptor: SmolStr::new(descriptor.name()),
                base: SmolStr::new(self.get(base).name()),
                span: self.get(base).span(),
            });
        }
        if self.get(id).bases.contains(&base) {
            return Ok(());
        }
        self.descriptors[id.index()].bases.push(base);
        // Every cached topology that reaches `id` is stale now
        for descriptor in &mut self.descriptors {
            descriptor.topology.take();
        }
        Ok(())
    }

    /// Whether `ancestor` is a transitive base of `of`
    pub fn is_ancestor(&self, ancestor: DescriptorId, of: DescriptorId) -> bool {
        self.get(of)
            .bases
            .iter()
            .any(|&base| base == ancestor || self.is_ancestor(ancestor, base))
    }

    /// The descriptor followed by all of its transitive bases, each exactly
    /// once, every descriptor before its own bases. Memoized.
    pub fn topology(&self, id: DescriptorId) -> &[DescriptorId] {
        self.get(id).topology.get_or_init(|| {
            let mut visited = FxHashSet::default();
            let mut order = VecDeque::new();
            self.visit_topology(id, &mut visited, &mut order);
            order.into()
        })
    }

    fn visit_topology(
        &self,
        id: DescriptorId,
        visited: &mut FxHashSet<DescriptorId>,
        order: &mut VecDeque<DescriptorId>,
    ) {
        if !visited.insert(id) {
            return;
        }
        for &base in self.get(id).bases.iter().rev() {
            self.visit_topology(base, visited, order);
        }
        order.push_front(id);
    }

    /// `id` is `ancestor` or inherits from it
    pub fn is_subtype(&self, id: DescriptorId, ancestor: DescriptorId) -> bool {
        self.topology(id).contains(&ancestor)
    }

    /// Names along the topology, self first
    pub fn topology_names(&self, id: DescriptorId) -> Vec<SmolStr> {
        self.topology(id)
            .iter()
            .map(|&t| SmolStr::new(self.get(t).name()))
            .collect()
    }

    /// Bind every type name to a descriptor, attach abstract descriptors as
    /// bases of their subtypes and record dependencies.
    ///
    /// Names nobody declares stay unbound under [`UnknownTypes::Ignore`].
    pub fn resolve(&mut self, unknown_types: UnknownTypes) -> Result<(), ModelError> {
        for index in 0..self.descriptors.len() {
            let id = DescriptorId(index as u32);
            let language = SmolStr::new(self.get(id).language());
            let owner = SmolStr::new(self.get(id).name());
            let span = self.get(id).span();
            let lookup = |registry: &Self, name: &SmolStr| match registry.lookup(&language, name) {
                Some(found) => Ok(Some(found)),
                None if unknown_types == UnknownTypes::Ignore => {
                    trace!(descriptor = %owner, name = %name, "type name left unbound");
                    Ok(None)
                }
                None => Err(ModelError::UnknownType {
                    name: name.clone(),
                    referenced_by: owner.clone(),
                    span,
                }),
            };

            let mut subtypes = Vec::new();
            match self.get(id).kind() {
                NodeKind::Abstract { subtypes: names, .. } => {
                    for name in names {
                        subtypes.extend(lookup(self, name)?);
                    }
                }
                NodeKind::List { element } => {
                    let element_id = lookup(self, &element.type_name)?;
                    if let NodeKind::List { element } = self.descriptors[index].kind_mut() {
                        element.resolved = element_id;
                    }
                }
                NodeKind::Regular { children } => {
                    let ids = children
                        .iter()
                        .map(|child| lookup(self, &child.type_name))
                        .collect::<Result<Vec<_>, _>>()?;
                    if let NodeKind::Regular { children } = self.descriptors[index].kind_mut() {
                        for (child, child_id) in children.iter_mut().zip(ids) {
                            child.resolved = child_id;
                        }
                    }
                }
                NodeKind::Literal(_) => {}
            }

            for &subtype in &subtypes {
                // a shared (common) descriptor never inherits from one language's abstract
                if self.get(subtype).language() != language.as_str() {
                    trace!(descriptor = %owner, subtype = self.get(subtype).name(), "cross-language subtype not wired");
                    continue;
                }
                self.add_base(subtype, id)?;
            }
            trace!(descriptor = %owner, subtypes = subtypes.len(), "resolved descriptor");
            self.descriptors[index].subtype_ids = subtypes;
        }

        for index in 0..self.descriptors.len() {
            let descriptor = &self.descriptors[index];
            let mut dependencies: Vec<DescriptorId> = Vec::new();
            let referenced = descriptor
                .children()
                .iter()
                .filter_map(|c| c.resolved)
                .chain(match descriptor.kind() {
                    NodeKind::List { element } => element.resolved,
                    _ => None,
                })
                .chain(descriptor.subtype_ids.iter().copied())
                .chain(descriptor.bases.iter().copied());
            for dependency in referenced {
                if !dependencies.contains(&dependency) {
                    dependencies.push(dependency);
                }
            }
            self.descriptors[index].dependencies = dependencies;
        }

        debug!(descriptors = self.descriptors.len(), "node registry resolved");
        Ok(())
    }
}
