//! A parsed rule program.

use std::fmt::Write as _;

use indexmap::IndexSet;
use smol_str::SmolStr;
use tracing::debug;

use super::error::ModelError;
use super::items::{LeftItem, LeftItemKind};
use super::node::{COMMON_LANGUAGE, DescriptorId, NodeDescriptor};
use super::registry::{NodeRegistry, UnknownTypes};
use super::transformation::TransformationDescriptor;

/// One statement of a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Node(DescriptorId),
    Transformation(usize),
}

/// Node descriptors and transformations, in declaration order
#[derive(Debug, Clone, Default)]
pub struct Program {
    registry: NodeRegistry,
    transformations: Vec<TransformationDescriptor>,
    rules: Vec<Rule>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_node(&mut self, descriptor: NodeDescriptor) -> Result<DescriptorId, ModelError> {
        let id = self.registry.insert(descriptor)?;
        self.rules.push(Rule::Node(id));
        Ok(id)
    }

    pub(crate) fn push_transformation(&mut self, transformation: TransformationDescriptor) {
        self.rules.push(Rule::Transformation(self.transformations.len()));
        self.transformations.push(transformation);
    }

    /// Second pass after every statement has been read: binds type names,
    /// builds inheritance and checks that transformations only name known
    /// types and only build instantiable ones. With [`UnknownTypes::Ignore`]
    /// undeclared names are left unbound instead of failing.
    pub fn resolve(&mut self, unknown_types: UnknownTypes) -> Result<(), ModelError> {
        self.registry.resolve(unknown_types)?;
        for transformation in &self.transformations {
            self.check_transformation(transformation, unknown_types)?;
        }
        debug!(
            nodes = self.registry.len(),
            transformations = self.transformations.len(),
            "program resolved"
        );
        Ok(())
    }

    fn check_transformation(
        &self,
        transformation: &TransformationDescriptor,
        unknown_types: UnknownTypes,
    ) -> Result<(), ModelError> {
        let strict = unknown_types == UnknownTypes::Reject;
        let language = transformation.language();
        let referenced_by = SmolStr::new(transformation.to_string());

        let mut stack: Vec<&LeftItem> = transformation.left().iter().collect();
        while let Some(item) = stack.pop() {
            let name = match &item.kind {
                LeftItemKind::Pattern(pattern) => Some(&pattern.type_name),
                LeftItemKind::TypedHole(typed) => Some(&typed.type_name),
                _ => None,
            };
            if let Some(name) = name {
                if strict && self.registry.lookup(language, name).is_none() {
                    return Err(ModelError::UnknownType {
                        name: name.clone(),
                        referenced_by,
                        span: item.span,
                    });
                }
            }
            stack.extend(item.nested());
        }

        for (name, span) in transformation.right().type_names() {
            let Some(id) = self.registry.lookup(language, name) else {
                if !strict {
                    continue;
                }
                return Err(ModelError::UnknownType {
                    name: name.clone(),
                    referenced_by,
                    span,
                });
            };
            if !self.registry.get(id).is_instantiable() {
                return Err(ModelError::NotInstantiable {
                    name: name.clone(),
                    span,
                });
            }
        }
        Ok(())
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn node_descriptors(&self) -> impl Iterator<Item = &NodeDescriptor> {
        self.registry.iter().map(|(_, descriptor)| descriptor)
    }

    pub fn transformations(&self) -> &[TransformationDescriptor] {
        &self.transformations
    }

    /// Transformations that apply to `language`: its own and the common ones,
    /// in declaration order
    pub fn transformations_for<'a>(
        &'a self,
        language: &str,
    ) -> impl Iterator<Item = &'a TransformationDescriptor> + use<'a> {
        let language = SmolStr::new(language);
        self.transformations
            .iter()
            .filter(move |t| t.language() == language.as_str() || t.language() == COMMON_LANGUAGE)
    }

    /// Every language bucket used, `common` first when present
    pub fn languages(&self) -> IndexSet<SmolStr> {
        let mut languages = IndexSet::new();
        let used = self
            .node_descriptors()
            .map(NodeDescriptor::language)
            .chain(self.transformations.iter().map(TransformationDescriptor::language));
        for language in used {
            languages.insert(SmolStr::new(language));
        }
        if let Some(index) = languages.get_index_of(COMMON_LANGUAGE) {
            languages.move_index(index, 0);
        }
        languages
    }

    /// Look up a node descriptor as seen from `language`
    pub fn node(&self, language: &str, name: &str) -> Option<&NodeDescriptor> {
        self.registry
            .lookup(language, name)
            .map(|id| self.registry.get(id))
    }

    /// Re-serialize the whole program, one statement per line
    pub fn to_dsl(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            let (language, text) = match rule {
                Rule::Node(id) => {
                    let descriptor = self.registry.get(*id);
                    (descriptor.language(), descriptor.to_string())
                }
                Rule::Transformation(index) => {
                    let transformation = &self.transformations[*index];
                    (transformation.language(), transformation.to_string())
                }
            };
            if language == COMMON_LANGUAGE {
                let _ = writeln!(out, "{text};");
            } else {
                let _ = writeln!(out, "{language}: {text};");
            }
        }
        out
    }
}
