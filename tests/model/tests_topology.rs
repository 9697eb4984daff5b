//! Topology of node descriptors.

use treeforge::base::Span;
use treeforge::model::{
    COMMON_LANGUAGE, ModelError, NodeDescriptor, NodeKind, NodeRegistry,
};

use crate::helpers::rule_fixtures::HIERARCHY;
use crate::helpers::tree_helpers::program;

fn topology_of(source: &str, name: &str) -> Vec<String> {
    let program = program(source);
    let registry = program.registry();
    let id = registry.lookup(COMMON_LANGUAGE, name).unwrap();
    registry
        .topology_names(id)
        .into_iter()
        .map(|n| n.to_string())
        .collect()
}

fn empty(name: &str) -> NodeDescriptor {
    NodeDescriptor::new(
        name,
        COMMON_LANGUAGE,
        NodeKind::Regular { children: vec![] },
        Span::default(),
    )
}

#[test]
fn test_descriptor_is_first() {
    let program = program(HIERARCHY);
    let registry = program.registry();
    for (id, descriptor) in registry.iter() {
        assert_eq!(registry.topology(id)[0], id, "{}", descriptor.name());
    }
}

#[test]
fn test_chain_order() {
    assert_eq!(topology_of(HIERARCHY, "Binary"), vec!["Binary", "Expression", "Node"]);
    assert_eq!(topology_of(HIERARCHY, "Block"), vec!["Block", "Statement", "Node"]);
    assert_eq!(topology_of(HIERARCHY, "Node"), vec!["Node"]);
}

#[test]
fn test_diamond_lists_each_base_once() {
    let source = "Top <- Left | Right; Left <- Leaf | X; Right <- Leaf | Y; Leaf <- 0; X <- 0; Y <- 0;";
    let topology = topology_of(source, "Leaf");
    assert_eq!(topology[0], "Leaf");
    assert_eq!(topology.len(), 4);
    assert_eq!(topology.iter().filter(|n| *n == "Top").count(), 1);
    let top = topology.iter().position(|n| n == "Top").unwrap();
    let left = topology.iter().position(|n| n == "Left").unwrap();
    let right = topology.iter().position(|n| n == "Right").unwrap();
    assert!(left < top && right < top);
}

#[test]
fn test_topology_is_stable() {
    let program = program(HIERARCHY);
    let registry = program.registry();
    let id = registry.lookup(COMMON_LANGUAGE, "Return").unwrap();
    let first = registry.topology(id).to_vec();
    let second = registry.topology(id).to_vec();
    assert_eq!(first, second);
}

#[test]
fn test_add_base_rejects_cycles() {
    let mut registry = NodeRegistry::new();
    let a = registry.insert(empty("A")).unwrap();
    let b = registry.insert(empty("B")).unwrap();
    let c = registry.insert(empty("C")).unwrap();

    registry.add_base(a, b).unwrap();
    registry.add_base(b, c).unwrap();
    assert!(matches!(registry.add_base(c, a), Err(ModelError::Cycle { .. })));
    assert!(matches!(registry.add_base(a, a), Err(ModelError::Cycle { .. })));

    // the rejected edges left no trace
    assert_eq!(registry.topology(c), &[c]);
    assert_eq!(registry.topology(a), &[a, b, c]);
}

#[test]
fn test_add_base_drops_stale_topology() {
    let mut registry = NodeRegistry::new();
    let a = registry.insert(empty("A")).unwrap();
    let b = registry.insert(empty("B")).unwrap();
    assert_eq!(registry.topology(a), &[a]);
    registry.add_base(a, b).unwrap();
    assert_eq!(registry.topology(a), &[a, b]);
    // adding the same base again changes nothing
    registry.add_base(a, b).unwrap();
    assert_eq!(registry.topology(a), &[a, b]);
}

#[test]
fn test_is_subtype() {
    let program = program(HIERARCHY);
    let registry = program.registry();
    let lookup = |name| registry.lookup(COMMON_LANGUAGE, name).unwrap();
    assert!(registry.is_subtype(lookup("Literal"), lookup("Node")));
    assert!(registry.is_subtype(lookup("Literal"), lookup("Literal")));
    assert!(!registry.is_subtype(lookup("Literal"), lookup("Statement")));
}

#[test]
fn test_dependencies() {
    let program = program(HIERARCHY);
    let registry = program.registry();
    let ret = registry.lookup(COMMON_LANGUAGE, "Return").unwrap();
    let names: Vec<&str> = registry
        .get(ret)
        .dependencies()
        .iter()
        .map(|&id| registry.get(id).name())
        .collect();
    assert_eq!(names, vec!["Expression", "Statement"]);
}

#[test]
fn test_language_abstract_keeps_common_topology() {
    let source = "Name <- \"String\"; Number <- \"int\"; java: Operand <- Name | Number;";
    assert_eq!(topology_of(source, "Name"), vec!["Name"]);
    assert_eq!(topology_of(source, "Number"), vec!["Number"]);

    let program = program(source);
    let registry = program.registry();
    let operand = registry.lookup("java", "Operand").unwrap();
    let name = registry.lookup("java", "Name").unwrap();
    assert!(!registry.is_subtype(name, operand));
}
