//! Shared children of abstract nodes.

use treeforge::model::{COMMON_LANGUAGE, ChildDescriptor};

use crate::helpers::tree_helpers::program;

const SHAPES: &str = r#"
Expression <- Binary | Call;
Operand <- Name | Number;
Binary <- target@Expression, value@Number, [note@Name];
Call <- target@Expression, value@Name, args@Args;
Name <- "String";
Number <- "int";
Args <- {Expression};
"#;

fn shared(source: &str, name: &str) -> Vec<ChildDescriptor> {
    let program = program(source);
    let registry = program.registry();
    let id = registry.lookup(COMMON_LANGUAGE, name).unwrap();
    registry.shared_children(id)
}

#[test]
fn test_common_tags_are_merged() {
    let children = shared(SHAPES, "Expression");
    let tags: Vec<&str> = children.iter().map(|c| c.tag.as_str()).collect();
    assert_eq!(tags, vec!["target", "value"]);
    assert_eq!(children[0].type_name, "Expression");
    // Number and Name meet at Operand
    assert_eq!(children[1].type_name, "Operand");
}

#[test]
fn test_unrelated_types_are_not_shared() {
    let children = shared("Top <- P | Q; P <- x@A, y@A; Q <- x@B, y@A; A <- 0; B <- 0;", "Top");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].tag, "y");
}

#[test]
fn test_merge_needs_same_tag() {
    let program = program("Name <- 0;");
    let a = ChildDescriptor::new("x", "Name", false);
    let b = ChildDescriptor::new("y", "Name", false);
    assert!(a.merge(&b, program.registry()).is_none());
    let c = ChildDescriptor::new("x", "Name", true);
    let merged = a.merge(&c, program.registry()).unwrap();
    assert!(merged.optional);
}

#[test]
fn test_regular_node_shares_its_tagged_children() {
    let children = shared("A <- 0; Pair <- first@A, A;", "Pair");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].tag, "first");
}
