//! Engine Tests - Building trees from right sides

use rstest::rstest;
use treeforge::model::Hole;
use treeforge::{
    Bindings, BuildError, Converter, DescriptorFactory, Node, Program, SyntaxNode, TextRange, TextSize,
};

use crate::helpers::rule_fixtures::*;
use crate::helpers::tree_helpers::*;

fn fixture_with(rule: &str) -> Program {
    program(&with_rules(EXPRESSIONS, rule))
}

/// Build the right side of the only transformation
fn convert(program: &Program, bindings: &Bindings<Node>) -> Result<Node, BuildError> {
    let factory = DescriptorFactory::common(program);
    Converter::new(&factory).convert(program.transformations()[0].right(), bindings)
}

fn literals(program: &Program, values: &[&str]) -> Bindings<Node> {
    let mut bindings = Bindings::new();
    for (i, value) in values.iter().enumerate() {
        bindings.bind_node(Hole(i as u32 + 1), leaf(program, "Literal", value));
    }
    bindings
}

#[test]
fn test_build_from_holes() {
    let program = fixture_with("Binary(#1, Operator<\"+\">, #2) -> Sum(#1, #2);");
    let sum = convert(&program, &literals(&program, &["1", "2"])).unwrap();
    assert_eq!(sum.to_string(), r#"Sum(Literal<"1">, Literal<"2">)"#);
    assert!(sum.node_type().is_a("Sum"));
}

#[test]
fn test_static_and_bound_data() {
    let program = fixture_with("Literal<#3>, Expression#1 -> Binary(#1, Operator<\"*\">, Literal<#3>);");
    let mut bindings = literals(&program, &["2"]);
    bindings.bind_data(Hole(3), "10");
    let built = convert(&program, &bindings).unwrap();
    assert_eq!(
        built.to_string(),
        r#"Binary(Literal<"2">, Operator<"*">, Literal<"10">)"#
    );
}

#[test]
fn test_literal_falls_back_to_initial_value() {
    let program = fixture_with("Group(#1) -> Binary(#1, Operator<\"+\">, Literal);");
    let built = convert(&program, &literals(&program, &["7"])).unwrap();
    assert_eq!(built.child_nodes()[2].to_string(), r#"Literal<"0">"#);
}

#[test]
fn test_repeated_hole_is_spliced() {
    let program = fixture_with("{Expression#1} -> Block(#1);");
    let mut bindings = Bindings::new();
    for value in ["1", "2", "3"] {
        bindings.bind_node(Hole(1), leaf(&program, "Literal", value));
    }
    let block = convert(&program, &bindings).unwrap();
    assert_eq!(block.child_nodes().len(), 3);
}

#[test]
fn test_bare_hole_returns_bound_node() {
    let program = fixture_with("Group(#1) -> #1;");
    let bindings = literals(&program, &["5"]);
    let built = convert(&program, &bindings).unwrap();
    assert!(built.ptr_eq(bindings.node(Hole(1)).unwrap()));
}

#[test]
fn test_fragment_reaches_every_built_node() {
    let program = fixture_with("Literal<#3>, Expression#1 -> Binary(#1, Operator<\"*\">, Literal<#3>);");
    let mut bindings = literals(&program, &["2"]);
    bindings.bind_data(Hole(3), "10");
    let range = TextRange::new(TextSize::new(4), TextSize::new(9));
    let factory = DescriptorFactory::common(&program);
    let built = Converter::new(&factory)
        .with_fragment(Some(range))
        .convert(program.transformations()[0].right(), &bindings)
        .unwrap();
    assert_eq!(built.fragment(), Some(range));
    assert_eq!(built.child_nodes()[1].fragment(), Some(range));
    // bound nodes are reused untouched
    assert_eq!(built.child_nodes()[0].fragment(), None);
}

// ============================================================================
// Failures abort the whole build
// ============================================================================

#[rstest]
#[case::invalid_literal("Group(#1) -> Group(Binary(#1, Operator<\"+\">, Literal<\"x\">));", "rejected data")]
#[case::other_language("java: Wrapper <- Expression; java: Group(#1) -> Wrapper(#1);", "no builder")]
#[case::wrong_children("Group(#1) -> Binary(#1, Literal, Literal);", "rejected its children")]
#[case::missing_value("Group(#1) -> Sum(#1, Binary(Literal, Operator, Literal));", "incomplete")]
#[case::data_on_regular("Group(#1) -> Group<\"x\">(#1);", "rejected data")]
fn test_build_failures(#[case] rule: &str, #[case] message: &str) {
    let program = fixture_with(rule);
    let err = convert(&program, &literals(&program, &["1"])).unwrap_err();
    assert!(err.to_string().contains(message), "{err}");
}

#[test]
fn test_invalid_literal_reports_value() {
    let program = fixture_with("Group(#1) -> Group(Binary(#1, Operator<\"+\">, Literal<\"x\">));");
    let err = convert(&program, &literals(&program, &["1"])).unwrap_err();
    assert_eq!(
        err,
        BuildError::InvalidData {
            type_name: "Literal".into(),
            data: "x".into(),
        }
    );
}

#[test]
fn test_bare_hole_with_many_nodes() {
    let program = fixture_with("{Expression#1} -> #1;");
    let mut bindings = Bindings::new();
    bindings.bind_node(Hole(1), leaf(&program, "Literal", "1"));
    bindings.bind_node(Hole(1), leaf(&program, "Literal", "2"));
    let err = convert(&program, &bindings).unwrap_err();
    assert_eq!(err, BuildError::NotSingle { hole: Hole(1), count: 2 });
}

#[test]
fn test_unbound_hole() {
    let program = fixture_with("Binary(#1, Operator<\"+\">, #2) -> Sum(#1, #2);");
    let err = convert(&program, &literals(&program, &["1"])).unwrap_err();
    assert_eq!(err, BuildError::UnboundHole(Hole(2)));
}
