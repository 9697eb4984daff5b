//! Engine Tests - Matching

use rstest::rstest;
use treeforge::model::Hole;
use treeforge::{Bindings, Matcher, Node, Program};

use crate::helpers::rule_fixtures::*;
use crate::helpers::tree_helpers::*;

fn fixture_with(rule: &str) -> Program {
    program(&with_rules(EXPRESSIONS, rule))
}

/// Bindings of the first left item of the only transformation, if it matches
fn find(program: &Program, node: &Node) -> Option<Bindings<Node>> {
    let item = &program.transformations()[0].left()[0];
    Matcher::new(item).find(node)
}

fn binary(program: &Program, left: &str, op: &str, right: &str) -> Node {
    branch(
        program,
        "Binary",
        vec![
            leaf(program, "Literal", left),
            leaf(program, "Operator", op),
            leaf(program, "Literal", right),
        ],
    )
}

// ============================================================================
// Patterns
// ============================================================================

#[test]
fn test_children_bind_holes() {
    let program = fixture_with("Binary(#1, Operator<\"+\">, #2) -> Sum(#1, #2);");
    let node = binary(&program, "1", "+", "2");

    let bindings = find(&program, &node).expect("should match");
    assert_eq!(bindings.node_holes(), vec![Hole(1), Hole(2)]);
    assert_eq!(render(bindings.nodes(Hole(1)).unwrap()), vec!["Literal<\"1\">"]);
    assert_eq!(render(bindings.nodes(Hole(2)).unwrap()), vec!["Literal<\"2\">"]);
    assert!(bindings.data_holes().is_empty());
}

#[rstest]
#[case("+", true)]
#[case("-", false)]
#[case("", false)]
fn test_static_data(#[case] op: &str, #[case] expected: bool) {
    let program = fixture_with("Binary(#1, Operator<\"+\">, #2) -> Sum(#1, #2);");
    let node = binary(&program, "1", op, "2");
    assert_eq!(find(&program, &node).is_some(), expected);
}

#[test]
fn test_missing_data_requires_empty_data() {
    let program = fixture_with("Operator -> Operator;");
    assert!(find(&program, &leaf(&program, "Operator", "")).is_some());
    assert!(find(&program, &leaf(&program, "Operator", "+")).is_none());
}

#[test]
fn test_data_hole_captures_text() {
    let program = fixture_with("Binary(#1, Operator<#3>, #2) -> Binary(#2, Operator<#3>, #1);");
    let bindings = find(&program, &binary(&program, "4", "*", "5")).unwrap();
    assert_eq!(bindings.data(Hole(3)), Some("*"));
    assert_eq!(bindings.data_holes(), vec![Hole(3)]);
}

#[test]
fn test_pattern_arity_and_type_are_exact() {
    let program = fixture_with("Group(#1) -> #1;");
    let literal = leaf(&program, "Literal", "1");
    let group = branch(&program, "Group", vec![literal.clone()]);
    assert!(find(&program, &group).is_some());
    assert!(find(&program, &literal).is_none());
    // a pattern names one type, not its subtypes
    assert!(find(&program, &binary(&program, "1", "+", "2")).is_none());
}

// ============================================================================
// Holes, symbols and combinators
// ============================================================================

#[test]
fn test_typed_hole_accepts_subtypes() {
    let program = fixture_with("Expression#1 -> Group(#1);");
    assert!(find(&program, &leaf(&program, "Literal", "1")).is_some());
    assert!(find(&program, &binary(&program, "1", "+", "2")).is_some());
    assert!(find(&program, &leaf(&program, "Operator", "+")).is_none());
}

#[rstest]
#[case("\"(\"", "(", true)]
#[case("\"(\"", ")", false)]
#[case("'0'..'9'", "7", true)]
#[case("'0'..'9'", "12", false)]
#[case("'0'..'9'", "x", false)]
fn test_symbols(#[case] symbol: &str, #[case] data: &str, #[case] expected: bool) {
    let program = fixture_with(&format!("{symbol} -> Literal;"));
    let node = leaf(&program, "Operator", data);
    assert_eq!(find(&program, &node).is_some(), expected);
}

#[test]
fn test_symbol_needs_leaf() {
    let program = fixture_with("\"(\" -> Literal;");
    let inner = leaf(&program, "Literal", "1");
    let node = Node::new(node_type(&program, "Group"), "(", vec![inner]);
    assert!(find(&program, &node).is_none());
}

#[test]
fn test_or_takes_first_match() {
    let program = fixture_with("|(Literal<\"1\">, Literal<#1>) -> Literal<#1>;");

    let bindings = find(&program, &leaf(&program, "Literal", "1")).unwrap();
    assert_eq!(bindings.data(Hole(1)), None);

    let bindings = find(&program, &leaf(&program, "Literal", "5")).unwrap();
    assert_eq!(bindings.data(Hole(1)), Some("5"));
}

#[test]
fn test_failed_alternative_leaves_no_bindings() {
    let program = fixture_with("|(Binary(#1, Operator<\"*\">, #2), Group(Literal)) -> Sum(#1, #2);");
    let item = &program.transformations()[0].left()[0];
    let mut bindings = Bindings::new();
    assert!(!Matcher::new(item).matches(&binary(&program, "1", "+", "2"), &mut bindings));
    assert!(bindings.is_empty());
}

#[test]
fn test_and_needs_every_operand() {
    let program = fixture_with("&(Expression#1, ~Group(Literal)) -> Group(#1);");
    let literal = leaf(&program, "Literal", "1");
    let bindings = find(&program, &literal).unwrap();
    assert_eq!(render(bindings.nodes(Hole(1)).unwrap()), vec!["Literal<\"1\">"]);

    let group = branch(&program, "Group", vec![literal]);
    assert!(find(&program, &group).is_none());
}

#[test]
fn test_negation_inverts() {
    let program = fixture_with("~Operator<\"+\"> -> Literal;");
    assert!(find(&program, &leaf(&program, "Operator", "+")).is_none());
    let bindings = find(&program, &leaf(&program, "Operator", "-")).unwrap();
    assert!(bindings.is_empty());
}
