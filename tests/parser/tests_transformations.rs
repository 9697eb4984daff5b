//! Parser Tests - Transformations

use rstest::rstest;
use treeforge::model::{DataDescriptor, Hole, LeftItemKind, MatchMode, RightItem};
use treeforge::parse_program;

use crate::helpers::rule_fixtures::*;

fn parse_rule(rule: &str) -> Result<treeforge::Program, treeforge::ParseError> {
    parse_program(&with_rules(EXPRESSIONS, rule))
}

// ============================================================================
// Accepted rules
// ============================================================================

#[rstest]
#[case("Binary(#1, Operator<\"+\">, #2) -> Sum(#1, #2);")]
#[case("Expression#1, Operator<#2>, Expression#3 -> Binary(#1, Operator<#2>, #3);")]
#[case("..., Expression#1, Operator<\"-\">, Expression#2 -> Binary(#1, Operator<\"-\">, #2);")]
#[case("[Operator<\"+\">], Literal<#1> -> Literal<#1>;")]
#[case("{Expression#1} -> Block(#1);")]
#[case("|(Literal<\"0\">, Literal<\"1\">), Expression#1 -> #1;")]
#[case("&(Expression#1, ~Group) -> Group(#1);")]
#[case("\"(\", Expression#1, \")\" -> Group(#1);")]
#[case("'0'..'9' -> Literal;")]
#[case("Group(Group(#1)) -> Group(#1);")]
#[case("java: Literal<#1> -> Literal<#1>;")]
fn test_accepted(#[case] rule: &str) {
    assert!(parse_rule(rule).is_ok(), "Failed to parse: {}", rule);
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_items_and_modes() {
    let program = parse_rule("[Operator<\"+\">], {~Group}, Expression#1 -> #1;").unwrap();
    let rule = &program.transformations()[0];
    let modes: Vec<MatchMode> = rule.left().iter().map(|item| item.mode).collect();
    assert_eq!(modes, vec![MatchMode::Optional, MatchMode::Repeated, MatchMode::Normal]);
    assert!(rule.left()[1].negated);
    assert_eq!(rule.right(), &RightItem::Hole(Hole(1)));
}

#[test]
fn test_pattern_data_and_children() {
    let program = parse_rule("Binary(#1, Operator<#3>, #2) -> Binary(#2, Operator<#3>, #1);").unwrap();
    let rule = &program.transformations()[0];
    let LeftItemKind::Pattern(pattern) = &rule.left()[0].kind else {
        panic!("expected a pattern");
    };
    assert_eq!(pattern.type_name, "Binary");
    assert_eq!(pattern.data, None);
    assert_eq!(pattern.children.len(), 3);
    let LeftItemKind::Pattern(operator) = &pattern.children[1].kind else {
        panic!("expected a pattern");
    };
    assert_eq!(operator.data, Some(DataDescriptor::Hole(Hole(3))));

    let mut nodes: Vec<u32> = rule.node_holes().into_iter().map(Hole::number).collect();
    nodes.sort();
    assert_eq!(nodes, vec![1, 2]);
    assert_eq!(rule.data_holes().into_iter().collect::<Vec<_>>(), vec![Hole(3)]);
}

#[test]
fn test_display_reproduces_rule() {
    let rule = "..., Expression#1, Operator<\"-\">, Expression#2 -> Binary(#1, Operator<\"-\">, #2)";
    let program = parse_rule(&format!("{rule};")).unwrap();
    assert_eq!(program.transformations()[0].to_string(), rule);
}

#[test]
fn test_language_of_transformation() {
    let program = parse_rule("java: Literal<#1> -> Literal<#1>; Group(#1) -> #1;").unwrap();
    assert_eq!(program.transformations()[0].language(), "java");
    assert_eq!(program.transformations()[1].language(), "common");
    assert_eq!(program.transformations_for("java").count(), 2);
    assert_eq!(program.transformations_for("kotlin").count(), 1);
}
