//! Engine Tests - Rewriting trees

use treeforge::{Node, Program, SyntaxNode, TextRange, TextSize, TransformOptions, Transformer};

use crate::helpers::rule_fixtures::*;
use crate::helpers::tree_helpers::*;

/// The expression fixture plus a token list that holds operators, operands and blocks
fn tokens_with(rules: &str) -> Program {
    program(&with_rules(
        EXPRESSIONS,
        &format!("Token <- Expression | Operator | Block; Tokens <- {{Token}};\n{rules}"),
    ))
}

const INFIX: &str = r#"
Expression#1, Operator<"*">, Expression#2 -> Binary(#1, Operator<"*">, #2);
Expression#1, Operator<"+">, Expression#2 -> Binary(#1, Operator<"+">, #2);
"#;

/// `1 + 2 * 3` style input: digits become literals, anything else an operator
fn tokens(program: &Program, text: &str) -> Vec<Node> {
    text.split_whitespace()
        .map(|t| match t.parse::<i32>() {
            Ok(_) => leaf(program, "Literal", t),
            Err(_) => leaf(program, "Operator", t),
        })
        .collect()
}

fn rewrite_tokens(program: &Program, text: &str) -> String {
    let transformer = Transformer::new(program, &TransformOptions::default());
    let root = branch(program, "Tokens", tokens(program, text));
    transformer.rewrite(&root).to_string()
}

// ============================================================================
// Sibling windows
// ============================================================================

#[test]
fn test_rules_apply_in_declaration_order() {
    let program = tokens_with(INFIX);
    assert_eq!(
        rewrite_tokens(&program, "1 + 2 * 3"),
        r#"Tokens(Binary(Literal<"1">, Operator<"+">, Binary(Literal<"2">, Operator<"*">, Literal<"3">)))"#
    );
}

#[test]
fn test_one_pass_per_rule() {
    let program = tokens_with(INFIX);
    let transformer = Transformer::new(&program, &TransformOptions::default());
    let output = transformer.rewrite_sequence(&tokens(&program, "1 + 2 + 3"));
    assert_eq!(
        render(&output),
        vec![
            r#"Binary(Literal<"1">, Operator<"+">, Literal<"2">)"#,
            r#"Operator<"+">"#,
            r#"Literal<"3">"#,
        ]
    );
}

#[test]
fn test_right_to_left_groups_from_the_end() {
    let program = tokens_with(
        "..., Expression#1, Operator<\"-\">, Expression#2 -> Binary(#1, Operator<\"-\">, #2);",
    );
    let transformer = Transformer::new(&program, &TransformOptions::default());
    let output = transformer.rewrite_sequence(&tokens(&program, "1 - 2 - 3"));
    assert_eq!(
        render(&output),
        vec![
            r#"Literal<"1">"#,
            r#"Operator<"-">"#,
            r#"Binary(Literal<"2">, Operator<"-">, Literal<"3">)"#,
        ]
    );
}

#[test]
fn test_repeated_item_collects_run() {
    let program = tokens_with("Operator<\"[\">, {Expression#1}, Operator<\"]\"> -> Block(#1);");
    assert_eq!(
        rewrite_tokens(&program, "[ 1 2 3 ] 4"),
        r#"Tokens(Block(Literal<"1">, Literal<"2">, Literal<"3">), Literal<"4">)"#
    );
}

#[test]
fn test_optional_item() {
    let program = tokens_with("[Operator<\"-\">], Literal<#1> -> Group(Literal<#1>);");
    assert_eq!(
        rewrite_tokens(&program, "- 1 2"),
        r#"Tokens(Group(Literal<"1">), Group(Literal<"2">))"#
    );
}

#[test]
fn test_fragments_are_covered() {
    let program = tokens_with(INFIX);
    let transformer = Transformer::new(&program, &TransformOptions::default());
    let input: Vec<Node> = tokens(&program, "1 + 2")
        .into_iter()
        .enumerate()
        .map(|(i, node)| {
            let start = TextSize::new(2 * i as u32);
            node.with_fragment(Some(TextRange::at(start, TextSize::new(1))))
        })
        .collect();
    let output = transformer.rewrite_sequence(&input);
    assert_eq!(output.len(), 1);
    assert_eq!(
        output[0].fragment(),
        Some(TextRange::new(TextSize::new(0), TextSize::new(5)))
    );
}

// ============================================================================
// Whole trees
// ============================================================================

#[test]
fn test_bottom_up_rewrite() {
    let program = program(&with_rules(EXPRESSIONS, "Group(Group(#1)) -> Group(#1);"));
    let transformer = Transformer::new(&program, &TransformOptions::default());
    let mut root = leaf(&program, "Literal", "1");
    for _ in 0..3 {
        root = branch(&program, "Group", vec![root]);
    }
    assert_eq!(transformer.rewrite(&root).to_string(), r#"Group(Literal<"1">)"#);
}

#[test]
fn test_unchanged_tree_is_shared() {
    let program = tokens_with(INFIX);
    let transformer = Transformer::new(&program, &TransformOptions::default());
    let root = branch(&program, "Group", vec![leaf(&program, "Literal", "1")]);
    let output = transformer.rewrite(&root);
    assert!(output.ptr_eq(&root));
}

#[test]
fn test_invalid_parent_keeps_original() {
    // an Operator cannot stand where Group expects an Expression
    let program = program(&with_rules(EXPRESSIONS, "Literal<\"1\"> -> Operator<\"+\">;"));
    let transformer = Transformer::new(&program, &TransformOptions::default());
    let root = branch(&program, "Group", vec![leaf(&program, "Literal", "1")]);
    assert_eq!(transformer.rewrite(&root).to_string(), r#"Group(Literal<"1">)"#);
}

#[test]
fn test_language_rules() {
    let program = tokens_with(
        "java: Expression#1, Operator<\"+\">, Expression#2 -> Binary(#1, Operator<\"+\">, #2);",
    );
    let input = branch(&program, "Tokens", tokens(&program, "1 + 2"));

    let common = Transformer::new(&program, &TransformOptions::default());
    assert!(common.rules().is_empty());
    assert!(common.rewrite(&input).ptr_eq(&input));

    // the options are a temporary; the transformer only borrows the program
    let java = Transformer::new(&program, &TransformOptions::for_language("java"));
    assert_eq!(java.rules().len(), 1);
    assert_eq!(
        java.rewrite(&input).to_string(),
        r#"Tokens(Binary(Literal<"1">, Operator<"+">, Literal<"2">))"#
    );
}

#[test]
fn test_forest() {
    let program = tokens_with(INFIX);
    let transformer = Transformer::new(&program, &TransformOptions::default());
    let roots: Vec<Node> = ["1 + 2", "3", "4 * 5 * 6"]
        .iter()
        .map(|text| branch(&program, "Tokens", tokens(&program, text)))
        .collect();
    let output = transformer.rewrite_forest(&roots);
    assert_eq!(
        render(&output),
        vec![
            r#"Tokens(Binary(Literal<"1">, Operator<"+">, Literal<"2">))"#,
            r#"Tokens(Literal<"3">)"#,
            r#"Tokens(Binary(Literal<"4">, Operator<"*">, Literal<"5">), Operator<"*">, Literal<"6">)"#,
        ]
    );
}
