//! Re-serializing parsed programs.

use rstest::rstest;
use treeforge::model::{DataDescriptor, LeftItemKind, Rule, SymbolDescriptor};
use treeforge::{ParseOptions, parse_program, parse_program_with};

use crate::helpers::rule_fixtures::*;
use crate::helpers::tree_helpers::program;

#[test]
fn test_unresolved_fragment_displays_as_written() {
    let program = parse_program(ABSTRACT_AND_REGULAR).unwrap();
    let rendered: Vec<String> = program.node_descriptors().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec!["Expression <- Binary | Ternary", "Binary <- Expression, Expression"]
    );
    // Ternary is never declared
    let strict = ParseOptions::default().strict();
    assert!(parse_program_with(ABSTRACT_AND_REGULAR, &strict).is_err());
}

#[rstest]
#[case("Empty <- 0;")]
#[case("Block <- {Stmt}; Stmt <- 0;")]
#[case("Int <- \"int\", \"0\";")]
#[case("Date <- \"Date\", \"now\", \"format\", \"parse\", \"DateError\";")]
#[case("Call <- callee@Name, [args@Args]; Name <- \"String\"; Args <- {Name};")]
#[case("E <- A | &B | C; A <- 0; B <- 0; C <- 0;")]
fn test_declaration_survives_reparse(#[case] source: &str) {
    let first = program(source).to_dsl();
    let second = program(&first).to_dsl();
    assert_eq!(first, second);
    assert_eq!(first.lines().count(), source.matches(';').count());
}

#[test]
fn test_fixture_round_trip() {
    let source = with_rules(
        EXPRESSIONS,
        r#"
        Binary(#1, Operator<"+">, #2) -> Sum(#1, #2);
        java: ..., Expression#1, Operator<#2>, Expression#3 -> Binary(#1, Operator<#2>, #3);
        [Operator<"-">], {~Group}, |(Literal<"0">, Group(Literal)) -> Block;
        "#,
    );
    let dsl = program(&source).to_dsl();
    assert!(dsl.contains("Literal <- \"int\", \"0\";\n"));
    assert!(dsl.contains("java: ..., Expression#1, Operator<#2>, Expression#3 -> Binary(#1, Operator<#2>, #3);\n"));
    assert_eq!(program(&dsl).to_dsl(), dsl);
}

#[test]
fn test_escaped_text_survives_reparse() {
    let rules = concat!(
        r#"Operator<"a\"b\\c\nd\t">, '\''..'~', "\r" -> Literal<"x\ny"#,
        "\u{1}",
        r#"">;"#,
        "\n",
        r#"Quote <- "String", "it's \"here\"";"#,
    );
    let first = program(&with_rules(EXPRESSIONS, rules)).to_dsl();
    assert!(first.contains(r#"Operator<"a\"b\\c\nd\t">, '\''..'~', "\r" -> "#));
    assert!(first.contains("Literal<\"x\\ny\u{1}\">;\n"));
    assert!(first.contains(r#"Quote <- "String", "it's \"here\"";"#));

    let second = program(&first);
    assert_eq!(second.to_dsl(), first);
    let left = second.transformations()[0].left();
    let LeftItemKind::Pattern(pattern) = &left[0].kind else {
        panic!("expected a pattern");
    };
    assert_eq!(pattern.data, Some(DataDescriptor::Static("a\"b\\c\nd\t".into())));
    assert_eq!(left[1].kind, LeftItemKind::Symbol(SymbolDescriptor::Range('\'', '~')));
    assert_eq!(left[2].kind, LeftItemKind::Symbol(SymbolDescriptor::Text("\r".into())));
}

#[test]
fn test_rules_keep_declaration_order() {
    let source = with_rules(EXPRESSIONS, "Group(#1) -> #1; Tail <- 0; Literal<#1> -> Literal<#1>;");
    let program = program(&source);
    let rules = program.rules();
    let tail = rules.len() - 2;
    assert!(matches!(rules[tail - 1], Rule::Transformation(0)));
    assert!(matches!(rules[tail], Rule::Node(_)));
    assert!(matches!(rules[tail + 1], Rule::Transformation(1)));
}

#[test]
fn test_languages_common_first() {
    let program = program("java: A <- 0; B <- 0; js: C <- 0;");
    let languages = program.languages();
    let names: Vec<&str> = languages.iter().map(|l| l.as_str()).collect();
    assert_eq!(names, vec!["common", "java", "js"]);
}
