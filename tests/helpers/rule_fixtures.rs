//! Common DSL fixtures for tests.

/// A small expression language
pub const EXPRESSIONS: &str = r#"
// node hierarchy
Expression <- Binary | Literal | Group;
Binary <- left@Expression, op@Operator, right@Expression;
Literal <- "int", "0";
Operator <- "String";
Group <- inner@Expression;
Sum <- left@Expression, right@Expression;
Block <- {Expression};
"#;

pub const ABSTRACT_AND_REGULAR: &str = "Expression <- Binary | Ternary; Binary <- Expression, Expression;";

/// Two levels of abstraction: every Binary is an Expression is a Node
pub const HIERARCHY: &str = r#"
Node <- Expression | Statement;
Expression <- Binary | Literal;
Statement <- Return | Block;
Binary <- Expression, Expression;
Literal <- "int";
Return <- [value@Expression];
Block <- {Statement};
"#;

/// Source made of `fixture` followed by `rules`
pub fn with_rules(fixture: &str, rules: &str) -> String {
    format!("{fixture}\n{rules}")
}
