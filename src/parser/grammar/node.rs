//! Node rules: `Name <- body`.
//!
//! The shape of the body decides the node kind:
//!
//! ```text
//! Empty      <- 0;                          regular, no children
//! Block      <- {Statement};                list
//! Expression <- Binary | &Ternary;          abstract
//! Number     <- "int", "0";                 literal
//! Binary     <- left@Expression, [Expression];  regular
//! ```

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::{Statement, type_name};
use crate::base::Span;
use crate::parser::brackets::{TokenTree, span_of};
use crate::parser::cursor::{Cursor, split_on};
use crate::parser::errors::{ErrorCode, ParseContext, ParseError};
use crate::parser::token::{Token, TokenKind};
use crate::model::{ChildDescriptor, LiteralDescriptor, NodeDescriptor, NodeKind};

pub(super) fn parse_node(
    name: &[TokenTree],
    body: &[TokenTree],
    statement: &Statement<'_>,
) -> Result<NodeDescriptor, ParseError> {
    let name = parse_name(name, statement)?;
    let body_span = span_of(body).unwrap_or(statement.span);
    if body.is_empty() {
        return Err(statement.error(
            ErrorCode::E0206,
            format!("node rule '{name}' has nothing after '<-'"),
            statement.span,
        ));
    }

    let kind = if body.iter().any(|t| t.is(TokenKind::Pipe)) || body[0].is(TokenKind::Amp) {
        parse_abstract(body, statement)?
    } else if body[0].is(TokenKind::String) {
        parse_literal(body, body_span, statement)?
    } else if let [TokenTree::Leaf(zero)] = body {
        if !zero.is(TokenKind::Number) {
            parse_children(body, statement)?
        } else if zero.number() == Some(0) {
            NodeKind::Regular {
                children: Vec::new(),
            }
        } else {
            return Err(statement.error(
                ErrorCode::E0307,
                format!("expected '0' or a child type, found {}", zero.describe()),
                zero.span,
            ));
        }
    } else if let [TokenTree::Group(group)] = body {
        if group.kind() == TokenKind::LBrace {
            NodeKind::List {
                element: parse_list_element(&group.children, group.span(), statement)?,
            }
        } else {
            parse_children(body, statement)?
        }
    } else {
        parse_children(body, statement)?
    };

    Ok(NodeDescriptor::new(
        name,
        statement.language.clone(),
        kind,
        statement.span,
    ))
}

fn parse_name(trees: &[TokenTree], statement: &Statement<'_>) -> Result<SmolStr, ParseError> {
    match trees {
        [TokenTree::Leaf(token)] if token.is(TokenKind::Ident) => type_name(token, statement.file),
        [] => Err(ParseError::builder(ErrorCode::E0301)
            .message("node rule has no name before '<-'")
            .location(statement.location(statement.span))
            .build()),
        _ => {
            let cursor = statement.cursor(trees, ParseContext::NodeName, statement.span);
            Err(cursor.unexpected().with_hint("a node name is a single identifier"))
        }
    }
}

fn parse_list_element(
    trees: &[TokenTree],
    span: Span,
    statement: &Statement<'_>,
) -> Result<ChildDescriptor, ParseError> {
    let mut cursor = statement.cursor(trees, ParseContext::NodeBody, span);
    let token = cursor.expect(TokenKind::Ident)?;
    let element = type_name(token, statement.file)?;
    cursor.expect_end()?;
    Ok(ChildDescriptor::new("", element, false))
}

fn parse_abstract(trees: &[TokenTree], statement: &Statement<'_>) -> Result<NodeKind, ParseError> {
    let mut subtypes: Vec<SmolStr> = Vec::new();
    let mut extension: Option<(SmolStr, Span)> = None;

    for alternative in split_on(trees, TokenKind::Pipe) {
        let end = span_of(alternative).unwrap_or(statement.span);
        let mut cursor = statement.cursor(alternative, ParseContext::NodeBody, end);
        let marker = cursor.eat(TokenKind::Amp);
        let token = match cursor.eat(TokenKind::Ident) {
            Some(token) => token,
            None => {
                return Err(cursor
                    .unexpected()
                    .with_hint("alternatives of an abstract node are bare type names"));
            }
        };
        cursor.expect_end()?;
        let subtype = type_name(token, statement.file)?;

        if subtypes.contains(&subtype) {
            return Err(statement.error(
                ErrorCode::E0308,
                format!("'{subtype}' is listed twice"),
                token.span,
            ));
        }
        if let Some(marker) = marker {
            if let Some((first, _)) = &extension {
                return Err(ParseError::builder(ErrorCode::E0304)
                    .message(format!("'{subtype}' is marked with '&' but '{first}' already is"))
                    .location(statement.location(marker.span.cover(token.span)))
                    .hint("only one alternative can be the extension subtype")
                    .build());
            }
            extension = Some((subtype.clone(), token.span));
        }
        subtypes.push(subtype);
    }

    if subtypes.len() < 2 {
        return Err(ParseError::builder(ErrorCode::E0303)
            .message(format!(
                "abstract node needs at least two alternatives, found {}",
                subtypes.len()
            ))
            .location(statement.location(span_of(trees).unwrap_or(statement.span)))
            .hint("declare a node with a single subtype as a regular node instead")
            .build());
    }

    Ok(NodeKind::Abstract {
        subtypes,
        extension: extension.map(|(name, _)| name),
    })
}

fn parse_literal(
    trees: &[TokenTree],
    span: Span,
    statement: &Statement<'_>,
) -> Result<NodeKind, ParseError> {
    let mut values: Vec<&Token> = Vec::new();
    for (i, part) in split_on(trees, TokenKind::Comma).into_iter().enumerate() {
        match part {
            [TokenTree::Leaf(token)] if token.is(TokenKind::String) => values.push(token),
            _ => {
                let end = span_of(part).unwrap_or(span);
                let context = if i == 0 {
                    ParseContext::NodeBody
                } else {
                    ParseContext::DataDescriptor
                };
                let cursor = Cursor::new(part, statement.file, context, end);
                return Err(cursor
                    .unexpected()
                    .with_hint("a literal node lists only string parameters"));
            }
        }
    }
    if values.len() > 5 {
        return Err(ParseError::builder(ErrorCode::E0305)
            .message(format!("literal node takes at most 5 parameters, found {}", values.len()))
            .location(statement.location(span))
            .hint("parameters are: type, initial value, serializer, parser, exception")
            .build());
    }

    let value = |i: usize| values.get(i).map(|t| t.value.as_str());
    let literal = LiteralDescriptor::new(
        value(0).unwrap_or_default(),
        value(1),
        value(2),
        value(3),
        value(4),
    )
    .map_err(|err| statement.error(ErrorCode::E0305, err.to_string(), span))?;
    Ok(NodeKind::Literal(literal))
}

fn parse_children(trees: &[TokenTree], statement: &Statement<'_>) -> Result<NodeKind, ParseError> {
    let mut children = Vec::new();
    let mut tags: FxHashSet<SmolStr> = FxHashSet::default();

    for part in split_on(trees, TokenKind::Comma) {
        let span = span_of(part).unwrap_or(statement.span);
        let child = match part {
            [TokenTree::Group(group)] if group.kind() == TokenKind::LBracket => {
                parse_child(&group.children, true, group.span(), statement)?
            }
            _ => parse_child(part, false, span, statement)?,
        };
        if child.is_tagged() && !tags.insert(child.tag.clone()) {
            return Err(statement.error(
                ErrorCode::E0306,
                format!("tag '{}' is declared twice", child.tag),
                span,
            ));
        }
        children.push(child);
    }
    Ok(NodeKind::Regular { children })
}

/// `Type` or `tag@Type`
fn parse_child(
    trees: &[TokenTree],
    optional: bool,
    span: Span,
    statement: &Statement<'_>,
) -> Result<ChildDescriptor, ParseError> {
    if trees.is_empty() {
        return Err(statement.error(
            ErrorCode::E0307,
            "empty child declaration",
            span,
        ));
    }
    let mut cursor = statement.cursor(trees, ParseContext::ChildDeclaration, span);
    let first = match cursor.eat(TokenKind::Ident) {
        Some(token) => token,
        None => return Err(cursor.unexpected()),
    };
    let (tag, type_token) = if cursor.eat(TokenKind::At).is_some() {
        (first.value.clone(), cursor.expect(TokenKind::Ident)?)
    } else {
        (SmolStr::default(), first)
    };
    cursor.expect_end()?;
    Ok(ChildDescriptor::new(
        tag,
        type_name(type_token, statement.file)?,
        optional,
    ))
}
