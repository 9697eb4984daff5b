//! Right side of a transformation: `Type<data>(children)` or `#N`.

use super::items::parse_data_descriptor;
use super::{Statement, parse_hole_number, type_name};
use crate::base::Span;
use crate::model::{Hole, ResultingSubtree, RightItem};
use crate::parser::brackets::{TokenTree, span_of};
use crate::parser::cursor::{Cursor, split_on};
use crate::parser::errors::{ErrorCode, ParseContext, ParseError};
use crate::parser::token::TokenKind;

/// The whole right side; anything after the template is an error
pub(super) fn parse_right_side(
    trees: &[TokenTree],
    statement: &Statement<'_>,
) -> Result<RightItem, ParseError> {
    let span = span_of(trees).unwrap_or(statement.span);
    if trees.is_empty() {
        return Err(statement.error(
            ErrorCode::E0206,
            "transformation has nothing after '->'",
            statement.span,
        ));
    }
    let mut cursor = statement.cursor(trees, ParseContext::RightSide, span);
    let item = parse_right_item(&mut cursor, statement)?;
    if let Some(extra) = cursor.current() {
        return Err(ParseError::builder(ErrorCode::E0410)
            .message(format!("unexpected {} after the right side", extra.describe()))
            .location(statement.location(span_of(cursor.rest()).unwrap_or(span)))
            .hint("the right side builds exactly one subtree")
            .build());
    }
    Ok(item)
}

fn parse_right_item(cursor: &mut Cursor<'_>, statement: &Statement<'_>) -> Result<RightItem, ParseError> {
    let start = cursor.span();
    if let Some(hash) = cursor.eat(TokenKind::Hash) {
        return Ok(RightItem::Hole(Hole(parse_hole_number(cursor, hash)?)));
    }
    let Some(token) = cursor.eat(TokenKind::Ident) else {
        return Err(cursor.unexpected());
    };
    let type_name = type_name(token, statement.file)?;

    let mut end = token.span;
    let data = match cursor.eat_group(TokenKind::Lt) {
        Some(group) => {
            end = group.span();
            Some(parse_data_descriptor(group, statement)?)
        }
        None => None,
    };
    let mut children = Vec::new();
    if let Some(group) = cursor.eat_group(TokenKind::LParen) {
        end = group.span();
        if !group.children.is_empty() {
            for part in split_on(&group.children, TokenKind::Comma) {
                children.push(parse_child(part, group.close.span, statement)?);
            }
        }
    }

    Ok(RightItem::Subtree(ResultingSubtree {
        type_name,
        data,
        children,
        span: start.cover(end),
    }))
}

fn parse_child(trees: &[TokenTree], end: Span, statement: &Statement<'_>) -> Result<RightItem, ParseError> {
    let span = span_of(trees).unwrap_or(end);
    let mut cursor = statement.cursor(trees, ParseContext::TemplateChildren, span);
    if cursor.at_end() {
        return Err(statement.error(ErrorCode::E0401, "missing item in template children", end));
    }
    let item = parse_right_item(&mut cursor, statement)?;
    cursor.expect_end()?;
    Ok(item)
}
