//! Left-side items of a transformation.
//!
//! One comma-separated part is parsed at a time; the first token decides the
//! item form:
//!
//! | first token      | item                               |
//! |------------------|------------------------------------|
//! | identifier       | pattern `Type<data>(children)` or typed hole `Type#N` |
//! | `#`              | untyped hole (pattern children only) |
//! | string / range   | symbol                             |
//! | `[...]` / `{...}`| optional / repeated item           |
//! | `~`              | negated item                       |
//! | `\|` / `&`       | OR / AND over `(...)`              |

use tracing::trace;

use super::{HoleCounter, Statement, parse_hole_number, type_name};
use crate::base::Span;
use crate::model::{
    DataDescriptor, Hole, HoleRole, LeftItem, LeftItemKind, MatchMode, PatternDescriptor,
    SymbolDescriptor, TypedHole,
};
use crate::parser::brackets::{Group, TokenTree, span_of};
use crate::parser::cursor::{Cursor, split_on};
use crate::parser::errors::{ErrorCode, ParseContext, ParseError};
use crate::parser::token::TokenKind;

/// Where an item appears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Place {
    /// Directly on the left side
    Top,
    /// Inside `Type(...)`
    PatternChild,
    /// Inside `|(...)` or `&(...)`
    Operand,
}

impl Place {
    fn context(self) -> ParseContext {
        match self {
            Self::Top => ParseContext::LeftSide,
            Self::PatternChild => ParseContext::PatternChildren,
            Self::Operand => ParseContext::LogicalOperands,
        }
    }
}

pub(super) struct ItemParser<'s, 'f> {
    statement: &'s Statement<'f>,
    holes: &'s mut HoleCounter,
    /// Inside `{...}`: one data hole cannot hold a value per repeated node
    repeated: bool,
}

impl<'s, 'f> ItemParser<'s, 'f> {
    pub fn new(statement: &'s Statement<'f>, holes: &'s mut HoleCounter) -> Self {
        Self {
            statement,
            holes,
            repeated: false,
        }
    }

    /// Comma-separated items
    pub fn parse_list(
        &mut self,
        trees: &[TokenTree],
        place: Place,
        end: Span,
    ) -> Result<Vec<LeftItem>, ParseError> {
        split_on(trees, TokenKind::Comma)
            .into_iter()
            .map(|part| self.parse_item(part, place, false, end))
            .collect()
    }

    /// One item. `end` locates errors for an empty part.
    pub fn parse_item(
        &mut self,
        trees: &[TokenTree],
        place: Place,
        negated: bool,
        end: Span,
    ) -> Result<LeftItem, ParseError> {
        let span = span_of(trees).unwrap_or(end);
        let mut cursor = self.statement.cursor(trees, place.context(), span);

        let Some(first) = cursor.current() else {
            return Err(ParseError::builder(ErrorCode::E0401)
                .message(format!("missing item {}", place.context().description()))
                .location(cursor.location(end))
                .hint(format!("expected {}", place.context().expected_description()))
                .build());
        };

        let item = match first {
            TokenTree::Group(group) if group.kind() == TokenKind::LBracket => {
                cursor.bump();
                self.parse_wrapped(group, MatchMode::Optional, place, negated)?
            }
            TokenTree::Group(group) if group.kind() == TokenKind::LBrace => {
                cursor.bump();
                self.parse_wrapped(group, MatchMode::Repeated, place, negated)?
            }
            TokenTree::Leaf(token) => match token.kind {
                TokenKind::Tilde => {
                    let inner = self.parse_item(&trees[1..], place, true, token.span)?;
                    if inner.negated || inner.mode != MatchMode::Normal {
                        return Err(self.statement.error(
                            ErrorCode::E0404,
                            "'~' must wrap a plain item",
                            span,
                        ));
                    }
                    cursor.bump_rest();
                    LeftItem {
                        negated: true,
                        span,
                        ..inner
                    }
                }
                TokenKind::Pipe | TokenKind::Amp => {
                    cursor.bump();
                    let group = cursor.expect_group(TokenKind::LParen)?;
                    let operands = self.parse_operands(group, negated)?;
                    let kind = if token.is(TokenKind::Pipe) {
                        LeftItemKind::Or(operands)
                    } else {
                        LeftItemKind::And(operands)
                    };
                    LeftItem::new(kind, span)
                }
                TokenKind::String => {
                    cursor.bump();
                    let symbol = SymbolDescriptor::Text(token.value.clone());
                    LeftItem::new(LeftItemKind::Symbol(symbol), span)
                }
                TokenKind::CharRange => {
                    cursor.bump();
                    let (low, high) = token
                        .char_range()
                        .ok_or_else(|| cursor.error_here(ErrorCode::E0999, "malformed character range"))?;
                    LeftItem::new(LeftItemKind::Symbol(SymbolDescriptor::Range(low, high)), span)
                }
                TokenKind::Hash => {
                    cursor.bump();
                    if place != Place::PatternChild {
                        return Err(ParseError::builder(ErrorCode::E0408)
                            .message(format!("untyped hole {}", place.context().description()))
                            .location(cursor.location(span))
                            .hint("give the hole a type, e.g. 'Expression#1'")
                            .build());
                    }
                    let hole = Hole(parse_hole_number(&mut cursor, token)?);
                    self.register(hole, HoleRole::Node, negated, span)?;
                    LeftItem::new(LeftItemKind::ChildHole(hole), span)
                }
                TokenKind::Ident => {
                    cursor.bump();
                    let name = type_name(token, self.statement.file)?;
                    if let Some(hash) = cursor.eat(TokenKind::Hash) {
                        let hole = Hole(parse_hole_number(&mut cursor, hash)?);
                        self.register(hole, HoleRole::Node, negated, span)?;
                        let typed = TypedHole {
                            hole,
                            type_name: name,
                        };
                        LeftItem::new(LeftItemKind::TypedHole(typed), span)
                    } else {
                        let pattern = self.parse_pattern(name, &mut cursor, negated)?;
                        LeftItem::new(LeftItemKind::Pattern(pattern), span)
                    }
                }
                _ => return Err(cursor.unexpected()),
            },
            TokenTree::Group(_) => return Err(cursor.unexpected()),
        };

        cursor.expect_end()?;
        trace!(item = %item, "parsed left item");
        Ok(item)
    }

    fn parse_wrapped(
        &mut self,
        group: &Group,
        mode: MatchMode,
        place: Place,
        negated: bool,
    ) -> Result<LeftItem, ParseError> {
        let span = group.span();
        let modifier = if mode == MatchMode::Optional {
            "optional"
        } else {
            "repeated"
        };
        match place {
            Place::Top => {}
            Place::PatternChild => {
                return Err(ParseError::builder(ErrorCode::E0406)
                    .message(format!("{modifier} item inside pattern children"))
                    .location(self.statement.location(span))
                    .hint("a pattern matches an exact number of children")
                    .build());
            }
            Place::Operand => {
                return Err(self.statement.error(
                    ErrorCode::E0405,
                    format!("{modifier} item inside a logical expression"),
                    span,
                ));
            }
        }

        let outer = self.repeated;
        self.repeated |= mode == MatchMode::Repeated;
        let inner = self.parse_item(&group.children, place, negated, span);
        self.repeated = outer;
        let inner = inner?;
        if inner.mode != MatchMode::Normal {
            return Err(self.statement.error(
                ErrorCode::E0404,
                format!("{modifier} modifier applied to an item that is already {}", match inner.mode {
                    MatchMode::Optional => "optional",
                    _ => "repeated",
                }),
                span,
            ));
        }
        Ok(LeftItem { mode, span, ..inner })
    }

    fn parse_operands(&mut self, group: &Group, negated: bool) -> Result<Vec<LeftItem>, ParseError> {
        if group.children.is_empty() {
            return Err(self.statement.error(
                ErrorCode::E0401,
                "logical expression needs at least one operand",
                group.span(),
            ));
        }
        split_on(&group.children, TokenKind::Comma)
            .into_iter()
            .map(|part| self.parse_item(part, Place::Operand, negated, group.close.span))
            .collect()
    }

    /// `<data>` and `(children)` after the type name
    fn parse_pattern(
        &mut self,
        type_name: smol_str::SmolStr,
        cursor: &mut Cursor<'_>,
        negated: bool,
    ) -> Result<PatternDescriptor, ParseError> {
        let data = match cursor.eat_group(TokenKind::Lt) {
            Some(group) => Some(self.parse_data(group, negated)?),
            None => None,
        };
        let children = match cursor.eat_group(TokenKind::LParen) {
            Some(group) if group.children.is_empty() => Vec::new(),
            Some(group) => {
                let mut children = Vec::new();
                for part in split_on(&group.children, TokenKind::Comma) {
                    children.push(self.parse_item(part, Place::PatternChild, negated, group.close.span)?);
                }
                children
            }
            None => Vec::new(),
        };
        Ok(PatternDescriptor {
            type_name,
            data,
            children,
        })
    }

    fn parse_data(&mut self, group: &Group, negated: bool) -> Result<DataDescriptor, ParseError> {
        let data = parse_data_descriptor(group, self.statement)?;
        if let DataDescriptor::Hole(hole) = data {
            if self.repeated {
                return Err(ParseError::builder(ErrorCode::E0411)
                    .message(format!("data hole {hole} inside a repeated item"))
                    .location(self.statement.location(group.span()))
                    .hint("a data hole captures the data of a single node")
                    .build());
            }
            self.register(hole, HoleRole::Data, negated, group.span())?;
        }
        Ok(data)
    }

    fn register(&mut self, hole: Hole, role: HoleRole, negated: bool, span: Span) -> Result<(), ParseError> {
        if negated {
            return Err(ParseError::builder(ErrorCode::E0407)
                .message(format!("hole {hole} inside a negated item"))
                .location(self.statement.location(span))
                .hint("a negated item never binds anything")
                .build());
        }
        self.holes.register(hole, role, self.statement.location(span))
    }
}

/// `<"text">` or `<#N>`, shared by patterns and templates
pub(super) fn parse_data_descriptor(
    group: &Group,
    statement: &Statement<'_>,
) -> Result<DataDescriptor, ParseError> {
    let mut cursor = statement.cursor(&group.children, ParseContext::DataDescriptor, group.close.span);
    let data = if let Some(text) = cursor.eat(TokenKind::String) {
        DataDescriptor::Static(text.value.clone())
    } else if let Some(hash) = cursor.eat(TokenKind::Hash) {
        DataDescriptor::Hole(Hole(parse_hole_number(&mut cursor, hash)?))
    } else {
        return Err(ParseError::builder(ErrorCode::E0409)
            .message(format!(
                "invalid data descriptor, expected {}",
                ParseContext::DataDescriptor.expected_description()
            ))
            .location(statement.location(group.span()))
            .build());
    };
    cursor.expect_end()?;
    Ok(data)
}
