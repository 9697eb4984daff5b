//! Transformations: `[..., ]left, left, ... -> right`.

use rustc_hash::{FxHashMap, FxHashSet};

use super::items::{ItemParser, Place};
use super::template::parse_right_side;
use super::Statement;
use crate::base::{SourceLocation, Span};
use crate::model::{Hole, HoleRole, LeftItem, RightItem, TransformationDescriptor};
use crate::parser::brackets::{TokenTree, span_of};
use crate::parser::errors::{ErrorCode, ParseError};
use crate::parser::token::TokenKind;

/// Holes bound so far on the left side of one transformation
#[derive(Debug, Default)]
pub(crate) struct HoleCounter {
    nodes: FxHashSet<u32>,
    data: FxHashSet<u32>,
}

impl HoleCounter {
    pub fn register(&mut self, hole: Hole, role: HoleRole, location: SourceLocation) -> Result<(), ParseError> {
        let (same, other) = match role {
            HoleRole::Node => (&mut self.nodes, &self.data),
            HoleRole::Data => (&mut self.data, &self.nodes),
        };
        if other.contains(&hole.number()) {
            return Err(both_roles(hole, location));
        }
        if !same.insert(hole.number()) {
            return Err(ParseError::builder(ErrorCode::E0403)
                .message(format!("hole {hole} already used"))
                .location(location)
                .hint("every hole is bound once on the left side")
                .build());
        }
        Ok(())
    }

    pub fn role(&self, hole: Hole) -> Option<HoleRole> {
        if self.nodes.contains(&hole.number()) {
            Some(HoleRole::Node)
        } else if self.data.contains(&hole.number()) {
            Some(HoleRole::Data)
        } else {
            None
        }
    }

    fn sorted(&self) -> Vec<(Hole, HoleRole)> {
        let mut holes: Vec<_> = self
            .nodes
            .iter()
            .map(|n| (Hole(*n), HoleRole::Node))
            .chain(self.data.iter().map(|n| (Hole(*n), HoleRole::Data)))
            .collect();
        holes.sort_by_key(|(hole, _)| *hole);
        holes
    }
}

fn both_roles(hole: Hole, location: SourceLocation) -> ParseError {
    ParseError::builder(ErrorCode::E0506)
        .message(format!("hole {hole} is used both for a node and for data"))
        .location(location)
        .build()
}

pub(super) fn parse_transformation(
    left: &[TokenTree],
    right: &[TokenTree],
    statement: &Statement<'_>,
) -> Result<TransformationDescriptor, ParseError> {
    let (right_to_left, left) = match left {
        [TokenTree::Leaf(dots), rest @ ..] if dots.is(TokenKind::Ellipsis) => match rest {
            [TokenTree::Leaf(comma), rest @ ..] if comma.is(TokenKind::Comma) => (true, rest),
            _ => {
                return Err(ParseError::builder(ErrorCode::E0902)
                    .message("expected ',' after '...'")
                    .location(statement.location(dots.span))
                    .hint("write the search direction marker as '..., '")
                    .build());
            }
        },
        _ => (false, left),
    };
    if left.is_empty() {
        return Err(statement.error(
            ErrorCode::E0206,
            "transformation has nothing before '->'",
            statement.span,
        ));
    }

    let mut holes = HoleCounter::default();
    let end = span_of(left).unwrap_or(statement.span);
    let items = ItemParser::new(statement, &mut holes).parse_list(left, Place::Top, end)?;
    let template = parse_right_side(right, statement)?;
    check_holes(&holes, &items, &template, statement)?;

    Ok(TransformationDescriptor::new(
        statement.language.clone(),
        items,
        template,
        right_to_left,
        statement.span,
    ))
}

/// Every hole bound on the left is used exactly once on the right, in the same role
fn check_holes(
    holes: &HoleCounter,
    left: &[LeftItem],
    right: &RightItem,
    statement: &Statement<'_>,
) -> Result<(), ParseError> {
    let left_span = span_of_items(left).unwrap_or(statement.span);
    let unbalanced = |message: String, hint: &str| {
        ParseError::builder(ErrorCode::E0505)
            .message(message)
            .location(statement.location(statement.span))
            .hint(hint)
            .build()
    };

    let mut uses: FxHashMap<Hole, (HoleRole, usize)> = FxHashMap::default();
    for (hole, is_data) in right.holes() {
        let role = if is_data { HoleRole::Data } else { HoleRole::Node };
        match holes.role(hole) {
            None => {
                return Err(unbalanced(
                    format!("hole {hole} is used on the right but not bound on the left"),
                    "bind it on the left side or remove it",
                ));
            }
            Some(bound) if bound != role => {
                return Err(both_roles(hole, statement.location(statement.span)));
            }
            Some(_) => {}
        }
        uses.entry(hole).or_insert((role, 0)).1 += 1;
    }

    for (hole, role) in holes.sorted() {
        match uses.get(&hole).map_or(0, |(_, count)| *count) {
            1 => {}
            0 => {
                return Err(ParseError::builder(ErrorCode::E0505)
                    .message(format!(
                        "{} hole {hole} is bound on the left but never used on the right",
                        role.as_str()
                    ))
                    .location(statement.location(left_span))
                    .hint("use it on the right side or remove it")
                    .build());
            }
            count => {
                return Err(unbalanced(
                    format!("hole {hole} is used {count} times on the right"),
                    "each hole is used exactly once on the right side",
                ));
            }
        }
    }
    Ok(())
}

fn span_of_items(items: &[LeftItem]) -> Option<Span> {
    Some(items.first()?.span.cover(items.last()?.span))
}
