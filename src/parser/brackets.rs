//! Bracket matching.
//!
//! Turns a flat token stream into a token tree in which every `(...)`, `[...]`,
//! `{...}` and `<...>` group is a single [`TokenTree::Group`]. Grammar functions
//! run on the tree, so a bracketed group is always one atomic item to them.

use std::sync::Arc;
use std::vec::IntoIter;

use super::errors::ParseError;
use super::token::{Token, TokenKind};
use crate::base::{SourceLocation, Span};

/// A token or a bracketed group of token trees
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenTree {
    Leaf(Token),
    Group(Group),
}

/// A matched pair of brackets and everything between them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub open: Token,
    pub close: Token,
    pub children: Vec<TokenTree>,
}

impl Group {
    /// Kind of the opening bracket
    pub fn kind(&self) -> TokenKind {
        self.open.kind
    }

    pub fn span(&self) -> Span {
        self.open.span.cover(self.close.span)
    }
}

impl TokenTree {
    /// Token kind of a leaf, or of the opening bracket of a group
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Leaf(token) => token.kind,
            Self::Group(group) => group.kind(),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Leaf(token) => token.span,
            Self::Group(group) => group.span(),
        }
    }

    pub fn as_leaf(&self) -> Option<&Token> {
        match self {
            Self::Leaf(token) => Some(token),
            Self::Group(_) => None,
        }
    }

    /// The group, if this tree is a group opened by `kind`
    pub fn as_group(&self, kind: TokenKind) -> Option<&Group> {
        match self {
            Self::Group(group) if group.kind() == kind => Some(group),
            _ => None,
        }
    }

    /// Short description used in error messages
    pub fn describe(&self) -> String {
        match self {
            Self::Leaf(token) => token.describe(),
            Self::Group(group) => format!(
                "{}...{}",
                group.open.kind.describe().trim_end_matches('\''),
                group.close.kind.describe().trim_start_matches('\'')
            ),
        }
    }
}

/// Span covering a whole token sequence
pub fn span_of(trees: &[TokenTree]) -> Option<Span> {
    let first = trees.first()?.span();
    let last = trees.last()?.span();
    Some(first.cover(last))
}

/// Pair up brackets in a flat token stream.
pub fn match_brackets(tokens: Vec<Token>, file: &Arc<str>) -> Result<Vec<TokenTree>, ParseError> {
    let mut iter = tokens.into_iter();
    let (trees, close) = collect(&mut iter, None, file)?;
    debug_assert!(close.is_none());
    Ok(trees)
}

/// Collect trees until the closing bracket of `open` (or the end of the stream at top level).
fn collect(
    iter: &mut IntoIter<Token>,
    open: Option<&Token>,
    file: &Arc<str>,
) -> Result<(Vec<TokenTree>, Option<Token>), ParseError> {
    let mut trees = Vec::new();

    while let Some(token) = iter.next() {
        if token.kind.is_open_bracket() {
            let (children, close) = collect(iter, Some(&token), file)?;
            let close = close.ok_or_else(|| {
                ParseError::unclosed_bracket(&token.text, SourceLocation::new(file.clone(), token.span))
            })?;
            trees.push(TokenTree::Group(Group {
                open: token,
                close,
                children,
            }));
        } else if token.kind.is_close_bracket() {
            let location = SourceLocation::new(file.clone(), token.span);
            return match open {
                Some(open) if open.kind.closing() == Some(token.kind) => Ok((trees, Some(token))),
                Some(open) => Err(ParseError::unmatched_bracket(
                    &token.text,
                    Some(&open.text),
                    location,
                )),
                None => Err(ParseError::unmatched_bracket(&token.text, None, location)),
            };
        } else {
            trees.push(TokenTree::Leaf(token));
        }
    }

    match open {
        Some(open) => Err(ParseError::unclosed_bracket(
            &open.text,
            SourceLocation::new(file.clone(), open.span),
        )),
        None => Ok((trees, None)),
    }
}
