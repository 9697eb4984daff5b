//! Cursor over a token-tree sequence.
//!
//! Grammar functions receive one bracket-matched sub-sequence at a time and
//! walk it with a cursor; reaching the end means the sub-sequence is consumed.

use std::sync::Arc;

use super::brackets::{Group, TokenTree};
use super::errors::{ErrorCode, ParseContext, ParseError};
use super::token::{Token, TokenKind};
use crate::base::{SourceLocation, Span};

pub(crate) struct Cursor<'a> {
    trees: &'a [TokenTree],
    pos: usize,
    file: &'a Arc<str>,
    context: ParseContext,
    /// Reported when an error points past the last tree
    end: Span,
}

impl<'a> Cursor<'a> {
    pub fn new(trees: &'a [TokenTree], file: &'a Arc<str>, context: ParseContext, end: Span) -> Self {
        Self {
            trees,
            pos: 0,
            file,
            context,
            end,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    pub fn current(&self) -> Option<&'a TokenTree> {
        self.trees.get(self.pos)
    }

    pub fn nth(&self, n: usize) -> Option<&'a TokenTree> {
        self.trees.get(self.pos + n)
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|t| t.is(kind))
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.trees.len()
    }

    /// Everything not consumed yet
    pub fn rest(&self) -> &'a [TokenTree] {
        &self.trees[self.pos.min(self.trees.len())..]
    }

    pub fn context(&self) -> ParseContext {
        self.context
    }

    pub fn file(&self) -> &'a Arc<str> {
        self.file
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub fn bump(&mut self) -> Option<&'a TokenTree> {
        let tree = self.current()?;
        self.pos += 1;
        Some(tree)
    }

    /// Consume everything that is left
    pub fn bump_rest(&mut self) -> &'a [TokenTree] {
        let rest = self.rest();
        self.pos = self.trees.len();
        rest
    }

    /// Consume a leaf of the given kind
    pub fn eat(&mut self, kind: TokenKind) -> Option<&'a Token> {
        let token = self.current()?.as_leaf().filter(|t| t.is(kind))?;
        self.pos += 1;
        Some(token)
    }

    /// Consume a group opened by the given bracket
    pub fn eat_group(&mut self, kind: TokenKind) -> Option<&'a Group> {
        let group = self.current()?.as_group(kind)?;
        self.pos += 1;
        Some(group)
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        match self.eat(kind) {
            Some(token) => Ok(token),
            None => Err(self.error_here(
                ErrorCode::E0902,
                format!("expected {} {}", kind.describe(), self.context.description()),
            )),
        }
    }

    pub fn expect_group(&mut self, kind: TokenKind) -> Result<&'a Group, ParseError> {
        match self.eat_group(kind) {
            Some(group) => Ok(group),
            None => Err(self.error_here(
                ErrorCode::E0902,
                format!(
                    "expected {}...{} {}",
                    kind.describe().trim_end_matches('\''),
                    kind.closing().map_or("", |k| k.describe().trim_start_matches('\'')),
                    self.context.description()
                ),
            )),
        }
    }

    /// Fail unless everything has been consumed
    pub fn expect_end(&self) -> Result<(), ParseError> {
        match self.current() {
            None => Ok(()),
            Some(_) => Err(self.unexpected()),
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    /// Span of the current tree, or of the end of the sequence
    pub fn span(&self) -> Span {
        self.current().map_or(self.end, TokenTree::span)
    }

    pub fn location(&self, span: Span) -> SourceLocation {
        SourceLocation::new(self.file.clone(), span)
    }

    pub fn error_here(&self, code: ErrorCode, message: impl Into<String>) -> ParseError {
        ParseError::new(message, code, self.location(self.span()))
    }

    /// Context-aware error for the current tree
    pub fn unexpected(&self) -> ParseError {
        let found = self
            .current()
            .map_or_else(|| "end of input".to_string(), TokenTree::describe);
        ParseError::unexpected(&found, self.context, self.location(self.span()))
    }
}

/// Split a sequence at top-level separator leaves
pub(crate) fn split_on(trees: &[TokenTree], separator: TokenKind) -> Vec<&[TokenTree]> {
    trees
        .split(|t| t.as_leaf().is_some_and(|token| token.is(separator)))
        .collect()
}

/// Position of every top-level leaf of the given kind
pub(crate) fn positions(trees: &[TokenTree], kind: TokenKind) -> Vec<usize> {
    trees
        .iter()
        .enumerate()
        .filter(|(_, t)| t.as_leaf().is_some_and(|token| token.is(kind)))
        .map(|(i, _)| i)
        .collect()
}
