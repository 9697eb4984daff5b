//! Statement grammar of the rule DSL.
//!
//! A program is a sequence of `;`-terminated statements, each optionally
//! prefixed with `language:`. A statement is either a node rule (`<-`) or a
//! transformation (`->`):
//!
//! ```text
//! Expression <- Binary | Ternary;
//! Binary <- left@Expression, right@Expression;
//! java: Binary(#1, #2) -> Sum(#1, #2);
//! ```
//!
//! Parsing is fail-fast: the first error aborts the program.

mod items;
mod node;
mod template;
mod transformation;

use std::sync::Arc;

use smol_str::SmolStr;
use tracing::debug;

use super::brackets::{TokenTree, match_brackets, span_of};
use super::comments::strip_comments;
use super::cursor::{Cursor, positions};
use super::errors::{ErrorCode, ParseContext, ParseError};
use super::lexer::tokenize;
use super::token::{Token, TokenKind};
use crate::base::{SourceLocation, Span};
use crate::model::{COMMON_LANGUAGE, ModelError, Program, UnknownTypes};

pub(crate) use transformation::HoleCounter;

/// Options for [`parse_program_with`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reported in error locations
    pub file_name: Arc<str>,
    /// Bucket for statements without a `language:` prefix
    pub default_language: SmolStr,
    /// What to do with type names no statement declares. Ignored by default,
    /// so a fragment may refer to types declared elsewhere.
    pub unknown_types: UnknownTypes,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            file_name: Arc::from("<input>"),
            default_language: SmolStr::new_static(COMMON_LANGUAGE),
            unknown_types: UnknownTypes::Ignore,
        }
    }
}

impl ParseOptions {
    pub fn with_file_name(mut self, file_name: impl Into<Arc<str>>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_default_language(mut self, language: impl Into<SmolStr>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Reject undeclared type names with E0501
    pub fn strict(self) -> Self {
        self.with_unknown_types(UnknownTypes::Reject)
    }

    pub fn with_unknown_types(mut self, unknown_types: UnknownTypes) -> Self {
        self.unknown_types = unknown_types;
        self
    }
}

/// Parse a whole DSL source with default options
pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    parse_program_with(source, &ParseOptions::default())
}

/// Parse a whole DSL source.
///
/// Comments are stripped, the source is tokenized and split into statements,
/// each statement is bracket-matched and parsed, and finally all type names
/// are resolved across the program.
pub fn parse_program_with(source: &str, options: &ParseOptions) -> Result<Program, ParseError> {
    parse_source(source, options).inspect_err(|err| debug!(error = %err.format(), "parse failed"))
}

fn parse_source(source: &str, options: &ParseOptions) -> Result<Program, ParseError> {
    let file = &options.file_name;
    let stripped = strip_comments(source, file)?;
    let tokens = tokenize(&stripped, file.clone())?;

    let mut program = Program::new();
    for statement in split_statements(tokens, file)? {
        let trees = match_brackets(statement, file)?;
        parse_statement(&trees, options, &mut program)?;
    }

    program
        .resolve(options.unknown_types)
        .map_err(|err| model_error(err, file))?;
    debug!(rules = program.rules().len(), "parsed program");
    Ok(program)
}

/// Split at `;`. Empty statements are dropped; tokens after the last `;` are an error.
fn split_statements(tokens: Vec<Token>, file: &Arc<str>) -> Result<Vec<Vec<Token>>, ParseError> {
    let mut statements = Vec::new();
    let mut current = Vec::new();
    for token in tokens {
        if token.is(TokenKind::Semicolon) {
            if !current.is_empty() {
                statements.push(std::mem::take(&mut current));
            }
        } else {
            current.push(token);
        }
    }

    if let Some(last) = current.last() {
        let span = current[0].span.cover(last.span);
        return Err(ParseError::builder(ErrorCode::E0201)
            .message("statement is not terminated by ';'")
            .location(SourceLocation::new(file.clone(), span))
            .hint("add ';' at the end of the statement")
            .build());
    }
    Ok(statements)
}

fn parse_statement(
    trees: &[TokenTree],
    options: &ParseOptions,
    program: &mut Program,
) -> Result<(), ParseError> {
    let file = &options.file_name;
    let span = span_of(trees).unwrap_or_default();

    let (language, body) = match trees {
        [TokenTree::Leaf(name), TokenTree::Leaf(colon), rest @ ..]
            if name.is(TokenKind::Ident) && colon.is(TokenKind::Colon) =>
        {
            (name.value.clone(), rest)
        }
        _ => (options.default_language.clone(), trees),
    };
    let statement = Statement {
        file,
        language,
        span,
    };
    if body.is_empty() {
        return Err(statement.error(ErrorCode::E0206, "statement has no rule", span));
    }

    let left_arrows = positions(body, TokenKind::LeftArrow);
    let right_arrows = positions(body, TokenKind::RightArrow);
    match (left_arrows.as_slice(), right_arrows.as_slice()) {
        ([at], []) => {
            let descriptor = node::parse_node(&body[..*at], &body[at + 1..], &statement)?;
            debug!(language = %statement.language, rule = %descriptor, "parsed node rule");
            program
                .push_node(descriptor)
                .map_err(|err| model_error(err, file))?;
        }
        ([], [at]) => {
            let transformation =
                transformation::parse_transformation(&body[..*at], &body[at + 1..], &statement)?;
            debug!(language = %statement.language, rule = %transformation, "parsed transformation");
            program.push_transformation(transformation);
        }
        ([], []) => {
            return Err(ParseError::builder(ErrorCode::E0208)
                .message("statement has neither '<-' nor '->'")
                .location(statement.location(span))
                .hint("node rules use 'Name <- ...', transformations use '... -> ...'")
                .build());
        }
        _ => {
            return Err(statement.error(
                ErrorCode::E0209,
                "a statement takes exactly one '<-' or '->'",
                span,
            ));
        }
    }
    Ok(())
}

/// Turn a located model error into a parse error
fn model_error(err: ModelError, file: &Arc<str>) -> ParseError {
    let code = match &err {
        ModelError::Cycle { .. } => ErrorCode::E0504,
        ModelError::UnknownType { .. } => ErrorCode::E0501,
        ModelError::Duplicate { .. } => ErrorCode::E0502,
        ModelError::NotInstantiable { .. } => ErrorCode::E0503,
    };
    ParseError::new(err.to_string(), code, SourceLocation::new(file.clone(), err.span()))
}

/// Per-statement context shared by the grammar functions
pub(crate) struct Statement<'a> {
    pub file: &'a Arc<str>,
    pub language: SmolStr,
    pub span: Span,
}

impl<'a> Statement<'a> {
    pub fn cursor<'t>(&self, trees: &'t [TokenTree], context: ParseContext, end: Span) -> Cursor<'t>
    where
        'a: 't,
    {
        Cursor::new(trees, self.file, context, end)
    }

    pub fn location(&self, span: Span) -> SourceLocation {
        SourceLocation::new(self.file.clone(), span)
    }

    pub fn error(&self, code: ErrorCode, message: impl Into<String>, span: Span) -> ParseError {
        ParseError::new(message, code, self.location(span))
    }
}

/// `#N` after the `#` has been consumed
pub(crate) fn parse_hole_number(cursor: &mut Cursor<'_>, hash: &Token) -> Result<u32, ParseError> {
    match cursor.eat(TokenKind::Number).and_then(Token::number) {
        Some(number) => Ok(number),
        None => Err(ParseError::builder(ErrorCode::E0402)
            .message("'#' must be followed by a hole number")
            .location(cursor.location(hash.span))
            .hint("write holes as '#1', '#2', ...")
            .build()),
    }
}

/// Require a capitalized type name
pub(crate) fn type_name(token: &Token, file: &Arc<str>) -> Result<SmolStr, ParseError> {
    if token.is_type_name() {
        return Ok(token.value.clone());
    }
    let mut chars = token.value.chars();
    let suggestion: String = chars
        .next()
        .map(|c| c.to_ascii_uppercase())
        .into_iter()
        .chain(chars)
        .collect();
    Err(ParseError::builder(ErrorCode::E0302)
        .message(format!("type name '{}' must start with a capital letter", token.value))
        .location(SourceLocation::new(file.clone(), token.span))
        .hint(format!("rename it to '{suggestion}'"))
        .build())
}
