//! Logos-based lexer for the rule DSL
//!
//! Fast tokenization using the logos crate. Comments must already have been
//! replaced by whitespace (see [`super::comments`]); whitespace is skipped here.

use std::sync::Arc;

use logos::Logos;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::errors::{ErrorCode, ParseError};
use super::token::{Token, TokenKind};
use crate::base::{LineIndex, SourceLocation, Span};

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    index: LineIndex,
    file: Arc<str>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, file: Arc<str>) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            index: LineIndex::new(input),
            file,
        }
    }

    fn location(&self, range: TextRange) -> SourceLocation {
        let span = Span::new(
            self.index.position(range.start()),
            self.index.position(range.end()),
        );
        SourceLocation::new(self.file.clone(), span)
    }

    fn cook(&self, raw: LogosToken, text: &str, range: TextRange) -> Result<Token, ParseError> {
        let location = || self.location(range);
        let (kind, value) = match raw {
            LogosToken::Ident => (TokenKind::Ident, SmolStr::new(text)),
            LogosToken::Number => {
                if text.parse::<u32>().is_err() {
                    return Err(ParseError::new(
                        format!("number '{text}' is out of range"),
                        ErrorCode::E0104,
                        location(),
                    ));
                }
                (TokenKind::Number, SmolStr::new(text))
            }
            LogosToken::String => {
                let value = unescape(&text[1..text.len() - 1]).map_err(|c| {
                    ParseError::new(
                        format!("invalid escape sequence '\\{c}'"),
                        ErrorCode::E0102,
                        location(),
                    )
                })?;
                (TokenKind::String, SmolStr::new(value))
            }
            LogosToken::CharRange => {
                let (low, high) = text.split_once("..").unwrap_or((text, text));
                let bounds = unescape(&low[1..low.len() - 1])
                    .and_then(|l| unescape(&high[1..high.len() - 1]).map(|h| (l, h)))
                    .map_err(|c| {
                        ParseError::new(
                            format!("invalid escape sequence '\\{c}'"),
                            ErrorCode::E0102,
                            location(),
                        )
                    })?;
                let (low, high) = bounds;
                if low.chars().count() != 1 || high.chars().count() != 1 || low > high {
                    return Err(ParseError::new(
                        format!("invalid character range {text}"),
                        ErrorCode::E0102,
                        location(),
                    ));
                }
                (TokenKind::CharRange, SmolStr::new(format!("{low}{high}")))
            }
            LogosToken::UnterminatedString => {
                return Err(ParseError::new(
                    "string literal is never closed",
                    ErrorCode::E0102,
                    location(),
                ));
            }
            other => (other.into(), SmolStr::new(text)),
        };

        Ok(Token {
            kind,
            text: SmolStr::new(text),
            value,
            range,
            span: self.location(range).span,
        })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let span = self.inner.span();
        let range = TextRange::new(TextSize::new(span.start as u32), TextSize::new(span.end as u32));

        Some(match logos_token {
            Ok(raw) => self.cook(raw, text, range),
            Err(()) => {
                let ch = text.chars().next().unwrap_or('\0');
                Err(ParseError::lex(ch, self.location(range)))
            }
        })
    }
}

/// Tokenize a whole comment-free source, stopping at the first error.
pub fn tokenize(input: &str, file: Arc<str>) -> Result<Vec<Token>, ParseError> {
    Lexer::new(input, file).collect()
}

/// Resolve `\\`, `\r`, `\n`, `\t`, `\'` and `\"`; any other escape yields the offending char.
fn unescape(body: &str) -> Result<String, char> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some(other) => return Err(other),
            None => return Err('\\'),
        }
    }
    Ok(out)
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum LogosToken {
    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    #[regex(r#"'([^'\\\n]|\\[^\n])*'"#)]
    String,

    #[regex(r#"'([^'\\\n]|\\[^\n])'\.\.'([^'\\\n]|\\[^\n])'"#)]
    CharRange,

    #[regex(r#""([^"\\\n]|\\[^\n])*"#)]
    #[regex(r#"'([^'\\\n]|\\[^\n])*"#)]
    UnterminatedString,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("<-")]
    LeftArrow,
    #[token("->")]
    RightArrow,
    #[token("...")]
    Ellipsis,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("|")]
    Pipe,
    #[token("&")]
    Amp,
    #[token("~")]
    Tilde,
    #[token("@")]
    At,
    #[token("#")]
    Hash,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Ident => TokenKind::Ident,
            Number => TokenKind::Number,
            String | UnterminatedString => TokenKind::String,
            CharRange => TokenKind::CharRange,
            LeftArrow => TokenKind::LeftArrow,
            RightArrow => TokenKind::RightArrow,
            Ellipsis => TokenKind::Ellipsis,
            Pipe => TokenKind::Pipe,
            Amp => TokenKind::Amp,
            Tilde => TokenKind::Tilde,
            At => TokenKind::At,
            Hash => TokenKind::Hash,
            Comma => TokenKind::Comma,
            Semicolon => TokenKind::Semicolon,
            Colon => TokenKind::Colon,
            LBracket => TokenKind::LBracket,
            RBracket => TokenKind::RBracket,
            LBrace => TokenKind::LBrace,
            RBrace => TokenKind::RBrace,
            LParen => TokenKind::LParen,
            RParen => TokenKind::RParen,
            Lt => TokenKind::Lt,
            Gt => TokenKind::Gt,
        }
    }
}
