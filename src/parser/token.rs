//! Token kinds and lexed tokens.

use smol_str::SmolStr;
use text_size::TextRange;

use crate::base::Span;

/// The kind of a lexed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Ident,
    Number,
    String,
    CharRange,

    // Multi-character punctuation
    /// `<-`
    LeftArrow,
    /// `->`
    RightArrow,
    /// `...`
    Ellipsis,

    // Single-character punctuation
    Pipe,
    Amp,
    Tilde,
    At,
    Hash,
    Comma,
    Semicolon,
    Colon,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    LParen,
    RParen,
    Lt,
    Gt,
}

impl TokenKind {
    pub fn is_open_bracket(self) -> bool {
        matches!(self, Self::LBracket | Self::LBrace | Self::LParen | Self::Lt)
    }

    pub fn is_close_bracket(self) -> bool {
        matches!(self, Self::RBracket | Self::RBrace | Self::RParen | Self::Gt)
    }

    /// The closing bracket paired with an opening one
    pub fn closing(self) -> Option<TokenKind> {
        match self {
            Self::LBracket => Some(Self::RBracket),
            Self::LBrace => Some(Self::RBrace),
            Self::LParen => Some(Self::RParen),
            Self::Lt => Some(Self::Gt),
            _ => None,
        }
    }

    /// Symbolic tokens are matched against leaf nodes on a rule's left side
    pub fn is_symbolic(self) -> bool {
        matches!(self, Self::String | Self::CharRange)
    }

    /// Human-readable name for error messages
    pub fn describe(self) -> &'static str {
        match self {
            Self::Ident => "identifier",
            Self::Number => "number",
            Self::String => "string literal",
            Self::CharRange => "character range",
            Self::LeftArrow => "'<-'",
            Self::RightArrow => "'->'",
            Self::Ellipsis => "'...'",
            Self::Pipe => "'|'",
            Self::Amp => "'&'",
            Self::Tilde => "'~'",
            Self::At => "'@'",
            Self::Hash => "'#'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Colon => "':'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Lt => "'<'",
            Self::Gt => "'>'",
        }
    }
}

/// A token with its kind, text, and position
///
/// `text` is the raw source slice. `value` is the cooked value: the unescaped
/// contents for strings, the two bounds for a character range, and the raw
/// text for everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: SmolStr,
    pub value: SmolStr,
    pub range: TextRange,
    pub span: Span,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Numeric value of a `Number` token
    pub fn number(&self) -> Option<u32> {
        match self.kind {
            TokenKind::Number => self.value.parse().ok(),
            _ => None,
        }
    }

    /// Bounds of a `CharRange` token
    pub fn char_range(&self) -> Option<(char, char)> {
        if self.kind != TokenKind::CharRange {
            return None;
        }
        let mut chars = self.value.chars();
        Some((chars.next()?, chars.next()?))
    }

    /// Identifier starting with an uppercase letter
    pub fn is_type_name(&self) -> bool {
        self.kind == TokenKind::Ident
            && self.value.chars().next().is_some_and(|c| c.is_ascii_uppercase())
    }

    /// Short description used in error messages
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Ident | TokenKind::Number => {
                format!("{} '{}'", self.kind.describe(), self.text)
            }
            TokenKind::String | TokenKind::CharRange => {
                format!("{} {}", self.kind.describe(), self.text)
            }
            _ => self.kind.describe().to_string(),
        }
    }
}
