//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid characters, strings, comments)
//! - E02xx: Structural errors (brackets, semicolons, separators)
//! - E03xx: Node descriptor declaration errors
//! - E04xx: Rule item errors (patterns, holes, modifiers)
//! - E05xx: Semantic validation errors (types, inheritance, hole balance)
//! - E09xx: Generic/fallback errors

use std::fmt;

/// The three error families a front-end failure can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown character or malformed literal
    Lexical,
    /// Unexpected token, unbalanced brackets, malformed rule
    Syntax,
    /// Detected after a syntactically valid parse
    Semantic,
}

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated or malformed string literal
    E0102,
    /// Unterminated block comment
    E0103,
    /// Invalid numeric literal
    E0104,

    // =========================================================================
    // E02xx: Structural errors (brackets, semicolons, separators)
    // =========================================================================
    /// Missing semicolon
    E0201,
    /// Unclosed brace `{`
    E0202,
    /// Unclosed parenthesis `(`
    E0203,
    /// Unclosed bracket `[`
    E0204,
    /// Unexpected closing delimiter
    E0205,
    /// Empty side of a rule
    E0206,
    /// Mismatched delimiters
    E0207,
    /// Missing `<-` or `->` separator
    E0208,
    /// More than one separator in a statement
    E0209,
    /// Unclosed angle bracket `<`
    E0210,

    // =========================================================================
    // E03xx: Node descriptor declaration errors
    // =========================================================================
    /// Missing node name
    E0301,
    /// Node or child type name does not start with a capital letter
    E0302,
    /// Abstract node with fewer than two subtypes
    E0303,
    /// More than one extension marker
    E0304,
    /// Invalid literal descriptor parameters
    E0305,
    /// Duplicate child tag
    E0306,
    /// Invalid child declaration
    E0307,
    /// Duplicate subtype in an abstract node
    E0308,

    // =========================================================================
    // E04xx: Rule item errors
    // =========================================================================
    /// Invalid rule item
    E0401,
    /// Malformed hole
    E0402,
    /// Hole number already used
    E0403,
    /// Item wrapped twice by the same kind of modifier
    E0404,
    /// Optional or repeated item inside a logical combinator
    E0405,
    /// Optional or repeated item inside pattern children
    E0406,
    /// Hole inside a negated item
    E0407,
    /// Untyped hole outside of pattern children
    E0408,
    /// Invalid data descriptor
    E0409,
    /// Unconsumed token after the right side
    E0410,
    /// Data hole inside a repeated item
    E0411,

    // =========================================================================
    // E05xx: Semantic validation errors
    // =========================================================================
    /// Unknown node type
    E0501,
    /// Duplicate node descriptor
    E0502,
    /// Template names a type that cannot be instantiated
    E0503,
    /// Inheritance cycle
    E0504,
    /// Hole numbers of the left and right side do not balance
    E0505,
    /// Hole number used both for a node and for data
    E0506,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
    /// Expected a specific token
    E0902,
    /// Internal parser error
    E0999,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            // Structural
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0206 => "E0206",
            Self::E0207 => "E0207",
            Self::E0208 => "E0208",
            Self::E0209 => "E0209",
            Self::E0210 => "E0210",
            // Declaration
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0306 => "E0306",
            Self::E0307 => "E0307",
            Self::E0308 => "E0308",
            // Items
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            Self::E0405 => "E0405",
            Self::E0406 => "E0406",
            Self::E0407 => "E0407",
            Self::E0408 => "E0408",
            Self::E0409 => "E0409",
            Self::E0410 => "E0410",
            Self::E0411 => "E0411",
            // Semantic
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0503 => "E0503",
            Self::E0504 => "E0504",
            Self::E0505 => "E0505",
            Self::E0506 => "E0506",
            // Generic
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
            Self::E0999 => "E0999",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self.as_str().as_bytes()[2] {
            b'1' => "lexical error",
            b'2' => "structural error",
            b'3' => "declaration error",
            b'4' => "rule item error",
            b'5' => "validation error",
            _ => "syntax error",
        }
    }

    /// Which error family this code belongs to
    pub fn kind(&self) -> ErrorKind {
        match self.as_str().as_bytes()[2] {
            b'1' => ErrorKind::Lexical,
            b'5' => ErrorKind::Semantic,
            _ => ErrorKind::Syntax,
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0103 => "unterminated block comment",
            Self::E0104 => "invalid numeric literal",
            // Structural
            Self::E0201 => "missing semicolon",
            Self::E0202 => "unclosed brace",
            Self::E0203 => "unclosed parenthesis",
            Self::E0204 => "unclosed bracket",
            Self::E0205 => "unexpected closing delimiter",
            Self::E0206 => "empty rule side",
            Self::E0207 => "mismatched delimiters",
            Self::E0208 => "missing separator",
            Self::E0209 => "duplicate separator",
            Self::E0210 => "unclosed angle bracket",
            // Declaration
            Self::E0301 => "missing node name",
            Self::E0302 => "type name must start with a capital letter",
            Self::E0303 => "abstract node needs at least two subtypes",
            Self::E0304 => "more than one extension marker",
            Self::E0305 => "invalid literal parameters",
            Self::E0306 => "duplicate tag",
            Self::E0307 => "invalid child declaration",
            Self::E0308 => "duplicate subtype",
            // Items
            Self::E0401 => "invalid rule item",
            Self::E0402 => "malformed hole",
            Self::E0403 => "hole already used",
            Self::E0404 => "item is already wrapped",
            Self::E0405 => "modifier inside logical expression",
            Self::E0406 => "modifier inside pattern children",
            Self::E0407 => "hole inside negated item",
            Self::E0408 => "untyped hole outside pattern children",
            Self::E0409 => "invalid data descriptor",
            Self::E0410 => "unexpected token after right side",
            Self::E0411 => "data hole inside repeated item",
            // Semantic
            Self::E0501 => "unknown node type",
            Self::E0502 => "duplicate node descriptor",
            Self::E0503 => "type cannot be instantiated",
            Self::E0504 => "inheritance cycle",
            Self::E0505 => "unbalanced holes",
            Self::E0506 => "hole used for both node and data",
            // Generic
            Self::E0901 => "unexpected token",
            Self::E0902 => "expected token",
            Self::E0999 => "internal parser error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
