//! String literals as the lexer reads them back.

use std::fmt::{self, Write};

/// Display adapter that writes text as a quoted DSL literal.
///
/// Only the escapes the lexer resolves are produced: `\\`, `\r`, `\n`, `\t`
/// and the enclosing quote. Every other character is written as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quoted<'a> {
    text: &'a str,
    quote: char,
}

impl<'a> Quoted<'a> {
    /// `"text"`
    pub fn double(text: &'a str) -> Self {
        Self { text, quote: '"' }
    }

    /// `'text'`, as used by character ranges
    pub fn single(text: &'a str) -> Self {
        Self { text, quote: '\'' }
    }
}

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.quote)?;
        for c in self.text.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '\r' => f.write_str("\\r")?,
                '\n' => f.write_str("\\n")?,
                '\t' => f.write_str("\\t")?,
                c if c == self.quote => {
                    f.write_char('\\')?;
                    f.write_char(c)?;
                }
                c => f.write_char(c)?,
            }
        }
        f.write_char(self.quote)
    }
}
