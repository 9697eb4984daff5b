//! Comment stripping pre-pass.
//!
//! `//...` and `/*...*/` comments are replaced by spaces before tokenization.
//! Every byte of a comment becomes one space and newlines are kept, so byte
//! offsets, line numbers and columns of the remaining tokens are unchanged.
//! Comment markers inside string literals are left alone.

use std::sync::Arc;

use text_size::TextSize;

use super::errors::{ErrorCode, ParseError};
use crate::base::{LineIndex, SourceLocation, Span};

pub fn strip_comments(source: &str, file: &Arc<str>) -> Result<String, ParseError> {
    let bytes = source.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    let mut quote: Option<u8> = None;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            out.push(b);
            if b == b'\\' && i + 1 < bytes.len() && bytes[i + 1] != b'\n' {
                out.push(bytes[i + 1]);
                i += 2;
                continue;
            }
            if b == q || b == b'\n' {
                quote = None;
            }
            i += 1;
            continue;
        }

        match (b, bytes.get(i + 1)) {
            (b'"' | b'\'', _) => {
                quote = Some(b);
                out.push(b);
                i += 1;
            }
            (b'/', Some(b'/')) => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    out.push(b' ');
                    i += 1;
                }
            }
            (b'/', Some(b'*')) => {
                let start = i;
                out.extend_from_slice(b"  ");
                i += 2;
                loop {
                    if i >= bytes.len() {
                        let index = LineIndex::new(source);
                        let pos = index.position(TextSize::new(start as u32));
                        return Err(ParseError::new(
                            "block comment is never closed",
                            ErrorCode::E0103,
                            SourceLocation::new(file.clone(), Span::new(pos, pos)),
                        ));
                    }
                    if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
                        out.extend_from_slice(b"  ");
                        i += 2;
                        break;
                    }
                    out.push(if bytes[i] == b'\n' { b'\n' } else { b' ' });
                    i += 1;
                }
            }
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }

    // Whole multi-byte sequences inside comments became runs of spaces, so the
    // buffer stays valid UTF-8.
    String::from_utf8(out).map_err(|_| {
        ParseError::builder(ErrorCode::E0999)
            .message("comment stripping produced invalid UTF-8")
            .file(file.clone())
            .build()
    })
}
