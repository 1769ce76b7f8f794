//! Numeric escape decoding.
//!
//! Turtle has two unrelated escape mechanisms:
//!
//! 1. Numeric code-point escapes (`\uXXXX`, `\UXXXXXXXX`). These are legal in
//!    IRI references and prefixed names, not only in strings, so they are
//!    decoded over the whole document BEFORE the lexer's character-class
//!    rules run.
//! 2. Short string escapes (`\t \b \n \r \f \" \' \\`). These apply only to
//!    string bodies and are decoded by the lexer after the quotes are
//!    stripped.
//!
//! The pre-pass replaces every syntactically valid numeric sequence left to
//! right. A sequence with a non-hex payload is left in place for the lexer to
//! reject; a surrogate code point (U+D800..U+DFFF) or a value above U+10FFFF
//! is fatal here.

use crate::error::{Result, TurtleError};
use std::borrow::Cow;

/// Decode `\uXXXX` / `\UXXXXXXXX` sequences over the whole input.
///
/// Returns the input unchanged (borrowed) when it contains no such sequence.
pub fn decode_numeric_escapes(input: &str) -> Result<Cow<'_, str>> {
    if !input.contains("\\u") && !input.contains("\\U") {
        return Ok(Cow::Borrowed(input));
    }

    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut line: u32 = 1;
    let mut copied_to = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                line += 1;
                i += 1;
            }
            b'\\' if i + 1 < bytes.len() && matches!(bytes[i + 1], b'u' | b'U') => {
                let digits = if bytes[i + 1] == b'u' { 4 } else { 8 };
                let payload = input.get(i + 2..i + 2 + digits);
                match payload {
                    Some(hex) if hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                        let sequence = &input[i..i + 2 + digits];
                        let code = u32::from_str_radix(hex, 16)
                            .map_err(|_| TurtleError::escape(sequence, line))?;
                        if (0xD800..=0xDFFF).contains(&code) {
                            return Err(TurtleError::escape(sequence, line));
                        }
                        let decoded = char::from_u32(code)
                            .ok_or_else(|| TurtleError::escape(sequence, line))?;
                        out.push_str(&input[copied_to..i]);
                        out.push(decoded);
                        i += 2 + digits;
                        copied_to = i;
                    }
                    // Non-hex payload: not a numeric escape, leave it for the
                    // lexer to reject in context.
                    _ => i += 2,
                }
            }
            _ => i += 1,
        }
    }

    if copied_to == 0 {
        return Ok(Cow::Borrowed(input));
    }
    out.push_str(&input[copied_to..]);
    Ok(Cow::Owned(out))
}

/// Decode a single short-form string escape character (the character after
/// the backslash). Returns `None` for anything outside the closed set.
pub(crate) fn short_escape(c: char) -> Option<char> {
    match c {
        't' => Some('\t'),
        'b' => Some('\u{0008}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        'f' => Some('\u{000C}'),
        '"' => Some('"'),
        '\'' => Some('\''),
        '\\' => Some('\\'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_escapes_borrows() {
        let input = "<http://example.org/> a <http://example.org/Thing> .";
        assert!(matches!(
            decode_numeric_escapes(input).unwrap(),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_short_u_escape() {
        assert_eq!(decode_numeric_escapes("\\u0041").unwrap(), "A");
        assert_eq!(decode_numeric_escapes("pre\\u0041post").unwrap(), "preApost");
    }

    #[test]
    fn test_long_u_escape() {
        assert_eq!(decode_numeric_escapes("\\U00000041").unwrap(), "A");
        assert_eq!(decode_numeric_escapes("\\U00010000").unwrap(), "\u{10000}");
    }

    #[test]
    fn test_surrogate_is_fatal() {
        let err = decode_numeric_escapes("\\uD800").unwrap_err();
        assert!(matches!(err, TurtleError::Escape { line: 1, .. }));
    }

    #[test]
    fn test_out_of_range_is_fatal() {
        assert!(decode_numeric_escapes("\\U00110000").is_err());
    }

    #[test]
    fn test_invalid_hex_left_in_place() {
        // Not a numeric escape per the grammar; the lexer rejects it later.
        assert_eq!(decode_numeric_escapes("\\uZZZZ\\u0041").unwrap(), "\\uZZZZA");
    }

    #[test]
    fn test_error_carries_line_number() {
        let err = decode_numeric_escapes("ok\nok\n\\uDFFF").unwrap_err();
        match err {
            TurtleError::Escape { line, sequence } => {
                assert_eq!(line, 3);
                assert_eq!(sequence, "\\uDFFF");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_short_escape_set() {
        assert_eq!(short_escape('n'), Some('\n'));
        assert_eq!(short_escape('t'), Some('\t'));
        assert_eq!(short_escape('\\'), Some('\\'));
        assert_eq!(short_escape('x'), None);
        assert_eq!(short_escape('u'), None);
    }
}
