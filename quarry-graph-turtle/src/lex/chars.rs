//! Turtle character class predicates.
//!
//! The grammar's character productions (shared with SPARQL) name explicit
//! Unicode ranges. They must be encoded exactly; `char::is_alphabetic` and
//! friends are NOT equivalent.

/// Check if a character is in PN_CHARS_BASE.
///
/// ```text
/// PN_CHARS_BASE ::= [A-Z] | [a-z] | [#x00C0-#x00D6] | [#x00D8-#x00F6]
///                 | [#x00F8-#x02FF] | [#x0370-#x037D] | [#x037F-#x1FFF]
///                 | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF]
///                 | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD]
///                 | [#x10000-#xEFFFF]
/// ```
pub fn is_pn_chars_base(c: char) -> bool {
    matches!(c,
        'A'..='Z' |
        'a'..='z' |
        '\u{00C0}'..='\u{00D6}' |
        '\u{00D8}'..='\u{00F6}' |
        '\u{00F8}'..='\u{02FF}' |
        '\u{0370}'..='\u{037D}' |
        '\u{037F}'..='\u{1FFF}' |
        '\u{200C}'..='\u{200D}' |
        '\u{2070}'..='\u{218F}' |
        '\u{2C00}'..='\u{2FEF}' |
        '\u{3001}'..='\u{D7FF}' |
        '\u{F900}'..='\u{FDCF}' |
        '\u{FDF0}'..='\u{FFFD}' |
        '\u{10000}'..='\u{EFFFF}'
    )
}

/// Check if a character is in PN_CHARS_U.
///
/// ```text
/// PN_CHARS_U ::= PN_CHARS_BASE | '_'
/// ```
pub fn is_pn_chars_u(c: char) -> bool {
    is_pn_chars_base(c) || c == '_'
}

/// Check if a character is in PN_CHARS.
///
/// ```text
/// PN_CHARS ::= PN_CHARS_U | '-' | [0-9] | #x00B7 | [#x0300-#x036F] | [#x203F-#x2040]
/// ```
pub fn is_pn_chars(c: char) -> bool {
    is_pn_chars_u(c)
        || c == '-'
        || c.is_ascii_digit()
        || c == '\u{00B7}'
        || matches!(c, '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

/// Check if a character can start a prefix name (first char of PN_PREFIX).
pub fn is_pn_prefix_start(c: char) -> bool {
    is_pn_chars_base(c)
}

/// Check if a character can start a local name (first char of PN_LOCAL,
/// excluding the `%` and `\` escape forms which the lexer handles separately).
pub fn is_pn_local_start(c: char) -> bool {
    is_pn_chars_u(c) || c == ':' || c.is_ascii_digit()
}

/// Check if a character may follow a backslash in PN_LOCAL_ESC.
///
/// ```text
/// PN_LOCAL_ESC ::= '\' ( '_' | '~' | '.' | '-' | '!' | '$' | '&' | "'" | '('
///                      | ')' | '*' | '+' | ',' | ';' | '=' | '/' | '?' | '#'
///                      | '@' | '%' )
/// ```
pub fn is_pn_local_esc(c: char) -> bool {
    matches!(
        c,
        '_' | '~'
            | '.'
            | '-'
            | '!'
            | '$'
            | '&'
            | '\''
            | '('
            | ')'
            | '*'
            | '+'
            | ','
            | ';'
            | '='
            | '/'
            | '?'
            | '#'
            | '@'
            | '%'
    )
}

/// Check if a character is Turtle whitespace.
pub fn is_ws(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Check if a character can appear in an IRI reference unescaped.
///
/// IRIREF forbids `< > " { } | ^ ` \` and the controls U+0000..U+0020.
pub fn is_iri_char(c: char) -> bool {
    !matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' | '\x00'..='\x20')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pn_chars_base_ascii() {
        assert!(is_pn_chars_base('A'));
        assert!(is_pn_chars_base('z'));
        assert!(!is_pn_chars_base('0'));
        assert!(!is_pn_chars_base('_'));
        assert!(!is_pn_chars_base('-'));
    }

    #[test]
    fn test_pn_chars_base_unicode_ranges() {
        assert!(is_pn_chars_base('\u{00C0}'));
        assert!(!is_pn_chars_base('\u{00D7}')); // multiplication sign gap
        assert!(!is_pn_chars_base('\u{00F7}')); // division sign gap
        assert!(is_pn_chars_base('振'));
        assert!(is_pn_chars_base('\u{10000}'));
        assert!(is_pn_chars_base('\u{EFFFF}'));
        assert!(!is_pn_chars_base('\u{F0000}'));
    }

    #[test]
    fn test_pn_chars_extensions() {
        assert!(is_pn_chars_u('_'));
        assert!(is_pn_chars('-'));
        assert!(is_pn_chars('7'));
        assert!(is_pn_chars('\u{00B7}'));
        assert!(is_pn_chars('\u{0300}'));
        assert!(!is_pn_chars(' '));
    }

    #[test]
    fn test_iri_char() {
        assert!(is_iri_char('a'));
        assert!(is_iri_char('/'));
        assert!(!is_iri_char('<'));
        assert!(!is_iri_char('\\'));
        assert!(!is_iri_char(' '));
        assert!(!is_iri_char('\x01'));
    }

    #[test]
    fn test_pn_local_esc() {
        for c in "_~.-!$&'()*+,;=/?#@%".chars() {
            assert!(is_pn_local_esc(c));
        }
        assert!(!is_pn_local_esc('x'));
        assert!(!is_pn_local_esc('"'));
    }
}
