//! Turtle Lexer implementation using winnow.
//!
//! Tokenizes Turtle input into a stream of tokens with source spans and line
//! numbers. Fails fast on the first lexical error.
//!
//! Before any character-class rule runs, the numeric escape pre-pass decodes
//! `\uXXXX` / `\UXXXXXXXX` over the whole document (numeric escapes are legal
//! in IRIs and prefixed names, not just strings). Short string escapes are
//! decoded here, inside string bodies only.

use std::borrow::Cow;
use std::sync::Arc;

use winnow::ascii::digit1;
use winnow::combinator::{alt, opt, peek};
use winnow::error::{ContextError, ErrMode};
use winnow::stream::{AsChar, Location, Stream};
use winnow::token::{any, one_of, take_till, take_while};
use winnow::{LocatingSlice, ModalResult, Parser};

use super::chars::*;
use super::escape::{decode_numeric_escapes, short_escape};
use super::token::{StringStyle, Token, TokenKind};
use crate::error::{Result, TurtleError};

/// Input type for the lexer - tracks position for spans.
pub type Input<'a> = LocatingSlice<&'a str>;

/// Streaming lexer for Turtle documents.
///
/// `next_token()` returns the next token (or an EOF token at end of input),
/// `peek()` looks at it without consuming, `line()` reports the current
/// 1-based line. Whitespace and `#` comments are skipped; the line counter
/// advances on every LF, including LFs inside skipped regions and long
/// string literals.
pub struct Lexer<'a> {
    /// Escape-decoded input (BOM stripped)
    input: Cow<'a, str>,
    /// Byte cursor into `input`
    pos: usize,
    /// Line of the cursor, 1-based
    line: u32,
    peeked: Option<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer for the given document.
    ///
    /// Runs the numeric escape pre-pass; a surrogate or out-of-range code
    /// point fails here before any token is produced.
    pub fn new(input: &'a str) -> Result<Self> {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        let input = decode_numeric_escapes(input)?;
        Ok(Self {
            input,
            pos: 0,
            line: 1,
            peeked: None,
        })
    }

    /// Current 1-based line number (of the pending token, if one is peeked).
    pub fn line(&self) -> u32 {
        match &self.peeked {
            Some(token) => token.line,
            None => self.line,
        }
    }

    /// Return the next token, consuming it.
    pub fn next_token(&mut self) -> Result<Token> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }
        self.scan()
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> Result<&Token> {
        if self.peeked.is_none() {
            let token = self.scan()?;
            self.peeked = Some(token);
        }
        match &self.peeked {
            Some(token) => Ok(token),
            None => Err(TurtleError::internal("lexer peek slot empty")),
        }
    }

    fn scan(&mut self) -> Result<Token> {
        let base = self.pos;
        let (start, scanned) = {
            let mut input = LocatingSlice::new(&self.input[base..]);
            skip_ws_and_comments(&mut input);
            let start = base + input.current_token_start();
            if input.is_empty() {
                (start, None)
            } else {
                match next_token_kind(&mut input) {
                    Ok(kind) => (start, Some(Ok((kind, base + input.current_token_start())))),
                    Err(_) => (start, Some(Err(()))),
                }
            }
        };

        let skipped = count_newlines(&self.input[base..start]);
        self.line += skipped;
        self.pos = start;

        match scanned {
            None => Ok(Token::new(TokenKind::Eof, start, start, self.line)),
            Some(Ok((kind, end))) => {
                let line = self.line;
                let inside = count_newlines(&self.input[start..end]);
                self.line += inside;
                self.pos = end;
                Ok(Token::new(kind, start, end, line))
            }
            Some(Err(())) => Err(self.token_error(start)),
        }
    }

    /// Build an error for an invalid token starting at `start`.
    ///
    /// A backslash that is not a legal escape (bare, or inside a string body)
    /// is reported as an escape error; everything else is a lexer error whose
    /// lexeme runs to the next whitespace or comment.
    fn token_error(&self, start: usize) -> TurtleError {
        let rest = &self.input[start..];

        if let Some((sequence, offset)) = find_bad_escape(rest) {
            let newlines = rest[..offset].bytes().filter(|&b| b == b'\n').count();
            return TurtleError::escape(sequence, self.line + newlines as u32);
        }

        let lexeme: String = rest
            .chars()
            .take_while(|c| !is_ws(*c) && *c != '#')
            .collect();
        TurtleError::lex(lexeme, self.line, start)
    }
}

fn count_newlines(text: &str) -> u32 {
    text.bytes().filter(|&b| b == b'\n').count() as u32
}

/// Locate an invalid escape in a failed token that starts with a quote or a
/// backslash. Returns the offending sequence and its byte offset.
fn find_bad_escape(rest: &str) -> Option<(String, usize)> {
    if rest.starts_with('\\') {
        let sequence: String = rest.chars().take(2).collect();
        return Some((sequence, 0));
    }

    // once the pre-pass has run, no backslash is legal inside an IRI
    if let Some(body) = rest.strip_prefix('<') {
        for (i, c) in body.char_indices() {
            match c {
                '>' => return None,
                '\\' => {
                    let sequence: String = body[i..].chars().take(2).collect();
                    return Some((sequence, 1 + i));
                }
                c if is_ws(c) => return None,
                _ => {}
            }
        }
        return None;
    }

    let (quote, body_start) = if rest.starts_with("\"\"\"") {
        ('"', 3)
    } else if rest.starts_with("'''") {
        ('\'', 3)
    } else if rest.starts_with('"') {
        ('"', 1)
    } else if rest.starts_with('\'') {
        ('\'', 1)
    } else {
        return None;
    };
    let long = body_start == 3;

    let mut chars = rest[body_start..].char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some((_, escaped)) if short_escape(escaped).is_some() => {}
                Some((_, escaped)) => return Some((format!("\\{escaped}"), body_start + i)),
                None => return Some(("\\".to_string(), body_start + i)),
            }
        } else if c == quote || (!long && c == '\n') {
            // terminator (or end of line for short strings) before any bad escape
            return None;
        }
    }
    None
}

fn fail<T>() -> ModalResult<T> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

/// Skip whitespace and comments.
fn skip_ws_and_comments(input: &mut Input<'_>) {
    loop {
        let _: ModalResult<&str, ContextError> = take_while(0.., is_ws).parse_next(input);

        if input.starts_with('#') {
            let _: ModalResult<&str, ContextError> =
                take_till(0.., |c| c == '\n' || c == '\r').parse_next(input);
            let _: ModalResult<Option<char>, ContextError> =
                opt(one_of(['\n', '\r'])).parse_next(input);
        } else {
            break;
        }
    }
}

/// Parse the next token.
fn next_token_kind(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        // Multi-char operators (must come before single-char)
        parse_double_caret,
        // IRIs
        parse_iri_ref,
        // Blank nodes (must come before prefixed names)
        parse_blank_node_label,
        parse_anon,
        // NIL: () with optional interior whitespace
        parse_nil,
        // Directives (@prefix, @base) and language tags
        parse_at_word,
        // Default prefix (:name or just :)
        parse_default_prefix,
        // Prefixed names and keywords (a, true, false, PREFIX, BASE)
        parse_prefixed_name_or_keyword,
        // String literals (long forms before short forms)
        parse_string_literal,
        // Numbers (double before decimal before integer: longest match)
        parse_number,
        // Single-char punctuation
        parse_punctuation,
    ))
    .parse_next(input)
}

// =============================================================================
// IRI Parsing
// =============================================================================

/// Parse an IRI reference: `<...>`
///
/// Numeric escapes were already decoded by the pre-pass, so any remaining
/// backslash (or other forbidden character) terminates the match and the
/// token fails.
fn parse_iri_ref(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    '<'.parse_next(input)?;
    // Empty IRIs are allowed (relative reference to the base)
    let content: &str = take_while(0.., is_iri_char).parse_next(input)?;
    '>'.parse_next(input)?;
    Ok(TokenKind::Iri(Arc::from(content)))
}

// =============================================================================
// Directives and language tags
// =============================================================================

/// Parse `@prefix`, `@base`, or a language tag.
///
/// LANGTAG ::= '@' [a-zA-Z]+ ('-' [a-zA-Z0-9]+)*
fn parse_at_word(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    '@'.parse_next(input)?;

    let word: &str = (
        take_while(1.., |c: char| c.is_ascii_alphabetic()),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '-'),
    )
        .take()
        .parse_next(input)?;

    // Directive keywords are case-insensitive
    if word.eq_ignore_ascii_case("prefix") {
        return Ok(TokenKind::KwPrefix);
    }
    if word.eq_ignore_ascii_case("base") {
        return Ok(TokenKind::KwBase);
    }

    // Otherwise it must be a well-formed language tag
    let mut subtags = word.split('-');
    let primary = subtags.next().unwrap_or("");
    if primary.is_empty() || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return fail();
    }
    for subtag in subtags {
        if subtag.is_empty() || !subtag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return fail();
        }
    }

    Ok(TokenKind::LangTag(Arc::from(word)))
}

// =============================================================================
// Prefixed Names and Keywords
// =============================================================================

/// Parse a default prefix name (`:local`) or default prefix namespace (`:`).
fn parse_default_prefix(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    ':'.parse_next(input)?;

    let local = opt(parse_pn_local).parse_next(input)?;

    match local {
        Some(local) => Ok(TokenKind::PrefixedName {
            prefix: Arc::from(""),
            local: Arc::from(local.as_str()),
        }),
        None => Ok(TokenKind::PrefixedNameNs(Arc::from(""))),
    }
}

/// Parse a prefixed name or keyword (a, true, false, PREFIX, BASE).
fn parse_prefixed_name_or_keyword(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let start = input.checkpoint();

    let first_char = match input.chars().next() {
        Some(c) => c,
        None => return fail(),
    };
    let is_valid_prefix_start = is_pn_prefix_start(first_char);

    let mut word = String::new();
    let c: char = any.parse_next(input)?;
    word.push(c);

    loop {
        let chunk: &str = take_while(0.., is_pn_chars).parse_next(input)?;
        word.push_str(chunk);

        // Interior dots are allowed when a PN_CHARS character eventually
        // follows; a trailing dot belongs to the enclosing statement.
        if !consume_dot_run(input, &mut word, is_pn_chars)? {
            break;
        }
    }

    // Followed by a colon: this is a prefixed name
    if peek(opt(':')).parse_next(input)?.is_some() {
        if !is_valid_prefix_start {
            input.reset(&start);
            return fail();
        }

        ':'.parse_next(input)?;

        let local = opt(parse_pn_local).parse_next(input)?;

        match local {
            Some(local) => Ok(TokenKind::PrefixedName {
                prefix: Arc::from(word.as_str()),
                local: Arc::from(local.as_str()),
            }),
            None => Ok(TokenKind::PrefixedNameNs(Arc::from(word.as_str()))),
        }
    } else {
        // `a`, `true`, `false` are case-sensitive; SPARQL keywords are not
        match word.as_str() {
            "a" => Ok(TokenKind::KwA),
            "true" => Ok(TokenKind::KwTrue),
            "false" => Ok(TokenKind::KwFalse),
            w if w.eq_ignore_ascii_case("PREFIX") => Ok(TokenKind::KwSparqlPrefix),
            w if w.eq_ignore_ascii_case("BASE") => Ok(TokenKind::KwSparqlBase),
            _ => {
                input.reset(&start);
                fail()
            }
        }
    }
}

/// Consume a run of dots when the name continues past them.
///
/// Returns true (and appends the dots) when the character after the run is in
/// `cont`, i.e. the dots are interior; returns false leaving the dots
/// unconsumed when they would be trailing.
fn consume_dot_run(
    input: &mut Input<'_>,
    word: &mut String,
    cont: impl Fn(char) -> bool,
) -> ModalResult<bool> {
    if !input.starts_with('.') {
        return Ok(false);
    }
    let rest = input.as_ref();
    let run = rest.bytes().take_while(|&b| b == b'.').count();
    if !rest[run..].chars().next().is_some_and(cont) {
        return Ok(false);
    }
    for _ in 0..run {
        '.'.parse_next(input)?;
        word.push('.');
    }
    Ok(true)
}

/// Parse a local name (after the colon in a prefixed name).
///
/// PN_LOCAL permits `:`, `%XX` percent triples (kept verbatim), and
/// PN_LOCAL_ESC backslash escapes (resolved here).
fn parse_pn_local(input: &mut Input<'_>) -> ModalResult<String> {
    let first_char = match input.chars().next() {
        Some(c) => c,
        None => return fail(),
    };

    if !is_pn_local_start(first_char) && first_char != '%' && first_char != '\\' {
        return fail();
    }

    let mut local = String::new();

    loop {
        let chunk: &str =
            take_while(0.., |c: char| is_pn_chars(c) || c == ':').parse_next(input)?;
        local.push_str(chunk);

        if consume_dot_run(input, &mut local, |c| {
            is_pn_chars(c) || c == ':' || c == '%' || c == '\\'
        })? {
            continue;
        }

        if input.starts_with('%') {
            '%'.parse_next(input)?;
            let hex: &str = take_while(2..=2, AsChar::is_hex_digit).parse_next(input)?;
            local.push('%');
            local.push_str(hex);
        } else if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            let escaped: char = any.parse_next(input)?;
            if is_pn_local_esc(escaped) {
                local.push(escaped);
            } else {
                return fail();
            }
        } else {
            break;
        }
    }

    if local.is_empty() {
        return fail();
    }

    Ok(local)
}

// =============================================================================
// Blank Nodes
// =============================================================================

/// Parse a blank node label: `_:name`
fn parse_blank_node_label(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "_:".parse_next(input)?;
    let name = parse_blank_node_name(input)?;
    Ok(TokenKind::BlankNodeLabel(Arc::from(name.as_str())))
}

/// Parse a blank node name (after `_:`).
///
/// The first character may be a digit; a trailing dot is never part of the
/// label (it terminates the enclosing statement).
fn parse_blank_node_name(input: &mut Input<'_>) -> ModalResult<String> {
    let first: char = any
        .verify(|c: &char| is_pn_chars_u(*c) || c.is_ascii_digit())
        .parse_next(input)?;

    let mut name = String::new();
    name.push(first);

    loop {
        let chunk: &str = take_while(0.., is_pn_chars).parse_next(input)?;
        name.push_str(chunk);

        if !consume_dot_run(input, &mut name, is_pn_chars)? {
            break;
        }
    }

    Ok(name)
}

/// Parse anonymous blank node: `[]`
fn parse_anon(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    ('[', take_while(0.., is_ws), ']')
        .map(|_| TokenKind::Anon)
        .parse_next(input)
}

/// Parse NIL (empty list): `()`
fn parse_nil(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    ('(', take_while(0.., is_ws), ')')
        .map(|_| TokenKind::Nil)
        .parse_next(input)
}

// =============================================================================
// String Literals
// =============================================================================

/// Parse a string literal in any of the four quoting styles.
fn parse_string_literal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        parse_string_long_double,
        parse_string_long_single,
        parse_string_short_double,
        parse_string_short_single,
    ))
    .parse_next(input)
}

fn parse_string_short_double(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    '"'.parse_next(input)?;
    let value = short_string_body(input, '"')?;
    '"'.parse_next(input)?;
    Ok(string_token(value, StringStyle::Double))
}

fn parse_string_short_single(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    '\''.parse_next(input)?;
    let value = short_string_body(input, '\'')?;
    '\''.parse_next(input)?;
    Ok(string_token(value, StringStyle::Single))
}

fn parse_string_long_double(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "\"\"\"".parse_next(input)?;
    let value = long_string_body(input, '"', "\"\"\"")?;
    "\"\"\"".parse_next(input)?;
    Ok(string_token(value, StringStyle::LongDouble))
}

fn parse_string_long_single(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "'''".parse_next(input)?;
    let value = long_string_body(input, '\'', "'''")?;
    "'''".parse_next(input)?;
    Ok(string_token(value, StringStyle::LongSingle))
}

fn string_token(value: String, style: StringStyle) -> TokenKind {
    TokenKind::String {
        value: Arc::from(value.as_str()),
        style,
    }
}

/// Body of a single-line string: no raw newlines, short escapes decoded.
fn short_string_body(input: &mut Input<'_>, quote: char) -> ModalResult<String> {
    let mut body = String::new();

    loop {
        let chunk: &str =
            take_while(0.., |c: char| c != quote && c != '\\' && c != '\n' && c != '\r')
                .parse_next(input)?;
        body.push_str(chunk);

        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            let escaped: char = any.parse_next(input)?;
            match short_escape(escaped) {
                Some(decoded) => body.push(decoded),
                None => return fail(),
            }
        } else {
            // at the closing quote, a raw newline, or end of input;
            // the caller's delimiter match decides
            break;
        }
    }

    Ok(body)
}

/// Body of a triple-quoted string: may span lines and contain up to two
/// quote characters in a row.
fn long_string_body(input: &mut Input<'_>, quote: char, terminator: &str) -> ModalResult<String> {
    let mut body = String::new();

    loop {
        let chunk: &str = take_while(0.., |c: char| c != quote && c != '\\').parse_next(input)?;
        body.push_str(chunk);

        if input.is_empty() || input.starts_with(terminator) {
            break;
        }

        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            let escaped: char = any.parse_next(input)?;
            match short_escape(escaped) {
                Some(decoded) => body.push(decoded),
                None => return fail(),
            }
        } else {
            // lone or doubled quote character inside the body
            let c: char = any.parse_next(input)?;
            body.push(c);
        }
    }

    Ok(body)
}

// =============================================================================
// Numbers
// =============================================================================

fn parse_number(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((parse_double, parse_decimal, parse_integer)).parse_next(input)
}

/// DOUBLE ::= [+-]? ([0-9]+ '.' [0-9]* | '.' [0-9]+ | [0-9]+) EXPONENT
fn parse_double(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let lexeme: &str = (
        opt(one_of(['+', '-'])),
        alt((
            (digit1, '.', opt(digit1)).take(),
            ('.', digit1).take(),
            digit1,
        )),
        one_of(['e', 'E']),
        opt(one_of(['+', '-'])),
        digit1,
    )
        .take()
        .parse_next(input)?;

    Ok(TokenKind::Double(Arc::from(lexeme)))
}

/// DECIMAL ::= [+-]? [0-9]* '.' [0-9]+
fn parse_decimal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let lexeme: &str = (
        opt(one_of(['+', '-'])),
        alt(((digit1, '.', digit1).take(), ('.', digit1).take())),
    )
        .take()
        .parse_next(input)?;

    // an exponent would make this a DOUBLE; that alternative already failed
    if peek(opt(one_of(['e', 'E']))).parse_next(input)?.is_some() {
        return fail();
    }

    Ok(TokenKind::Decimal(Arc::from(lexeme)))
}

/// INTEGER ::= [+-]? [0-9]+
fn parse_integer(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let lexeme: &str = (opt(one_of(['+', '-'])), digit1)
        .take()
        .parse_next(input)?;

    if peek(opt(one_of(['e', 'E']))).parse_next(input)?.is_some() {
        return fail();
    }
    if input.starts_with('.') {
        let rest = &input.as_ref()[1..];
        if rest.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return fail();
        }
    }

    Ok(TokenKind::Integer(Arc::from(lexeme)))
}

// =============================================================================
// Operators and Punctuation
// =============================================================================

fn parse_double_caret(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "^^".map(|_| TokenKind::DoubleCaret).parse_next(input)
}

fn parse_punctuation(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    any.verify_map(|c| match c {
        '.' => Some(TokenKind::Dot),
        ',' => Some(TokenKind::Comma),
        ';' => Some(TokenKind::Semicolon),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        _ => None,
    })
    .parse_next(input)
}

/// Tokenize a whole Turtle document.
///
/// Runs the numeric escape pre-pass, then lexes to end of input. The returned
/// vector always ends with an EOF token. Fails on the first invalid token.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(input)?;
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        let at_end = token.is_eof();
        tokens.push(token);
        if at_end {
            break;
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !matches!(k, TokenKind::Eof))
            .collect()
    }

    fn string(value: &str, style: StringStyle) -> TokenKind {
        TokenKind::String {
            value: Arc::from(value),
            style,
        }
    }

    #[test]
    fn test_iri() {
        assert_eq!(
            tok("<http://example.org/>"),
            vec![TokenKind::Iri(Arc::from("http://example.org/"))]
        );
    }

    #[test]
    fn test_empty_iri() {
        // Empty IRI (relative reference to base)
        assert_eq!(tok("<>"), vec![TokenKind::Iri(Arc::from(""))]);
    }

    #[test]
    fn test_iri_numeric_escape() {
        // decoded by the pre-pass before the IRI rule runs
        assert_eq!(
            tok("<http://ex/\\u00E9>"),
            vec![TokenKind::Iri(Arc::from("http://ex/é"))]
        );
    }

    #[test]
    fn test_iri_forbidden_char() {
        assert!(tokenize("<http://ex/ space>").is_err());
    }

    #[test]
    fn test_prefixed_name() {
        assert_eq!(
            tok("ex:name"),
            vec![TokenKind::PrefixedName {
                prefix: Arc::from("ex"),
                local: Arc::from("name"),
            }]
        );

        assert_eq!(tok("ex:"), vec![TokenKind::PrefixedNameNs(Arc::from("ex"))]);
    }

    #[test]
    fn test_default_prefix() {
        assert_eq!(
            tok(":name"),
            vec![TokenKind::PrefixedName {
                prefix: Arc::from(""),
                local: Arc::from("name"),
            }]
        );

        assert_eq!(tok(":"), vec![TokenKind::PrefixedNameNs(Arc::from(""))]);
    }

    #[test]
    fn test_pn_local_with_dots_and_colons() {
        assert_eq!(
            tok("ex:a.b:c"),
            vec![TokenKind::PrefixedName {
                prefix: Arc::from("ex"),
                local: Arc::from("a.b:c"),
            }]
        );
    }

    #[test]
    fn test_pn_local_trailing_dot_is_statement_end() {
        assert_eq!(
            tok("ex:name."),
            vec![
                TokenKind::PrefixedName {
                    prefix: Arc::from("ex"),
                    local: Arc::from("name"),
                },
                TokenKind::Dot,
            ]
        );
    }

    #[test]
    fn test_pn_local_escapes() {
        // PN_LOCAL_ESC resolved, %XX kept verbatim
        assert_eq!(
            tok("ex:with\\,comma"),
            vec![TokenKind::PrefixedName {
                prefix: Arc::from("ex"),
                local: Arc::from("with,comma"),
            }]
        );
        assert_eq!(
            tok("ex:percent%41sign"),
            vec![TokenKind::PrefixedName {
                prefix: Arc::from("ex"),
                local: Arc::from("percent%41sign"),
            }]
        );
    }

    #[test]
    fn test_blank_node() {
        assert_eq!(tok("_:b1"), vec![TokenKind::BlankNodeLabel(Arc::from("b1"))]);
        assert_eq!(tok("[]"), vec![TokenKind::Anon]);
        assert_eq!(tok("[ ]"), vec![TokenKind::Anon]);
    }

    #[test]
    fn test_blank_node_trailing_dot() {
        assert_eq!(
            tok("_:b1."),
            vec![
                TokenKind::BlankNodeLabel(Arc::from("b1")),
                TokenKind::Dot,
            ]
        );
    }

    #[test]
    fn test_nil() {
        assert_eq!(tok("()"), vec![TokenKind::Nil]);
        assert_eq!(tok("( )"), vec![TokenKind::Nil]);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(tok("a"), vec![TokenKind::KwA]);
        assert_eq!(tok("true"), vec![TokenKind::KwTrue]);
        assert_eq!(tok("false"), vec![TokenKind::KwFalse]);
        assert_eq!(tok("@prefix"), vec![TokenKind::KwPrefix]);
        assert_eq!(tok("@PREFIX"), vec![TokenKind::KwPrefix]);
        assert_eq!(tok("@base"), vec![TokenKind::KwBase]);
        assert_eq!(tok("PREFIX"), vec![TokenKind::KwSparqlPrefix]);
        assert_eq!(tok("prefix"), vec![TokenKind::KwSparqlPrefix]);
        assert_eq!(tok("BASE"), vec![TokenKind::KwSparqlBase]);
    }

    #[test]
    fn test_lang_tag() {
        assert_eq!(tok("@en"), vec![TokenKind::LangTag(Arc::from("en"))]);
        assert_eq!(tok("@en-US"), vec![TokenKind::LangTag(Arc::from("en-US"))]);
        assert_eq!(
            tok("@en-US-x2"),
            vec![TokenKind::LangTag(Arc::from("en-US-x2"))]
        );
    }

    #[test]
    fn test_malformed_lang_tag() {
        // primary subtag must be alphabetic, no trailing hyphen
        assert!(tokenize("@1en").is_err());
        assert!(tokenize("@en-").is_err());
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(
            tok("\"hello\""),
            vec![string("hello", StringStyle::Double)]
        );
        assert_eq!(tok("'hello'"), vec![string("hello", StringStyle::Single)]);
        assert_eq!(
            tok("\"hello\\nworld\""),
            vec![string("hello\nworld", StringStyle::Double)]
        );
        assert_eq!(tok("\"\""), vec![string("", StringStyle::Double)]);
    }

    #[test]
    fn test_string_numeric_escape() {
        assert_eq!(tok("\"\\u0041\""), vec![string("A", StringStyle::Double)]);
    }

    #[test]
    fn test_long_string() {
        assert_eq!(
            tok("\"\"\"hello\nworld\"\"\""),
            vec![string("hello\nworld", StringStyle::LongDouble)]
        );
        // up to two quotes in a row are allowed inside
        assert_eq!(
            tok("'''it''s'''"),
            vec![string("it''s", StringStyle::LongSingle)]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tok("42"), vec![TokenKind::Integer(Arc::from("42"))]);
        assert_eq!(tok("-42"), vec![TokenKind::Integer(Arc::from("-42"))]);
        assert_eq!(tok("3.14"), vec![TokenKind::Decimal(Arc::from("3.14"))]);
        assert_eq!(tok(".5"), vec![TokenKind::Decimal(Arc::from(".5"))]);
        assert_eq!(tok("1e10"), vec![TokenKind::Double(Arc::from("1e10"))]);
        assert_eq!(
            tok("-1.5E-3"),
            vec![TokenKind::Double(Arc::from("-1.5E-3"))]
        );
    }

    #[test]
    fn test_integer_then_statement_dot() {
        assert_eq!(
            tok("42 ."),
            vec![TokenKind::Integer(Arc::from("42")), TokenKind::Dot]
        );
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tok(".;,"),
            vec![TokenKind::Dot, TokenKind::Semicolon, TokenKind::Comma]
        );
        assert_eq!(tok("^^"), vec![TokenKind::DoubleCaret]);
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            tok("ex:name # this is a comment\nex:value"),
            vec![
                TokenKind::PrefixedName {
                    prefix: Arc::from("ex"),
                    local: Arc::from("name"),
                },
                TokenKind::PrefixedName {
                    prefix: Arc::from("ex"),
                    local: Arc::from("value"),
                },
            ]
        );
    }

    #[test]
    fn test_line_numbers() {
        let tokens = tokenize("<http://a/> # comment\n<http://b/>\n\n<http://c/>").unwrap();
        let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 2, 4, 4]); // includes EOF
    }

    #[test]
    fn test_line_numbers_in_long_strings() {
        let tokens = tokenize("\"\"\"a\nb\nc\"\"\" <http://d/>").unwrap();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_bom_is_skipped() {
        assert_eq!(
            tok("\u{FEFF}<http://example.org/>"),
            vec![TokenKind::Iri(Arc::from("http://example.org/"))]
        );
    }

    #[test]
    fn test_streaming_peek() {
        let mut lexer = Lexer::new("ex:a ex:b").unwrap();
        assert!(matches!(
            lexer.peek().unwrap().kind,
            TokenKind::PrefixedName { .. }
        ));
        // peek does not consume
        let first = lexer.next_token().unwrap();
        assert!(matches!(first.kind, TokenKind::PrefixedName { .. }));
        let second = lexer.next_token().unwrap();
        assert!(matches!(second.kind, TokenKind::PrefixedName { .. }));
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_error_unexpected_char() {
        let err = tokenize("ex:name $ ex:value").unwrap_err();
        match err {
            TurtleError::Lex { lexeme, line, .. } => {
                assert_eq!(lexeme, "$");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_with_line_info() {
        let err = tokenize("ex:name \"ok\" .\nex:other $ .").unwrap_err();
        match err {
            TurtleError::Lex { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_unknown_string_escape() {
        let err = tokenize("ex:name \"bad\\qescape\"").unwrap_err();
        match err {
            TurtleError::Escape { sequence, line } => {
                assert_eq!(sequence, "\\q");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_unterminated_string() {
        assert!(matches!(
            tokenize("ex:name \"unterminated").unwrap_err(),
            TurtleError::Lex { .. }
        ));
    }
}
