//! Turtle Token types.
//!
//! Tokens are the output of lexical analysis, ready for parsing. String-bearing
//! tokens carry their lexeme with all escapes already resolved; punctuation and
//! keyword tokens carry meaning in the kind alone.

use std::sync::Arc;

/// Quoting style of a string literal token.
///
/// Single/double refer to the quote character; "long" forms are the
/// triple-quoted variants that may span lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringStyle {
    /// `'...'`
    Single,
    /// `"..."`
    Double,
    /// `'''...'''`
    LongSingle,
    /// `"""..."""`
    LongDouble,
}

/// A token with its source span and starting line.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The token kind
    pub kind: TokenKind,
    /// Source location (start byte offset)
    pub start: usize,
    /// Source location (end byte offset)
    pub end: usize,
    /// 1-based line on which the token starts
    pub line: u32,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, start: usize, end: usize, line: u32) -> Self {
        Self {
            kind,
            start,
            end,
            line,
        }
    }

    /// Check if this is an EOF token.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// Token kinds for Turtle.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // =========================================================================
    // IRIs
    // =========================================================================
    /// Full IRI reference: `<http://example.org/>` (content without brackets)
    Iri(Arc<str>),

    /// Prefixed name namespace: `prefix:` (just the prefix, no local)
    PrefixedNameNs(Arc<str>),

    /// Prefixed name with local: `prefix:local`
    PrefixedName {
        /// Namespace prefix (without colon)
        prefix: Arc<str>,
        /// Local name (PN_LOCAL_ESC escapes resolved)
        local: Arc<str>,
    },

    // =========================================================================
    // Blank Nodes
    // =========================================================================
    /// Labeled blank node: `_:name`
    BlankNodeLabel(Arc<str>),

    /// Anonymous blank node: `[]` (may contain interior whitespace)
    Anon,

    /// NIL (empty list): `()` (may contain interior whitespace)
    Nil,

    // =========================================================================
    // Literals
    // =========================================================================
    /// String literal (escape-decoded content) in one of the four quote styles
    String {
        /// Decoded body
        value: Arc<str>,
        /// Which quoting form was used
        style: StringStyle,
    },

    /// Integer literal (raw lexeme, e.g. `-42`)
    Integer(Arc<str>),

    /// Decimal literal (raw lexeme, e.g. `3.14`)
    Decimal(Arc<str>),

    /// Double literal (raw lexeme, e.g. `1.5e10`)
    Double(Arc<str>),

    /// Language tag (e.g., `@en`, `@en-US`), stored without the `@`
    LangTag(Arc<str>),

    // =========================================================================
    // Keywords / Directives
    // =========================================================================
    /// `@prefix` directive
    KwPrefix,

    /// `@base` directive
    KwBase,

    /// SPARQL-style `PREFIX` (without @, no trailing dot)
    KwSparqlPrefix,

    /// SPARQL-style `BASE` (without @, no trailing dot)
    KwSparqlBase,

    /// `a` keyword (shorthand for rdf:type)
    KwA,

    /// `true` boolean literal
    KwTrue,

    /// `false` boolean literal
    KwFalse,

    // =========================================================================
    // Punctuation
    // =========================================================================
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `^^` (datatype marker)
    DoubleCaret,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,

    // =========================================================================
    // Special
    // =========================================================================
    /// End of input
    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Iri(s) => write!(f, "<{}>", s),
            TokenKind::PrefixedNameNs(s) => write!(f, "{}:", s),
            TokenKind::PrefixedName { prefix, local } => write!(f, "{}:{}", prefix, local),
            TokenKind::BlankNodeLabel(s) => write!(f, "_:{}", s),
            TokenKind::Anon => write!(f, "[]"),
            TokenKind::Nil => write!(f, "()"),
            TokenKind::String { value, .. } => write!(f, "\"{}\"", value),
            TokenKind::Integer(s) | TokenKind::Decimal(s) | TokenKind::Double(s) => {
                write!(f, "{}", s)
            }
            TokenKind::LangTag(s) => write!(f, "@{}", s),
            TokenKind::KwPrefix => write!(f, "@prefix"),
            TokenKind::KwBase => write!(f, "@base"),
            TokenKind::KwSparqlPrefix => write!(f, "PREFIX"),
            TokenKind::KwSparqlBase => write!(f, "BASE"),
            TokenKind::KwA => write!(f, "a"),
            TokenKind::KwTrue => write!(f, "true"),
            TokenKind::KwFalse => write!(f, "false"),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::DoubleCaret => write!(f, "^^"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}
