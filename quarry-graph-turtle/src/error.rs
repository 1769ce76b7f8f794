//! Error types for Turtle parsing
//!
//! All errors are fatal: the parse aborts at the current position. Triples
//! emitted before the error remain committed to the sink. Lines are 1-based
//! and count LF characters.

/// Error type for Turtle parsing operations
#[derive(Debug, thiserror::Error)]
pub enum TurtleError {
    /// No token class matched at a non-whitespace position
    #[error("invalid token `{lexeme}` at line {line} (byte offset {offset})")]
    Lex {
        lexeme: String,
        line: u32,
        offset: usize,
    },

    /// Malformed numeric escape, surrogate code point, or unknown short escape
    #[error("invalid escape sequence `{sequence}` at line {line}")]
    Escape { sequence: String, line: u32 },

    /// LL(1) table miss that the FOLLOW/epsilon rule could not resolve
    #[error("parse error at line {line}: expected {expected}, found {found}")]
    Parse {
        expected: String,
        found: String,
        line: u32,
    },

    /// Use of a prefix with no earlier `@prefix`/`PREFIX` binding
    #[error("undefined prefix `{prefix}:` at line {line}")]
    UndefinedPrefix { prefix: String, line: u32 },

    /// RFC 3986 resolution failed (e.g. relative reference without a base)
    #[error("cannot resolve IRI `{reference}` against base `{base}` at line {line}")]
    IriResolution {
        reference: String,
        base: String,
        line: u32,
    },

    /// A value-stack or parse-table invariant was violated. This indicates a
    /// bug in the table or a semantic action, not in the input document.
    #[error("internal parser error: {0}")]
    Internal(String),
}

/// Result type for Turtle operations
pub type Result<T> = std::result::Result<T, TurtleError>;

impl TurtleError {
    /// Create a lexer error
    pub fn lex(lexeme: impl Into<String>, line: u32, offset: usize) -> Self {
        Self::Lex {
            lexeme: lexeme.into(),
            line,
            offset,
        }
    }

    /// Create an escape error
    pub fn escape(sequence: impl Into<String>, line: u32) -> Self {
        Self::Escape {
            sequence: sequence.into(),
            line,
        }
    }

    /// Create a parse error
    pub fn parse(expected: impl Into<String>, found: impl Into<String>, line: u32) -> Self {
        Self::Parse {
            expected: expected.into(),
            found: found.into(),
            line,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
