//! Lexical analysis for Turtle documents.

pub mod chars;
pub mod escape;
mod lexer;
mod token;

pub use escape::decode_numeric_escapes;
pub use lexer::{tokenize, Lexer};
pub use token::{StringStyle, Token, TokenKind};
