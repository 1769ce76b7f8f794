//! Turtle (TTL) parser for the Quarry graph crates.
//!
//! This crate turns a UTF-8 Turtle document into a stream of RDF triples
//! delivered to a `quarry_graph_ir::GraphSink`. The pipeline is a
//! character-class lexer, an LL(1) table-driven parser, and a set of
//! semantic actions that maintain prefix/base/blank-node state and
//! materialize Turtle's shortcuts (predicate-object lists, collections,
//! anonymous property lists) into plain triples.
//!
//! # Example
//!
//! ```
//! use quarry_graph_turtle::parse;
//! use quarry_graph_ir::GraphCollectorSink;
//!
//! let turtle = r#"
//!     @prefix ex: <http://example.org/> .
//!     ex:alice ex:name "Alice" ;
//!              ex:age 30 .
//! "#;
//!
//! let mut sink = GraphCollectorSink::new();
//! parse(turtle, &mut sink).unwrap();
//! let graph = sink.finish();
//! assert_eq!(graph.len(), 2);
//! ```
//!
//! The token stream is also usable on its own (e.g. for a syntax
//! highlighter) via [`tokenize`] or the streaming [`Lexer`].

pub mod error;
mod grammar;
mod iri;
pub mod lex;
pub mod parser;

pub use error::{Result, TurtleError};
pub use lex::{tokenize, Lexer, StringStyle, Token, TokenKind};
pub use parser::{parse, parse_with_options, Parser, ParserOptions};
