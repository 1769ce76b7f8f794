//! Turtle parser that emits to a GraphSink.
//!
//! The document is batch-lexed, then the LL(1) driver walks the parse table
//! and dispatches semantic actions that construct terms and emit triples.
//! One parser instance owns the state of exactly one document parse; prefix,
//! base, and blank-node state never survive across documents.

mod actions;
mod canonical;
mod driver;

use quarry_graph_ir::GraphSink;

use crate::error::Result;
use crate::lex::{tokenize, Token};
use actions::ParseState;
use driver::Driver;

/// Options accepted by the parser.
#[derive(Clone, Debug, Default)]
pub struct ParserOptions {
    /// Initial base IRI; relative references resolve against it. An empty or
    /// absent value means relative references fail until `@base` is seen.
    pub base_uri: Option<String>,
    /// Treat lexical warnings as fatal (currently: language tags whose
    /// subtags fall outside the BCP 47 1..=8 character shape).
    pub validate: bool,
    /// Prefix bindings seeded before any directive runs. Document directives
    /// may rebind them.
    pub prefixes: Vec<(String, String)>,
    /// Rewrite numeric literal lexical forms to XSD canonical form.
    pub canonicalize: bool,
}

/// Turtle parser for one document.
pub struct Parser<'a, S> {
    tokens: Vec<Token>,
    state: ParseState,
    sink: &'a mut S,
}

impl<'a, S: GraphSink> Parser<'a, S> {
    /// Create a parser with default options.
    ///
    /// Lexing happens here; a lexically invalid document fails before
    /// `parse` is called.
    pub fn new(input: &str, sink: &'a mut S) -> Result<Self> {
        Self::with_options(input, sink, ParserOptions::default())
    }

    /// Create a parser with explicit options.
    pub fn with_options(input: &str, sink: &'a mut S, options: ParserOptions) -> Result<Self> {
        let tokens = tokenize(input)?;
        Ok(Self {
            tokens,
            state: ParseState::new(options),
            sink,
        })
    }

    /// Parse the entire document, emitting triples to the sink.
    pub fn parse(self) -> Result<()> {
        let Parser {
            tokens,
            mut state,
            sink,
        } = self;

        let span = tracing::info_span!(
            "turtle_parse",
            statement_count = tracing::field::Empty,
            triple_count = tracing::field::Empty,
            iri_cache_hits = tracing::field::Empty,
            iri_cache_misses = tracing::field::Empty,
        );
        let _guard = span.enter();

        let mut driver = Driver::new(&tokens);
        let result = driver.run(&mut state, sink);

        span.record("statement_count", state.statement_count);
        span.record("triple_count", state.triple_count);
        span.record("iri_cache_hits", state.iri_cache_hits);
        span.record("iri_cache_misses", state.iri_cache_misses);

        result
    }
}

/// Parse a Turtle document into GraphSink events.
pub fn parse<S: GraphSink>(input: &str, sink: &mut S) -> Result<()> {
    Parser::new(input, sink)?.parse()
}

/// Parse a Turtle document with explicit options.
pub fn parse_with_options<S: GraphSink>(
    input: &str,
    sink: &mut S,
    options: ParserOptions,
) -> Result<()> {
    Parser::with_options(input, sink, options)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TurtleError;
    use quarry_graph_ir::{Graph, GraphCollectorSink, LiteralValue, Term};
    use quarry_vocab::rdf;

    fn parse_to_graph(input: &str) -> Result<Graph> {
        let mut sink = GraphCollectorSink::new();
        parse(input, &mut sink)?;
        Ok(sink.finish())
    }

    fn parse_to_graph_with(input: &str, options: ParserOptions) -> Result<Graph> {
        let mut sink = GraphCollectorSink::new();
        parse_with_options(input, &mut sink, options)?;
        Ok(sink.finish())
    }

    #[test]
    fn test_simple_triple() {
        let input = r#"<http://example.org/alice> <http://xmlns.com/foaf/0.1/name> "Alice" ."#;
        let graph = parse_to_graph(input).unwrap();

        assert_eq!(graph.len(), 1);
        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.s.as_iri(), Some("http://example.org/alice"));
        assert_eq!(triple.p.as_iri(), Some("http://xmlns.com/foaf/0.1/name"));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse_to_graph("").unwrap().len(), 0);
        assert_eq!(parse_to_graph("  # only a comment\n").unwrap().len(), 0);
    }

    #[test]
    fn test_prefix_directive() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            @prefix foaf: <http://xmlns.com/foaf/0.1/> .
            ex:alice foaf:name "Alice" .
        "#;
        let graph = parse_to_graph(input).unwrap();

        assert_eq!(graph.len(), 1);
        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.s.as_iri(), Some("http://example.org/alice"));
        assert_eq!(triple.p.as_iri(), Some("http://xmlns.com/foaf/0.1/name"));
        assert_eq!(
            graph.prefixes.get("ex"),
            Some(&"http://example.org/".to_string())
        );
    }

    #[test]
    fn test_empty_prefix() {
        let input = r#"
            @prefix : <http://example.org/> .
            :x :p :y .
        "#;
        let graph = parse_to_graph(input).unwrap();

        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.s.as_iri(), Some("http://example.org/x"));
        assert_eq!(triple.p.as_iri(), Some("http://example.org/p"));
        assert_eq!(triple.o.as_iri(), Some("http://example.org/y"));
    }

    #[test]
    fn test_prefix_redefinition_is_local() {
        let input = r#"
            @prefix p: <http://one.example/> .
            p:x p:p p:first .
            @prefix p: <http://two.example/> .
            p:x p:p p:second .
        "#;
        let graph = parse_to_graph(input).unwrap();
        let triples: Vec<_> = graph.iter().collect();

        assert_eq!(triples[0].o.as_iri(), Some("http://one.example/first"));
        assert_eq!(triples[1].o.as_iri(), Some("http://two.example/second"));
    }

    #[test]
    fn test_a_keyword() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:alice a ex:Person .
        "#;
        let graph = parse_to_graph(input).unwrap();

        assert_eq!(graph.len(), 1);
        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.p.as_iri(), Some(rdf::TYPE));
        assert!(triple.is_rdf_type());
    }

    #[test]
    fn test_semicolon_syntax() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:alice ex:name "Alice" ;
                     ex:age 30 .
        "#;
        let graph = parse_to_graph(input).unwrap();

        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_trailing_semicolon() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:alice ex:name "Alice" ; .
            ex:bob ex:name "Bob" ; ; .
        "#;
        let graph = parse_to_graph(input).unwrap();

        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_comma_syntax() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:alice ex:knows ex:bob, ex:charlie .
        "#;
        let graph = parse_to_graph(input).unwrap();

        assert_eq!(graph.len(), 2);
        // both triples share the predicate
        for triple in graph.iter() {
            assert_eq!(triple.p.as_iri(), Some("http://example.org/knows"));
        }
    }

    #[test]
    fn test_blank_node_label() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            _:b ex:name "Bob" .
            _:b ex:age 42 .
        "#;
        let graph = parse_to_graph(input).unwrap();

        assert_eq!(graph.len(), 2);
        let triples: Vec<_> = graph.iter().collect();
        // same user label, same minted node
        assert_eq!(triples[0].s, triples[1].s);
        assert!(triples[0].s.is_blank());
    }

    #[test]
    fn test_user_labels_never_leak() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            _:alice ex:knows _:bob .
        "#;
        let graph = parse_to_graph(input).unwrap();

        let triple = graph.iter().next().unwrap();
        let s = triple.s.as_blank().unwrap();
        let o = triple.o.as_blank().unwrap();
        assert_ne!(s.as_str(), "alice");
        assert_ne!(o.as_str(), "bob");
        assert_ne!(s, o);
    }

    #[test]
    fn test_anon_subject() {
        let input = r#"[] <http://example.org/p> <http://example.org/o> ."#;
        let graph = parse_to_graph(input).unwrap();

        assert_eq!(graph.len(), 1);
        assert!(graph.iter().next().unwrap().s.is_blank());
    }

    #[test]
    fn test_blank_node_property_list() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:alice ex:knows [ ex:name "Bob" ] .
        "#;
        let graph = parse_to_graph(input).unwrap();

        assert_eq!(graph.len(), 2);
        let triples: Vec<_> = graph.iter().collect();
        // the nested node's triple is emitted before the enclosing one
        assert!(triples[0].s.is_blank());
        assert_eq!(triples[1].s.as_iri(), Some("http://example.org/alice"));
        assert_eq!(triples[1].o, triples[0].s);
    }

    #[test]
    fn test_property_list_as_subject() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            [ ex:name "Bob" ] ex:age 42 .
        "#;
        let graph = parse_to_graph(input).unwrap();

        assert_eq!(graph.len(), 2);
        let triples: Vec<_> = graph.iter().collect();
        assert_eq!(triples[0].s, triples[1].s);
    }

    #[test]
    fn test_bare_property_list_statement() {
        let input = r#"[ <http://example.org/p> "v" ] ."#;
        let graph = parse_to_graph(input).unwrap();
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_typed_literal() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
            ex:alice ex:birthdate "2000-01-01"^^xsd:date .
        "#;
        let graph = parse_to_graph(input).unwrap();

        let triple = graph.iter().next().unwrap();
        let (_, datatype, _) = triple.o.as_literal().unwrap();
        assert_eq!(datatype.as_iri(), "http://www.w3.org/2001/XMLSchema#date");
    }

    #[test]
    fn test_language_tagged_literal() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:alice ex:name "Alice"@en-US .
        "#;
        let graph = parse_to_graph(input).unwrap();

        let triple = graph.iter().next().unwrap();
        let (value, datatype, language) = triple.o.as_literal().unwrap();
        assert_eq!(value.as_str(), Some("Alice"));
        assert!(datatype.is_lang_string());
        assert_eq!(language, Some("en-US"));
    }

    #[test]
    fn test_integer_literal() {
        let input = r#"<http://ex/s> <http://ex/p> 42 ."#;
        let graph = parse_to_graph(input).unwrap();

        let triple = graph.iter().next().unwrap();
        let (value, datatype, _) = triple.o.as_literal().unwrap();
        assert_eq!(value.as_str(), Some("42"));
        assert_eq!(
            datatype.as_iri(),
            "http://www.w3.org/2001/XMLSchema#integer"
        );
    }

    #[test]
    fn test_decimal_and_double_literals() {
        let input = r#"<http://ex/s> <http://ex/p> 3.14, 1e10 ."#;
        let graph = parse_to_graph(input).unwrap();

        let datatypes: Vec<String> = graph
            .iter()
            .map(|t| t.o.as_literal().unwrap().1.as_iri().to_string())
            .collect();
        assert_eq!(
            datatypes,
            vec![
                "http://www.w3.org/2001/XMLSchema#decimal".to_string(),
                "http://www.w3.org/2001/XMLSchema#double".to_string(),
            ]
        );
    }

    #[test]
    fn test_boolean_literal() {
        let input = r#"<http://ex/s> <http://ex/p> true, false ."#;
        let graph = parse_to_graph(input).unwrap();

        let values: Vec<Option<bool>> = graph
            .iter()
            .map(|t| t.o.as_literal().unwrap().0.as_bool())
            .collect();
        assert_eq!(values, vec![Some(true), Some(false)]);
    }

    #[test]
    fn test_collection() {
        let input = r#"<http://ex/s> <http://ex/p> ( 1 2 ) ."#;
        let graph = parse_to_graph(input).unwrap();

        // four list-structure triples plus the outer triple
        assert_eq!(graph.len(), 5);
        let triples: Vec<_> = graph.iter().collect();

        let firsts: Vec<_> = triples
            .iter()
            .filter(|t| t.p.as_iri() == Some(rdf::FIRST))
            .collect();
        let rests: Vec<_> = triples
            .iter()
            .filter(|t| t.p.as_iri() == Some(rdf::REST))
            .collect();
        assert_eq!(firsts.len(), 2);
        assert_eq!(rests.len(), 2);

        // exactly one rdf:nil tail
        let nils = triples
            .iter()
            .filter(|t| t.o.as_iri() == Some(rdf::NIL))
            .count();
        assert_eq!(nils, 1);

        // the chain is emitted tail-first; the outer triple comes last and
        // points at the head node, which is the subject emitted just before it
        let outer = triples.last().unwrap();
        assert_eq!(outer.s.as_iri(), Some("http://ex/s"));
        assert_eq!(outer.o, triples[3].s);
        assert_eq!(triples[3].o, triples[0].s); // head's rdf:rest links the tail
    }

    #[test]
    fn test_empty_collection() {
        let input = r#"<http://ex/s> <http://ex/p> () ."#;
        let graph = parse_to_graph(input).unwrap();

        // no list triples, the object is rdf:nil itself
        assert_eq!(graph.len(), 1);
        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.o.as_iri(), Some(rdf::NIL));
    }

    #[test]
    fn test_collection_as_subject() {
        let input = r#"( 1 ) <http://ex/p> <http://ex/o> ."#;
        let graph = parse_to_graph(input).unwrap();

        assert_eq!(graph.len(), 3);
        let triples: Vec<_> = graph.iter().collect();
        // list structure first, outer triple last, same head node
        assert_eq!(triples[2].s, triples[0].s);
    }

    #[test]
    fn test_no_forward_blank_node_references() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:s ex:p [ ex:q [ ex:r "deep" ] ], ( 1 2 ) .
        "#;
        let graph = parse_to_graph(input).unwrap();

        let mut seen_subjects = Vec::new();
        for triple in graph.iter() {
            if let Term::BlankNode(object) = &triple.o {
                assert!(
                    seen_subjects.contains(&object),
                    "forward reference to {object}"
                );
            }
            if let Term::BlankNode(subject) = &triple.s {
                if !seen_subjects.contains(&subject) {
                    seen_subjects.push(subject);
                }
            }
        }
    }

    #[test]
    fn test_sparql_prefix_syntax() {
        let input = r#"
            PREFIX ex: <http://example.org/>
            ex:alice ex:name "Alice" .
        "#;
        let graph = parse_to_graph(input).unwrap();

        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_sparql_base_syntax() {
        let input = r#"
            BASE <http://example.org/>
            <alice> <name> "Alice" .
        "#;
        let graph = parse_to_graph(input).unwrap();

        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.s.as_iri(), Some("http://example.org/alice"));
    }

    #[test]
    fn test_base_iri_resolution() {
        let input = r#"
            @base <http://example.org/path/> .
            <alice> <name> "Alice" .
            <../bob> <name> "Bob" .
        "#;
        let graph = parse_to_graph(input).unwrap();
        let triples: Vec<_> = graph.iter().collect();

        assert_eq!(triples[0].s.as_iri(), Some("http://example.org/path/alice"));
        assert_eq!(triples[0].p.as_iri(), Some("http://example.org/path/name"));
        assert_eq!(triples[1].s.as_iri(), Some("http://example.org/bob"));
    }

    #[test]
    fn test_relative_base_resolves_against_previous() {
        let input = r#"
            @base <http://example.org/a/> .
            @base <b/> .
            <c> <p> "v" .
        "#;
        let graph = parse_to_graph(input).unwrap();

        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.s.as_iri(), Some("http://example.org/a/b/c"));
    }

    #[test]
    fn test_empty_iri_resolves_to_base() {
        let input = r#"
            @base <http://example.org/doc> .
            <> <name> "The Document" .
        "#;
        let graph = parse_to_graph(input).unwrap();

        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.s.as_iri(), Some("http://example.org/doc"));
    }

    #[test]
    fn test_base_uri_option() {
        let options = ParserOptions {
            base_uri: Some("http://x/".to_string()),
            ..Default::default()
        };
        let graph = parse_to_graph_with(r#"<a> <b> "x"@en-US ."#, options).unwrap();

        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.s.as_iri(), Some("http://x/a"));
        assert_eq!(triple.p.as_iri(), Some("http://x/b"));
        let (_, _, language) = triple.o.as_literal().unwrap();
        assert_eq!(language, Some("en-US"));
    }

    #[test]
    fn test_seeded_prefixes_option() {
        let options = ParserOptions {
            prefixes: vec![("ex".to_string(), "http://seeded.example/".to_string())],
            ..Default::default()
        };
        let graph = parse_to_graph_with("ex:s ex:p ex:o .", options).unwrap();

        let triple = graph.iter().next().unwrap();
        assert_eq!(triple.s.as_iri(), Some("http://seeded.example/s"));
    }

    #[test]
    fn test_canonicalize_option() {
        let options = ParserOptions {
            canonicalize: true,
            ..Default::default()
        };
        let input = r#"<http://ex/s> <http://ex/p> +042, 03.140, 0.00123e5 ."#;
        let graph = parse_to_graph_with(input, options).unwrap();

        let lexicals: Vec<String> = graph
            .iter()
            .map(|t| t.o.as_literal().unwrap().0.lexical())
            .collect();
        assert_eq!(lexicals, vec!["42", "3.14", "1.23E2"]);
    }

    #[test]
    fn test_canonicalize_keeps_native_integer() {
        let options = ParserOptions {
            canonicalize: true,
            ..Default::default()
        };
        let graph = parse_to_graph_with(r#"<http://ex/s> <http://ex/p> 30 ."#, options).unwrap();

        let triple = graph.iter().next().unwrap();
        assert_eq!(
            triple.o.as_literal().unwrap().0,
            &LiteralValue::Integer(30)
        );
    }

    #[test]
    fn test_validate_rejects_overlong_subtag() {
        let options = ParserOptions {
            validate: true,
            ..Default::default()
        };
        let input = r#"<http://ex/s> <http://ex/p> "x"@en-verylongsubtag ."#;
        let mut sink = GraphCollectorSink::new();
        let err = parse_with_options(input, &mut sink, options).unwrap_err();
        assert!(matches!(err, TurtleError::Lex { .. }));

        // accepted without validate
        assert!(parse_to_graph(input).is_ok());
    }

    #[test]
    fn test_undefined_prefix() {
        let err = parse_to_graph("ex:x <http://ex/p> <http://ex/o> .").unwrap_err();
        match err {
            TurtleError::UndefinedPrefix { prefix, line } => {
                assert_eq!(prefix, "ex");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_undefined_empty_prefix_is_an_error() {
        // an unbound empty prefix is never a synonym for the base
        let err = parse_to_graph("@base <http://ex/> . :x <http://ex/p> :y .").unwrap_err();
        assert!(matches!(
            err,
            TurtleError::UndefinedPrefix { prefix, .. } if prefix.is_empty()
        ));
    }

    #[test]
    fn test_missing_statement_terminator() {
        let err = parse_to_graph(r#"<http://ex/s> <http://ex/p> "x" "#).unwrap_err();
        match err {
            TurtleError::Parse { expected, found, .. } => {
                assert!(expected.contains("`.`"), "expected list: {expected}");
                assert_eq!(found, "end of input");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_no_partial_statement_on_error() {
        // the failing statement contributes no top-level triples
        let input = r#"
            @prefix ex: <http://ex/> .
            ex:a ex:p "complete" .
            ex:b ex:q "dangling"
        "#;
        let mut sink = GraphCollectorSink::new();
        assert!(parse(input, &mut sink).is_err());
        let graph = sink.finish();

        assert_eq!(graph.len(), 1);
        assert_eq!(
            graph.iter().next().unwrap().s.as_iri(),
            Some("http://ex/a")
        );
    }

    #[test]
    fn test_relative_iri_without_base() {
        let err = parse_to_graph("<rel> <http://ex/p> <http://ex/o> .").unwrap_err();
        assert!(matches!(err, TurtleError::IriResolution { .. }));
    }

    #[test]
    fn test_parse_error_reports_line() {
        let input = "<http://ex/s>\n<http://ex/p>\n;\n.";
        let err = parse_to_graph(input).unwrap_err();
        match err {
            TurtleError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_directive_statements_allowed_anywhere() {
        let input = r#"
            <http://ex/s> <http://ex/p> <http://ex/o> .
            @prefix ex: <http://ex/> .
            ex:s2 ex:p2 ex:o2 .
        "#;
        assert_eq!(parse_to_graph(input).unwrap().len(), 2);
    }

    #[test]
    fn test_long_string_spanning_lines() {
        let input = "<http://ex/s> <http://ex/p> \"\"\"line one\nline two\"\"\" .";
        let graph = parse_to_graph(input).unwrap();

        let triple = graph.iter().next().unwrap();
        let (value, _, _) = triple.o.as_literal().unwrap();
        assert_eq!(value.as_str(), Some("line one\nline two"));
    }
}
