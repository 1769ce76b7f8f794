//! Semantic actions and parse state.
//!
//! Actions pop their inputs from the value stack and push exactly one result,
//! so every completed symbol contributes one value and arities stay static
//! per production. Statement-level triples are buffered in the semantic value
//! and flushed when the terminating `.` is consumed; nested property lists
//! and collections emit their structural triples when their closing delimiter
//! completes. A streaming consumer therefore never sees a reference to a
//! blank node it has not already seen as a subject.

use std::sync::Arc;

use quarry_graph_ir::{Datatype, GraphSink, LiteralValue, TermId};
use quarry_vocab::rdf;
use rustc_hash::FxHashMap;

use crate::error::{Result, TurtleError};
use crate::grammar::{Action, Production};
use crate::iri;
use crate::lex::{Token, TokenKind};
use crate::parser::{canonical, ParserOptions};

/// Semantic values held on the value stack.
#[derive(Debug)]
pub(crate) enum Value {
    /// A consumed terminal
    Token(Token),
    /// A resolved absolute IRI, not yet registered with the sink
    Iri(String),
    /// A term handle from the sink
    Term(TermId),
    /// An object list (or collection item list), in document order
    Terms(Vec<TermId>),
    /// A predicate-object list: (predicate, objects) pairs in document order
    Pairs(Vec<(TermId, Vec<TermId>)>),
    /// The optional language/datatype suffix of an RDF literal
    Suffix(LiteralSuffix),
    /// A complete statement, buffered until its `.` is consumed
    Statement {
        subject: TermId,
        pairs: Vec<(TermId, Vec<TermId>)>,
    },
    /// No semantic content (directives, completed statements)
    Unit,
}

#[derive(Debug)]
pub(crate) enum LiteralSuffix {
    None,
    Lang(Arc<str>),
    Datatype(String),
}

/// Mutable state owned by exactly one document parse.
pub(crate) struct ParseState {
    options: ParserOptions,
    /// Current base IRI for relative reference resolution
    base: Option<String>,
    /// Prefix -> namespace IRI; redefinition replaces
    prefixes: FxHashMap<String, String>,
    /// User-written blank node label -> minted term, scoped to this parse
    bnode_map: FxHashMap<String, TermId>,
    /// Mint counter for anonymous and labeled blank nodes
    anon_counter: u64,
    /// Per-parse cache: expanded IRI -> sink term
    iri_term_cache: FxHashMap<Arc<str>, TermId>,
    pub(crate) iri_cache_hits: u64,
    pub(crate) iri_cache_misses: u64,
    /// Lazily cached well-known RDF terms
    rdf_type_term: Option<TermId>,
    rdf_first_term: Option<TermId>,
    rdf_rest_term: Option<TermId>,
    rdf_nil_term: Option<TermId>,
    pub(crate) statement_count: u64,
    pub(crate) triple_count: u64,
}

impl ParseState {
    pub(crate) fn new(options: ParserOptions) -> Self {
        let base = options.base_uri.clone().filter(|b| !b.is_empty());
        let mut prefixes = FxHashMap::default();
        for (prefix, namespace) in &options.prefixes {
            prefixes.insert(prefix.clone(), namespace.clone());
        }

        Self {
            options,
            base,
            prefixes,
            bnode_map: FxHashMap::default(),
            anon_counter: 0,
            iri_term_cache: FxHashMap::default(),
            iri_cache_hits: 0,
            iri_cache_misses: 0,
            rdf_type_term: None,
            rdf_first_term: None,
            rdf_rest_term: None,
            rdf_nil_term: None,
            statement_count: 0,
            triple_count: 0,
        }
    }

    /// Resolve a reference against the current base (RFC 3986 §5.3).
    fn resolve_iri(&self, reference: &str, line: u32) -> Result<String> {
        iri::resolve(self.base.as_deref(), reference).ok_or_else(|| TurtleError::IriResolution {
            reference: reference.to_string(),
            base: self.base.clone().unwrap_or_default(),
            line,
        })
    }

    /// Register an IRI with the sink, caching repeats.
    fn term_iri<S: GraphSink>(&mut self, sink: &mut S, iri: &str) -> TermId {
        if let Some(&id) = self.iri_term_cache.get(iri) {
            self.iri_cache_hits += 1;
            return id;
        }
        self.iri_cache_misses += 1;
        let id = sink.term_iri(iri);
        self.iri_term_cache.insert(Arc::<str>::from(iri), id);
        id
    }

    /// Mint a fresh blank node. User-written labels never reach the sink;
    /// every emitted blank node carries a parser-minted label.
    fn mint_blank<S: GraphSink>(&mut self, sink: &mut S) -> TermId {
        self.anon_counter += 1;
        let label = format!("b{}", self.anon_counter);
        sink.term_blank(Some(&label))
    }

    fn emit<S: GraphSink>(&mut self, sink: &mut S, s: TermId, p: TermId, o: TermId) {
        sink.emit_triple(s, p, o);
        self.triple_count += 1;
    }

    fn rdf_type<S: GraphSink>(&mut self, sink: &mut S) -> TermId {
        if let Some(id) = self.rdf_type_term {
            return id;
        }
        let id = self.term_iri(sink, rdf::TYPE);
        self.rdf_type_term = Some(id);
        id
    }

    fn rdf_first<S: GraphSink>(&mut self, sink: &mut S) -> TermId {
        if let Some(id) = self.rdf_first_term {
            return id;
        }
        let id = self.term_iri(sink, rdf::FIRST);
        self.rdf_first_term = Some(id);
        id
    }

    fn rdf_rest<S: GraphSink>(&mut self, sink: &mut S) -> TermId {
        if let Some(id) = self.rdf_rest_term {
            return id;
        }
        let id = self.term_iri(sink, rdf::REST);
        self.rdf_rest_term = Some(id);
        id
    }

    fn rdf_nil<S: GraphSink>(&mut self, sink: &mut S) -> TermId {
        if let Some(id) = self.rdf_nil_term {
            return id;
        }
        let id = self.term_iri(sink, rdf::NIL);
        self.rdf_nil_term = Some(id);
        id
    }
}

// =============================================================================
// Value stack access
// =============================================================================
//
// A wrong variant here means the parse table and the actions disagree about
// a production's value layout; that is a bug, not an input error.

fn layout_error(expected: &str) -> TurtleError {
    TurtleError::internal(format!("value stack layout: expected {expected}"))
}

fn pop_value(values: &mut Vec<Value>) -> Result<Value> {
    values
        .pop()
        .ok_or_else(|| TurtleError::internal("value stack underflow"))
}

fn pop_token(values: &mut Vec<Value>) -> Result<Token> {
    match pop_value(values)? {
        Value::Token(token) => Ok(token),
        _ => Err(layout_error("token")),
    }
}

fn pop_term(values: &mut Vec<Value>) -> Result<TermId> {
    match pop_value(values)? {
        Value::Term(id) => Ok(id),
        _ => Err(layout_error("term")),
    }
}

fn pop_terms(values: &mut Vec<Value>) -> Result<Vec<TermId>> {
    match pop_value(values)? {
        Value::Terms(terms) => Ok(terms),
        _ => Err(layout_error("term list")),
    }
}

fn pop_pairs(values: &mut Vec<Value>) -> Result<Vec<(TermId, Vec<TermId>)>> {
    match pop_value(values)? {
        Value::Pairs(pairs) => Ok(pairs),
        _ => Err(layout_error("predicate-object pairs")),
    }
}

fn pop_iri(values: &mut Vec<Value>) -> Result<String> {
    match pop_value(values)? {
        Value::Iri(iri) => Ok(iri),
        _ => Err(layout_error("resolved IRI")),
    }
}

fn pop_suffix(values: &mut Vec<Value>) -> Result<LiteralSuffix> {
    match pop_value(values)? {
        Value::Suffix(suffix) => Ok(suffix),
        _ => Err(layout_error("literal suffix")),
    }
}

fn pop_statement(values: &mut Vec<Value>) -> Result<(TermId, Vec<(TermId, Vec<TermId>)>)> {
    match pop_value(values)? {
        Value::Statement { subject, pairs } => Ok((subject, pairs)),
        _ => Err(layout_error("statement")),
    }
}

// =============================================================================
// Action dispatch
// =============================================================================

/// Run the semantic action of a completed production.
pub(crate) fn apply<S: GraphSink>(
    production: &Production,
    state: &mut ParseState,
    values: &mut Vec<Value>,
    sink: &mut S,
) -> Result<()> {
    match production.action {
        // the single popped value is pushed back unchanged
        Action::Passthrough => {}

        Action::DocStep => {
            pop_value(values)?;
            pop_value(values)?;
            values.push(Value::Unit);
        }

        Action::StatementDirective => {
            pop_value(values)?;
            state.statement_count += 1;
            values.push(Value::Unit);
        }

        Action::StatementTriples => {
            pop_token(values)?; // '.'
            let (subject, pairs) = pop_statement(values)?;
            for (predicate, objects) in pairs {
                for object in objects {
                    state.emit(sink, subject, predicate, object);
                }
            }
            state.statement_count += 1;
            values.push(Value::Unit);
        }

        Action::BindPrefix => {
            if production.rhs.len() == 4 {
                pop_token(values)?; // '.' (only the @prefix form)
            }
            let iri_token = pop_token(values)?;
            let ns_token = pop_token(values)?;
            pop_token(values)?; // keyword
            let prefix = match ns_token.kind {
                TokenKind::PrefixedNameNs(prefix) => prefix,
                _ => return Err(layout_error("prefix namespace")),
            };
            let reference = match iri_token.kind {
                TokenKind::Iri(iri) => iri,
                _ => return Err(layout_error("namespace IRI")),
            };
            let namespace = state.resolve_iri(&reference, iri_token.line)?;
            sink.on_prefix(&prefix, &namespace);
            state.prefixes.insert(prefix.to_string(), namespace);
            values.push(Value::Unit);
        }

        Action::SetBase => {
            if production.rhs.len() == 3 {
                pop_token(values)?; // '.' (only the @base form)
            }
            let iri_token = pop_token(values)?;
            pop_token(values)?; // keyword
            let reference = match iri_token.kind {
                TokenKind::Iri(iri) => iri,
                _ => return Err(layout_error("base IRI")),
            };
            // a relative base resolves against the previous base
            let resolved = state.resolve_iri(&reference, iri_token.line)?;
            sink.on_base(&resolved);
            state.base = Some(resolved);
            values.push(Value::Unit);
        }

        Action::TriplesFromSubject | Action::TriplesFromPropertyList => {
            let pairs = pop_pairs(values)?;
            let subject = pop_term(values)?;
            values.push(Value::Statement { subject, pairs });
        }

        Action::PairsCons => {
            let tail = pop_pairs(values)?;
            let objects = pop_terms(values)?;
            let predicate = pop_term(values)?;
            let mut pairs = Vec::with_capacity(tail.len() + 1);
            pairs.push((predicate, objects));
            pairs.extend(tail);
            values.push(Value::Pairs(pairs));
        }

        Action::TailAfterSemicolon => {
            let pairs = pop_pairs(values)?;
            pop_token(values)?; // ';'
            values.push(Value::Pairs(pairs));
        }

        Action::TermsCons => {
            let tail = pop_terms(values)?;
            let object = pop_term(values)?;
            values.push(Value::Terms(cons(object, tail)));
        }

        Action::TermsConsAfterComma => {
            let tail = pop_terms(values)?;
            let object = pop_term(values)?;
            pop_token(values)?; // ','
            values.push(Value::Terms(cons(object, tail)));
        }

        Action::VerbA => {
            pop_token(values)?;
            let id = state.rdf_type(sink);
            values.push(Value::Term(id));
        }

        Action::TermFromIri => {
            let iri = pop_iri(values)?;
            let id = state.term_iri(sink, &iri);
            values.push(Value::Term(id));
        }

        Action::CollectionBuild => {
            pop_token(values)?; // ')'
            let items = pop_terms(values)?;
            pop_token(values)?; // '('
            if items.is_empty() {
                let nil = state.rdf_nil(sink);
                values.push(Value::Term(nil));
            } else {
                let first = state.rdf_first(sink);
                let rest = state.rdf_rest(sink);
                let nil = state.rdf_nil(sink);
                let nodes: Vec<TermId> = items.iter().map(|_| state.mint_blank(sink)).collect();
                // tail-first, so every rdf:rest target is already a subject
                for i in (0..nodes.len()).rev() {
                    state.emit(sink, nodes[i], first, items[i]);
                    let next = if i + 1 < nodes.len() { nodes[i + 1] } else { nil };
                    state.emit(sink, nodes[i], rest, next);
                }
                values.push(Value::Term(nodes[0]));
            }
        }

        Action::CollectionNil => {
            pop_token(values)?;
            let nil = state.rdf_nil(sink);
            values.push(Value::Term(nil));
        }

        Action::PropertyListBuild => {
            pop_token(values)?; // ']'
            let pairs = pop_pairs(values)?;
            pop_token(values)?; // '['
            let node = state.mint_blank(sink);
            for (predicate, objects) in pairs {
                for object in objects {
                    state.emit(sink, node, predicate, object);
                }
            }
            values.push(Value::Term(node));
        }

        Action::LiteralInteger => {
            let token = pop_token(values)?;
            let lexeme = match token.kind {
                TokenKind::Integer(lexeme) => lexeme,
                _ => return Err(layout_error("integer lexeme")),
            };
            let id = if state.options.canonicalize {
                match lexeme.parse::<i64>() {
                    Ok(n) => sink.term_literal_value(LiteralValue::Integer(n), Datatype::xsd_integer()),
                    // beyond i64: canonicalize the lexical form instead
                    Err(_) => sink.term_literal(
                        &canonical::integer(&lexeme),
                        Datatype::xsd_integer(),
                        None,
                    ),
                }
            } else {
                sink.term_literal(&lexeme, Datatype::xsd_integer(), None)
            };
            values.push(Value::Term(id));
        }

        Action::LiteralDecimal => {
            let token = pop_token(values)?;
            let lexeme = match token.kind {
                TokenKind::Decimal(lexeme) => lexeme,
                _ => return Err(layout_error("decimal lexeme")),
            };
            let id = if state.options.canonicalize {
                sink.term_literal(&canonical::decimal(&lexeme), Datatype::xsd_decimal(), None)
            } else {
                sink.term_literal(&lexeme, Datatype::xsd_decimal(), None)
            };
            values.push(Value::Term(id));
        }

        Action::LiteralDouble => {
            let token = pop_token(values)?;
            let lexeme = match token.kind {
                TokenKind::Double(lexeme) => lexeme,
                _ => return Err(layout_error("double lexeme")),
            };
            let id = if state.options.canonicalize {
                sink.term_literal(&canonical::double(&lexeme), Datatype::xsd_double(), None)
            } else {
                sink.term_literal(&lexeme, Datatype::xsd_double(), None)
            };
            values.push(Value::Term(id));
        }

        Action::LiteralBoolean => {
            let token = pop_token(values)?;
            let value = matches!(token.kind, TokenKind::KwTrue);
            let id = sink.term_literal_value(LiteralValue::Boolean(value), Datatype::xsd_boolean());
            values.push(Value::Term(id));
        }

        Action::RdfLiteralBuild => {
            let suffix = pop_suffix(values)?;
            let token = pop_token(values)?;
            let value = match token.kind {
                TokenKind::String { value, .. } => value,
                _ => return Err(layout_error("string body")),
            };
            let id = match suffix {
                LiteralSuffix::None => sink.term_literal(&value, Datatype::xsd_string(), None),
                LiteralSuffix::Lang(tag) => {
                    sink.term_literal(&value, Datatype::rdf_lang_string(), Some(&tag))
                }
                LiteralSuffix::Datatype(datatype) => {
                    sink.term_literal(&value, Datatype::from_iri(&datatype), None)
                }
            };
            values.push(Value::Term(id));
        }

        Action::SuffixLang => {
            let token = pop_token(values)?;
            let tag = match token.kind {
                TokenKind::LangTag(tag) => tag,
                _ => return Err(layout_error("language tag")),
            };
            if state.options.validate && !subtags_well_formed(&tag) {
                return Err(TurtleError::lex(format!("@{tag}"), token.line, token.start));
            }
            values.push(Value::Suffix(LiteralSuffix::Lang(tag)));
        }

        Action::SuffixDatatype => {
            let datatype = pop_iri(values)?;
            pop_token(values)?; // '^^'
            values.push(Value::Suffix(LiteralSuffix::Datatype(datatype)));
        }

        Action::IriFromRef => {
            let token = pop_token(values)?;
            let reference = match token.kind {
                TokenKind::Iri(iri) => iri,
                _ => return Err(layout_error("IRI reference")),
            };
            let resolved = state.resolve_iri(&reference, token.line)?;
            values.push(Value::Iri(resolved));
        }

        Action::IriFromPrefixed => {
            let token = pop_token(values)?;
            let (prefix, local) = match &token.kind {
                TokenKind::PrefixedName { prefix, local } => (prefix.clone(), Some(local.clone())),
                TokenKind::PrefixedNameNs(prefix) => (prefix.clone(), None),
                _ => return Err(layout_error("prefixed name")),
            };
            let namespace =
                state
                    .prefixes
                    .get(prefix.as_ref())
                    .ok_or_else(|| TurtleError::UndefinedPrefix {
                        prefix: prefix.to_string(),
                        line: token.line,
                    })?;
            // local part concatenated without further escaping
            let expanded = match local {
                Some(local) => format!("{namespace}{local}"),
                None => namespace.clone(),
            };
            values.push(Value::Iri(expanded));
        }

        Action::BlankFromLabel => {
            let token = pop_token(values)?;
            let label = match token.kind {
                TokenKind::BlankNodeLabel(label) => label,
                _ => return Err(layout_error("blank node label")),
            };
            let id = match state.bnode_map.get(label.as_ref()) {
                Some(&id) => id,
                None => {
                    let id = state.mint_blank(sink);
                    state.bnode_map.insert(label.to_string(), id);
                    id
                }
            };
            values.push(Value::Term(id));
        }

        Action::BlankAnon => {
            pop_token(values)?;
            let id = state.mint_blank(sink);
            values.push(Value::Term(id));
        }

        Action::EmptyUnit | Action::EmptyPairs | Action::EmptyTerms | Action::EmptySuffix => {
            return Err(TurtleError::internal(format!(
                "empty action {:?} reached through a production",
                production.action
            )));
        }
    }
    Ok(())
}

/// Run the empty action of a nullable non-terminal consumed via its FOLLOW set.
pub(crate) fn apply_empty(action: Action, values: &mut Vec<Value>) -> Result<()> {
    match action {
        Action::EmptyUnit => values.push(Value::Unit),
        Action::EmptyPairs => values.push(Value::Pairs(Vec::new())),
        Action::EmptyTerms => values.push(Value::Terms(Vec::new())),
        Action::EmptySuffix => values.push(Value::Suffix(LiteralSuffix::None)),
        other => {
            return Err(TurtleError::internal(format!(
                "{other:?} is not an empty action"
            )))
        }
    }
    Ok(())
}

fn cons(head: TermId, tail: Vec<TermId>) -> Vec<TermId> {
    let mut list = Vec::with_capacity(tail.len() + 1);
    list.push(head);
    list.extend(tail);
    list
}

/// BCP 47 shape check applied under `validate`: every subtag 1..=8 chars.
fn subtags_well_formed(tag: &str) -> bool {
    tag.split('-').all(|subtag| (1..=8).contains(&subtag.len()))
}
