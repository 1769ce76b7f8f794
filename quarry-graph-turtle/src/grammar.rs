//! LL(1) parse table for the Turtle grammar.
//!
//! This module is the static artifact the driver consumes: the terminal
//! alphabet, the non-terminals of the left-factored Turtle grammar, the
//! numbered productions with their semantic-action identifiers, the
//! `(non_terminal, lookahead) -> production` table, and the FOLLOW sets used
//! to resolve nullable non-terminals.
//!
//! The table is stored sparsely as FIRST-set entries and expanded into a
//! dense 2-D array on first use. Epsilon productions are not in the table:
//! when a lookup misses and the non-terminal is nullable with the lookahead
//! in its FOLLOW set, the driver consumes the non-terminal as empty and runs
//! its empty action (see `empty_action`).

use crate::lex::TokenKind;
use std::sync::OnceLock;

/// Terminal classes, one per token kind.
///
/// The four string quoting styles share one terminal class; the style only
/// matters to the lexer's consumers, not to the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Terminal {
    IriRef,
    PNameLn,
    PNameNs,
    BlankNodeLabel,
    LangTag,
    Integer,
    Decimal,
    Double,
    String,
    True,
    False,
    PrefixKw,
    BaseKw,
    SparqlPrefixKw,
    SparqlBaseKw,
    A,
    Nil,
    Anon,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Dot,
    Comma,
    Semicolon,
    DoubleCaret,
    Eof,
}

impl Terminal {
    pub(crate) const COUNT: usize = 27;

    /// Classify a token for table lookup.
    pub(crate) fn of(kind: &TokenKind) -> Terminal {
        match kind {
            TokenKind::Iri(_) => Terminal::IriRef,
            TokenKind::PrefixedName { .. } => Terminal::PNameLn,
            TokenKind::PrefixedNameNs(_) => Terminal::PNameNs,
            TokenKind::BlankNodeLabel(_) => Terminal::BlankNodeLabel,
            TokenKind::LangTag(_) => Terminal::LangTag,
            TokenKind::Integer(_) => Terminal::Integer,
            TokenKind::Decimal(_) => Terminal::Decimal,
            TokenKind::Double(_) => Terminal::Double,
            TokenKind::String { .. } => Terminal::String,
            TokenKind::KwTrue => Terminal::True,
            TokenKind::KwFalse => Terminal::False,
            TokenKind::KwPrefix => Terminal::PrefixKw,
            TokenKind::KwBase => Terminal::BaseKw,
            TokenKind::KwSparqlPrefix => Terminal::SparqlPrefixKw,
            TokenKind::KwSparqlBase => Terminal::SparqlBaseKw,
            TokenKind::KwA => Terminal::A,
            TokenKind::Nil => Terminal::Nil,
            TokenKind::Anon => Terminal::Anon,
            TokenKind::LBracket => Terminal::LBracket,
            TokenKind::RBracket => Terminal::RBracket,
            TokenKind::LParen => Terminal::LParen,
            TokenKind::RParen => Terminal::RParen,
            TokenKind::Dot => Terminal::Dot,
            TokenKind::Comma => Terminal::Comma,
            TokenKind::Semicolon => Terminal::Semicolon,
            TokenKind::DoubleCaret => Terminal::DoubleCaret,
            TokenKind::Eof => Terminal::Eof,
        }
    }

    /// Human-readable name for diagnostics.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Terminal::IriRef => "IRIREF",
            Terminal::PNameLn => "PNAME_LN",
            Terminal::PNameNs => "PNAME_NS",
            Terminal::BlankNodeLabel => "BLANK_NODE_LABEL",
            Terminal::LangTag => "LANGTAG",
            Terminal::Integer => "INTEGER",
            Terminal::Decimal => "DECIMAL",
            Terminal::Double => "DOUBLE",
            Terminal::String => "string literal",
            Terminal::True => "`true`",
            Terminal::False => "`false`",
            Terminal::PrefixKw => "`@prefix`",
            Terminal::BaseKw => "`@base`",
            Terminal::SparqlPrefixKw => "`PREFIX`",
            Terminal::SparqlBaseKw => "`BASE`",
            Terminal::A => "`a`",
            Terminal::Nil => "`()`",
            Terminal::Anon => "`[]`",
            Terminal::LBracket => "`[`",
            Terminal::RBracket => "`]`",
            Terminal::LParen => "`(`",
            Terminal::RParen => "`)`",
            Terminal::Dot => "`.`",
            Terminal::Comma => "`,`",
            Terminal::Semicolon => "`;`",
            Terminal::DoubleCaret => "`^^`",
            Terminal::Eof => "end of input",
        }
    }
}

/// Non-terminals of the left-factored grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NonTerminal {
    Doc,
    Statement,
    Directive,
    PrefixDecl,
    BaseDecl,
    SparqlPrefixDecl,
    SparqlBaseDecl,
    Triples,
    PredObjList,
    PredObjListOpt,
    PredObjTail,
    PredObjNext,
    ObjectList,
    ObjectTail,
    Verb,
    Subject,
    Object,
    Collection,
    ObjectSeq,
    PropertyList,
    Literal,
    RdfLiteral,
    LiteralSuffix,
    IriNode,
    BlankNode,
}

impl NonTerminal {
    pub(crate) const COUNT: usize = 25;
}

/// A grammar symbol: terminal or non-terminal.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Symbol {
    T(Terminal),
    N(NonTerminal),
}

/// Semantic action identifiers, dispatched per production by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// `doc -> statement doc`: discard both unit values
    DocStep,
    /// `statement -> directive`
    StatementDirective,
    /// `statement -> triples '.'`: flush the buffered statement to the sink
    StatementTriples,
    /// Unit production: the single popped value is pushed back unchanged
    Passthrough,
    /// `@prefix` / `PREFIX`: bind prefix to the base-resolved namespace
    BindPrefix,
    /// `@base` / `BASE`: resolve against the previous base and replace it
    SetBase,
    /// `triples -> subject predicateObjectList`
    TriplesFromSubject,
    /// `triples -> blankNodePropertyList predicateObjectList?`
    TriplesFromPropertyList,
    /// `verb objectList tail`: prepend the (predicate, objects) pair
    PairsCons,
    /// `';' predicateObjectNext`: unwrap past the semicolon
    TailAfterSemicolon,
    /// `object tail`: prepend the object
    TermsCons,
    /// `',' object tail`: prepend the object past the comma
    TermsConsAfterComma,
    /// `a` keyword: rdf:type
    VerbA,
    /// Convert a resolved IRI into a sink term
    TermFromIri,
    /// `'(' objectSeq ')'`: mint and emit the rdf:first/rest chain
    CollectionBuild,
    /// `()`: rdf:nil, no triples
    CollectionNil,
    /// `'[' predicateObjectList ']'`: mint the node, emit its triples
    PropertyListBuild,
    LiteralInteger,
    LiteralDecimal,
    LiteralDouble,
    LiteralBoolean,
    /// String body plus optional language/datatype suffix
    RdfLiteralBuild,
    SuffixLang,
    SuffixDatatype,
    /// IRIREF: resolve against the current base
    IriFromRef,
    /// PNAME_LN / PNAME_NS: expand via the prefix map
    IriFromPrefixed,
    BlankFromLabel,
    BlankAnon,
    // Empty (epsilon) actions, run when a nullable non-terminal is consumed
    // as empty via its FOLLOW set.
    EmptyUnit,
    EmptyPairs,
    EmptyTerms,
    EmptySuffix,
}

/// A numbered production: left-hand side, body, and semantic action.
#[derive(Debug)]
pub(crate) struct Production {
    pub lhs: NonTerminal,
    pub rhs: &'static [Symbol],
    pub action: Action,
}

use NonTerminal as N;
use Symbol::{N as n, T as t};
use Terminal as T;

/// The production inventory. Indices are the ids used by the parse table.
pub(crate) static PRODUCTIONS: &[Production] = &[
    // 0
    Production {
        lhs: N::Doc,
        rhs: &[n(N::Statement), n(N::Doc)],
        action: Action::DocStep,
    },
    // 1
    Production {
        lhs: N::Statement,
        rhs: &[n(N::Directive)],
        action: Action::StatementDirective,
    },
    // 2
    Production {
        lhs: N::Statement,
        rhs: &[n(N::Triples), t(T::Dot)],
        action: Action::StatementTriples,
    },
    // 3
    Production {
        lhs: N::Directive,
        rhs: &[n(N::PrefixDecl)],
        action: Action::Passthrough,
    },
    // 4
    Production {
        lhs: N::Directive,
        rhs: &[n(N::BaseDecl)],
        action: Action::Passthrough,
    },
    // 5
    Production {
        lhs: N::Directive,
        rhs: &[n(N::SparqlPrefixDecl)],
        action: Action::Passthrough,
    },
    // 6
    Production {
        lhs: N::Directive,
        rhs: &[n(N::SparqlBaseDecl)],
        action: Action::Passthrough,
    },
    // 7
    Production {
        lhs: N::PrefixDecl,
        rhs: &[t(T::PrefixKw), t(T::PNameNs), t(T::IriRef), t(T::Dot)],
        action: Action::BindPrefix,
    },
    // 8
    Production {
        lhs: N::BaseDecl,
        rhs: &[t(T::BaseKw), t(T::IriRef), t(T::Dot)],
        action: Action::SetBase,
    },
    // 9
    Production {
        lhs: N::SparqlPrefixDecl,
        rhs: &[t(T::SparqlPrefixKw), t(T::PNameNs), t(T::IriRef)],
        action: Action::BindPrefix,
    },
    // 10
    Production {
        lhs: N::SparqlBaseDecl,
        rhs: &[t(T::SparqlBaseKw), t(T::IriRef)],
        action: Action::SetBase,
    },
    // 11
    Production {
        lhs: N::Triples,
        rhs: &[n(N::Subject), n(N::PredObjList)],
        action: Action::TriplesFromSubject,
    },
    // 12
    Production {
        lhs: N::Triples,
        rhs: &[n(N::PropertyList), n(N::PredObjListOpt)],
        action: Action::TriplesFromPropertyList,
    },
    // 13
    Production {
        lhs: N::PredObjListOpt,
        rhs: &[n(N::PredObjList)],
        action: Action::Passthrough,
    },
    // 14
    Production {
        lhs: N::PredObjList,
        rhs: &[n(N::Verb), n(N::ObjectList), n(N::PredObjTail)],
        action: Action::PairsCons,
    },
    // 15
    Production {
        lhs: N::PredObjTail,
        rhs: &[t(T::Semicolon), n(N::PredObjNext)],
        action: Action::TailAfterSemicolon,
    },
    // 16
    Production {
        lhs: N::PredObjNext,
        rhs: &[n(N::Verb), n(N::ObjectList), n(N::PredObjTail)],
        action: Action::PairsCons,
    },
    // 17
    Production {
        lhs: N::PredObjNext,
        rhs: &[n(N::PredObjTail)],
        action: Action::Passthrough,
    },
    // 18
    Production {
        lhs: N::ObjectList,
        rhs: &[n(N::Object), n(N::ObjectTail)],
        action: Action::TermsCons,
    },
    // 19
    Production {
        lhs: N::ObjectTail,
        rhs: &[t(T::Comma), n(N::Object), n(N::ObjectTail)],
        action: Action::TermsConsAfterComma,
    },
    // 20
    Production {
        lhs: N::Verb,
        rhs: &[t(T::A)],
        action: Action::VerbA,
    },
    // 21
    Production {
        lhs: N::Verb,
        rhs: &[n(N::IriNode)],
        action: Action::TermFromIri,
    },
    // 22
    Production {
        lhs: N::Subject,
        rhs: &[n(N::IriNode)],
        action: Action::TermFromIri,
    },
    // 23
    Production {
        lhs: N::Subject,
        rhs: &[n(N::BlankNode)],
        action: Action::Passthrough,
    },
    // 24
    Production {
        lhs: N::Subject,
        rhs: &[n(N::Collection)],
        action: Action::Passthrough,
    },
    // 25
    Production {
        lhs: N::Object,
        rhs: &[n(N::IriNode)],
        action: Action::TermFromIri,
    },
    // 26
    Production {
        lhs: N::Object,
        rhs: &[n(N::BlankNode)],
        action: Action::Passthrough,
    },
    // 27
    Production {
        lhs: N::Object,
        rhs: &[n(N::Collection)],
        action: Action::Passthrough,
    },
    // 28
    Production {
        lhs: N::Object,
        rhs: &[n(N::PropertyList)],
        action: Action::Passthrough,
    },
    // 29
    Production {
        lhs: N::Object,
        rhs: &[n(N::Literal)],
        action: Action::Passthrough,
    },
    // 30
    Production {
        lhs: N::Collection,
        rhs: &[t(T::LParen), n(N::ObjectSeq), t(T::RParen)],
        action: Action::CollectionBuild,
    },
    // 31
    Production {
        lhs: N::Collection,
        rhs: &[t(T::Nil)],
        action: Action::CollectionNil,
    },
    // 32
    Production {
        lhs: N::ObjectSeq,
        rhs: &[n(N::Object), n(N::ObjectSeq)],
        action: Action::TermsCons,
    },
    // 33
    Production {
        lhs: N::PropertyList,
        rhs: &[t(T::LBracket), n(N::PredObjList), t(T::RBracket)],
        action: Action::PropertyListBuild,
    },
    // 34
    Production {
        lhs: N::Literal,
        rhs: &[n(N::RdfLiteral)],
        action: Action::Passthrough,
    },
    // 35
    Production {
        lhs: N::Literal,
        rhs: &[t(T::Integer)],
        action: Action::LiteralInteger,
    },
    // 36
    Production {
        lhs: N::Literal,
        rhs: &[t(T::Decimal)],
        action: Action::LiteralDecimal,
    },
    // 37
    Production {
        lhs: N::Literal,
        rhs: &[t(T::Double)],
        action: Action::LiteralDouble,
    },
    // 38
    Production {
        lhs: N::Literal,
        rhs: &[t(T::True)],
        action: Action::LiteralBoolean,
    },
    // 39
    Production {
        lhs: N::Literal,
        rhs: &[t(T::False)],
        action: Action::LiteralBoolean,
    },
    // 40
    Production {
        lhs: N::RdfLiteral,
        rhs: &[t(T::String), n(N::LiteralSuffix)],
        action: Action::RdfLiteralBuild,
    },
    // 41
    Production {
        lhs: N::LiteralSuffix,
        rhs: &[t(T::LangTag)],
        action: Action::SuffixLang,
    },
    // 42
    Production {
        lhs: N::LiteralSuffix,
        rhs: &[t(T::DoubleCaret), n(N::IriNode)],
        action: Action::SuffixDatatype,
    },
    // 43
    Production {
        lhs: N::IriNode,
        rhs: &[t(T::IriRef)],
        action: Action::IriFromRef,
    },
    // 44
    Production {
        lhs: N::IriNode,
        rhs: &[t(T::PNameLn)],
        action: Action::IriFromPrefixed,
    },
    // 45
    Production {
        lhs: N::IriNode,
        rhs: &[t(T::PNameNs)],
        action: Action::IriFromPrefixed,
    },
    // 46
    Production {
        lhs: N::BlankNode,
        rhs: &[t(T::BlankNodeLabel)],
        action: Action::BlankFromLabel,
    },
    // 47
    Production {
        lhs: N::BlankNode,
        rhs: &[t(T::Anon)],
        action: Action::BlankAnon,
    },
];

/// FIRST(statement): directive keywords plus everything that can begin triples.
const FIRST_STATEMENT: &[Terminal] = &[
    T::PrefixKw,
    T::BaseKw,
    T::SparqlPrefixKw,
    T::SparqlBaseKw,
    T::IriRef,
    T::PNameLn,
    T::PNameNs,
    T::BlankNodeLabel,
    T::Anon,
    T::LParen,
    T::Nil,
    T::LBracket,
];

/// FIRST(object): every terminal that can begin an object term.
const FIRST_OBJECT: &[Terminal] = &[
    T::IriRef,
    T::PNameLn,
    T::PNameNs,
    T::BlankNodeLabel,
    T::Anon,
    T::LParen,
    T::Nil,
    T::LBracket,
    T::String,
    T::Integer,
    T::Decimal,
    T::Double,
    T::True,
    T::False,
];

/// FIRST(verb)
const FIRST_VERB: &[Terminal] = &[T::A, T::IriRef, T::PNameLn, T::PNameNs];

/// Sparse table: (non-terminal, FIRST-set terminals, production id).
static TABLE_ENTRIES: &[(NonTerminal, &[Terminal], u8)] = &[
    (N::Doc, FIRST_STATEMENT, 0),
    (
        N::Statement,
        &[T::PrefixKw, T::BaseKw, T::SparqlPrefixKw, T::SparqlBaseKw],
        1,
    ),
    (
        N::Statement,
        &[
            T::IriRef,
            T::PNameLn,
            T::PNameNs,
            T::BlankNodeLabel,
            T::Anon,
            T::LParen,
            T::Nil,
            T::LBracket,
        ],
        2,
    ),
    (N::Directive, &[T::PrefixKw], 3),
    (N::Directive, &[T::BaseKw], 4),
    (N::Directive, &[T::SparqlPrefixKw], 5),
    (N::Directive, &[T::SparqlBaseKw], 6),
    (N::PrefixDecl, &[T::PrefixKw], 7),
    (N::BaseDecl, &[T::BaseKw], 8),
    (N::SparqlPrefixDecl, &[T::SparqlPrefixKw], 9),
    (N::SparqlBaseDecl, &[T::SparqlBaseKw], 10),
    (
        N::Triples,
        &[
            T::IriRef,
            T::PNameLn,
            T::PNameNs,
            T::BlankNodeLabel,
            T::Anon,
            T::LParen,
            T::Nil,
        ],
        11,
    ),
    (N::Triples, &[T::LBracket], 12),
    (N::PredObjListOpt, FIRST_VERB, 13),
    (N::PredObjList, FIRST_VERB, 14),
    (N::PredObjTail, &[T::Semicolon], 15),
    (N::PredObjNext, FIRST_VERB, 16),
    (N::PredObjNext, &[T::Semicolon], 17),
    (N::ObjectList, FIRST_OBJECT, 18),
    (N::ObjectTail, &[T::Comma], 19),
    (N::Verb, &[T::A], 20),
    (N::Verb, &[T::IriRef, T::PNameLn, T::PNameNs], 21),
    (N::Subject, &[T::IriRef, T::PNameLn, T::PNameNs], 22),
    (N::Subject, &[T::BlankNodeLabel, T::Anon], 23),
    (N::Subject, &[T::LParen, T::Nil], 24),
    (N::Object, &[T::IriRef, T::PNameLn, T::PNameNs], 25),
    (N::Object, &[T::BlankNodeLabel, T::Anon], 26),
    (N::Object, &[T::LParen, T::Nil], 27),
    (N::Object, &[T::LBracket], 28),
    (
        N::Object,
        &[T::String, T::Integer, T::Decimal, T::Double, T::True, T::False],
        29,
    ),
    (N::Collection, &[T::LParen], 30),
    (N::Collection, &[T::Nil], 31),
    (N::ObjectSeq, FIRST_OBJECT, 32),
    (N::PropertyList, &[T::LBracket], 33),
    (N::Literal, &[T::String], 34),
    (N::Literal, &[T::Integer], 35),
    (N::Literal, &[T::Decimal], 36),
    (N::Literal, &[T::Double], 37),
    (N::Literal, &[T::True], 38),
    (N::Literal, &[T::False], 39),
    (N::RdfLiteral, &[T::String], 40),
    (N::LiteralSuffix, &[T::LangTag], 41),
    (N::LiteralSuffix, &[T::DoubleCaret], 42),
    (N::IriNode, &[T::IriRef], 43),
    (N::IriNode, &[T::PNameLn], 44),
    (N::IriNode, &[T::PNameNs], 45),
    (N::BlankNode, &[T::BlankNodeLabel], 46),
    (N::BlankNode, &[T::Anon], 47),
];

/// FOLLOW(object), which is also FOLLOW(literal) and FOLLOW(literalSuffix):
/// object separators and statement/group terminators, plus FIRST(object)
/// because objects follow each other directly inside a collection.
const FOLLOW_OBJECT: &[Terminal] = &[
    T::Comma,
    T::Semicolon,
    T::Dot,
    T::RBracket,
    T::RParen,
    T::IriRef,
    T::PNameLn,
    T::PNameNs,
    T::BlankNodeLabel,
    T::Anon,
    T::LParen,
    T::Nil,
    T::LBracket,
    T::String,
    T::Integer,
    T::Decimal,
    T::Double,
    T::True,
    T::False,
];

/// Nullable non-terminals: FOLLOW set and the action that produces their
/// empty semantic value.
static EMPTY_RULES: &[(NonTerminal, &[Terminal], Action)] = &[
    (N::Doc, &[T::Eof], Action::EmptyUnit),
    (N::PredObjListOpt, &[T::Dot], Action::EmptyPairs),
    (N::PredObjTail, &[T::Dot, T::RBracket], Action::EmptyPairs),
    (N::PredObjNext, &[T::Dot, T::RBracket], Action::EmptyPairs),
    (
        N::ObjectTail,
        &[T::Semicolon, T::Dot, T::RBracket],
        Action::EmptyTerms,
    ),
    (N::ObjectSeq, &[T::RParen], Action::EmptyTerms),
    (N::LiteralSuffix, FOLLOW_OBJECT, Action::EmptySuffix),
];

const SLOT_NONE: u8 = u8::MAX;

static TABLE: OnceLock<[[u8; Terminal::COUNT]; NonTerminal::COUNT]> = OnceLock::new();

fn build_table() -> [[u8; Terminal::COUNT]; NonTerminal::COUNT] {
    let mut table = [[SLOT_NONE; Terminal::COUNT]; NonTerminal::COUNT];
    for &(nt, terminals, production) in TABLE_ENTRIES {
        for &terminal in terminals {
            let slot = &mut table[nt as usize][terminal as usize];
            // an occupied slot would mean the grammar is not LL(1)
            debug_assert_eq!(*slot, SLOT_NONE, "table conflict at {nt:?}/{terminal:?}");
            *slot = production;
        }
    }
    table
}

/// Look up the production for `nt` with lookahead `terminal`.
pub(crate) fn production_for(nt: NonTerminal, terminal: Terminal) -> Option<&'static Production> {
    let table = TABLE.get_or_init(build_table);
    match table[nt as usize][terminal as usize] {
        SLOT_NONE => None,
        id => Some(&PRODUCTIONS[id as usize]),
    }
}

/// The epsilon rule: if `nt` is nullable and `terminal` is in its FOLLOW set,
/// return the action that pushes its empty value.
pub(crate) fn empty_action(nt: NonTerminal, terminal: Terminal) -> Option<Action> {
    EMPTY_RULES
        .iter()
        .find(|(rule_nt, follow, _)| *rule_nt == nt && follow.contains(&terminal))
        .map(|&(_, _, action)| action)
}

/// Every terminal that would have been accepted for `nt`, for error messages.
pub(crate) fn expected_for(nt: NonTerminal) -> Vec<Terminal> {
    let mut expected = Vec::new();
    for &(rule_nt, terminals, _) in TABLE_ENTRIES {
        if rule_nt == nt {
            for &terminal in terminals {
                if !expected.contains(&terminal) {
                    expected.push(terminal);
                }
            }
        }
    }
    for &(rule_nt, follow, _) in EMPTY_RULES {
        if rule_nt == nt {
            for &terminal in follow {
                if !expected.contains(&terminal) {
                    expected.push(terminal);
                }
            }
        }
    }
    expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_conflict_free() {
        // build_table debug-asserts single ownership of every slot
        let table = build_table();
        assert_eq!(table.len(), NonTerminal::COUNT);
    }

    #[test]
    fn test_production_lookup() {
        let p = production_for(NonTerminal::Statement, Terminal::PrefixKw).unwrap();
        assert_eq!(p.action, Action::StatementDirective);

        let p = production_for(NonTerminal::Statement, Terminal::IriRef).unwrap();
        assert_eq!(p.action, Action::StatementTriples);

        assert!(production_for(NonTerminal::Statement, Terminal::Dot).is_none());
    }

    #[test]
    fn test_entries_match_production_lhs() {
        for &(nt, _, id) in TABLE_ENTRIES {
            assert_eq!(PRODUCTIONS[id as usize].lhs, nt, "entry {id} lhs mismatch");
        }
    }

    #[test]
    fn test_epsilon_rule() {
        assert_eq!(
            empty_action(NonTerminal::Doc, Terminal::Eof),
            Some(Action::EmptyUnit)
        );
        assert_eq!(empty_action(NonTerminal::Doc, Terminal::Dot), None);
        assert_eq!(
            empty_action(NonTerminal::ObjectTail, Terminal::Dot),
            Some(Action::EmptyTerms)
        );
        // non-nullable non-terminals never resolve as empty
        assert_eq!(empty_action(NonTerminal::Subject, Terminal::Dot), None);
    }

    #[test]
    fn test_expected_includes_follow_for_nullable() {
        let expected = expected_for(NonTerminal::ObjectTail);
        assert!(expected.contains(&Terminal::Comma));
        assert!(expected.contains(&Terminal::Dot));
        assert!(expected.contains(&Terminal::Semicolon));
    }

    #[test]
    fn test_string_styles_share_a_terminal() {
        use crate::lex::StringStyle;
        use std::sync::Arc;

        for style in [
            StringStyle::Single,
            StringStyle::Double,
            StringStyle::LongSingle,
            StringStyle::LongDouble,
        ] {
            let kind = TokenKind::String {
                value: Arc::from("x"),
                style,
            };
            assert_eq!(Terminal::of(&kind), Terminal::String);
        }
    }
}
