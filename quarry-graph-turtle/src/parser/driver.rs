//! LL(1) parser driver.
//!
//! The engine keeps two stacks: a `production_stack` of pending grammar
//! symbols and a `value_stack` of semantic values. Matching a terminal pushes
//! the consumed token; expanding a non-terminal pushes an end-of-production
//! sentinel below the body so the production's semantic action runs once the
//! body has been recognized. A table miss on a nullable non-terminal with the
//! lookahead in its FOLLOW set consumes the non-terminal as empty; any other
//! miss is a fatal parse error. There is no panic-mode recovery.

use quarry_graph_ir::GraphSink;

use crate::error::{Result, TurtleError};
use crate::grammar::{self, NonTerminal, Production, Symbol, Terminal};
use crate::lex::{Token, TokenKind};
use crate::parser::actions::{self, ParseState, Value};

enum StackSymbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
    /// End-of-production sentinel: run the production's semantic action.
    Reduce(&'static Production),
}

pub(crate) struct Driver<'t> {
    tokens: &'t [Token],
    pos: usize,
    production_stack: Vec<StackSymbol>,
    value_stack: Vec<Value>,
}

impl<'t> Driver<'t> {
    /// The token slice must end with an EOF token (as `tokenize` guarantees).
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            production_stack: Vec::new(),
            value_stack: Vec::new(),
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len().saturating_sub(1))]
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub(crate) fn run<S: GraphSink>(&mut self, state: &mut ParseState, sink: &mut S) -> Result<()> {
        self.production_stack
            .push(StackSymbol::NonTerminal(NonTerminal::Doc));

        while let Some(symbol) = self.production_stack.pop() {
            match symbol {
                StackSymbol::Terminal(expected) => {
                    let token = self.current();
                    if Terminal::of(&token.kind) == expected {
                        let token = token.clone();
                        self.advance();
                        self.value_stack.push(Value::Token(token));
                    } else {
                        return Err(parse_error(&[expected], token));
                    }
                }
                StackSymbol::NonTerminal(nt) => {
                    let lookahead = Terminal::of(&self.current().kind);
                    if let Some(production) = grammar::production_for(nt, lookahead) {
                        self.production_stack.push(StackSymbol::Reduce(production));
                        for symbol in production.rhs.iter().rev() {
                            self.production_stack.push(match symbol {
                                Symbol::T(terminal) => StackSymbol::Terminal(*terminal),
                                Symbol::N(non_terminal) => StackSymbol::NonTerminal(*non_terminal),
                            });
                        }
                    } else if let Some(action) = grammar::empty_action(nt, lookahead) {
                        actions::apply_empty(action, &mut self.value_stack)?;
                    } else {
                        return Err(parse_error(&grammar::expected_for(nt), self.current()));
                    }
                }
                StackSymbol::Reduce(production) => {
                    actions::apply(production, state, &mut self.value_stack, sink)?;
                }
            }
        }

        // accept: empty production stack with EOF lookahead
        if !matches!(self.current().kind, TokenKind::Eof) {
            return Err(parse_error(&[Terminal::Eof], self.current()));
        }
        // the document production leaves exactly one value behind
        if self.value_stack.len() != 1 {
            return Err(TurtleError::internal(format!(
                "value stack holds {} entries at accept",
                self.value_stack.len()
            )));
        }
        Ok(())
    }
}

fn parse_error(expected: &[Terminal], found: &Token) -> TurtleError {
    let expected = expected
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ");
    TurtleError::parse(expected, found.kind.to_string(), found.line)
}
