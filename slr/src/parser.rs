//! # Parse Engine
//!
//! A shift-reduce automaton driven by a [`Table`]. The stack alternates states
//! and grammar symbols, `[s0, X1, s1, X2, s2, ...]`, and always has a state on
//! top; a parallel tree stack holds the subtrees not yet attached to a parent.
//!
//! Each step looks up the action for the top state and the held lookahead:
//!
//! - **Shift** pushes the token's kind and the next state, pushes a leaf for
//!   its lexeme and drops the lookahead.
//! - **Reduce** pops `2k` stack entries and `k` trees for a production with
//!   `k` right-hand symbols, pushes the left-hand side and its goto state, and
//!   pushes one node owning the popped trees. The lookahead is kept.
//! - **Accept** wraps the remaining trees under the start symbol.
//! - No action is a [`SyntaxError`], classified by [`ErrorStates`].
//!
//! A [`Parser`] is immutable and may serve any number of independent runs.
use crate::{
    Action, ErrorStates, Grammar, IntegrityError, Lexer, LoadError, LogTrace, NoTrace,
    NonTerminalId, ParseError, StateId, Step, Symbol, SyntaxError, Table, Token, TokenKind, Trace,
    Tree,
};
use std::mem;

/// One entry of the state/symbol stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackEntry<K: TokenKind> {
    State(StateId),
    Symbol(Symbol<K>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserStats {
    /// Tokens pulled from the lexer, end-of-input included.
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
}

#[derive(Debug, Clone)]
pub struct Parser<K: TokenKind> {
    grammar: Grammar<K>,
    table: Table,
    error_states: ErrorStates,
    /// Goto column of each grammar nonterminal, by `NonTerminalId`.
    goto_columns: Vec<Option<usize>>,
}

type ParseResult<L, K> = Result<Tree, ParseError<<L as Lexer>::Error, K>>;

impl<K: TokenKind> Parser<K> {
    pub fn new(grammar: Grammar<K>, table: Table, error_states: ErrorStates) -> Self {
        let goto_columns: Vec<Option<usize>> = (0..grammar.nonterminal_count())
            .map(|i| table.goto_column(grammar.nonterminal_name(NonTerminalId(i))))
            .collect();
        for (i, column) in goto_columns.iter().enumerate() {
            let id = NonTerminalId(i);
            if column.is_none() && grammar.is_defined(id) && id != grammar.start_symbol() {
                log::warn!(
                    "nonterminal {} has no goto column",
                    grammar.nonterminal_name(id)
                );
            }
        }
        Self {
            grammar,
            table,
            error_states,
            goto_columns,
        }
    }

    /// Loads grammar text and table text, as in [`Grammar::from_str`] and
    /// [`Table::from_str`].
    ///
    /// [`Grammar::from_str`]: std::str::FromStr::from_str
    /// [`Table::from_str`]: std::str::FromStr::from_str
    pub fn from_sources(
        grammar: &str,
        table: &str,
        error_states: ErrorStates,
    ) -> Result<Self, LoadError> {
        Ok(Self::new(grammar.parse()?, table.parse()?, error_states))
    }

    pub fn grammar(&self) -> &Grammar<K> {
        &self.grammar
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn error_states(&self) -> &ErrorStates {
        &self.error_states
    }

    /// Parses everything `lexer` yields up to end-of-input.
    pub fn parse<L>(&self, lexer: L) -> ParseResult<L, K>
    where
        L: Lexer<Token: Token<Kind = K>>,
    {
        if log::log_enabled!(log::Level::Debug) {
            self.parse_traced(lexer, &mut LogTrace)
        } else {
            self.parse_traced(lexer, &mut NoTrace)
        }
    }

    /// Like [`parse`](Self::parse), reporting every step to `trace`.
    pub fn parse_traced<L, T>(&self, lexer: L, trace: &mut T) -> ParseResult<L, K>
    where
        L: Lexer<Token: Token<Kind = K>>,
        T: Trace<K> + ?Sized,
    {
        let mut ctx = ParserCtx::new(self, lexer);
        loop {
            let token = match ctx.lookahead.take() {
                Some(token) => token,
                None => ctx.pull()?,
            };
            let kind = token.kind();
            let state = ctx.top()?;
            let Some(action) = self.table.action(state, kind) else {
                log::trace!("Error in state {state} on {kind:?}");
                return Err(ParseError::Syntax(self.syntax_error(state, &token)));
            };

            trace.step(&Step {
                state,
                lookahead: kind,
                lexeme: token.lexeme(),
                action,
                stack: &ctx.stack,
                trees: ctx.trees.len(),
                grammar: &self.grammar,
            });

            match action {
                Action::Shift(next) => {
                    log::trace!("Shift {next}");
                    ctx.stack.push(StackEntry::Symbol(Symbol::Terminal(kind)));
                    ctx.stack.push(StackEntry::State(next));
                    ctx.trees.push(Tree::leaf(token.lexeme()));
                    ctx.stats.shifts += 1;
                }

                Action::Reduce(production) => {
                    log::trace!("Reduce {production}");
                    ctx.reduce(state, production)?;
                    ctx.lookahead = Some(token);
                }

                Action::Accept => {
                    log::trace!("Accept");
                    let start = self.grammar.nonterminal_name(self.grammar.start_symbol());
                    let root = Tree::with_children(start, mem::take(&mut ctx.trees));
                    log::debug!("{:?}", ctx.stats);
                    trace.finish(&ctx.stats);
                    return Ok(root);
                }
            }
        }
    }

    fn syntax_error<T>(&self, state: StateId, token: &T) -> SyntaxError<K>
    where
        T: Token<Kind = K>,
    {
        SyntaxError {
            state,
            category: self.error_states.category(state),
            found: token.kind(),
            lexeme: token.lexeme().to_string(),
            span: token.span(),
            expected: self.table.expected(state),
        }
    }
}

/// Stacks and lookahead of a single run.
struct ParserCtx<'p, K, L>
where
    K: TokenKind,
    L: Lexer,
{
    parser: &'p Parser<K>,
    lexer: L,
    lookahead: Option<L::Token>,
    stack: Vec<StackEntry<K>>,
    trees: Vec<Tree>,
    stats: ParserStats,
}

impl<'p, K, L> ParserCtx<'p, K, L>
where
    K: TokenKind,
    L: Lexer<Token: Token<Kind = K>>,
{
    fn new(parser: &'p Parser<K>, lexer: L) -> Self {
        Self {
            parser,
            lexer,
            lookahead: None,
            stack: vec![StackEntry::State(StateId(0))],
            trees: Vec::new(),
            stats: ParserStats::default(),
        }
    }

    fn pull(&mut self) -> Result<L::Token, ParseError<L::Error, K>> {
        self.stats.tokens += 1;
        self.lexer.next_token().map_err(ParseError::Lexical)
    }

    fn top(&self) -> Result<StateId, ParseError<L::Error, K>> {
        match self.stack.last() {
            Some(StackEntry::State(state)) => Ok(*state),
            _ => Err(ParseError::TableIntegrity(IntegrityError::CorruptStack)),
        }
    }

    fn reduce(&mut self, state: StateId, production: usize) -> Result<(), ParseError<L::Error, K>> {
        let grammar = &self.parser.grammar;
        let Some(prod) = grammar.production(production) else {
            return Err(ParseError::TableIntegrity(
                IntegrityError::UnknownProduction { state, production },
            ));
        };
        let k = prod.rhs.len();
        if self.stack.len() < 2 * k + 1 || self.trees.len() < k {
            return Err(ParseError::TableIntegrity(IntegrityError::StackUnderflow {
                state,
                production,
            }));
        }

        self.stack.truncate(self.stack.len() - 2 * k);
        let exposed = self.top()?;
        let next = self.parser.goto_columns[prod.lhs.0]
            .and_then(|column| self.parser.table.goto_at(exposed, column));
        let Some(next) = next else {
            return Err(ParseError::TableIntegrity(IntegrityError::MissingGoto {
                state: exposed,
                production,
                nonterminal: grammar.nonterminal_name(prod.lhs).to_string(),
            }));
        };
        self.stack.push(StackEntry::Symbol(Symbol::NonTerminal(prod.lhs)));
        self.stack.push(StackEntry::State(next));

        let children = self.trees.split_off(self.trees.len() - k);
        self.trees
            .push(Tree::with_children(grammar.nonterminal_name(prod.lhs), children));
        self.stats.reductions += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data::{ARITH_GRAMMAR, ARITH_TABLE, ArithLexer, Tok};
    use crate::{SyntaxCategory, span};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn arith() -> Parser<Tok> {
        let error_states = ErrorStates::new()
            .with(SyntaxCategory::IdentifierOrLiteralExpected, [0, 4, 6, 7])
            .with(SyntaxCategory::EofExpected, [1])
            .with(SyntaxCategory::SymbolMissing, [8]);
        Parser::from_sources(ARITH_GRAMMAR, ARITH_TABLE, error_states).unwrap()
    }

    fn node(label: &str, children: Vec<Tree>) -> Tree {
        Tree::with_children(label, children)
    }

    fn leaf(label: &str) -> Tree {
        Tree::leaf(label)
    }

    #[test]
    fn sum_and_product() {
        init_logger();
        let tree = arith().parse(ArithLexer::new("2+3*4")).unwrap();
        let expected = node(
            "E'",
            vec![node(
                "E",
                vec![
                    node("E", vec![node("T", vec![node("F", vec![leaf("2")])])]),
                    leaf("+"),
                    node(
                        "T",
                        vec![
                            node("T", vec![node("F", vec![leaf("3")])]),
                            leaf("*"),
                            node("F", vec![leaf("4")]),
                        ],
                    ),
                ],
            )],
        );
        assert_eq!(tree, expected);
    }

    #[test]
    fn leaves_round_trip() {
        init_logger();
        let parser = arith();
        for src in ["7", "1+2+3", "(1+2)*3", "((4))", "1*2*3+4*(5+6)"] {
            let tree = parser.parse(ArithLexer::new(src)).unwrap();
            let lexemes: Vec<_> = ArithLexer::new(src).lexemes();
            assert_eq!(tree.leaves().collect::<Vec<_>>(), lexemes, "{src}");
        }
    }

    #[test]
    fn steps_keep_stacks_in_lock_step() {
        init_logger();
        let parser = arith();
        let mut steps: Vec<(Action, usize, usize)> = Vec::new();
        let mut record = |step: &Step<'_, Tok>| {
            assert!(matches!(step.stack.last(), Some(StackEntry::State(s)) if *s == step.state));
            assert_eq!(step.stack.len() % 2, 1);
            steps.push((step.action, step.stack.len(), step.trees));
        };
        parser
            .parse_traced(ArithLexer::new("(1+2)*3+4"), &mut record)
            .unwrap();

        for pair in steps.windows(2) {
            let ((action, stack, trees), (_, next_stack, next_trees)) = (pair[0], pair[1]);
            match action {
                Action::Shift(_) => {
                    assert_eq!(next_stack, stack + 2);
                    assert_eq!(next_trees, trees + 1);
                }
                Action::Reduce(p) => {
                    let k = parser.grammar().production(p).unwrap().rhs.len();
                    assert_eq!(stack - next_stack, 2 * k - 2);
                    assert_eq!(trees - next_trees, k - 1);
                }
                Action::Accept => unreachable!("accept is the last step"),
            }
        }
        assert!(matches!(steps.last(), Some((Action::Accept, 3, 1))));
    }

    #[test]
    fn stats_and_step_sequence() {
        init_logger();
        let parser = arith();
        let mut actions = Vec::new();
        let mut stats = None;

        struct Recorder<'a> {
            actions: &'a mut Vec<std::string::String>,
            stats: &'a mut Option<ParserStats>,
        }
        impl Trace<Tok> for Recorder<'_> {
            fn step(&mut self, step: &Step<'_, Tok>) {
                self.actions.push(step.action.to_string());
            }
            fn finish(&mut self, stats: &ParserStats) {
                *self.stats = Some(stats.clone());
            }
        }

        let mut recorder = Recorder {
            actions: &mut actions,
            stats: &mut stats,
        };
        parser
            .parse_traced(ArithLexer::new("2+3*4"), &mut recorder)
            .unwrap();
        assert_eq!(
            actions,
            [
                "s5", "r6", "r4", "r2", "s6", "s5", "r6", "r4", "s7", "s5", "r6", "r3", "r1",
                "acc"
            ]
        );
        assert_eq!(
            stats,
            Some(ParserStats {
                tokens: 6,
                shifts: 5,
                reductions: 8,
            })
        );
    }

    #[test]
    fn render_stack_names_symbols() {
        let parser = arith();
        let mut rendered = Vec::new();
        let mut record = |step: &Step<'_, Tok>| rendered.push(step.render_stack());
        parser.parse_traced(ArithLexer::new("1*2"), &mut record).unwrap();
        assert_eq!(rendered[0], "0");
        assert_eq!(rendered.last().unwrap(), "0 E 1");
        assert!(rendered.contains(&"0 T 2 * 7".to_string()));
    }

    #[test]
    fn missing_operand_is_classified() {
        init_logger();
        let err = arith().parse(ArithLexer::new("2+*4")).unwrap_err();
        let syntax = err.as_syntax().unwrap();
        assert_eq!(syntax.state, StateId(6));
        assert_eq!(syntax.category, SyntaxCategory::IdentifierOrLiteralExpected);
        assert_eq!(syntax.found, Tok::Star);
        assert_eq!(syntax.lexeme, "*");
        assert_eq!(syntax.span, span!(0, 2, 0, 3));
        assert_eq!(syntax.expected, vec![Tok::LParen, Tok::Int]);
    }

    #[test]
    fn unclosed_paren_and_trailing_input() {
        let parser = arith();
        let err = parser.parse(ArithLexer::new("(1+2")).unwrap_err();
        let syntax = err.as_syntax().unwrap();
        assert_eq!(syntax.category, SyntaxCategory::SymbolMissing);
        assert_eq!(syntax.found, Tok::Eof);
        assert_eq!(syntax.lexeme, "");

        let err = parser.parse(ArithLexer::new("1 2")).unwrap_err();
        assert_eq!(err.as_syntax().unwrap().category, SyntaxCategory::Generic);

        let err = parser.parse(ArithLexer::new("")).unwrap_err();
        let syntax = err.as_syntax().unwrap();
        assert_eq!(syntax.state, StateId(0));
        assert_eq!(syntax.found, Tok::Eof);
        assert_eq!(
            syntax.category,
            SyntaxCategory::IdentifierOrLiteralExpected
        );
    }

    #[test]
    fn lexical_error_stops_the_run() {
        let err = arith().parse(ArithLexer::new("1+#")).unwrap_err();
        assert!(matches!(err, ParseError::Lexical(_)));
        assert!(err.as_syntax().is_none());
        assert_eq!(err.as_lexical().unwrap().to_string(), "unexpected '#' at 1:3");
    }

    #[test]
    fn missing_goto_is_an_integrity_error() {
        // Goto column for T removed from state 0.
        let table = ARITH_TABLE.replace("\n0,s4,,,,s5,,1,2,3", "\n0,s4,,,,s5,,1,,3");
        let parser = Parser::from_sources(ARITH_GRAMMAR, &table, ErrorStates::new()).unwrap();
        let err = parser.parse(ArithLexer::new("5")).unwrap_err();
        let ParseError::TableIntegrity(e) = err else {
            panic!("expected integrity error, got {err}");
        };
        assert_eq!(
            e,
            IntegrityError::MissingGoto {
                state: StateId(0),
                production: 4,
                nonterminal: "T".into(),
            }
        );
    }

    #[test]
    fn unknown_production_is_an_integrity_error() {
        let table = ARITH_TABLE.replace("\n5,,r6,r6,r6,,r6,,,", "\n5,,r9,r9,r9,,r9,,,");
        let parser = Parser::from_sources(ARITH_GRAMMAR, &table, ErrorStates::new()).unwrap();
        let err = parser.parse(ArithLexer::new("5")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TableIntegrity(IntegrityError::UnknownProduction {
                state: StateId(5),
                production: 9
            })
        ));
    }

    #[test]
    fn short_stack_on_reduce_is_an_integrity_error() {
        // Reduces a two-symbol production after a single shift.
        let grammar = "S -> int_literal int_literal";
        let table = "state,31,$,S\n0,s1,\n1,,r0,\n";
        let parser = Parser::from_sources(grammar, table, ErrorStates::new()).unwrap();
        let err = parser.parse(ArithLexer::new("7")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TableIntegrity(IntegrityError::StackUnderflow {
                state: StateId(1),
                production: 0
            })
        ));
    }

    #[test]
    fn extra_trees_are_wrapped_under_start_symbol() {
        // A table that accepts right after shifting two literals.
        let grammar = "S -> int_literal int_literal";
        let table = "state,31,$\n0,s1,\n1,s2,\n2,,acc\n";
        let parser = Parser::from_sources(grammar, table, ErrorStates::new()).unwrap();
        let tree = parser.parse(ArithLexer::new("1 2")).unwrap();
        assert_eq!(tree, node("S", vec![leaf("1"), leaf("2")]));
    }

    #[test]
    fn runs_are_deterministic() {
        let parser = arith();
        let a = parser.parse(ArithLexer::new("1+2*(3+4)"));
        let b = parser.parse(ArithLexer::new("1+2*(3+4)"));
        assert_eq!(a.unwrap(), b.unwrap());
        let a = parser.parse(ArithLexer::new("1+2*(3+")).unwrap_err();
        let b = parser.parse(ArithLexer::new("1+2*(3+")).unwrap_err();
        assert_eq!(a.as_syntax(), b.as_syntax());
    }
}
