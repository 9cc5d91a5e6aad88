//! # Grammar Store
//!
//! An ordered list of productions read from text of the form
//! `LHS -> S1 S2 ... Sn`, one per line. Line order is production order and
//! production 0's left-hand side is the start symbol.
//!
//! Symbols naming some production's left-hand side are nonterminals. Any other
//! symbol is a terminal if the token kind type knows its spelling, otherwise it
//! is recorded as an undefined nonterminal; such references are not rejected
//! here and surface later as missing gotos.
use crate::TokenKind;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use smartstring::alias::String;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static PRODUCTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S+)\s*->\s*(.*)$").unwrap());

/// Lines starting with this prefix are comments.
const COMMENT: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("grammar line {line}: missing `->` in {text:?}")]
    MissingArrow { line: usize, text: std::string::String },

    #[error("grammar line {line}: malformed left-hand side in {text:?}")]
    BadLhs { line: usize, text: std::string::String },

    #[error("grammar has no productions")]
    Empty,
}

/// Index of an interned nonterminal name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonTerminalId(pub usize);

/// A grammar symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol<K: TokenKind> {
    Terminal(K),
    NonTerminal(NonTerminalId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production<K: TokenKind> {
    pub lhs: NonTerminalId,
    pub rhs: Vec<Symbol<K>>,
}

#[derive(Debug, Clone)]
pub struct Grammar<K: TokenKind> {
    productions: Vec<Production<K>>,
    nonterminals: IndexSet<String>,
}

impl<K: TokenKind> Grammar<K> {
    /// Builds a grammar from production lines. Blank lines and `--` comments
    /// are skipped and do not take a production number.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut raw: Vec<(&str, Vec<&str>)> = Vec::new();
        let lines: Vec<S> = lines.into_iter().collect();
        for (i, line) in lines.iter().enumerate() {
            let text = line.as_ref().trim();
            if text.is_empty() || text.starts_with(COMMENT) {
                continue;
            }
            let Some(caps) = PRODUCTION_RE.captures(text) else {
                return Err(if text.contains("->") {
                    GrammarError::BadLhs {
                        line: i + 1,
                        text: text.into(),
                    }
                } else {
                    GrammarError::MissingArrow {
                        line: i + 1,
                        text: text.into(),
                    }
                });
            };
            let lhs = caps.get(1).map_or("", |m| m.as_str());
            let rhs = caps.get(2).map_or("", |m| m.as_str());
            raw.push((lhs, rhs.split_whitespace().collect()));
        }
        if raw.is_empty() {
            return Err(GrammarError::Empty);
        }

        let mut nonterminals = IndexSet::new();
        for (lhs, _) in &raw {
            nonterminals.insert(String::from(*lhs));
        }
        let productions = raw
            .iter()
            .map(|(lhs, rhs)| {
                let lhs = NonTerminalId(nonterminals.get_index_of(*lhs).unwrap_or_default());
                let rhs = rhs
                    .iter()
                    .map(|sym| classify(&mut nonterminals, sym))
                    .collect();
                Production { lhs, rhs }
            })
            .collect();

        let grammar = Self {
            productions,
            nonterminals,
        };
        log::debug!(
            "loaded grammar: {} productions, {} nonterminals",
            grammar.len(),
            grammar.nonterminals.len()
        );
        Ok(grammar)
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    pub fn production(&self, index: usize) -> Option<&Production<K>> {
        self.productions.get(index)
    }

    pub fn productions(&self) -> &[Production<K>] {
        &self.productions
    }

    /// Left-hand side of production 0.
    pub fn start_symbol(&self) -> NonTerminalId {
        self.productions[0].lhs
    }

    pub fn nonterminal(&self, name: &str) -> Option<NonTerminalId> {
        self.nonterminals.get_index_of(name).map(NonTerminalId)
    }

    pub fn nonterminal_name(&self, id: NonTerminalId) -> &str {
        self.nonterminals
            .get_index(id.0)
            .map(|s| s.as_str())
            .unwrap_or("?")
    }

    /// Number of interned nonterminals, undefined ones included.
    pub fn nonterminal_count(&self) -> usize {
        self.nonterminals.len()
    }

    pub fn symbol_name(&self, symbol: Symbol<K>) -> &str {
        match symbol {
            Symbol::Terminal(kind) => kind.symbol(),
            Symbol::NonTerminal(id) => self.nonterminal_name(id),
        }
    }

    /// Is `id` the left-hand side of at least one production?
    pub fn is_defined(&self, id: NonTerminalId) -> bool {
        self.productions.iter().any(|p| p.lhs == id)
    }
}

fn classify<K: TokenKind>(nonterminals: &mut IndexSet<String>, sym: &str) -> Symbol<K> {
    if let Some(i) = nonterminals.get_index_of(sym) {
        return Symbol::NonTerminal(NonTerminalId(i));
    }
    match K::from_symbol(sym) {
        Some(kind) => Symbol::Terminal(kind),
        None => {
            log::trace!("undefined nonterminal {sym:?}");
            let (i, _) = nonterminals.insert_full(String::from(sym));
            Symbol::NonTerminal(NonTerminalId(i))
        }
    }
}

impl<K: TokenKind> FromStr for Grammar<K> {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_lines(s.lines())
    }
}

/// Numbered productions, one per line: `0. START -> PROGRAM`.
impl<K: TokenKind> fmt::Display for Grammar<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.productions.iter().enumerate() {
            write!(f, "{i}. {} ->", self.nonterminal_name(p.lhs))?;
            for sym in &p.rhs {
                write!(f, " {}", self.symbol_name(*sym))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
