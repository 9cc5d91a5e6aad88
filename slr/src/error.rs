//! Error values produced by the parse engine and the table/grammar loaders.
//!
//! A failed parse yields exactly one [`ParseError`]: the scanner's own error,
//! a classified [`SyntaxError`], or an [`IntegrityError`] when the grammar and
//! table do not belong together.
use crate::{GrammarError, Span, StateId, TableError, TokenKind};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Diagnostic category of a syntax error, derived from the parser state in
/// which no action was defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxCategory {
    EofExpected,
    IdentifierExpected,
    KeywordMissing,
    SymbolMissing,
    TypeExpected,
    IdentifierOrLiteralExpected,
    Generic,
}

impl SyntaxCategory {
    /// Stable numeric code used in user-facing reports.
    pub const fn code(self) -> u8 {
        match self {
            SyntaxCategory::EofExpected => 6,
            SyntaxCategory::IdentifierExpected => 7,
            SyntaxCategory::KeywordMissing => 8,
            SyntaxCategory::SymbolMissing => 9,
            SyntaxCategory::TypeExpected => 10,
            SyntaxCategory::IdentifierOrLiteralExpected => 11,
            SyntaxCategory::Generic => 99,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            SyntaxCategory::EofExpected => "EOF expected",
            SyntaxCategory::IdentifierExpected => "identifier expected",
            SyntaxCategory::KeywordMissing => "special word missing",
            SyntaxCategory::SymbolMissing => "symbol missing",
            SyntaxCategory::TypeExpected => "data type expected",
            SyntaxCategory::IdentifierOrLiteralExpected => "identifier or literal value expected",
            SyntaxCategory::Generic => "syntax error",
        }
    }
}

impl fmt::Display for SyntaxCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Maps parser states to diagnostic categories. States without an entry are
/// [`SyntaxCategory::Generic`].
///
/// ```rust
/// # use slr::{ErrorStates, StateId, SyntaxCategory};
/// let states = ErrorStates::new()
///     .with(SyntaxCategory::EofExpected, [1])
///     .with(SyntaxCategory::SymbolMissing, [4, 8]);
/// assert_eq!(states.category(StateId(8)), SyntaxCategory::SymbolMissing);
/// assert_eq!(states.category(StateId(2)), SyntaxCategory::Generic);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorStates {
    map: HashMap<StateId, SyntaxCategory>,
}

impl ErrorStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `category` to each of `states`, replacing earlier assignments.
    pub fn with(mut self, category: SyntaxCategory, states: impl IntoIterator<Item = u32>) -> Self {
        for state in states {
            self.map.insert(StateId(state), category);
        }
        self
    }

    pub fn category(&self, state: StateId) -> SyntaxCategory {
        self.map
            .get(&state)
            .copied()
            .unwrap_or(SyntaxCategory::Generic)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// No action was defined for the lookahead token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{category} at {span}, found {}", describe(.found, .lexeme))]
pub struct SyntaxError<K: TokenKind> {
    /// State on top of the stack when the lookup failed.
    pub state: StateId,
    pub category: SyntaxCategory,
    pub found: K,
    pub lexeme: String,
    pub span: Span,
    /// Kinds that have an action in `state`.
    pub expected: Vec<K>,
}

fn describe<K: TokenKind>(found: &K, lexeme: &str) -> String {
    if *found == K::EOF {
        "end of input".to_string()
    } else {
        format!("{lexeme:?}")
    }
}

/// The grammar and table disagree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("state {state}: no goto on {nonterminal} after reducing by production {production}")]
    MissingGoto {
        state: StateId,
        production: usize,
        nonterminal: String,
    },

    #[error("state {state}: reduce by unknown production {production}")]
    UnknownProduction { state: StateId, production: usize },

    #[error("state {state}: stack too short to reduce by production {production}")]
    StackUnderflow { state: StateId, production: usize },

    #[error("stack top is not a state")]
    CorruptStack,
}

#[derive(Debug, Error)]
pub enum ParseError<E: std::error::Error, K: TokenKind> {
    #[error("lexical error: {0}")]
    Lexical(E),

    #[error("syntax error: {0}")]
    Syntax(SyntaxError<K>),

    #[error("table integrity error: {0}")]
    TableIntegrity(IntegrityError),
}

impl<E: std::error::Error, K: TokenKind> ParseError<E, K> {
    pub fn as_syntax(&self) -> Option<&SyntaxError<K>> {
        match self {
            ParseError::Syntax(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_lexical(&self) -> Option<&E> {
        match self {
            ParseError::Lexical(e) => Some(e),
            _ => None,
        }
    }
}

/// Failure to build a parser from grammar and table text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("grammar: {0}")]
    Grammar(#[from] GrammarError),

    #[error("table: {0}")]
    Table(#[from] TableError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span;
    use crate::test_data::Tok;

    #[test]
    fn categories_have_stable_codes() {
        let codes: Vec<u8> = [
            SyntaxCategory::EofExpected,
            SyntaxCategory::IdentifierExpected,
            SyntaxCategory::KeywordMissing,
            SyntaxCategory::SymbolMissing,
            SyntaxCategory::TypeExpected,
            SyntaxCategory::IdentifierOrLiteralExpected,
            SyntaxCategory::Generic,
        ]
        .into_iter()
        .map(SyntaxCategory::code)
        .collect();
        assert_eq!(codes, [6, 7, 8, 9, 10, 11, 99]);
        assert_eq!(SyntaxCategory::TypeExpected.to_string(), "data type expected");
    }

    #[test]
    fn later_assignment_wins() {
        let states = ErrorStates::new()
            .with(SyntaxCategory::SymbolMissing, [3, 4])
            .with(SyntaxCategory::EofExpected, [4]);
        assert_eq!(states.len(), 2);
        assert_eq!(states.category(StateId(3)), SyntaxCategory::SymbolMissing);
        assert_eq!(states.category(StateId(4)), SyntaxCategory::EofExpected);
        assert!(ErrorStates::new().is_empty());
    }

    #[test]
    fn syntax_error_display() {
        let err = SyntaxError {
            state: StateId(8),
            category: SyntaxCategory::SymbolMissing,
            found: Tok::Int,
            lexeme: "7".into(),
            span: span!(0, 4, 0, 5),
            expected: vec![Tok::RParen, Tok::Plus],
        };
        assert_eq!(err.to_string(), "symbol missing at 1:5-1:6, found \"7\"");

        let err = SyntaxError {
            found: Tok::Eof,
            lexeme: String::new(),
            span: span!(0, 3, 0, 3),
            ..err
        };
        assert_eq!(err.to_string(), "symbol missing at 1:4, found end of input");
    }

    #[test]
    fn load_error_wraps_sources() {
        let err: LoadError = GrammarError::Empty.into();
        assert!(matches!(err, LoadError::Grammar(_)));
        assert_eq!(err.to_string(), "grammar: grammar has no productions");
        let err: LoadError = TableError::MissingHeader.into();
        assert!(matches!(err, LoadError::Table(TableError::MissingHeader)));
    }

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}
    #[test]
    fn errors_are_send_sync_static() {
        _assert_send_sync_static::<LoadError>();
        _assert_send_sync_static::<IntegrityError>();
        _assert_send_sync_static::<SyntaxError<Tok>>();
    }
}
