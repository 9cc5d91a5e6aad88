//! # slr
//!
//! A table-driven SLR(1) parse engine that builds concrete parse trees.
//!
//! The engine does not construct parsing tables. It is configured with:
//!
//! - a [`Grammar`] read from `LHS -> S1 ... Sn` lines,
//! - a precomputed action/goto [`Table`] read from comma-separated text,
//! - an [`ErrorStates`] map from parser states to diagnostic categories,
//!
//! and is fed by any [`Lexer`] whose tokens implement [`Token`] over a
//! [`TokenKind`] enumeration. A successful run returns a [`Tree`] whose leaves
//! are the input lexemes in order; a failed run returns one [`ParseError`].
//!
//! Loaded grammars and tables are immutable, so one [`Parser`] can serve any
//! number of runs. Each run owns its stacks.
//!
//! ## Modules
//!
//! - [`cursor`]: positions, spans and a character cursor for scanners
//! - [`token`]: the traits a concrete language implements
//! - [`grammar`]: the grammar store
//! - [`table`]: the transition table
//! - [`parser`]: the parse engine
//! - [`trace`]: per-step trace hooks
//! - [`tree`]: the parse tree
//! - [`error`]: syntax categories and error values
pub mod cursor;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod table;
pub mod token;
pub mod trace;
pub mod tree;

#[cfg(test)]
mod test_data;

pub use cursor::{Position, SourceCursor, Span};
pub use error::{
    ErrorStates, IntegrityError, LoadError, ParseError, SyntaxCategory, SyntaxError,
};
pub use grammar::{Grammar, GrammarError, NonTerminalId, Production, Symbol};
pub use parser::{Parser, ParserStats, StackEntry};
pub use table::{Action, StateId, Table, TableError};
pub use token::{Lexer, Token, TokenKind};
pub use trace::{LogTrace, NoTrace, Step, Trace};
pub use tree::Tree;
