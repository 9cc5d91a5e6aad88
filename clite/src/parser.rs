//! # Clite Parser
//!
//! [`CliteParser`] couples the [`CliteLexer`] with an [`slr::Parser`] loaded
//! from grammar and table text. [`CliteParser::bundled`] uses the grammar and
//! table shipped in `data/`.
//!
//! ```rust
//! # use clite::CliteParser;
//! let parser = CliteParser::bundled().unwrap();
//! let tree = parser.parse("int main() { int x; x = 2 + 3 * 4; }").unwrap();
//! assert_eq!(tree.label(), "START");
//! assert_eq!(tree.children()[0].label(), "PROGRAM");
//! ```
use crate::{CliteError, CliteLexer, TokenID, diagnostics};
use slr::{ErrorStates, Grammar, Parser, Table, Trace, Tree};

/// Bundled grammar text.
pub const GRAMMAR: &str = include_str!("../data/grammar.txt");

/// Bundled SLR table for [`GRAMMAR`].
pub const SLR_TABLE: &str = include_str!("../data/slr_table.csv");

#[derive(Debug, Clone)]
pub struct CliteParser {
    parser: Parser<TokenID>,
}

impl CliteParser {
    /// Parser over the bundled grammar and table.
    pub fn bundled() -> Result<Self, CliteError> {
        Self::from_sources(GRAMMAR, SLR_TABLE)
    }

    /// Parser over custom grammar and table text, classified with the bundled
    /// state categories.
    pub fn from_sources(grammar: &str, table: &str) -> Result<Self, CliteError> {
        Self::with_error_states(grammar, table, diagnostics::error_states())
    }

    pub fn with_error_states(
        grammar: &str,
        table: &str,
        error_states: ErrorStates,
    ) -> Result<Self, CliteError> {
        let parser = Parser::from_sources(grammar, table, error_states)?;
        Ok(Self { parser })
    }

    pub fn grammar(&self) -> &Grammar<TokenID> {
        self.parser.grammar()
    }

    pub fn table(&self) -> &Table {
        self.parser.table()
    }

    /// Parses a whole program.
    pub fn parse(&self, src: &str) -> Result<Tree, CliteError> {
        Ok(self.parser.parse(CliteLexer::new(src))?)
    }

    /// Parses a whole program, reporting every engine step to `trace`.
    pub fn parse_traced<T>(&self, src: &str, trace: &mut T) -> Result<Tree, CliteError>
    where
        T: Trace<TokenID> + ?Sized,
    {
        Ok(self.parser.parse_traced(CliteLexer::new(src), trace)?)
    }
}
