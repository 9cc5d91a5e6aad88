//! # clite
//!
//! Lexical and syntax analysis for Clite, a small C-like language with typed
//! declarations, `if`/`else`, `while` and boolean, relational and arithmetic
//! expressions.
//!
//! The crate pairs a hand-written scanner ([`CliteLexer`]) with the
//! table-driven SLR(1) engine from [`slr`]. The grammar and its precomputed
//! table ship with the crate; [`CliteParser::bundled`] loads them, and
//! [`CliteParser::from_sources`] accepts replacements.
//!
//! ## Example
//!
//! ```rust
//! use clite::{CliteError, CliteParser};
//! use slr::SyntaxCategory;
//!
//! let parser = CliteParser::bundled().unwrap();
//! let tree = parser.parse("int main() { }").unwrap();
//! assert_eq!(tree.leaves().collect::<Vec<_>>(), ["int", "main", "(", ")", "{", "}"]);
//!
//! let Err(CliteError::Syntax(e)) = parser.parse("int main( { }") else {
//!     panic!("expected a syntax error");
//! };
//! assert_eq!(e.category, SyntaxCategory::SymbolMissing);
//! ```
//!
//! ## Modules
//!
//! - [`token`]: token kinds, codes and the token type
//! - [`lexer`]: the scanner
//! - [`parser`]: the parser facade and bundled data
//! - [`diagnostics`]: state categories of the bundled table
//! - [`error`]: error types and report rendering
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::{CliteError, LexError};
pub use lexer::{CharClass, CliteLexer, LexerStats, tokenize};
pub use parser::{CliteParser, GRAMMAR, SLR_TABLE};
pub use token::{CliteToken, TokenID};
