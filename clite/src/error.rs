//! # Clite Errors
//!
//! [`LexError`] covers input the scanner cannot classify. [`CliteError`] is
//! the single error surface of the crate: it aggregates scanner, syntax, table
//! integrity and loading failures, and renders them with stable numeric codes
//! (`Error 03: Lexical error ...`).
use crate::TokenID;
use slr::{IntegrityError, LoadError, ParseError, Position, Span, SyntaxError, TokenKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character outside every character class.
    #[error("unexpected character {ch:?} at {position}")]
    UnexpectedChar { ch: char, position: Position },

    /// Operator characters forming no known symbol, such as a lone `&`.
    #[error("unknown symbol {lexeme:?} at {span}")]
    UnknownSymbol { lexeme: String, span: Span },

    /// A `.` after digits without a fractional part.
    #[error("malformed float literal {lexeme:?} at {span}")]
    MalformedFloat { lexeme: String, span: Span },

    /// A char literal without exactly one body character and a closing quote.
    #[error("malformed char literal at {span}")]
    MalformedChar { span: Span },
}

impl LexError {
    /// Where the offending input starts.
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedChar { position, .. } => *position,
            LexError::UnknownSymbol { span, .. }
            | LexError::MalformedFloat { span, .. }
            | LexError::MalformedChar { span } => span.start,
        }
    }
}

#[derive(Debug, Error)]
pub enum CliteError {
    #[error("Lexical error: {0}")]
    Lexical(#[from] LexError),

    #[error("{0}")]
    Syntax(#[from] SyntaxError<TokenID>),

    #[error("Table integrity error: {0}")]
    TableIntegrity(#[from] IntegrityError),

    #[error("{0}")]
    Load(#[from] LoadError),
}

impl From<ParseError<LexError, TokenID>> for CliteError {
    fn from(err: ParseError<LexError, TokenID>) -> Self {
        match err {
            ParseError::Lexical(e) => CliteError::Lexical(e),
            ParseError::Syntax(e) => CliteError::Syntax(e),
            ParseError::TableIntegrity(e) => CliteError::TableIntegrity(e),
        }
    }
}

impl CliteError {
    /// Numeric code shown in reports.
    pub fn code(&self) -> u8 {
        match self {
            CliteError::Lexical(_) => 3,
            CliteError::Load(LoadError::Grammar(_)) => 4,
            CliteError::Load(LoadError::Table(_)) => 5,
            CliteError::Syntax(e) => e.category.code(),
            CliteError::TableIntegrity(_) => 98,
        }
    }

    /// One-line user-facing report, with the expected symbols for syntax
    /// errors.
    pub fn report(&self) -> String {
        let mut out = format!("Error {:02}: {self}", self.code());
        if let CliteError::Syntax(e) = self {
            if !e.expected.is_empty() {
                let expected: Vec<&str> = e.expected.iter().map(|k| k.symbol()).collect();
                out.push_str(&format!(" (expected {})", expected.join(" ")));
            }
        }
        out
    }
}
