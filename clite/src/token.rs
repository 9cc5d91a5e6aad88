//! # Clite Tokens
//!
//! [`TokenID`] enumerates the terminal categories with the integer codes used
//! in the SLR table header. [`CliteToken`] pairs a kind with its lexeme and
//! source span.
//!
//! Fixed lexemes (keywords, punctuation, operators) are looked up through a
//! static table indexed once into a hash map. The open classes use the grammar
//! spellings `identifier`, `int_literal`, `float_literal` and `char_literal`.
use num_enum::{IntoPrimitive, TryFromPrimitive};
use once_cell::sync::Lazy;
use slr::{Span, Token};
use smartstring::alias::String;
use std::collections::HashMap;
use std::fmt;

/// Token kinds and their table codes.
///
/// ```rust
/// # use clite::TokenID;
/// assert_eq!(u16::from(TokenID::While), 14);
/// assert_eq!(TokenID::try_from(30u16).unwrap(), TokenID::Identifier);
/// assert_eq!(TokenID::lookup("<="), Some(TokenID::LessEqual));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, IntoPrimitive, TryFromPrimitive,
)]
#[repr(u16)]
pub enum TokenID {
    Eof = 0,
    Int = 1,
    Main = 2,
    OpenPar = 3,
    ClosePar = 4,
    OpenCurly = 5,
    CloseCurly = 6,
    OpenBracket = 7,
    CloseBracket = 8,
    Comma = 9,
    Assignment = 10,
    Semicolon = 11,
    If = 12,
    Else = 13,
    While = 14,
    Or = 15,
    And = 16,
    Equality = 17,
    Inequality = 18,
    Less = 19,
    LessEqual = 20,
    Greater = 21,
    GreaterEqual = 22,
    Add = 23,
    Subtract = 24,
    Multiply = 25,
    Divide = 26,
    Bool = 27,
    Float = 28,
    Char = 29,
    Identifier = 30,
    IntLiteral = 31,
    True = 32,
    False = 33,
    FloatLiteral = 34,
    CharLiteral = 35,
}

/// Kinds with a fixed lexeme.
const FIXED: &[(&str, TokenID)] = &[
    ("int", TokenID::Int),
    ("main", TokenID::Main),
    ("(", TokenID::OpenPar),
    (")", TokenID::ClosePar),
    ("{", TokenID::OpenCurly),
    ("}", TokenID::CloseCurly),
    ("[", TokenID::OpenBracket),
    ("]", TokenID::CloseBracket),
    (",", TokenID::Comma),
    ("=", TokenID::Assignment),
    (";", TokenID::Semicolon),
    ("if", TokenID::If),
    ("else", TokenID::Else),
    ("while", TokenID::While),
    ("||", TokenID::Or),
    ("&&", TokenID::And),
    ("==", TokenID::Equality),
    ("!=", TokenID::Inequality),
    ("<", TokenID::Less),
    ("<=", TokenID::LessEqual),
    (">", TokenID::Greater),
    (">=", TokenID::GreaterEqual),
    ("+", TokenID::Add),
    ("-", TokenID::Subtract),
    ("*", TokenID::Multiply),
    ("/", TokenID::Divide),
    ("bool", TokenID::Bool),
    ("float", TokenID::Float),
    ("char", TokenID::Char),
    ("true", TokenID::True),
    ("false", TokenID::False),
];

/// Grammar spellings of the kinds without a fixed lexeme.
const CLASSES: &[(&str, TokenID)] = &[
    ("$", TokenID::Eof),
    ("identifier", TokenID::Identifier),
    ("int_literal", TokenID::IntLiteral),
    ("float_literal", TokenID::FloatLiteral),
    ("char_literal", TokenID::CharLiteral),
];

static LEXEMES: Lazy<HashMap<&'static str, TokenID>> =
    Lazy::new(|| FIXED.iter().copied().collect());

static SYMBOLS: Lazy<HashMap<&'static str, TokenID>> =
    Lazy::new(|| FIXED.iter().chain(CLASSES).copied().collect());

impl TokenID {
    /// Kind of a keyword, punctuation or operator lexeme.
    pub fn lookup(lexeme: &str) -> Option<TokenID> {
        LEXEMES.get(lexeme).copied()
    }

    /// Is this kind a reserved word?
    pub fn is_keyword(self) -> bool {
        FIXED
            .iter()
            .any(|(s, k)| *k == self && s.starts_with(|c: char| c.is_ascii_alphabetic()))
    }

    fn spelling(self) -> Option<&'static str> {
        FIXED.iter().chain(CLASSES).find(|(_, k)| *k == self).map(|(s, _)| *s)
    }
}

impl slr::TokenKind for TokenID {
    const EOF: Self = TokenID::Eof;

    fn from_symbol(symbol: &str) -> Option<Self> {
        SYMBOLS.get(symbol).copied()
    }

    fn symbol(self) -> &'static str {
        self.spelling().unwrap_or("?")
    }
}

impl fmt::Display for TokenID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(slr::TokenKind::symbol(*self))
    }
}

/// A classified lexeme with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliteToken {
    pub token_id: TokenID,
    pub lexeme: String,
    pub span: Span,
}

impl Token for CliteToken {
    type Kind = TokenID;

    fn kind(&self) -> TokenID {
        self.token_id
    }

    fn lexeme(&self) -> &str {
        &self.lexeme
    }

    fn span(&self) -> Span {
        self.span
    }
}
