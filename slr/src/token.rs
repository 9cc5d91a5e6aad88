//! Traits connecting a concrete language's tokens and scanner to the engine.
use crate::Span;
use std::fmt::Debug;
use std::hash::Hash;

/// A closed set of terminal categories with stable integer codes.
///
/// Codes are the values written in a transition table header. The end-of-input
/// kind is reserved and addressed by the `$` column rather than by its code.
pub trait TokenKind: Copy + Debug + Eq + Hash + Into<u16> + TryFrom<u16> + 'static {
    /// The end-of-input kind.
    const EOF: Self;

    /// Kind spelled `symbol` in grammar text, if any.
    fn from_symbol(symbol: &str) -> Option<Self>;

    /// Spelling of this kind in grammar text.
    fn symbol(self) -> &'static str;

    #[inline]
    fn code(self) -> u16 {
        self.into()
    }

    #[inline]
    fn from_code(code: u16) -> Option<Self> {
        Self::try_from(code).ok()
    }
}

/// A classified lexeme.
pub trait Token {
    type Kind: TokenKind;

    fn kind(&self) -> Self::Kind;
    fn lexeme(&self) -> &str;
    fn span(&self) -> Span;
}

/// A pull-based scanner.
///
/// After end-of-input, `next_token` keeps returning an end-of-input token.
pub trait Lexer {
    type Token: Token;
    type Error: std::error::Error + 'static;

    fn next_token(&mut self) -> Result<Self::Token, Self::Error>;
}

impl<L: Lexer + ?Sized> Lexer for &mut L {
    type Token = L::Token;
    type Error = L::Error;

    #[inline]
    fn next_token(&mut self) -> Result<Self::Token, Self::Error> {
        (**self).next_token()
    }
}
