//! Arithmetic grammar, its SLR(1) table and a tiny scanner for engine tests.
use crate::{Lexer, Position, SourceCursor, Span, Token, TokenKind};
use thiserror::Error;

pub const ARITH_GRAMMAR: &str = "\
E' -> E
E -> E + T
E -> T
T -> T * F
T -> F
F -> ( E )
F -> int_literal
";

pub const ARITH_TABLE: &str = "\
state,3,4,23,25,31,$,E,T,F
0,s4,,,,s5,,1,2,3
1,,,s6,,,acc,,,
2,,r2,r2,s7,,r2,,,
3,,r4,r4,r4,,r4,,,
4,s4,,,,s5,,8,2,3
5,,r6,r6,r6,,r6,,,
6,s4,,,,s5,,,9,3
7,s4,,,,s5,,,,10
8,,s11,s6,,,,,,
9,,r1,r1,s7,,r1,,,
10,,r3,r3,r3,,r3,,,
11,,r5,r5,r5,,r5,,,
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tok {
    Eof,
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Int,
}

impl From<Tok> for u16 {
    fn from(tok: Tok) -> Self {
        match tok {
            Tok::Eof => 0,
            Tok::LParen => 3,
            Tok::RParen => 4,
            Tok::Plus => 23,
            Tok::Minus => 24,
            Tok::Star => 25,
            Tok::Int => 31,
        }
    }
}

impl TryFrom<u16> for Tok {
    type Error = u16;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Tok::Eof,
            3 => Tok::LParen,
            4 => Tok::RParen,
            23 => Tok::Plus,
            24 => Tok::Minus,
            25 => Tok::Star,
            31 => Tok::Int,
            _ => return Err(code),
        })
    }
}

const SYMBOLS: &[(Tok, &str)] = &[
    (Tok::Eof, "$"),
    (Tok::LParen, "("),
    (Tok::RParen, ")"),
    (Tok::Plus, "+"),
    (Tok::Minus, "-"),
    (Tok::Star, "*"),
    (Tok::Int, "int_literal"),
];

impl TokenKind for Tok {
    const EOF: Self = Tok::Eof;

    fn from_symbol(symbol: &str) -> Option<Self> {
        SYMBOLS.iter().find(|(_, s)| *s == symbol).map(|(t, _)| *t)
    }

    fn symbol(self) -> &'static str {
        SYMBOLS
            .iter()
            .find(|(t, _)| *t == self)
            .map_or("?", |(_, s)| *s)
    }
}

#[derive(Debug, Clone)]
pub struct ArithToken {
    kind: Tok,
    lexeme: String,
    span: Span,
}

impl Token for ArithToken {
    type Kind = Tok;

    fn kind(&self) -> Tok {
        self.kind
    }
    fn lexeme(&self) -> &str {
        &self.lexeme
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected {ch:?} at {position}")]
pub struct ArithLexError {
    pub ch: char,
    pub position: Position,
}

pub struct ArithLexer<'a> {
    cursor: SourceCursor<'a>,
}

impl<'a> ArithLexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            cursor: SourceCursor::new(src),
        }
    }

    /// Lexemes up to end-of-input.
    pub fn lexemes(mut self) -> Vec<String> {
        let mut out = Vec::new();
        loop {
            let token = self.next_token().unwrap();
            if token.kind == Tok::Eof {
                return out;
            }
            out.push(token.lexeme);
        }
    }
}

impl Lexer for ArithLexer<'_> {
    type Token = ArithToken;
    type Error = ArithLexError;

    fn next_token(&mut self) -> Result<ArithToken, ArithLexError> {
        self.cursor.bump_while(char::is_whitespace);
        let start = self.cursor.position();
        let offset = self.cursor.offset();
        let kind = match self.cursor.peek() {
            None => Tok::Eof,
            Some(c) if c.is_ascii_digit() => {
                self.cursor.bump_while(|c| c.is_ascii_digit());
                Tok::Int
            }
            Some(c) => {
                let kind = match c {
                    '(' => Tok::LParen,
                    ')' => Tok::RParen,
                    '+' => Tok::Plus,
                    '-' => Tok::Minus,
                    '*' => Tok::Star,
                    _ => {
                        return Err(ArithLexError {
                            ch: c,
                            position: start,
                        });
                    }
                };
                self.cursor.bump();
                kind
            }
        };
        Ok(ArithToken {
            kind,
            lexeme: self.cursor.slice_from(offset).to_string(),
            span: Span::new(start, self.cursor.position()),
        })
    }
}
