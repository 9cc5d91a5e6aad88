//! # Clite Lexer
//!
//! A hand-written scanner producing one [`CliteToken`] per call. It dispatches
//! on the [`CharClass`] of the first non-blank character:
//!
//! - letters start identifiers, which become keywords on an exact table hit,
//! - digits start integer literals, or float literals when followed by `.`
//!   and more digits,
//! - `'` starts a one-character literal, blanks around the body allowed,
//! - operator, relational and assignment characters form one- or two-character
//!   symbols, matched greedily against the symbol table,
//! - delimiters and punctuators are single-character symbols.
//!
//! At end-of-input every call yields an [`TokenID::Eof`] token with an empty
//! lexeme. The only state is the cursor, so a cloned lexer resumes from the
//! same point.
//!
//! ```rust
//! # use clite::{CliteLexer, TokenID};
//! # use slr::Lexer;
//! let mut lexer = CliteLexer::new("x <= 4.5;");
//! let kinds: Vec<_> = std::iter::from_fn(|| {
//!     let t = lexer.next_token().unwrap();
//!     (t.token_id != TokenID::Eof).then_some(t.token_id)
//! })
//! .collect();
//! assert_eq!(
//!     kinds,
//!     [TokenID::Identifier, TokenID::LessEqual, TokenID::FloatLiteral, TokenID::Semicolon]
//! );
//! ```
use crate::{CliteToken, LexError, TokenID};
use slr::{Lexer, SourceCursor, Span};
use smartstring::alias::String;

/// Character categories driving the dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Letter,
    Digit,
    Operator,
    Punctuator,
    Quote,
    Blank,
    Delimiter,
    Relational,
    Assignment,
    Other,
    Eof,
}

impl CharClass {
    pub fn of(c: Option<char>) -> CharClass {
        let Some(c) = c else {
            return CharClass::Eof;
        };
        match c {
            c if c.is_alphabetic() || c == '_' => CharClass::Letter,
            c if c.is_ascii_digit() => CharClass::Digit,
            '+' | '-' | '*' | '/' => CharClass::Operator,
            ',' | ';' => CharClass::Punctuator,
            '\'' => CharClass::Quote,
            ' ' | '\t' | '\n' | '\r' => CharClass::Blank,
            '(' | ')' | '{' | '}' | '[' | ']' => CharClass::Delimiter,
            '<' | '>' | '!' | '&' | '|' => CharClass::Relational,
            '=' => CharClass::Assignment,
            _ => CharClass::Other,
        }
    }

    fn is_symbolic(self) -> bool {
        matches!(
            self,
            CharClass::Operator | CharClass::Relational | CharClass::Assignment
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexerStats {
    /// Characters consumed, blanks included.
    pub chars: usize,
    /// Tokens produced, end-of-input excluded.
    pub matches: usize,
}

#[derive(Debug, Clone)]
pub struct CliteLexer<'a> {
    cursor: SourceCursor<'a>,
    stats: LexerStats,
}

impl<'a> CliteLexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            cursor: SourceCursor::new(src),
            stats: LexerStats::default(),
        }
    }

    pub fn stats(&self) -> &LexerStats {
        &self.stats
    }

    fn peek_class(&self) -> CharClass {
        CharClass::of(self.cursor.peek())
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.cursor.bump();
        if c.is_some() {
            self.stats.chars += 1;
        }
        c
    }

    fn bump_while(&mut self, pred: impl Fn(CharClass) -> bool) {
        while pred(self.peek_class()) {
            self.bump();
        }
    }

    /// Scans the next token.
    fn scan(&mut self) -> Result<CliteToken, LexError> {
        self.bump_while(|cc| cc == CharClass::Blank);

        let start = self.cursor.position();
        let offset = self.cursor.offset();
        let token_id = match self.peek_class() {
            CharClass::Eof => TokenID::Eof,

            CharClass::Letter => {
                self.bump_while(|cc| matches!(cc, CharClass::Letter | CharClass::Digit));
                TokenID::lookup(self.cursor.slice_from(offset))
                    .filter(|id| id.is_keyword())
                    .unwrap_or(TokenID::Identifier)
            }

            CharClass::Digit => {
                self.bump_while(|cc| cc == CharClass::Digit);
                if self.cursor.peek() == Some('.') {
                    self.bump();
                    if self.peek_class() != CharClass::Digit {
                        return Err(LexError::MalformedFloat {
                            lexeme: self.cursor.slice_from(offset).into(),
                            span: Span::new(start, self.cursor.position()),
                        });
                    }
                    self.bump_while(|cc| cc == CharClass::Digit);
                    TokenID::FloatLiteral
                } else {
                    TokenID::IntLiteral
                }
            }

            CharClass::Quote => return self.scan_char_literal(),

            cc if cc.is_symbolic() => {
                self.bump();
                let one = self.cursor.slice_from(offset);
                if self.peek_class().is_symbolic() {
                    if let Some(c) = self.cursor.peek() {
                        let mut two = std::string::String::from(one);
                        two.push(c);
                        if TokenID::lookup(&two).is_some() {
                            self.bump();
                        }
                    }
                }
                let lexeme = self.cursor.slice_from(offset);
                TokenID::lookup(lexeme).ok_or_else(|| LexError::UnknownSymbol {
                    lexeme: lexeme.into(),
                    span: Span::new(start, self.cursor.position()),
                })?
            }

            CharClass::Delimiter | CharClass::Punctuator => {
                self.bump();
                let lexeme = self.cursor.slice_from(offset);
                TokenID::lookup(lexeme).ok_or_else(|| LexError::UnknownSymbol {
                    lexeme: lexeme.into(),
                    span: Span::new(start, self.cursor.position()),
                })?
            }

            _ => {
                return Err(LexError::UnexpectedChar {
                    ch: self.cursor.peek().unwrap_or_default(),
                    position: start,
                });
            }
        };

        Ok(CliteToken {
            token_id,
            lexeme: self.cursor.slice_from(offset).into(),
            span: Span::new(start, self.cursor.position()),
        })
    }

    /// `'`, blanks, one body character, blanks, `'`. The body is the lexeme.
    fn scan_char_literal(&mut self) -> Result<CliteToken, LexError> {
        let start = self.cursor.position();
        self.bump();
        self.bump_while(|cc| cc == CharClass::Blank);
        let body = match self.peek_class() {
            CharClass::Quote | CharClass::Eof => None,
            _ => self.bump(),
        };
        self.bump_while(|cc| cc == CharClass::Blank);
        let (Some(body), CharClass::Quote) = (body, self.peek_class()) else {
            return Err(LexError::MalformedChar {
                span: Span::new(start, self.cursor.position()),
            });
        };
        self.bump();
        let mut lexeme = String::new();
        lexeme.push(body);
        Ok(CliteToken {
            token_id: TokenID::CharLiteral,
            lexeme,
            span: Span::new(start, self.cursor.position()),
        })
    }
}

impl Lexer for CliteLexer<'_> {
    type Token = CliteToken;
    type Error = LexError;

    fn next_token(&mut self) -> Result<CliteToken, LexError> {
        let token = self.scan()?;
        if token.token_id != TokenID::Eof {
            self.stats.matches += 1;
        }
        log::trace!(
            "{:?} {:?} at {}",
            token.token_id,
            token.lexeme,
            token.span
        );
        Ok(token)
    }
}

/// All tokens of `src`, end-of-input excluded.
pub fn tokenize(src: &str) -> Result<Vec<CliteToken>, LexError> {
    let mut lexer = CliteLexer::new(src);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.token_id == TokenID::Eof {
            log::debug!("{:?}", lexer.stats());
            return Ok(tokens);
        }
        tokens.push(token);
    }
}
