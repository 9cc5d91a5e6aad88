//! Source positions, spans and a character cursor for hand-written lexers.
//!
//! Positions are stored 0-based and rendered 1-based, so a [`Span`] printed in
//! a diagnostic reads the way an editor shows it.
//!
//! ```rust
//! # use slr::{Position, SourceCursor, Span};
//! let mut cur = SourceCursor::new("ab\ncd");
//! cur.bump();
//! cur.bump();
//! cur.bump();
//! assert_eq!(cur.position(), Position::new(1, 0));
//! assert_eq!(cur.position().to_string(), "2:1");
//! ```
use std::fmt;

/// A 0-based line/column position in source text.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// 0-based line number.
    pub line: usize,
    /// 0-based column number (character position in the line).
    pub column: usize,
}

impl Position {
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A half-open source range: `[start, end)`.
///
/// Every token carries one; the end-of-input token carries an empty span at
/// the final position.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// An empty span located at `pos`.
    #[inline]
    pub const fn at(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the inclusive 0-based line range spanned by this `Span`.
    #[inline]
    pub fn line_range(&self) -> (usize, usize) {
        (self.start.line, self.end.line)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Build a [`Span`] inline from 0-based line/column coordinates.
///
/// ```rust
/// # use slr::span;
/// let s = span!(0, 4, 0, 7);
/// assert_eq!(s.end.column, 7);
/// assert_eq!(s.to_string(), "1:5-1:8");
/// ```
#[macro_export]
macro_rules! span {
    ($line_start:expr, $col_start:expr, $line_end:expr, $col_end:expr) => {
        $crate::Span {
            start: $crate::Position {
                line: $line_start,
                column: $col_start,
            },
            end: $crate::Position {
                line: $line_end,
                column: $col_end,
            },
        }
    };
}

/// Walks a `&str` one character at a time, tracking byte offset and
/// line/column position.
///
/// Lexers read ahead with [`peek`](Self::peek) and [`peek_nth`](Self::peek_nth),
/// consume with [`bump`](Self::bump), and cut lexemes with
/// [`slice_from`](Self::slice_from).
#[derive(Debug, Clone)]
pub struct SourceCursor<'a> {
    src: &'a str,
    offset: usize,
    position: Position,
}

impl<'a> SourceCursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            offset: 0,
            position: Position::default(),
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Byte offset of the next unread character.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.offset >= self.src.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.src[self.offset..].chars().next()
    }

    /// Looks `n` characters past the next one; `peek_nth(0)` equals `peek()`.
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.src[self.offset..].chars().nth(n)
    }

    /// Consumes one character, advancing the position past it.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 0;
        } else {
            self.position.column += 1;
        }
        Some(c)
    }

    /// Consumes characters while `pred` holds.
    pub fn bump_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }

    /// Text between byte offset `start` and the current offset.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.src[start..self.offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_tracks_lines_and_columns() {
        let mut cur = SourceCursor::new("x\n\tyz");
        assert_eq!(cur.bump(), Some('x'));
        assert_eq!(cur.position(), Position::new(0, 1));
        assert_eq!(cur.bump(), Some('\n'));
        assert_eq!(cur.position(), Position::new(1, 0));
        assert_eq!(cur.bump(), Some('\t'));
        assert_eq!(cur.peek(), Some('y'));
        assert_eq!(cur.peek_nth(1), Some('z'));
        assert_eq!(cur.peek_nth(2), None);
        cur.bump_while(|c| c.is_alphabetic());
        assert!(cur.is_eof());
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.position(), Position::new(1, 3));
    }

    #[test]
    fn slice_from_handles_multibyte_text() {
        let mut cur = SourceCursor::new("é1");
        let start = cur.offset();
        cur.bump();
        assert_eq!(cur.slice_from(start), "é");
        assert_eq!(cur.offset(), 2);
        assert_eq!(cur.position().column, 1);
    }

    #[test]
    fn span_merge_and_display() {
        let a = span!(0, 4, 0, 6);
        let b = span!(1, 0, 1, 2);
        let m = a.merge(&b);
        assert_eq!(m, span!(0, 4, 1, 2));
        assert_eq!(m.line_range(), (0, 1));
        assert_eq!(m.to_string(), "1:5-2:3");
        assert!(Span::at(Position::new(2, 3)).is_empty());
        assert_eq!(Span::at(Position::new(2, 3)).to_string(), "3:4");
    }
}
