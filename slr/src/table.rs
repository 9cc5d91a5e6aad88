//! # Transition Table
//!
//! Precomputed SLR(1) action and goto tables loaded from comma-separated text.
//!
//! The header row is `state, t1, ..., tk, $, n1, ..., nm`: terminal codes, the
//! end-of-input column, then nonterminal names. Each data row starts with a
//! state number followed by one action cell per terminal column and one goto
//! cell per nonterminal column.
//!
//! Action cells are `s<N>` (shift to state `N`), `r<N>` (reduce by production
//! `N`), empty (undefined) or any other marker, which means accept. Goto cells
//! are state numbers or empty. Rows shorter than the header leave their
//! trailing cells undefined.
//!
//! ```rust
//! # use slr::{Action, StateId, Table};
//! let table: Table = "state,31,$,E\n0,s1,,2\n1,,r1,\n2,,acc,\n".parse().unwrap();
//! assert_eq!(table.action_by_code(StateId(0), 31), Some(Action::Shift(StateId(1))));
//! assert_eq!(table.eof_action(StateId(2)), Some(Action::Accept));
//! assert_eq!(table.goto(StateId(0), "E"), Some(StateId(2)));
//! assert_eq!(table.goto(StateId(1), "E"), None);
//! ```
use crate::TokenKind;
use indexmap::{IndexMap, IndexSet};
use smartstring::alias::String;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Header cell naming the end-of-input column.
pub const EOF_COLUMN: &str = "$";

/// A row of the transition table. State 0 is the initial state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub u32);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StateId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// A defined action cell. Undefined cells are `None` in lookups and mean
/// syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Shift(StateId),
    Reduce(usize),
    Accept,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(s) => write!(f, "s{s}"),
            Action::Reduce(p) => write!(f, "r{p}"),
            Action::Accept => f.write_str("acc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("table has no header row")]
    MissingHeader,

    #[error("table header has no `{EOF_COLUMN}` column")]
    MissingEofColumn,

    #[error("table header column {column}: bad terminal code {text:?}")]
    BadTerminal { column: usize, text: std::string::String },

    #[error("table header column {column}: duplicate or empty symbol {text:?}")]
    BadNonTerminal { column: usize, text: std::string::String },

    #[error("table row {row}: bad state number {text:?}")]
    BadState { row: usize, text: std::string::String },

    #[error("table row {row}: duplicate state {state}")]
    DuplicateState { row: usize, state: StateId },

    #[error("table row {row}: {found} cells, header has {expected}")]
    RowTooLong {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("table row {row}, column {column}: bad action {text:?}")]
    BadAction {
        row: usize,
        column: usize,
        text: std::string::String,
    },

    #[error("table row {row}, column {column}: bad goto {text:?}")]
    BadGoto {
        row: usize,
        column: usize,
        text: std::string::String,
    },
}

#[derive(Debug, Clone, Default)]
struct Row {
    /// One cell per terminal column, the end-of-input cell last.
    actions: Vec<Option<Action>>,
    gotos: Vec<Option<StateId>>,
}

#[derive(Debug, Clone)]
pub struct Table {
    terminals: IndexSet<u16>,
    nonterminals: IndexSet<String>,
    rows: IndexMap<StateId, Row>,
}

impl Table {
    /// Loads a table from its header row followed by data rows. Blank lines
    /// are skipped.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = rows
            .into_iter()
            .enumerate()
            .filter(|(_, line)| !line.as_ref().trim().is_empty());

        let (_, header) = lines.next().ok_or(TableError::MissingHeader)?;
        let (terminals, nonterminals) = parse_header(header.as_ref())?;
        let mut table = Self {
            terminals,
            nonterminals,
            rows: IndexMap::new(),
        };

        for (i, line) in lines {
            let row_no = i + 1;
            let (state, row) = table.parse_row(row_no, line.as_ref())?;
            if table.rows.insert(state, row).is_some() {
                return Err(TableError::DuplicateState { row: row_no, state });
            }
        }

        log::debug!(
            "loaded table: {} states, {} terminals, {} nonterminals",
            table.rows.len(),
            table.terminals.len(),
            table.nonterminals.len()
        );
        Ok(table)
    }

    fn parse_row(&self, row: usize, line: &str) -> Result<(StateId, Row), TableError> {
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        let n_actions = self.terminals.len() + 1;
        let expected = 1 + n_actions + self.nonterminals.len();
        if cells.len() > expected {
            return Err(TableError::RowTooLong {
                row,
                found: cells.len(),
                expected,
            });
        }

        let state = cells[0]
            .parse::<u32>()
            .map(StateId)
            .map_err(|_| TableError::BadState {
                row,
                text: cells[0].into(),
            })?;

        let cell = |column: usize| cells.get(column).copied().unwrap_or("");
        let mut actions = Vec::with_capacity(n_actions);
        for column in 1..=n_actions {
            actions.push(parse_action(cell(column)).map_err(|text| TableError::BadAction {
                row,
                column,
                text,
            })?);
        }
        let mut gotos = Vec::with_capacity(self.nonterminals.len());
        for column in n_actions + 1..expected {
            let text = cell(column);
            gotos.push(if text.is_empty() {
                None
            } else {
                Some(text.parse::<u32>().map(StateId).map_err(|_| {
                    TableError::BadGoto {
                        row,
                        column,
                        text: text.into(),
                    }
                })?)
            });
        }
        Ok((state, Row { actions, gotos }))
    }

    /// Action for `kind` in `state`; `None` means no action is defined.
    pub fn action<K: TokenKind>(&self, state: StateId, kind: K) -> Option<Action> {
        if kind == K::EOF {
            self.eof_action(state)
        } else {
            self.action_by_code(state, kind.code())
        }
    }

    pub fn action_by_code(&self, state: StateId, code: u16) -> Option<Action> {
        let column = self.terminals.get_index_of(&code)?;
        self.rows.get(&state)?.actions[column]
    }

    pub fn eof_action(&self, state: StateId) -> Option<Action> {
        self.rows.get(&state)?.actions.last().copied().flatten()
    }

    /// Successor state after reducing to `nonterminal` from `state`.
    pub fn goto(&self, state: StateId, nonterminal: &str) -> Option<StateId> {
        self.goto_column(nonterminal)
            .and_then(|column| self.goto_at(state, column))
    }

    /// Position of `nonterminal` among the goto columns.
    pub fn goto_column(&self, nonterminal: &str) -> Option<usize> {
        self.nonterminals.get_index_of(nonterminal)
    }

    pub fn goto_at(&self, state: StateId, column: usize) -> Option<StateId> {
        self.rows.get(&state)?.gotos.get(column).copied().flatten()
    }

    /// Terminal kinds with a defined action in `state`, in column order.
    /// Header codes that `K` does not know are skipped.
    pub fn expected<K: TokenKind>(&self, state: StateId) -> Vec<K> {
        let Some(row) = self.rows.get(&state) else {
            return Vec::new();
        };
        let eof = std::iter::once(K::EOF);
        self.terminals
            .iter()
            .map(|&code| K::from_code(code))
            .chain(eof.map(Some))
            .zip(&row.actions)
            .filter_map(|(kind, action)| action.and(kind))
            .collect()
    }

    pub fn state_count(&self) -> usize {
        self.rows.len()
    }

    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.rows.keys().copied()
    }

    pub fn terminal_codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.terminals.iter().copied()
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &str> + '_ {
        self.nonterminals.iter().map(|s| s.as_str())
    }

    /// Defined actions as `(state, column label, action)`, the end-of-input
    /// column labelled `$`.
    pub fn actions(&self) -> impl Iterator<Item = (StateId, std::string::String, Action)> + '_ {
        let labels: Vec<std::string::String> = self
            .terminals
            .iter()
            .map(|c| c.to_string())
            .chain(std::iter::once(EOF_COLUMN.to_string()))
            .collect();
        self.rows.iter().flat_map(move |(&state, row)| {
            row.actions
                .iter()
                .zip(labels.clone())
                .filter_map(move |(a, label)| a.map(|a| (state, label, a)))
        })
    }

    /// Defined gotos as `(state, nonterminal, successor)`.
    pub fn gotos(&self) -> impl Iterator<Item = (StateId, &str, StateId)> + '_ {
        self.rows.iter().flat_map(move |(&state, row)| {
            row.gotos
                .iter()
                .zip(self.nonterminals.iter())
                .filter_map(move |(g, name)| g.map(|g| (state, name.as_str(), g)))
        })
    }
}

impl FromStr for Table {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rows(s.lines())
    }
}

fn parse_header(line: &str) -> Result<(IndexSet<u16>, IndexSet<String>), TableError> {
    let cells: Vec<&str> = line.split(',').map(str::trim).collect();
    let eof = cells
        .iter()
        .skip(1)
        .position(|c| *c == EOF_COLUMN)
        .map(|i| i + 1)
        .ok_or(TableError::MissingEofColumn)?;

    let mut terminals = IndexSet::new();
    for (column, text) in cells.iter().enumerate().take(eof).skip(1) {
        let code = text.parse::<u16>().map_err(|_| TableError::BadTerminal {
            column,
            text: (*text).into(),
        })?;
        if !terminals.insert(code) {
            return Err(TableError::BadTerminal {
                column,
                text: (*text).into(),
            });
        }
    }

    let mut nonterminals = IndexSet::new();
    for (column, text) in cells.iter().enumerate().skip(eof + 1) {
        if text.is_empty() || !nonterminals.insert(String::from(*text)) {
            return Err(TableError::BadNonTerminal {
                column,
                text: (*text).into(),
            });
        }
    }
    Ok((terminals, nonterminals))
}

/// Decodes one action cell; `Err` carries the offending text.
fn parse_action(text: &str) -> Result<Option<Action>, std::string::String> {
    if text.is_empty() {
        return Ok(None);
    }
    let number = |rest: &str| rest.parse::<u32>().map_err(|_| text.to_string());
    if let Some(rest) = text.strip_prefix('s') {
        Ok(Some(Action::Shift(StateId(number(rest)?))))
    } else if let Some(rest) = text.strip_prefix('r') {
        Ok(Some(Action::Reduce(number(rest)? as usize)))
    } else {
        Ok(Some(Action::Accept))
    }
}
