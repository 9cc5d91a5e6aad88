//! Step-trace hooks.
//!
//! A [`Trace`] sink sees every engine step before its action is applied. It
//! cannot influence control flow. [`NoTrace`] is the default; [`LogTrace`]
//! forwards steps to the `log` facade; any `FnMut(&Step<K>)` closure works too.
use crate::{Action, Grammar, ParserStats, StackEntry, StateId, Symbol, TokenKind};

/// Engine state at one step, observed before `action` is applied.
#[derive(Debug, Clone, Copy)]
pub struct Step<'a, K: TokenKind> {
    pub state: StateId,
    pub lookahead: K,
    pub lexeme: &'a str,
    pub action: Action,
    /// The state/symbol stack, bottom first.
    pub stack: &'a [StackEntry<K>],
    /// Number of subtrees waiting on the tree stack.
    pub trees: usize,
    pub grammar: &'a Grammar<K>,
}

impl<K: TokenKind> Step<'_, K> {
    /// Stack contents as space-separated states and symbol names.
    pub fn render_stack(&self) -> String {
        self.stack
            .iter()
            .map(|entry| match entry {
                StackEntry::State(s) => s.to_string(),
                StackEntry::Symbol(Symbol::Terminal(k)) => k.symbol().to_string(),
                StackEntry::Symbol(sym) => self.grammar.symbol_name(*sym).to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub trait Trace<K: TokenKind> {
    fn step(&mut self, step: &Step<'_, K>);

    /// Called once after a successful parse.
    fn finish(&mut self, _stats: &ParserStats) {}
}

/// Discards every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl<K: TokenKind> Trace<K> for NoTrace {
    #[inline]
    fn step(&mut self, _step: &Step<'_, K>) {}
}

/// Logs each step at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl<K: TokenKind> Trace<K> for LogTrace {
    fn step(&mut self, step: &Step<'_, K>) {
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "[{}] <- {:?} {:?}: {}",
                step.render_stack(),
                step.lookahead,
                step.lexeme,
                step.action
            );
        }
    }

    fn finish(&mut self, stats: &ParserStats) {
        log::debug!("{stats:?}");
    }
}

impl<K, F> Trace<K> for F
where
    K: TokenKind,
    F: FnMut(&Step<'_, K>),
{
    #[inline]
    fn step(&mut self, step: &Step<'_, K>) {
        self(step)
    }
}
