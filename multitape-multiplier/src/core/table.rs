//! Deterministic transition tables, and the builder that phase programs assemble them with.

use super::{symbols_to_string, Move, Symbol, SYMBOLS, TAPES};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;

/// Anything usable as a machine state label.
pub trait StateId: Copy + Ord + Hash + Debug + Display {}

impl<T: Copy + Ord + Hash + Debug + Display> StateId for T {}

/// The symbols under the heads of every tape. Conventions: tape `i` is index `i`.
pub type ReadTuple = [Symbol; TAPES];

/// A table key: the current state and what the heads read.
pub type Key<S> = (S, ReadTuple);

/// The outcome of a matched rule. Writes happen before moves, tape by tape.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Transition<S> {
    pub next: S,
    pub write: [Symbol; TAPES],
    pub moves: [Move; TAPES],
}

/// A per-tape read pattern.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pat {
    Sym(Symbol),
    /// '0' or '1'.
    Bit,
    Any,
}

impl Pat {
    pub fn matches(self, s: Symbol) -> bool {
        match self {
            Pat::Sym(p) => p == s,
            Pat::Bit => s.is_bit(),
            Pat::Any => true,
        }
    }
}

/// A per-tape write instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Out {
    /// Write back whatever was read on this tape.
    Keep,
    Sym(Symbol),
    /// Write the symbol read on another tape.
    Copy(usize),
}

impl Out {
    fn resolve(self, tape: usize, read: &ReadTuple) -> Symbol {
        match self {
            Out::Keep => read[tape],
            Out::Sym(s) => s,
            Out::Copy(from) => read[from],
        }
    }
}

/// Every possible `ReadTuple`, in key order.
pub fn all_reads() -> impl Iterator<Item = ReadTuple> {
    (0..SYMBOLS.pow(TAPES as u32)).map(|n| {
        std::array::from_fn(|i| Symbol::ALL[n / SYMBOLS.pow((TAPES - 1 - i) as u32) % SYMBOLS])
    })
}

#[derive(Error, Debug, Eq, PartialEq)]
pub enum CompositionError<S: StateId> {
    #[error("two different rules for state {state} reading ({})", symbols_to_string(.read))]
    Conflict { state: S, read: ReadTuple },
    #[error("reachable state {state} has no rule reading ({}); {missing} combinations missing in total", symbols_to_string(.read))]
    Incomplete { state: S, read: ReadTuple, missing: usize },
}

/// An accumulating slice of a transition table. Phase programs each return one and the
/// composer merges them; a key defined twice with different outcomes is a conflict.
#[derive(Clone, Debug)]
pub struct TableBuilder<S> {
    rules: BTreeMap<Key<S>, Transition<S>>,
    conflicts: Vec<Key<S>>,
}

impl<S: StateId> Default for TableBuilder<S> {
    fn default() -> Self {
        TableBuilder {
            rules: BTreeMap::new(),
            conflicts: Vec::new(),
        }
    }
}

impl<S: StateId> TableBuilder<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of concrete entries so far.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Add one concrete entry.
    pub fn insert(&mut self, state: S, read: ReadTuple, t: Transition<S>) -> &mut Self {
        match self.rules.get(&(state, read)) {
            Some(old) if *old != t => self.conflicts.push((state, read)),
            Some(_) => {}
            None => {
                self.rules.insert((state, read), t);
            }
        }
        self
    }

    /// Add one entry for each `ReadTuple` matching the patterns.
    pub fn rule(
        &mut self,
        state: S,
        read: [Pat; TAPES],
        next: S,
        write: [Out; TAPES],
        moves: [Move; TAPES],
    ) -> &mut Self {
        for r in all_reads().filter(|r| read.iter().zip(r).all(|(p, &s)| p.matches(s))) {
            let write = std::array::from_fn(|i| write[i].resolve(i, &r));
            self.insert(state, r, Transition { next, write, moves });
        }
        self
    }

    /// Combine two slices.
    pub fn merge(mut self, other: TableBuilder<S>) -> Self {
        self.conflicts.extend(other.conflicts);
        for ((state, read), t) in other.rules {
            self.insert(state, read, t);
        }
        self
    }

    /// Freeze the table, failing on any conflicting definitions.
    pub fn build(self) -> Result<TransitionTable<S>, CompositionError<S>> {
        match self.conflicts.first() {
            Some(&(state, read)) => Err(CompositionError::Conflict { state, read }),
            None => Ok(TransitionTable { rules: self.rules }),
        }
    }
}

/// A deterministic mapping `(state, read) -> transition`. Immutable once built.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransitionTable<S> {
    rules: BTreeMap<Key<S>, Transition<S>>,
}

impl<S: StateId> TransitionTable<S> {
    pub fn get(&self, state: S, read: &ReadTuple) -> Option<&Transition<S>> {
        self.rules.get(&(state, *read))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All entries, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key<S>, &Transition<S>)> + '_ {
        self.rules.iter()
    }

    /// Every state named by the table, as a source or a target.
    pub fn states(&self) -> BTreeSet<S> {
        self.rules.iter().flat_map(|(&(f, _), t)| [f, t.next]).collect()
    }

    /// The states reachable from `start` by following rules.
    pub fn reachable(&self, start: S) -> BTreeSet<S> {
        let mut seen = BTreeSet::from([start]);
        let mut todo = vec![start];
        while let Some(q) = todo.pop() {
            let succ = self.rules.range((q, [Symbol::Blank; TAPES])..=(q, [Symbol::One; TAPES]));
            for (_, t) in succ {
                if seen.insert(t.next) {
                    todo.push(t.next);
                }
            }
        }
        seen
    }

    /// The `(state, read)` combinations with no rule, over reachable non-accepting states.
    pub fn gaps(&self, start: S, accept: &BTreeSet<S>) -> Vec<Key<S>> {
        self.reachable(start)
            .into_iter()
            .filter(|q| !accept.contains(q))
            .flat_map(|q| all_reads().map(move |r| (q, r)))
            .filter(|k| !self.rules.contains_key(k))
            .collect()
    }

    /// Like `gaps`, but as a pass/fail check.
    pub fn check_complete(&self, start: S, accept: &BTreeSet<S>) -> Result<(), CompositionError<S>> {
        let gaps = self.gaps(start, accept);
        match gaps.first() {
            Some(&(state, read)) => Err(CompositionError::Incomplete {
                state,
                read,
                missing: gaps.len(),
            }),
            None => Ok(()),
        }
    }
}
