//! A k-tape machine definition: an immutable transition table plus start and accept states.

use super::{Move, StateId, Symbol, TransitionTable, TAPES};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One transition table entry, as external encoders see it.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct Record<S> {
    pub current_state: S,
    pub read_symbols: [Symbol; TAPES],
    pub next_state: S,
    pub write_symbols: [Symbol; TAPES],
    pub moves: [Move; TAPES],
}

/// Everything an encoder needs to reproduce a machine.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct MachineDefinition<S> {
    pub states: Vec<S>,
    pub alphabet: Vec<Symbol>,
    pub start_state: S,
    pub accept_states: Vec<S>,
    pub blank: Symbol,
    pub num_tapes: usize,
    pub transitions: Vec<Record<S>>,
}

impl<S: StateId> MachineDefinition<S> {
    /// The position of `q` in the ordered state list.
    pub fn state_index(&self, q: &S) -> Option<usize> {
        self.states.iter().position(|s| s == q)
    }
}

/// A deterministic machine. Reaching a state in `accept` is success; the accept states are
/// expected to have no outgoing rules, so a run ends there by table miss.
#[derive(Clone, Debug)]
pub struct Machine<S> {
    table: TransitionTable<S>,
    start: S,
    accept: BTreeSet<S>,
}

impl<S: StateId> Machine<S> {
    pub fn new(table: TransitionTable<S>, start: S, accept: impl IntoIterator<Item = S>) -> Self {
        Machine {
            table,
            start,
            accept: accept.into_iter().collect(),
        }
    }

    pub fn table(&self) -> &TransitionTable<S> {
        &self.table
    }

    pub fn start(&self) -> S {
        self.start
    }

    pub fn accept_states(&self) -> &BTreeSet<S> {
        &self.accept
    }

    pub fn is_accepting(&self, q: S) -> bool {
        self.accept.contains(&q)
    }

    /// All states, ordered: every table source/target plus the start and accept states.
    pub fn states(&self) -> Vec<S> {
        let mut states = self.table.states();
        states.insert(self.start);
        states.extend(self.accept.iter().copied());
        states.into_iter().collect()
    }

    /// The table as a sequence of records, in key order.
    pub fn records(&self) -> impl Iterator<Item = Record<S>> + '_ {
        self.table.iter().map(|(&(f, r), t)| Record {
            current_state: f,
            read_symbols: r,
            next_state: t.next,
            write_symbols: t.write,
            moves: t.moves,
        })
    }

    pub fn definition(&self) -> MachineDefinition<S> {
        MachineDefinition {
            states: self.states(),
            alphabet: Symbol::ALL.to_vec(),
            start_state: self.start,
            accept_states: self.accept.iter().copied().collect(),
            blank: Symbol::Blank,
            num_tapes: TAPES,
            transitions: self.records().collect(),
        }
    }
}
