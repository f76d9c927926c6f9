//! Machine-definition encodings: JSON, the unary binary string, and packed fixed-width records.

mod packed;
mod unary;

pub use packed::*;
pub use unary::*;

use crate::core::{MachineDefinition, Record, StateId};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BadEncoding {
    #[error("bad JSON machine definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected 5 sections separated by '111', found {0}")]
    Sections(usize),
    #[error("malformed unary component {text:?} in {section}")]
    Unary { section: &'static str, text: String },
    #[error("state {0} is not in the state list")]
    UnknownState(String),
    #[error("{field} index {value} out of range")]
    Index { field: &'static str, value: usize },
    #[error("packed records hold at most 256 states, machine has {0}")]
    TooManyStates(usize),
    #[error("packed data length {0} is not a multiple of the record size")]
    Length(usize),
}

/// Pretty-printed JSON, with the field names of `MachineDefinition`.
pub fn to_json<S: StateId + Serialize>(def: &MachineDefinition<S>) -> Result<String, BadEncoding> {
    Ok(serde_json::to_string_pretty(def)?)
}

/// Read a JSON definition back. State names come back as plain strings.
pub fn from_json(text: &str) -> Result<MachineDefinition<String>, BadEncoding> {
    Ok(serde_json::from_str(text)?)
}

/// The same definition with every state replaced by its position in `def.states`.
pub fn indexed<S: StateId>(def: &MachineDefinition<S>) -> Result<MachineDefinition<usize>, BadEncoding> {
    let index = |q: &S| {
        def.state_index(q)
            .ok_or_else(|| BadEncoding::UnknownState(q.to_string()))
    };
    let transitions = def
        .transitions
        .iter()
        .map(|r| {
            Ok(Record {
                current_state: index(&r.current_state)?,
                read_symbols: r.read_symbols,
                next_state: index(&r.next_state)?,
                write_symbols: r.write_symbols,
                moves: r.moves,
            })
        })
        .collect::<Result<_, BadEncoding>>()?;
    Ok(MachineDefinition {
        states: (0..def.states.len()).collect(),
        alphabet: def.alphabet.clone(),
        start_state: index(&def.start_state)?,
        accept_states: def.accept_states.iter().map(index).collect::<Result<_, _>>()?,
        blank: def.blank,
        num_tapes: def.num_tapes,
        transitions,
    })
}
