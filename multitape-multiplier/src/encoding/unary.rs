//! The unary binary encoding, over the alphabet {0, 1}.
//!
//! A number `i` is written `0^(i+1)`: states by position in the state list, symbols by
//! position in the alphabet, moves as L=`0`, R=`00`, S=`000`. Components of one transition
//! are joined by `1`, transitions by `11`. The whole string is five sections joined by `111`:
//! tape count (`0^k`), start state, blank, accept states (joined by `1`), transitions.

use super::{indexed, BadEncoding};
use crate::core::{MachineDefinition, Move, Record, StateId, Symbol, TAPES};

fn unary(i: usize) -> String {
    "0".repeat(i + 1)
}

fn ununary(section: &'static str, text: &str) -> Result<usize, BadEncoding> {
    if text.is_empty() || text.bytes().any(|b| b != b'0') {
        return Err(BadEncoding::Unary {
            section,
            text: text.to_string(),
        });
    }
    Ok(text.len() - 1)
}

pub fn to_unary<S: StateId>(def: &MachineDefinition<S>) -> Result<String, BadEncoding> {
    let def = indexed(def)?;
    let accepts: Vec<String> = def.accept_states.iter().map(|&q| unary(q)).collect();
    let transitions: Vec<String> = def
        .transitions
        .iter()
        .map(|r| {
            let parts = std::iter::once(unary(r.current_state))
                .chain(r.read_symbols.iter().map(|s| unary(s.index())))
                .chain([unary(r.next_state)])
                .chain(r.write_symbols.iter().map(|s| unary(s.index())))
                .chain(r.moves.iter().map(|d| unary(d.index())));
            parts.collect::<Vec<_>>().join("1")
        })
        .collect();
    let sections = [
        "0".repeat(def.num_tapes),
        unary(def.start_state),
        unary(def.blank.index()),
        accepts.join("1"),
        transitions.join("11"),
    ];
    Ok(sections.join("111"))
}

fn symbol(section: &'static str, text: &str) -> Result<Symbol, BadEncoding> {
    let i = ununary(section, text)?;
    Symbol::from_index(i).ok_or(BadEncoding::Index { field: "symbol", value: i })
}

fn record(text: &str) -> Result<Record<usize>, BadEncoding> {
    let parts: Vec<&str> = text.split('1').collect();
    if parts.len() != 2 + 3 * TAPES {
        return Err(BadEncoding::Unary {
            section: "transition",
            text: text.to_string(),
        });
    }
    let symbols = |from: usize| -> Result<[Symbol; TAPES], BadEncoding> {
        let mut out = [Symbol::Blank; TAPES];
        for (i, s) in out.iter_mut().enumerate() {
            *s = symbol("transition", parts[from + i])?;
        }
        Ok(out)
    };
    let mut moves = [Move::Stay; TAPES];
    for (i, d) in moves.iter_mut().enumerate() {
        let m = ununary("transition", parts[2 + 2 * TAPES + i])?;
        *d = Move::from_index(m).ok_or(BadEncoding::Index { field: "move", value: m })?;
    }
    Ok(Record {
        current_state: ununary("transition", parts[0])?,
        read_symbols: symbols(1)?,
        next_state: ununary("transition", parts[1 + TAPES])?,
        write_symbols: symbols(2 + TAPES)?,
        moves,
    })
}

/// Parse the unary form back. States come back as indices; the state list is every index up
/// to the largest one mentioned.
pub fn from_unary(text: &str) -> Result<MachineDefinition<usize>, BadEncoding> {
    let sections: Vec<&str> = text.split("111").collect();
    let &[tapes, start, blank, accepts, transitions] = sections.as_slice() else {
        return Err(BadEncoding::Sections(sections.len()));
    };
    let num_tapes = ununary("tape count", tapes)? + 1;
    if num_tapes != TAPES {
        return Err(BadEncoding::Index { field: "tape count", value: num_tapes });
    }
    let start_state = ununary("start state", start)?;
    let accept_states = match accepts {
        "" => Vec::new(),
        _ => accepts
            .split('1')
            .map(|q| ununary("accept states", q))
            .collect::<Result<_, _>>()?,
    };
    let transitions: Vec<Record<usize>> = match transitions {
        "" => Vec::new(),
        _ => transitions.split("11").map(record).collect::<Result<_, _>>()?,
    };
    let top = transitions
        .iter()
        .flat_map(|r| [r.current_state, r.next_state])
        .chain(accept_states.iter().copied())
        .chain([start_state])
        .max()
        .unwrap_or(start_state);
    Ok(MachineDefinition {
        states: (0..=top).collect(),
        alphabet: Symbol::ALL.to_vec(),
        start_state,
        accept_states,
        blank: symbol("blank", blank)?,
        num_tapes,
        transitions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::compose;

    #[test]
    fn test_component_codes() {
        assert_eq!(unary(0), "0");
        assert_eq!(unary(2), "000");
        assert_eq!(ununary("test", "0000").unwrap(), 3);
        assert!(ununary("test", "").is_err());
        assert!(ununary("test", "010").is_err());
    }

    #[test]
    fn test_composed_machine() {
        let def = compose().unwrap().definition();
        let text = to_unary(&def).unwrap();
        assert!(text.bytes().all(|b| b == b'0' || b == b'1'));
        assert!(text.starts_with("000111"));
        let back = from_unary(&text).unwrap();
        assert_eq!(back, indexed(&def).unwrap());
    }

    #[test]
    fn test_first_transition() {
        // q_start reading (#, #, #): the copy ends, tape 1 right, tape 2 left.
        let def = compose().unwrap().definition();
        let text = to_unary(&def).unwrap();
        let first = text.split("111").nth(4).unwrap().split("11").next().unwrap();
        let parts = ["0", "0", "0", "0", "00", "0", "0", "0", "00", "0", "000"];
        assert_eq!(first, parts.join("1"));
        let r = record(first).unwrap();
        assert_eq!((r.current_state, r.next_state), (0, 1));
        assert_eq!(r.read_symbols, [Symbol::Blank; TAPES]);
        assert_eq!(r.moves, [Move::Right, Move::Left, Move::Stay]);
    }

    fn join(sections: &[&str]) -> String {
        sections.join("111")
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(from_unary("0101"), Err(BadEncoding::Sections(1))));
        assert!(matches!(from_unary(&join(&["000", "", "0", "0", ""])), Err(BadEncoding::Unary { .. })));
        assert!(matches!(
            from_unary(&join(&["00", "0", "0", "0", ""])),
            Err(BadEncoding::Index { field: "tape count", .. })
        ));
        assert!(matches!(
            from_unary(&join(&["000", "0", "0000", "0", ""])),
            Err(BadEncoding::Index { field: "symbol", .. })
        ));
        // One component short.
        let short = ["0"; 10].join("1");
        assert!(matches!(
            from_unary(&join(&["000", "0", "0", "0", short.as_str()])),
            Err(BadEncoding::Unary { section: "transition", .. })
        ));
        let empty = from_unary(&join(&["000", "0", "0", "", ""])).unwrap();
        assert!(empty.transitions.is_empty() && empty.accept_states.is_empty());
        assert_eq!(empty.states, [0]);
    }
}
