//! Fixed-width binary records, one per transition, in the style of the bbchallenge database.

use super::{indexed, BadEncoding};
use crate::core::{MachineDefinition, Move, Record, StateId, Symbol, TAPES};
use zerocopy::{AsBytes, FromBytes, FromZeroes};

/// One transition as bytes. Every field is an index: into the state list, the alphabet, or
/// the move order L, R, S.
#[derive(AsBytes, FromBytes, FromZeroes, Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(C)]
pub struct PackedRecord {
    state: u8,
    read: [u8; TAPES],
    next: u8,
    write: [u8; TAPES],
    moves: [u8; TAPES],
}

pub const PACKED_RECORD_SIZE: usize = std::mem::size_of::<PackedRecord>();

fn state_byte(q: usize) -> Result<u8, BadEncoding> {
    u8::try_from(q).map_err(|_| BadEncoding::TooManyStates(q + 1))
}

impl PackedRecord {
    fn pack(r: &Record<usize>) -> Result<PackedRecord, BadEncoding> {
        Ok(PackedRecord {
            state: state_byte(r.current_state)?,
            read: r.read_symbols.map(|s| s.index() as u8),
            next: state_byte(r.next_state)?,
            write: r.write_symbols.map(|s| s.index() as u8),
            moves: r.moves.map(|d| d.index() as u8),
        })
    }

    fn unpack(&self) -> Result<Record<usize>, BadEncoding> {
        let symbols = |bytes: [u8; TAPES]| -> Result<[Symbol; TAPES], BadEncoding> {
            let mut out = [Symbol::Blank; TAPES];
            for (s, b) in out.iter_mut().zip(bytes) {
                *s = Symbol::from_index(b as usize).ok_or(BadEncoding::Index {
                    field: "symbol",
                    value: b as usize,
                })?;
            }
            Ok(out)
        };
        let mut moves = [Move::Stay; TAPES];
        for (d, b) in moves.iter_mut().zip(self.moves) {
            *d = Move::from_index(b as usize).ok_or(BadEncoding::Index {
                field: "move",
                value: b as usize,
            })?;
        }
        Ok(Record {
            current_state: self.state as usize,
            read_symbols: symbols(self.read)?,
            next_state: self.next as usize,
            write_symbols: symbols(self.write)?,
            moves,
        })
    }
}

/// The transition table as consecutive records, in key order.
pub fn to_packed<S: StateId>(def: &MachineDefinition<S>) -> Result<Vec<u8>, BadEncoding> {
    if def.states.len() > 256 {
        return Err(BadEncoding::TooManyStates(def.states.len()));
    }
    let records = indexed(def)?
        .transitions
        .iter()
        .map(PackedRecord::pack)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records.as_bytes().to_vec())
}

/// Read records back, in file order.
pub fn from_packed(bytes: &[u8]) -> Result<Vec<Record<usize>>, BadEncoding> {
    if bytes.len() % PACKED_RECORD_SIZE != 0 {
        return Err(BadEncoding::Length(bytes.len()));
    }
    bytes
        .chunks_exact(PACKED_RECORD_SIZE)
        .map(|chunk| {
            PackedRecord::read_from(chunk)
                .ok_or(BadEncoding::Length(bytes.len()))?
                .unpack()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Machine, Out, Pat, TableBuilder};
    use crate::program::compose;

    #[test]
    fn test_layout() {
        assert_eq!(PACKED_RECORD_SIZE, 11);
        let r = Record {
            current_state: 4,
            read_symbols: [Symbol::One, Symbol::Blank, Symbol::Zero],
            next_state: 9,
            write_symbols: [Symbol::One, Symbol::One, Symbol::Blank],
            moves: [Move::Left, Move::Right, Move::Stay],
        };
        let packed = PackedRecord::pack(&r).unwrap();
        assert_eq!(packed.as_bytes(), b"\x04\x02\x00\x01\x09\x02\x02\x00\x00\x01\x02");
        assert_eq!(packed.unpack().unwrap(), r);
    }

    #[test]
    fn test_composed_machine() {
        let def = compose().unwrap().definition();
        let bytes = to_packed(&def).unwrap();
        assert_eq!(bytes.len(), def.transitions.len() * PACKED_RECORD_SIZE);
        assert_eq!(from_packed(&bytes).unwrap(), indexed(&def).unwrap().transitions);
    }

    #[test]
    fn test_rejects() {
        assert!(matches!(from_packed(&[0; 12]), Err(BadEncoding::Length(12))));
        let bad_move = b"\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x03";
        assert!(matches!(from_packed(bad_move), Err(BadEncoding::Index { field: "move", value: 3 })));

        let mut b = TableBuilder::<u16>::new();
        for q in 0..300 {
            b.rule(q, [Pat::Any; TAPES], q + 1, [Out::Keep; TAPES], [Move::Stay; TAPES]);
        }
        let tm = Machine::new(b.build().unwrap(), 0, [300]);
        assert!(matches!(to_packed(&tm.definition()), Err(BadEncoding::TooManyStates(301))));
    }
}
