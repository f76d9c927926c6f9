//! The n-ary binary multiplication program, built from small phase programs.
//!
//! Each phase is a function returning a `TableBuilder` over the states it is given; the
//! composer merges them. Tape roles: tape 1 holds the input and is scanned for multiplier
//! bits, tape 2 the multiplicand (and finally the product), tape 3 the accumulator.

pub mod add;
mod compose;
mod copy;
mod navigate;
mod select;
mod shift;
mod state;
mod transfer;

pub use add::ripple_carry_add;
pub use compose::*;
pub use copy::*;
pub use navigate::*;
pub use select::*;
pub use shift::*;
pub use state::*;
pub use transfer::*;

use crate::core::{Out, TAPES};

/// Leave every tape as read.
pub(crate) const KEEP: [Out; TAPES] = [Out::Keep; TAPES];

#[cfg(test)]
pub(crate) mod tests {
    use super::State;
    use crate::core::{Machine, TableBuilder};

    /// A single phase run on its own, accepting in `State::Accept`.
    pub fn phase_machine(b: TableBuilder<State>, start: State) -> Machine<State> {
        Machine::new(b.build().unwrap(), start, [State::Accept])
    }

    /// Every bit string of length 1 to `max_len`.
    pub fn bit_strings(max_len: usize) -> Vec<String> {
        (1..=max_len)
            .flat_map(|len| (0..1u32 << len).map(move |n| format!("{n:0len$b}")))
            .collect()
    }

    #[test]
    fn test_bit_strings() {
        let all = bit_strings(3);
        assert_eq!(all.len(), 2 + 4 + 8);
        assert_eq!(&all[..3], ["0", "1", "00"]);
        assert_eq!(all.last().map(String::as_str), Some("111"));
    }
}
