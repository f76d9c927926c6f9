//! The composer: wires the phase programs into the complete multiplication machine.
//!
//! ```text
//! Copy -> SeekFactor -> SeekFactorEnd -> Select --1--> Add -> Shift
//!                 ^                        |  ^ --0-----------^  |
//!                 |                        |  +---- NextBit <----+
//!                 |                        |          | blank
//!         Transfer(Loop) <--bit-- CheckMoreFactors <- SkipFactor
//!                                          | blank
//!                                  Transfer(Final) -> Accept
//! ```

use super::{
    add, bit_select, copy, left_shift, navigate, position_to_lsb, result_transfer, ripple_carry_add,
    transfer_entry, Lane, State, KEEP,
};
use crate::core::{CompositionError, Machine, Move::*, Pat, Symbol::*, TableBuilder};

/// After a shift: another bit of the multiplier to the left, or the separator before it.
pub fn next_bit(entry: State, select: State, exhausted: State) -> TableBuilder<State> {
    let mut b = TableBuilder::new();
    b.rule(entry, [Pat::Bit, Pat::Any, Pat::Any], select, KEEP, [Stay; 3]);
    b.rule(entry, [Pat::Sym(Blank), Pat::Any, Pat::Any], exhausted, KEEP, [Right, Stay, Stay]);
    b
}

/// Walk tape 1 past the factor just consumed and its separator, so the search for the next
/// factor cannot find the same one again.
pub fn skip_factor(entry: State, check: State) -> TableBuilder<State> {
    let mut b = TableBuilder::new();
    b.rule(entry, [Pat::Bit, Pat::Any, Pat::Any], entry, KEEP, [Right, Stay, Stay]);
    b.rule(entry, [Pat::Sym(Blank), Pat::Any, Pat::Any], check, KEEP, [Right, Stay, Stay]);
    b
}

/// A bit ahead means another factor; a second blank means the input is used up.
pub fn check_more_factors(entry: State, more: State, done: State) -> TableBuilder<State> {
    let mut b = TableBuilder::new();
    b.rule(entry, [Pat::Bit, Pat::Any, Pat::Any], more, KEEP, [Stay; 3]);
    b.rule(entry, [Pat::Sym(Blank), Pat::Any, Pat::Any], done, KEEP, [Stay; 3]);
    b
}

/// Every phase, wired together. Bit-Select's own blank exit is never taken (Next-Bit sees
/// the separator first) but keeps the state total.
fn phases() -> TableBuilder<State> {
    use State::*;
    [
        copy(Copy, SeekFactor),
        navigate(SeekFactor, SeekFactorEnd),
        position_to_lsb(SeekFactorEnd, Select),
        bit_select(Select, add::ENTRY, Shift, transfer_entry(Lane::Loop)),
        ripple_carry_add(Shift),
        left_shift(Shift, NextBit),
        next_bit(NextBit, Select, SkipFactor),
        skip_factor(SkipFactor, CheckMoreFactors),
        check_more_factors(CheckMoreFactors, transfer_entry(Lane::Loop), transfer_entry(Lane::Final)),
        result_transfer(Lane::Loop, SeekFactor),
        result_transfer(Lane::Final, Accept),
    ]
    .into_iter()
    .fold(TableBuilder::new(), TableBuilder::merge)
}

/// Build the multiplication machine. Fails if two phases claim the same key, or if some
/// reachable state cannot handle some symbol combination.
pub fn compose() -> Result<Machine<State>, CompositionError<State>> {
    let table = phases().build()?;
    let tm = Machine::new(table, State::Copy, [State::Accept]);
    tm.table().check_complete(tm.start(), tm.accept_states())?;
    tracing::debug!(rules = tm.table().len(), states = tm.states().len(), "composed multiplier");
    Ok(tm)
}
