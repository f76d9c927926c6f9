//! Ripple-carry addition: tape 3 := tape 3 + tape 2.
//!
//! Both operands are stored most-significant bit first. Setup homes each head on its own
//! least-significant bit (operands may differ in length). The two carry states then walk
//! both heads leftwards one digit at a time, reading a blank on either tape as a 0 digit.
//! When both tapes are exhausted a pending carry becomes a new leading '1' on tape 3.
//! Tape 2 is read but never changed.

use super::{AddStage, State, KEEP};
use crate::core::{Move::*, Out, Pat, Symbol, Symbol::*, TableBuilder};

/// The state to enter for the adder.
pub const ENTRY: State = State::Add(AddStage::Setup);

fn carry_state(carry: u8) -> State {
    if carry == 0 {
        State::Add(AddStage::Carry0)
    } else {
        State::Add(AddStage::Carry1)
    }
}

fn digit(s: Symbol) -> u8 {
    (s == One) as u8
}

/// The sum digit written to tape 3 and the next state, given the pending carry.
fn full_add(carry: u8, r2: Symbol, r3: Symbol) -> (Symbol, State) {
    if r2 == Blank && r3 == Blank {
        let top = if carry == 1 { One } else { Blank };
        return (top, State::Add(AddStage::Finish));
    }
    let sum = digit(r2) + digit(r3) + carry;
    let w = if sum % 2 == 1 { One } else { Zero };
    (w, carry_state(sum / 2))
}

pub fn ripple_carry_add(exit: State) -> TableBuilder<State> {
    use AddStage::*;
    let mut b = TableBuilder::new();
    // Each head runs right independently until it sits on its trailing blank.
    b.rule(ENTRY, [Pat::Any, Pat::Bit, Pat::Bit], ENTRY, KEEP, [Stay, Right, Right]);
    b.rule(ENTRY, [Pat::Any, Pat::Bit, Pat::Sym(Blank)], ENTRY, KEEP, [Stay, Right, Stay]);
    b.rule(ENTRY, [Pat::Any, Pat::Sym(Blank), Pat::Bit], ENTRY, KEEP, [Stay, Stay, Right]);
    b.rule(ENTRY, [Pat::Any, Pat::Sym(Blank), Pat::Sym(Blank)], carry_state(0), KEEP, [Stay, Left, Left]);

    for carry in [0, 1] {
        for r2 in Symbol::ALL {
            for r3 in Symbol::ALL {
                let (w, next) = full_add(carry, r2, r3);
                let read = [Pat::Any, Pat::Sym(r2), Pat::Sym(r3)];
                b.rule(carry_state(carry), read, next, [Out::Keep, Out::Keep, Out::Sym(w)], [Stay, Left, Left]);
            }
        }
    }

    b.rule(State::Add(Finish), [Pat::Any, Pat::Any, Pat::Bit], State::Add(Finish), KEEP, [Stay, Stay, Left]);
    b.rule(State::Add(Finish), [Pat::Any, Pat::Any, Pat::Sym(Blank)], State::Add(Return), KEEP, [Stay, Right, Right]);
    b.rule(State::Add(Return), [Pat::Any; 3], exit, KEEP, [Stay, Right, Right]);
    b
}
