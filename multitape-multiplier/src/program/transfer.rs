//! Result transfer: move the accumulator (tape 3) onto the product tape (tape 2).
//!
//! Tape 2 is erased completely before the copy, so no bit of the old multiplicand survives
//! when the new product is shorter. Tape 3 is blank afterwards.
//!
//! Precondition: tape 3's head is on a digit of the accumulator, or tape 3 is empty. Tape 2's
//! head may be anywhere from its first bit up to the blank just past its last.

use super::{Lane, State, TransferStage, KEEP};
use crate::core::{Move::*, Out, Pat, Symbol::*, TableBuilder};

/// The state that starts the transfer on `lane`.
pub fn transfer_entry(lane: Lane) -> State {
    State::Transfer(lane, TransferStage::HomeAccumulator)
}

/// The transfer phase on `lane`, leaving for `exit` with tape 2's head on the last copied bit.
/// Each lane has its own states, so the two instances can exit to different places.
pub fn result_transfer(lane: Lane, exit: State) -> TableBuilder<State> {
    use TransferStage::*;
    let q = |stage| State::Transfer(lane, stage);
    let mut b = TableBuilder::new();

    b.rule(q(HomeAccumulator), [Pat::Any, Pat::Any, Pat::Bit], q(HomeAccumulator), KEEP, [Stay, Stay, Left]);
    b.rule(q(HomeAccumulator), [Pat::Any, Pat::Any, Pat::Sym(Blank)], q(HomeProduct), KEEP, [Stay, Left, Stay]);

    b.rule(q(HomeProduct), [Pat::Any, Pat::Bit, Pat::Any], q(HomeProduct), KEEP, [Stay, Left, Stay]);
    b.rule(q(HomeProduct), [Pat::Any, Pat::Sym(Blank), Pat::Any], q(Clear), KEEP, [Stay, Right, Stay]);

    let erase = [Out::Keep, Out::Sym(Blank), Out::Keep];
    b.rule(q(Clear), [Pat::Any, Pat::Bit, Pat::Any], q(Clear), erase, [Stay, Right, Stay]);
    b.rule(q(Clear), [Pat::Any, Pat::Sym(Blank), Pat::Any], q(Rehome), KEEP, [Stay, Left, Stay]);

    b.rule(q(Rehome), [Pat::Any, Pat::Bit, Pat::Any], q(Rehome), KEEP, [Stay, Left, Stay]);
    b.rule(q(Rehome), [Pat::Any, Pat::Sym(Blank), Pat::Any], q(Copy), KEEP, [Stay, Right, Right]);

    let drain = [Out::Keep, Out::Copy(2), Out::Sym(Blank)];
    b.rule(q(Copy), [Pat::Any, Pat::Any, Pat::Bit], q(Copy), drain, [Stay, Right, Right]);
    b.rule(q(Copy), [Pat::Any, Pat::Any, Pat::Sym(Blank)], exit, KEEP, [Stay, Left, Stay]);
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{symbols_from_str, symbols_to_string, Engine, Limits, Tape};
    use crate::program::tests::{bit_strings, phase_machine};

    #[test]
    fn test_no_residue() {
        let tm = phase_machine(result_transfer(Lane::Loop, State::Accept), transfer_entry(Lane::Loop));
        let mut products = bit_strings(4);
        products.push(String::new());
        for x in &bit_strings(4) {
            for y in &products {
                let len = x.len() as i64;
                let heads3 = if y.is_empty() { vec![0] } else { vec![0, y.len() as i64 - 1] };
                for head2 in [0, len - 1, len] {
                    for &head3 in &heads3 {
                        let tapes = [
                            Tape::new(),
                            Tape::from_symbols(&symbols_from_str(x).unwrap()).with_head(head2),
                            Tape::from_symbols(&symbols_from_str(y).unwrap()).with_head(head3),
                        ];
                        let mut engine = Engine::with_tapes(&tm, tapes);
                        engine.run(&Limits::default()).unwrap();
                        let case = format!("x={x} y={y} heads=({head2},{head3})");
                        assert_eq!(&symbols_to_string(&engine.tape(1).contents()), y, "{case}");
                        assert!(engine.tape(2).contents().is_empty(), "{case}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_shorter_result_clears_old_bits() {
        let tm = phase_machine(result_transfer(Lane::Final, State::Accept), transfer_entry(Lane::Final));
        let tapes = [
            Tape::new(),
            Tape::from_symbols(&symbols_from_str("111").unwrap()).with_head(3),
            Tape::from_symbols(&symbols_from_str("10").unwrap()),
        ];
        let mut engine = Engine::with_tapes(&tm, tapes);
        engine.run(&Limits::default()).unwrap();
        let product = engine.tape(1);
        assert_eq!(symbols_to_string(&product.contents()), "10");
        // The copy lands just right of the old product's home cell.
        assert_eq!((product.get(3), product.get(4)), (One, Zero));
        assert_eq!(product.head(), 4);
    }

    #[test]
    fn test_lanes_are_disjoint() {
        let a = result_transfer(Lane::Loop, State::SeekFactor).build().unwrap();
        let b = result_transfer(Lane::Final, State::Accept).build().unwrap();
        assert!(a.states().is_disjoint(&b.states()));
        assert!(result_transfer(Lane::Loop, State::SeekFactor)
            .merge(result_transfer(Lane::Final, State::Accept))
            .build()
            .is_ok());
    }
}
