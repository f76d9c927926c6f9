//! Factor navigation on tape 1: find the next factor, then its least-significant bit.
//!
//! `navigate` only terminates if a factor lies ahead; the composer enters it only after
//! `check_more_factors` has seen one.

use super::{State, KEEP};
use crate::core::{Move::*, Pat, Symbol::*, TableBuilder};

/// Skip separators on tape 1 and stop on the first bit of the next factor.
pub fn navigate(entry: State, found: State) -> TableBuilder<State> {
    let mut b = TableBuilder::new();
    b.rule(entry, [Pat::Sym(Blank), Pat::Any, Pat::Any], entry, KEEP, [Right, Stay, Stay]);
    b.rule(entry, [Pat::Bit, Pat::Any, Pat::Any], found, KEEP, [Stay, Stay, Stay]);
    b
}

/// Walk tape 1 through the factor and back one cell from the separator behind it.
pub fn position_to_lsb(entry: State, exit: State) -> TableBuilder<State> {
    let mut b = TableBuilder::new();
    b.rule(entry, [Pat::Bit, Pat::Any, Pat::Any], entry, KEEP, [Right, Stay, Stay]);
    b.rule(entry, [Pat::Sym(Blank), Pat::Any, Pat::Any], exit, KEEP, [Left, Stay, Stay]);
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{symbols_from_str, Engine, Limits, Tape, TAPES};
    use crate::program::tests::phase_machine;

    fn engine_at<'m>(tm: &'m crate::core::Machine<State>, input: &str, head: i64) -> Engine<'m, State> {
        let mut tapes: [Tape; TAPES] = Default::default();
        tapes[0] = Tape::from_symbols(&symbols_from_str(input).unwrap()).with_head(head);
        Engine::with_tapes(tm, tapes)
    }

    #[test]
    fn test_find_next_factor_and_lsb() {
        let b = navigate(State::SeekFactor, State::SeekFactorEnd)
            .merge(position_to_lsb(State::SeekFactorEnd, State::Accept));
        let tm = phase_machine(b, State::SeekFactor);
        // From the separator after "101", past extra blanks, onto "110"'s last bit.
        let mut engine = engine_at(&tm, "101##110#", 3);
        engine.run(&Limits::default()).unwrap();
        assert_eq!(engine.tape(0).head(), 7);
        assert_eq!(engine.tape(0).read(), Zero);
        // Already on a factor: nothing to skip.
        let mut engine = engine_at(&tm, "1#", 0);
        let accepted = engine.run(&Limits::default()).unwrap();
        assert_eq!(engine.tape(0).head(), 0);
        assert_eq!(accepted.steps, 1 + 1 + 1);
    }

    #[test]
    fn test_navigate_needs_a_factor() {
        // Nothing but blanks ahead: navigation runs away, which is why the composer guards it.
        let tm = phase_machine(navigate(State::SeekFactor, State::Accept), State::SeekFactor);
        let mut engine = engine_at(&tm, "1#", 1);
        assert!(engine.run(&Limits::steps(500)).is_err());
        assert_eq!(engine.tape(0).head(), 501);
    }
}
