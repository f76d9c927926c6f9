use super::{State, KEEP};
use crate::core::{Move::*, Pat, Symbol::*, TableBuilder};

/// Dispatch on the multiplier bit under tape 1's head. Tape 1 stays on that bit: the shift
/// phase is the one that retires it.
pub fn bit_select(entry: State, on_one: State, on_zero: State, exhausted: State) -> TableBuilder<State> {
    let mut b = TableBuilder::new();
    b.rule(entry, [Pat::Sym(One), Pat::Any, Pat::Any], on_one, KEEP, [Stay; 3]);
    b.rule(entry, [Pat::Sym(Zero), Pat::Any, Pat::Any], on_zero, KEEP, [Stay; 3]);
    b.rule(entry, [Pat::Sym(Blank), Pat::Any, Pat::Any], exhausted, KEEP, [Stay; 3]);
    b
}
