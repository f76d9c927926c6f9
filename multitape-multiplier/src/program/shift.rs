use super::{State, KEEP};
use crate::core::{Move::*, Out, Pat, Symbol::*, TableBuilder};

/// Double tape 2 by appending a '0' after its last bit, then retire the multiplier bit by
/// moving tape 1 left onto the next more-significant one.
pub fn left_shift(entry: State, exit: State) -> TableBuilder<State> {
    let mut b = TableBuilder::new();
    b.rule(entry, [Pat::Any, Pat::Bit, Pat::Any], entry, KEEP, [Stay, Right, Stay]);
    b.rule(entry, [Pat::Any, Pat::Sym(Blank), Pat::Any], exit, [Out::Keep, Out::Sym(Zero), Out::Keep], [Left, Stay, Stay]);
    b
}
