use super::{State, KEEP};
use crate::core::{Move::*, Out, Pat, Symbol::*, TableBuilder};

/// Copy the factor under tape 1's head onto tape 2, most-significant bit first.
/// On the separator, tape 1 steps onto the next factor and tape 2 steps back onto the last
/// bit copied (the least-significant one), ready for the shift-and-add loop.
pub fn copy(entry: State, exit: State) -> TableBuilder<State> {
    let mut b = TableBuilder::new();
    b.rule(entry, [Pat::Bit, Pat::Any, Pat::Any], entry, [Out::Keep, Out::Copy(0), Out::Keep], [Right, Right, Stay]);
    b.rule(entry, [Pat::Sym(Blank), Pat::Any, Pat::Any], exit, KEEP, [Right, Left, Stay]);
    b
}
