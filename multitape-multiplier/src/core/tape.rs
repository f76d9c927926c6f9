use super::{Move, Symbol};
use std::collections::HashMap;

/// An unbounded tape in both directions, with one read/write head.
/// Only explicitly written cells are stored; every other position reads as blank.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tape {
    cells: HashMap<i64, Symbol>,
    head: i64,
}

impl Tape {
    /// A blank tape with the head at 0.
    pub fn new() -> Tape {
        Tape::default()
    }

    /// A tape holding `content` at positions `0..content.len()`, head at 0.
    pub fn from_symbols(content: &[Symbol]) -> Tape {
        let cells = (0..).zip(content.iter().copied()).collect();
        Tape { cells, head: 0 }
    }

    /// The same tape with its head moved to `head`.
    pub fn with_head(mut self, head: i64) -> Tape {
        self.head = head;
        self
    }

    pub fn head(&self) -> i64 {
        self.head
    }

    /// The symbol under the head.
    pub fn read(&self) -> Symbol {
        self.get(self.head)
    }

    /// The symbol at any position.
    pub fn get(&self, pos: i64) -> Symbol {
        self.cells.get(&pos).copied().unwrap_or_default()
    }

    /// Overwrite the symbol under the head. The head does not move.
    pub fn write(&mut self, s: Symbol) {
        self.cells.insert(self.head, s);
    }

    pub fn move_head(&mut self, d: Move) {
        self.head += d.offset();
    }

    /// The range of explicitly written positions (blanks included), if any.
    pub fn written(&self) -> Option<(i64, i64)> {
        let min = self.cells.keys().min()?;
        let max = self.cells.keys().max()?;
        Some((*min, *max))
    }

    /// The range of positions holding a bit, if any.
    pub fn occupied(&self) -> Option<(i64, i64)> {
        let mut bits = self.cells.iter().filter(|(_, s)| s.is_bit()).map(|(&p, _)| p);
        let first = bits.next()?;
        Some(bits.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// The smallest interval covering every written position and the head.
    /// A never-written tape gives the one-cell interval at the head.
    pub fn bounds(&self) -> (i64, i64) {
        match self.written() {
            Some((min, max)) => (min.min(self.head), max.max(self.head)),
            None => (self.head, self.head),
        }
    }

    /// The non-blank symbols in position order.
    pub fn contents(&self) -> Vec<Symbol> {
        let mut cells: Vec<(i64, Symbol)> = self
            .cells
            .iter()
            .filter(|(_, s)| s.is_bit())
            .map(|(&p, &s)| (p, s))
            .collect();
        cells.sort_unstable_by_key(|&(p, _)| p);
        cells.into_iter().map(|(_, s)| s).collect()
    }
}
