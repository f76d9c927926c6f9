//! Tape symbols and head moves, with the one-character text forms used by every encoding.

use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// A tape symbol. Declaration order is the ordered alphabet: blank, '0', '1'.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub enum Symbol {
    /// An empty cell, and the factor separator on the input tape.
    #[default]
    Blank,
    Zero,
    One,
}

#[derive(Error, Debug, Eq, PartialEq)]
#[error("not a tape symbol: {0:?} (expected '0', '1' or '#')")]
pub struct BadSymbol(pub String);

impl Symbol {
    /// The ordered alphabet.
    pub const ALL: [Symbol; 3] = [Symbol::Blank, Symbol::Zero, Symbol::One];
    /// The two digit symbols.
    pub const BITS: [Symbol; 2] = [Symbol::Zero, Symbol::One];
    /// The character written for `Symbol::Blank`.
    pub const BLANK_CHAR: char = '#';

    /// This symbol's position in the ordered alphabet.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The symbol at a position in the ordered alphabet.
    pub fn from_index(i: usize) -> Option<Symbol> {
        Symbol::ALL.get(i).copied()
    }

    pub fn is_bit(self) -> bool {
        self != Symbol::Blank
    }

    pub fn to_char(self) -> char {
        match self {
            Symbol::Blank => Symbol::BLANK_CHAR,
            Symbol::Zero => '0',
            Symbol::One => '1',
        }
    }
}

impl TryFrom<char> for Symbol {
    type Error = BadSymbol;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            Symbol::BLANK_CHAR => Ok(Symbol::Blank),
            '0' => Ok(Symbol::Zero),
            '1' => Ok(Symbol::One),
            _ => Err(BadSymbol(c.to_string())),
        }
    }
}

impl FromStr for Symbol {
    type Err = BadSymbol;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Symbol::try_from(c),
            _ => Err(BadSymbol(text.to_string())),
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Render symbols as text, e.g. `101#`.
pub fn symbols_to_string(symbols: &[Symbol]) -> String {
    symbols.iter().map(|s| s.to_char()).collect()
}

/// Parse symbol text such as `101#`.
pub fn symbols_from_str(text: &str) -> Result<Vec<Symbol>, BadSymbol> {
    text.chars().map(Symbol::try_from).collect()
}

/// A head movement.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub enum Move {
    Left,
    Right,
    Stay,
}

#[derive(Error, Debug, Eq, PartialEq)]
#[error("not a head move: {0:?} (expected 'L', 'R' or 'S')")]
pub struct BadMove(pub String);

impl Move {
    /// Encoding order for moves.
    pub const ALL: [Move; 3] = [Move::Left, Move::Right, Move::Stay];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Move> {
        Move::ALL.get(i).copied()
    }

    /// The change in head position.
    pub fn offset(self) -> i64 {
        match self {
            Move::Left => -1,
            Move::Right => 1,
            Move::Stay => 0,
        }
    }
}

impl FromStr for Move {
    type Err = BadMove;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "L" => Ok(Move::Left),
            "R" => Ok(Move::Right),
            "S" => Ok(Move::Stay),
            _ => Err(BadMove(text.to_string())),
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let c = match self {
            Move::Left => 'L',
            Move::Right => 'R',
            Move::Stay => 'S',
        };
        write!(f, "{c}")
    }
}
