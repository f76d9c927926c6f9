//! The caller-side input format, `x1#x2#...#xn#`, and reading the product back.
//!
//! The machine itself never validates its input; `parse` is the gate in front of it.

use crate::core::{symbols_to_string, Symbol, BadSymbol};
use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum BadInput {
    #[error("empty input")]
    Empty,
    #[error("position {pos}: {source}")]
    Symbol { pos: usize, source: BadSymbol },
    #[error("position {pos}: empty factor")]
    EmptyFactor { pos: usize },
    #[error("input must end with '{}'", Symbol::BLANK_CHAR)]
    MissingSeparator,
    #[error("need at least two factors, found {0}")]
    TooFewFactors(usize),
}

/// Validate `text` and convert it to tape symbols.
pub fn parse(text: &str) -> Result<Vec<Symbol>, BadInput> {
    if text.is_empty() {
        return Err(BadInput::Empty);
    }
    let symbols = text
        .chars()
        .enumerate()
        .map(|(pos, c)| Symbol::try_from(c).map_err(|source| BadInput::Symbol { pos, source }))
        .collect::<Result<Vec<_>, _>>()?;
    if symbols.last() != Some(&Symbol::Blank) {
        return Err(BadInput::MissingSeparator);
    }
    let mut factors = 0;
    let mut start = 0;
    for (pos, s) in symbols.iter().enumerate() {
        if *s == Symbol::Blank {
            if pos == start {
                return Err(BadInput::EmptyFactor { pos });
            }
            factors += 1;
            start = pos + 1;
        }
    }
    if factors < 2 {
        return Err(BadInput::TooFewFactors(factors));
    }
    Ok(symbols)
}

/// The input text for multiplying `factors`.
pub fn encode_factors(factors: &[u128]) -> String {
    factors.iter().map(|n| format!("{n:b}{}", Symbol::BLANK_CHAR)).collect()
}

/// The value of a most-significant-first bit sequence. Empty is 0; a blank or an overflow
/// gives `None`.
pub fn decode(bits: &[Symbol]) -> Option<u128> {
    bits.iter().try_fold(0u128, |n, s| {
        let bit = match s {
            Symbol::Zero => 0,
            Symbol::One => 1,
            Symbol::Blank => return None,
        };
        n.checked_mul(2)?.checked_add(bit)
    })
}

/// `bits` without leading zeros; `"0"` if nothing is left.
pub fn canonical(bits: &[Symbol]) -> String {
    let first = bits.iter().position(|&s| s == Symbol::One);
    match first {
        Some(i) => symbols_to_string(&bits[i..]),
        None => "0".to_string(),
    }
}
