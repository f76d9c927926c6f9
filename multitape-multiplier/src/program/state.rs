//! The state space of the multiplication program, namespaced by phase.

use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Stages of the ripple-carry adder.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum AddStage {
    /// Home both operands on their least-significant bits.
    Setup,
    Carry0,
    Carry1,
    /// Walk the accumulator head back over the sum.
    Finish,
    Return,
}

/// Stages of the accumulator-to-product transfer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TransferStage {
    HomeAccumulator,
    HomeProduct,
    Clear,
    Rehome,
    Copy,
}

/// Which instance of the transfer phase: between factors, or the last one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Lane {
    Loop,
    Final,
}

/// A state of the multiplication program.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub enum State {
    /// Copying the first factor onto the product tape.
    Copy,
    /// Skipping separators up to the next factor.
    SeekFactor,
    /// Walking to the least-significant bit of the factor.
    SeekFactorEnd,
    /// Dispatching on the current multiplier bit.
    Select,
    Add(AddStage),
    Shift,
    /// Deciding whether the multiplier has more bits.
    NextBit,
    /// Moving past the factor that was just consumed.
    SkipFactor,
    CheckMoreFactors,
    Transfer(Lane, TransferStage),
    Accept,
}

#[derive(Error, Debug, Eq, PartialEq)]
#[error("unknown state name: {0:?}")]
pub struct BadState(pub String);

impl State {
    /// Every state, in order.
    pub fn all() -> impl Iterator<Item = State> {
        use AddStage::*;
        use TransferStage::*;
        let head = [State::Copy, State::SeekFactor, State::SeekFactorEnd, State::Select];
        let add = [Setup, Carry0, Carry1, Finish, Return].map(State::Add);
        let middle = [State::Shift, State::NextBit, State::SkipFactor, State::CheckMoreFactors];
        let stages = [HomeAccumulator, HomeProduct, Clear, Rehome, Copy];
        let transfer = [Lane::Loop, Lane::Final]
            .into_iter()
            .flat_map(move |lane| stages.map(|s| State::Transfer(lane, s)));
        head.into_iter()
            .chain(add)
            .chain(middle)
            .chain(transfer)
            .chain([State::Accept])
    }

    pub fn name(self) -> &'static str {
        use AddStage::*;
        use TransferStage::*;
        match self {
            State::Copy => "q_start",
            State::SeekFactor => "q_look_for_next",
            State::SeekFactorEnd => "q_seek_factor_end",
            State::Select => "q_mul_select",
            State::Add(Setup) => "q_add_setup",
            State::Add(Carry0) => "q_add_c0",
            State::Add(Carry1) => "q_add_c1",
            State::Add(Finish) => "q_add_finish",
            State::Add(Return) => "q_add_return",
            State::Shift => "q_shift_t2",
            State::NextBit => "q_mul_next_bit",
            State::SkipFactor => "q_skip_factor",
            State::CheckMoreFactors => "q_check_more_factors",
            State::Transfer(Lane::Loop, HomeAccumulator) => "q_transfer",
            State::Transfer(Lane::Loop, HomeProduct) => "q_transfer_t2_home",
            State::Transfer(Lane::Loop, Clear) => "q_transfer_clear",
            State::Transfer(Lane::Loop, Rehome) => "q_transfer_t2_rehome",
            State::Transfer(Lane::Loop, Copy) => "q_transfer_copy",
            State::Transfer(Lane::Final, HomeAccumulator) => "q_transfer_final",
            State::Transfer(Lane::Final, HomeProduct) => "q_final_t2_home",
            State::Transfer(Lane::Final, Clear) => "q_final_clear",
            State::Transfer(Lane::Final, Rehome) => "q_final_rehome",
            State::Transfer(Lane::Final, Copy) => "q_final_copy",
            State::Accept => "q_final",
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for State {
    type Err = BadState;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        State::all()
            .find(|q| q.name() == text)
            .ok_or_else(|| BadState(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_names_are_unique() {
        let states: Vec<State> = State::all().collect();
        assert_eq!(states.len(), 24);
        let names: BTreeSet<&str> = states.iter().map(|q| q.name()).collect();
        assert_eq!(names.len(), states.len());
        let sorted: BTreeSet<State> = states.iter().copied().collect();
        assert_eq!(sorted.into_iter().collect::<Vec<_>>(), states);
    }

    #[test]
    fn test_round_trip_names() {
        for q in State::all() {
            assert_eq!(State::from_str(&q.to_string()), Ok(q));
        }
        assert_eq!(State::from_str("q_nowhere"), Err(BadState("q_nowhere".to_string())));
        let json = serde_json::to_string(&State::Transfer(Lane::Final, TransferStage::Copy)).unwrap();
        assert_eq!(json, r#""q_final_copy""#);
    }
}
