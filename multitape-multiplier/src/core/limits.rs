//! Define the hard, compile-time limits of the machine model, plus the run-time step ceiling.

/// The size of the tape alphabet: blank, '0' and '1'.
pub const SYMBOLS: usize = 3;
/// The exact number of tapes every machine drives: input, working product, accumulator.
pub const TAPES: usize = 3;
/// The tape holding the result once the multiplication program accepts (0-indexed).
pub const OUTPUT_TAPE: usize = 1;
/// The step ceiling used when the caller does not choose one.
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

/// Run-time limits for driving a machine to completion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Limits {
    /// Abort (as a non-accepting outcome) instead of executing step number `max_steps + 1`.
    /// `None` runs until the table misses, which may be forever.
    pub max_steps: Option<u64>,
}

impl Limits {
    /// Limits with the given ceiling.
    pub fn steps(max_steps: u64) -> Self {
        Limits {
            max_steps: Some(max_steps),
        }
    }

    /// No ceiling at all.
    pub fn unbounded() -> Self {
        Limits { max_steps: None }
    }

    /// Whether a machine that has executed `steps` transitions may execute another one.
    pub fn allows(&self, steps: u64) -> bool {
        self.max_steps.map_or(true, |max| steps < max)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits::steps(DEFAULT_MAX_STEPS)
    }
}
