//! The execution engine: drives a `Machine` against its tapes, one atomic step at a time.
//!
//! The engine itself never fails. A step either applies the unique matching rule or reports
//! a table miss; whether a miss means success is decided by comparing the halted state with
//! the accept states. The driver (`Engine::run`) adds the optional step ceiling.

use super::{
    symbols_to_string, Limits, Machine, ReadTuple, StateId, Symbol, Tape, Transition, OUTPUT_TAPE,
    TAPES,
};
use thiserror::Error;

/// What the engine is about to do, before a step executes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Observation<'m, S> {
    /// Steps executed so far.
    pub step: u64,
    pub state: S,
    pub read: ReadTuple,
    /// The rule that will be applied, or `None` if the machine halts here.
    pub pending: Option<&'m Transition<S>>,
}

/// Where a tape's head is, and which cells have been written.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TapeView {
    pub head: i64,
    pub written: Option<(i64, i64)>,
    /// The written cells and the head together; the interval a windowed display must cover.
    pub bounds: (i64, i64),
}

/// A run that halted in an accept state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Accepted<S> {
    pub state: S,
    pub steps: u64,
}

#[derive(Error, Debug, Eq, PartialEq)]
pub enum RunError<S: StateId> {
    /// A gap in the transition table (or a malformed input) stopped the machine early.
    #[error("halted after {steps} steps in non-accepting state {state}: no rule reading ({})", symbols_to_string(.read))]
    UnexpectedHalt {
        state: S,
        read: ReadTuple,
        steps: u64,
    },
    #[error("did not terminate within {limit} steps (last state {state})")]
    StepLimit { limit: u64, state: S },
}

/// Callbacks for an external logger. All default to doing nothing.
pub trait Observer<S: StateId> {
    /// Called once, before the first step.
    fn run_start(&mut self, _engine: &Engine<'_, S>) {}

    /// Called before every step attempt, including the final one that halts.
    fn before_step(&mut self, _observation: &Observation<'_, S>) {}

    /// Called after every executed step.
    fn after_step(&mut self, _engine: &Engine<'_, S>) {}

    /// Called once, when the run is over.
    fn run_end(&mut self, _engine: &Engine<'_, S>, _outcome: &Result<Accepted<S>, RunError<S>>) {}
}

/// An observer that ignores everything.
impl<S: StateId> Observer<S> for () {}

/// Both observers, in order.
impl<S: StateId, A: Observer<S>, B: Observer<S>> Observer<S> for (A, B) {
    fn run_start(&mut self, engine: &Engine<'_, S>) {
        self.0.run_start(engine);
        self.1.run_start(engine);
    }

    fn before_step(&mut self, observation: &Observation<'_, S>) {
        self.0.before_step(observation);
        self.1.before_step(observation);
    }

    fn after_step(&mut self, engine: &Engine<'_, S>) {
        self.0.after_step(engine);
        self.1.after_step(engine);
    }

    fn run_end(&mut self, engine: &Engine<'_, S>, outcome: &Result<Accepted<S>, RunError<S>>) {
        self.0.run_end(engine, outcome);
        self.1.run_end(engine, outcome);
    }
}

/// A machine configuration under execution. Owns its tapes; borrows the machine.
#[derive(Clone, Debug)]
pub struct Engine<'m, S> {
    machine: &'m Machine<S>,
    state: S,
    tapes: [Tape; TAPES],
    steps: u64,
}

impl<'m, S: StateId> Engine<'m, S> {
    /// Start `machine` with `input` on the first tape and the other tapes blank.
    pub fn new(machine: &'m Machine<S>, input: &[Symbol]) -> Self {
        let mut tapes: [Tape; TAPES] = Default::default();
        tapes[0] = Tape::from_symbols(input);
        Self::with_tapes(machine, tapes)
    }

    /// Start `machine` from arbitrary tape contents.
    pub fn with_tapes(machine: &'m Machine<S>, tapes: [Tape; TAPES]) -> Self {
        Engine {
            machine,
            state: machine.start(),
            tapes,
            steps: 0,
        }
    }

    pub fn machine(&self) -> &'m Machine<S> {
        self.machine
    }

    pub fn state(&self) -> S {
        self.state
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn tapes(&self) -> &[Tape; TAPES] {
        &self.tapes
    }

    pub fn tape(&self, i: usize) -> &Tape {
        &self.tapes[i]
    }

    pub fn is_accepting(&self) -> bool {
        self.machine.is_accepting(self.state)
    }

    /// The symbols under all heads.
    pub fn read(&self) -> ReadTuple {
        std::array::from_fn(|i| self.tapes[i].read())
    }

    /// The rule the next step would apply.
    pub fn pending(&self) -> Option<&'m Transition<S>> {
        self.machine.table().get(self.state, &self.read())
    }

    pub fn observe(&self) -> Observation<'m, S> {
        let read = self.read();
        Observation {
            step: self.steps,
            state: self.state,
            read,
            pending: self.machine.table().get(self.state, &read),
        }
    }

    pub fn views(&self) -> [TapeView; TAPES] {
        std::array::from_fn(|i| TapeView {
            head: self.tapes[i].head(),
            written: self.tapes[i].written(),
            bounds: self.tapes[i].bounds(),
        })
    }

    /// The non-blank symbols of the output tape, in position order.
    pub fn output(&self) -> Vec<Symbol> {
        self.tapes[OUTPUT_TAPE].contents()
    }

    /// Execute one transition. Returns `false`, changing nothing, if no rule matches.
    pub fn step(&mut self) -> bool {
        let t = match self.pending() {
            Some(t) => t,
            None => return false,
        };
        for (tape, (&w, &d)) in self.tapes.iter_mut().zip(t.write.iter().zip(&t.moves)) {
            tape.write(w);
            tape.move_head(d);
        }
        self.state = t.next;
        self.steps += 1;
        true
    }

    /// Step until the table misses, or until the ceiling would be exceeded.
    pub fn run(&mut self, limits: &Limits) -> Result<Accepted<S>, RunError<S>> {
        self.run_observed(limits, &mut ())
    }

    /// Like `run`, reporting to `observer`: `before_step` sees every step attempt (the final,
    /// halting one included) and `after_step` every executed step, all between `run_start`
    /// and `run_end`.
    pub fn run_observed(
        &mut self,
        limits: &Limits,
        observer: &mut impl Observer<S>,
    ) -> Result<Accepted<S>, RunError<S>> {
        observer.run_start(self);
        let outcome = loop {
            let observation = self.observe();
            observer.before_step(&observation);
            if observation.pending.is_none() {
                break self.halted(observation.read);
            }
            if !limits.allows(self.steps) {
                let limit = self.steps;
                tracing::warn!(limit, state = %self.state, "step limit reached");
                break Err(RunError::StepLimit {
                    limit,
                    state: self.state,
                });
            }
            self.step();
            observer.after_step(self);
        };
        observer.run_end(self, &outcome);
        outcome
    }

    fn halted(&self, read: ReadTuple) -> Result<Accepted<S>, RunError<S>> {
        if self.is_accepting() {
            tracing::debug!(steps = self.steps, state = %self.state, "accepted");
            Ok(Accepted {
                state: self.state,
                steps: self.steps,
            })
        } else {
            tracing::warn!(
                steps = self.steps,
                state = %self.state,
                read = %symbols_to_string(&read),
                "unexpected halt"
            );
            Err(RunError::UnexpectedHalt {
                state: self.state,
                read,
                steps: self.steps,
            })
        }
    }
}
