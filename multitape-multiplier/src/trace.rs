//! Step observers: structured `tracing` events, and the human-readable tape log.

use crate::core::{
    symbols_to_string, Accepted, Engine, Observation, Observer, RunError, StateId, Tape, OUTPUT_TAPE,
};
use crate::input::canonical;
use std::fmt::Display;
use std::io::{self, Write};

/// One `trace!` event per step attempt.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl<S: StateId> Observer<S> for TracingObserver {
    fn before_step(&mut self, o: &Observation<'_, S>) {
        let read = symbols_to_string(&o.read);
        match o.pending {
            Some(t) => tracing::trace!(
                step = o.step,
                state = %o.state,
                read = %read,
                write = %symbols_to_string(&t.write),
                moves = %joined(&t.moves, ""),
                next = %t.next,
                "step"
            ),
            None => tracing::trace!(step = o.step, state = %o.state, read = %read, "halt"),
        }
    }
}

fn joined<T: Display>(items: &[T], sep: &str) -> String {
    items.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(sep)
}

/// The cells shown for every tape: all data and heads, with some margin.
fn window(tapes: &[Tape]) -> (i64, i64) {
    tapes
        .iter()
        .filter_map(|t| t.occupied().map(|(lo, hi)| (lo, hi, t.head())))
        .fold((-2, 6), |(min, max), (lo, hi, head)| {
            (min.min(lo - 1).min(head - 2), max.max(hi + 2).max(head + 4))
        })
}

/// Writes the per-step log: a transition line before every step, and every tape drawn
/// with a `^` under its head after it.
pub struct TapeLog<W: Write> {
    out: W,
    title: String,
    error: Option<io::Error>,
}

impl<W: Write> TapeLog<W> {
    pub fn new(out: W, title: impl Into<String>) -> Self {
        TapeLog {
            out,
            title: title.into(),
            error: None,
        }
    }

    /// The writer back, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        match self.error.take() {
            Some(e) => Err(e),
            None => {
                self.out.flush()?;
                Ok(self.out)
            }
        }
    }

    /// Once a write fails, nothing more is written.
    fn latch(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_none() {
            if let Err(e) = f(&mut self.out) {
                self.error = Some(e);
            }
        }
    }

    fn tapes<S: StateId>(&mut self, engine: &Engine<'_, S>) {
        self.latch(|out| {
            writeln!(out, "Step {} ({})", engine.steps(), engine.state())?;
            let (min, max) = window(engine.tapes());
            for (i, tape) in engine.tapes().iter().enumerate() {
                let line: String = (min..max).map(|p| tape.get(p).to_char()).collect();
                let arrow: String = (min..max).map(|p| if p == tape.head() { '^' } else { ' ' }).collect();
                writeln!(out, "T{} [pos:{:3}]: {line}", i + 1, tape.head())?;
                writeln!(out, "              {arrow}")?;
            }
            writeln!(out, "{}", "-".repeat(40))
        });
    }
}

impl<S: StateId, W: Write> Observer<S> for TapeLog<W> {
    fn run_start(&mut self, engine: &Engine<'_, S>) {
        let title = std::mem::take(&mut self.title);
        self.latch(|out| writeln!(out, "{title}\n"));
        self.tapes(engine);
    }

    fn before_step(&mut self, o: &Observation<'_, S>) {
        self.latch(|out| {
            let read = joined(&o.read, ",");
            write!(out, "Step {} ({}): Read ({read}) -> ", o.step, o.state)?;
            match o.pending {
                Some(t) => writeln!(
                    out,
                    "Write ({}), Move ({}), Next: {}",
                    joined(&t.write, ","),
                    joined(&t.moves, ","),
                    t.next
                ),
                None => writeln!(out, "HALT (No transition)"),
            }
        });
    }

    fn after_step(&mut self, engine: &Engine<'_, S>) {
        self.tapes(engine);
    }

    fn run_end(&mut self, engine: &Engine<'_, S>, outcome: &Result<Accepted<S>, RunError<S>>) {
        self.tapes(engine);
        let product = engine.tape(OUTPUT_TAPE).contents();
        self.latch(|out| match outcome {
            Ok(accepted) => {
                writeln!(out, "\nCOMPUTATION COMPLETE")?;
                writeln!(out, "RESULT ON TAPE {}: {}", OUTPUT_TAPE + 1, symbols_to_string(&product))?;
                if !product.is_empty() {
                    writeln!(out, "RESULT (canonical): {}", canonical(&product))?;
                }
                writeln!(out, "Total steps executed: {}", accepted.steps)
            }
            Err(e) => writeln!(out, "\nHALTED: {e}"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{symbols_from_str, Limits};
    use crate::program::{compose, State};

    fn log_run(input: &str, limits: &Limits) -> String {
        let tm = compose().unwrap();
        let mut engine = Engine::new(&tm, &symbols_from_str(input).unwrap());
        let mut log = TapeLog::new(Vec::new(), format!("N-ary multiplication of: {input}"));
        let _ = engine.run_observed(limits, &mut log);
        String::from_utf8(log.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_log_layout() {
        let text = log_run("1#1#", &Limits::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "N-ary multiplication of: 1#1#");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Step 0 (q_start)");
        assert_eq!(lines[3], "T1 [pos:  0]: ##1#1###");
        assert_eq!(lines[4], "                ^     ");
        assert_eq!(lines[5], "T2 [pos:  0]: ########");
        assert_eq!(lines[9], "-".repeat(40));
        assert_eq!(
            lines[10],
            "Step 0 (q_start): Read (1,#,#) -> Write (1,1,#), Move (R,R,S), Next: q_start"
        );
        assert_eq!(lines[11], "Step 1 (q_start)");
        assert!(text.contains("Step 28 (q_final): Read (#,1,#) -> HALT (No transition)\n"));
        assert!(text.ends_with("RESULT ON TAPE 2: 1\nRESULT (canonical): 1\nTotal steps executed: 28\n"));
        // One transition line per step, plus the halting one.
        assert_eq!(text.matches(" -> ").count(), 29);
    }

    #[test]
    fn test_log_step_limit() {
        let text = log_run("101#10#", &Limits::steps(5));
        assert!(text.ends_with("\nHALTED: did not terminate within 5 steps (last state q_seek_factor_end)\n"), "{text}");
        assert!(!text.contains("COMPUTATION COMPLETE"));
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_errors_are_latched() {
        let tm = compose().unwrap();
        let mut engine = Engine::new(&tm, &symbols_from_str("1#1#").unwrap());
        let mut log = TapeLog::new(Broken, "title");
        // The run itself is unaffected.
        assert_eq!(engine.run_observed(&Limits::default(), &mut log).map(|a| a.state), Ok(State::Accept));
        assert_eq!(log.finish().err().map(|e| e.to_string()), Some("disk full".to_string()));
    }

    #[test]
    fn test_window() {
        let tapes = [
            Tape::from_symbols(&symbols_from_str("1#1#").unwrap()),
            Tape::new().with_head(-5),
            Tape::from_symbols(&symbols_from_str("1111111").unwrap()).with_head(9),
        ];
        // Heads of blank tapes are not taken into account.
        assert_eq!(window(&tapes), (-2, 13));
        assert_eq!(window(&[Tape::new(), Tape::new()]), (-2, 6));
    }
}
