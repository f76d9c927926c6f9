//! Multiply binary numbers on the three-tape machine.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

use multitape_multiplier::core::{symbols_to_string, Engine, Limits, Machine, DEFAULT_MAX_STEPS};
use multitape_multiplier::encoding::{to_json, to_packed, to_unary};
use multitape_multiplier::input::{self, canonical, decode};
use multitape_multiplier::program::{compose, State};
use multitape_multiplier::trace::{TapeLog, TracingObserver};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Unary,
    Packed,
}

#[derive(Parser, Debug)]
#[command(name = "multiply", about = "Multiply binary numbers on a 3-tape Turing machine")]
struct Args {
    /// Factors in binary, each followed by '#', e.g. 101#10#11#
    input: String,
    /// Abort after this many steps.
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: u64,
    /// Run without a step ceiling.
    #[arg(long, conflicts_with = "max_steps")]
    unbounded: bool,
    /// Write a step-by-step tape log here.
    #[arg(long)]
    log: Option<PathBuf>,
    /// Write the machine definition here.
    #[arg(long)]
    definition: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "json")]
    format: Format,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn write_definition(tm: &Machine<State>, path: &Path, format: Format) -> Result<()> {
    let def = tm.definition();
    let bytes = match format {
        Format::Json => to_json(&def)?.into_bytes(),
        Format::Unary => to_unary(&def)?.into_bytes(),
        Format::Packed => to_packed(&def)?,
    };
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), ?format, "wrote machine definition");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::builder()
        .with_default_directive(level_from_verbosity(args.verbose).into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let symbols = input::parse(&args.input).with_context(|| format!("bad input {:?}", args.input))?;
    let tm = compose()?;
    if let Some(path) = &args.definition {
        write_definition(&tm, path, args.format)?;
    }

    let limits = if args.unbounded {
        Limits::unbounded()
    } else {
        Limits::steps(args.max_steps)
    };
    let mut engine = Engine::new(&tm, &symbols);
    let outcome = match &args.log {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let title = format!("N-ary multiplication of: {}", args.input);
            let mut observers = (TracingObserver, TapeLog::new(BufWriter::new(file), title));
            let outcome = engine.run_observed(&limits, &mut observers);
            observers.1.finish().with_context(|| format!("writing {}", path.display()))?;
            outcome
        }
        None => engine.run_observed(&limits, &mut TracingObserver),
    };
    let accepted = outcome?;

    let product = engine.output();
    tracing::info!(steps = accepted.steps, product = %symbols_to_string(&product), "done");
    match decode(&product) {
        Some(n) => println!("{} = {n}", canonical(&product)),
        None => println!("{}", canonical(&product)),
    }
    Ok(())
}
