//! The generic k-tape machine model: symbols, tapes, tables, machines and the engine.

mod engine;
mod limits;
mod machine;
mod symbol;
mod table;
mod tape;

pub use engine::*;
pub use limits::*;
pub use machine::*;
pub use symbol::*;
pub use table::*;
pub use tape::*;
