pub mod core;
pub mod encoding;
pub mod input;
pub mod program;
pub mod trace;
