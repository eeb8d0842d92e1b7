//! Output helpers shared by adapters and the command line runner

pub mod display;

pub use display::{GridFormatter, Tone};
