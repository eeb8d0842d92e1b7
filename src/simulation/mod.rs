//! Simulation loop: run/stop control, live edits, and timed generation stepping

pub mod config;
pub mod runner;
pub mod state;

pub use config::{Reconfigure, SimulationConfig, TickRate, DEFAULT_TICKS_PER_SECOND};
pub use runner::SimulationHandle;
pub use state::{RunState, Simulation};
