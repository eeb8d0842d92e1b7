//! Conway's Game of Life simulation engine
//!
//! A pure core (grid, neighborhood geometry, transition rule, timed stepping
//! loop) that a presentation layer drives through a [`DisplayAdapter`] and a
//! [`SimulationHandle`].

pub mod adapter;
pub mod config;
pub mod error;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use adapter::{DisplayAdapter, RecordingAdapter, TerminalAdapter};
pub use config::Settings;
pub use error::{LifeError, Result};
pub use game_of_life::{CellAddress, CellState, GameOfLifeRules, Grid};
pub use simulation::{
    Reconfigure, RunState, Simulation, SimulationConfig, SimulationHandle, TickRate,
};

/// Advance `grid` by one generation
pub fn step(grid: &Grid) -> Grid {
    GameOfLifeRules::evolve(grid)
}
