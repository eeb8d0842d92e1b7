//! Game of Life core functionality

pub mod grid;
pub mod neighborhood;
pub mod pattern;
pub mod rules;

pub use grid::{CellState, Grid};
pub use neighborhood::{neighbors, CellAddress};
pub use pattern::{grid_to_string, parse_grid};
pub use rules::GameOfLifeRules;
