//! Game of Life transition rule (B3/S23)

use super::{CellState, Grid};
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Apply the rules to every cell of `current` at once and return the next
    /// generation. Neighbor counts are always read from `current`, never from
    /// the grid being built, and `current` is left untouched.
    pub fn evolve(current: &Grid) -> Grid {
        let (width, height) = current.dimensions();

        let next_cells: Vec<CellState> = (0..width * height)
            .into_par_iter()
            .map(|idx| {
                let (row, col) = (idx / width, idx % width);
                let state = CellState::from(current.is_alive(row, col));
                Self::next_state(state, current.count_neighbors(row, col))
            })
            .collect();

        Grid::from_parts(width, height, next_cells)
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: Grid, generations: usize) -> Grid {
        for _ in 0..generations {
            grid = Self::evolve(&grid);
        }
        grid
    }

    /// State of a cell in the next generation given its current state and
    /// live neighbor count
    pub fn next_state(state: CellState, neighbor_count: u8) -> CellState {
        match (state, neighbor_count) {
            (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive,
            (CellState::Dead, 3) => CellState::Alive,
            // Underpopulation, overpopulation, or no birth
            _ => CellState::Dead,
        }
    }

    /// Check if a cell should be alive in the next generation
    pub fn should_be_alive(state: CellState, neighbor_count: u8) -> bool {
        Self::next_state(state, neighbor_count).is_alive()
    }

    /// Neighbor counts that would result in birth (dead -> alive)
    pub fn birth_neighbor_counts() -> Vec<u8> {
        vec![3]
    }

    /// Neighbor counts that would result in survival (alive -> alive)
    pub fn survival_neighbor_counts() -> Vec<u8> {
        vec![2, 3]
    }

    /// Maximum 8 neighbors in the Moore neighborhood
    pub fn max_neighbor_count() -> u8 {
        8
    }
}
