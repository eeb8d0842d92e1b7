//! Grid representation and utilities for Game of Life

use super::neighborhood::{neighbors, CellAddress};
use crate::error::{LifeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// The opposite state
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// Represents a Game of Life grid.
///
/// Cells are stored row-major in a single buffer of exactly `width * height`
/// entries. Dimensions are fixed at construction; a resized board is a new grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create a new grid with every cell dead
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0 && len <= isize::MAX as usize)
            .ok_or(LifeError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Dead; len],
        })
    }

    /// Create a grid from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimensions { width, height });
        }

        // Verify all rows have the same length
        for (i, row) in cells.iter().enumerate() {
            if row.len() != width {
                return Err(LifeError::InvalidPattern(format!(
                    "row {} has length {}, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
        }

        let flat_cells = cells.into_iter().flatten().map(CellState::from).collect();

        Ok(Self {
            width,
            height,
            cells: flat_cells,
        })
    }

    /// Build a grid from an already validated row-major buffer
    pub(crate) fn from_parts(width: usize, height: usize, cells: Vec<CellState>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.height || col >= self.width {
            return Err(LifeError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.index(row, col))
    }

    /// Get cell state at coordinates
    pub fn get(&self, row: usize, col: usize) -> Result<CellState> {
        let idx = self.checked_index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Whether the cell is alive; out of bounds cells are considered dead
    #[inline]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[self.index(row, col)].is_alive()
    }

    /// Set cell state at coordinates
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Flip one cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<CellState> {
        let idx = self.checked_index(row, col)?;
        let next = self.cells[idx].toggled();
        self.cells[idx] = next;
        Ok(next)
    }

    /// Count living neighbors for a cell
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        neighbors(row, col, self.width, self.height)
            .into_iter()
            .filter(|address| self.is_alive(address.row, address.col))
            .count() as u8
    }

    /// Copy the living cells of `pattern` onto this grid with its top-left
    /// corner at `(top, left)`. Fails without touching the grid if the
    /// pattern does not fit.
    pub fn stamp(&mut self, pattern: &Grid, top: usize, left: usize) -> Result<()> {
        let corner = top
            .checked_add(pattern.height - 1)
            .zip(left.checked_add(pattern.width - 1));
        let Some((bottom, right)) = corner else {
            return Err(LifeError::OutOfBounds {
                row: top,
                col: left,
                width: self.width,
                height: self.height,
            });
        };
        self.checked_index(bottom, right)?;

        for address in pattern.living_cells() {
            let idx = self.index(top + address.row, left + address.col);
            self.cells[idx] = CellState::Alive;
        }
        Ok(())
    }

    /// Iterate over the rows of the grid, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.width)
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<CellAddress> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(idx, _)| CellAddress::new(idx / self.width, idx % self.width))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                let symbol = if cell.is_alive() { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
