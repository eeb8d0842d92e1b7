//! Plain-text grid patterns
//!
//! Each non-empty line is a row. `1` or `#` marks a living cell, `0` or `.`
//! a dead one. Surrounding whitespace on a line is ignored.

use super::{CellState, Grid};
use crate::error::{LifeError, Result};

/// Parse a grid from its text representation
pub fn parse_grid(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(LifeError::InvalidPattern(
            "pattern contains no rows".to_string(),
        ));
    }

    let width = lines[0].chars().count();
    let mut cells = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(width);
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' | '.' => row.push(false),
                '1' | '#' => row.push(true),
                _ => {
                    return Err(LifeError::InvalidPattern(format!(
                        "invalid character '{}' at ({}, {}); only '0', '1', '.' and '#' are allowed",
                        ch, row_idx, col_idx
                    )))
                }
            }
        }
        cells.push(row);
    }

    Grid::from_cells(cells)
}

/// Convert a grid to its `0`/`1` text representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.height() * (grid.width() + 1));

    for row in grid.rows() {
        for &cell in row {
            result.push(if cell == CellState::Alive { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}
