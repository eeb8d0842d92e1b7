//! Moore neighborhood geometry with dead (non-wrapping) edges

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(row, col)` coordinate into a grid of known dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellAddress {
    pub row: usize,
    pub col: usize,
}

impl CellAddress {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check the address against a grid's dimensions
    pub fn is_within(&self, width: usize, height: usize) -> bool {
        self.row < height && self.col < width
    }
}

impl From<(usize, usize)> for CellAddress {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Row/column offsets of the eight compass directions, self excluded
fn offsets() -> impl Iterator<Item = (isize, isize)> {
    iproduct!(-1isize..=1, -1isize..=1).filter(|&(dr, dc)| dr != 0 || dc != 0)
}

/// Resolve the in-bounds neighbors of `(row, col)` on a `width` x `height` grid.
///
/// Interior cells get 8 neighbors, non-corner edge cells 5, corners 3.
/// Addresses outside the grid are dropped; nothing wraps around.
pub fn neighbors(row: usize, col: usize, width: usize, height: usize) -> Vec<CellAddress> {
    offsets()
        .filter_map(|(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            let address = CellAddress::new(r, c);
            address.is_within(width, height).then_some(address)
        })
        .collect()
}
