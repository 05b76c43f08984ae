//! Super-endorsement grid cells.

use crate::address::Address;
use serde::{Deserialize, Serialize};

/// Side length of the per-recipient grid.
pub const MATRIX_SIZE: u8 = 4;

/// Number of cells in the grid.
pub const MATRIX_CELLS: usize = (MATRIX_SIZE as usize) * (MATRIX_SIZE as usize);

/// Row-major position of `(x, y)` in the flattened grid.
pub fn matrix_index(x: u8, y: u8) -> usize {
    y as usize * MATRIX_SIZE as usize + x as usize
}

/// A single free-text endorsement pinned at `(x, y)` on a recipient's grid.
///
/// The zero value (`endorser == Address::ZERO`) is an empty cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperEndorsement {
    pub endorser: Address,
    pub x: u8,
    pub y: u8,
    pub message: String,
}

impl SuperEndorsement {
    pub fn is_empty(&self) -> bool {
        self.endorser.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_row_major() {
        assert_eq!(matrix_index(0, 0), 0);
        assert_eq!(matrix_index(1, 2), 9);
        assert_eq!(matrix_index(3, 3), MATRIX_CELLS - 1);
    }

    #[test]
    fn default_cell_is_empty() {
        assert!(SuperEndorsement::default().is_empty());
    }
}
