//! The per-recipient 4×4 super-endorsement grid.

use crate::error::LedgerError;
use skillrep_types::{matrix_index, Address, SuperEndorsement, MATRIX_CELLS, MATRIX_SIZE};
use std::collections::HashMap;

/// Cells keyed by `(recipient, x, y)`.
///
/// A write to an occupied coordinate replaces the cell, whoever wrote it first.
#[derive(Clone, Debug, Default)]
pub struct SuperEndorsementGrid {
    cells: HashMap<(Address, u8, u8), SuperEndorsement>,
}

impl SuperEndorsementGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_position(x: u8, y: u8) -> Result<(), LedgerError> {
        if x < MATRIX_SIZE && y < MATRIX_SIZE {
            Ok(())
        } else {
            Err(LedgerError::InvalidPosition { x, y })
        }
    }

    /// Write the cell. The position must already have been checked.
    pub fn set(&mut self, recipient: Address, cell: SuperEndorsement) {
        self.cells.insert((recipient, cell.x, cell.y), cell);
    }

    pub fn get(&self, recipient: &Address, x: u8, y: u8) -> Option<&SuperEndorsement> {
        self.cells.get(&(*recipient, x, y))
    }

    /// All 16 cells of `recipient`, at `index = y * 4 + x`; unset cells are zero-valued.
    pub fn matrix(&self, recipient: &Address) -> [SuperEndorsement; MATRIX_CELLS] {
        std::array::from_fn(|idx| {
            let x = (idx % MATRIX_SIZE as usize) as u8;
            let y = (idx / MATRIX_SIZE as usize) as u8;
            debug_assert_eq!(matrix_index(x, y), idx);
            self.get(recipient, x, y).cloned().unwrap_or_default()
        })
    }

    /// Cells authored by `endorser`, ordered by recipient then grid index.
    pub fn authored_by(&self, endorser: &Address) -> Vec<(Address, SuperEndorsement)> {
        self.sorted_cells()
            .into_iter()
            .filter(|(_, cell)| cell.endorser == *endorser)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every occupied cell as `(recipient, cell)`, in a stable order.
    pub fn sorted_cells(&self) -> Vec<(Address, SuperEndorsement)> {
        let mut out: Vec<(Address, SuperEndorsement)> = self
            .cells
            .iter()
            .map(|((recipient, _, _), cell)| (*recipient, cell.clone()))
            .collect();
        out.sort_by_key(|(recipient, cell)| (*recipient, matrix_index(cell.x, cell.y)));
        out
    }
}

impl FromIterator<(Address, SuperEndorsement)> for SuperEndorsementGrid {
    fn from_iter<I: IntoIterator<Item = (Address, SuperEndorsement)>>(iter: I) -> Self {
        let mut grid = Self::new();
        for (recipient, cell) in iter {
            grid.set(recipient, cell);
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillrep_crypto::derive_address;

    fn addr(s: &str) -> Address {
        derive_address(s.as_bytes())
    }

    fn cell(endorser: &str, x: u8, y: u8, message: &str) -> SuperEndorsement {
        SuperEndorsement {
            endorser: addr(endorser),
            x,
            y,
            message: message.into(),
        }
    }

    #[test]
    fn position_bounds() {
        assert!(SuperEndorsementGrid::check_position(3, 3).is_ok());
        assert_eq!(
            SuperEndorsementGrid::check_position(4, 0),
            Err(LedgerError::InvalidPosition { x: 4, y: 0 })
        );
        assert!(SuperEndorsementGrid::check_position(0, 4).is_err());
    }

    #[test]
    fn overwrite_replaces_cell() {
        let mut grid = SuperEndorsementGrid::new();
        grid.set(addr("bob"), cell("alice", 1, 2, "first"));
        grid.set(addr("bob"), cell("carol", 1, 2, "second"));
        assert_eq!(grid.len(), 1);

        let matrix = grid.matrix(&addr("bob"));
        assert_eq!(matrix[9].message, "second");
        assert_eq!(matrix[9].endorser, addr("carol"));
        assert_eq!(matrix.iter().filter(|c| !c.is_empty()).count(), 1);
    }

    #[test]
    fn matrix_of_stranger_is_all_zero() {
        let grid = SuperEndorsementGrid::new();
        assert!(grid.matrix(&addr("nobody")).iter().all(|c| c.is_empty()));
    }

    #[test]
    fn authored_by_spans_recipients() {
        let mut grid = SuperEndorsementGrid::new();
        grid.set(addr("bob"), cell("alice", 0, 0, "a"));
        grid.set(addr("carol"), cell("alice", 3, 1, "b"));
        grid.set(addr("carol"), cell("dave", 2, 2, "c"));

        let given = grid.authored_by(&addr("alice"));
        assert_eq!(given.len(), 2);
        assert!(given.iter().all(|(_, c)| c.endorser == addr("alice")));
    }
}
