//! Board signatures: the state component of value-store keys.
//!
//! Every cell is packed into two bits (unknown/hit/miss) of a `u64` word,
//! row-major, 32 cells per word. Two signatures are equal exactly when the
//! boards have the same size and the same cell states, so the packed words
//! serve directly as a map key.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::common::{CellState, Coordinate};
use crate::grid::BoardView;

const CELLS_PER_WORD: usize = 32;

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardSignature {
    size: u16,
    words: Vec<u64>,
}

impl BoardSignature {
    /// Signature of the board as currently shown by `view`.
    pub fn capture<V: BoardView + ?Sized>(view: &V) -> Self {
        Self::from_cells(view.size(), &view.cells())
    }

    /// Signature of `view` with the cell at `coord` replaced by `state`.
    pub fn capture_with<V: BoardView + ?Sized>(view: &V, coord: Coordinate, state: CellState) -> Self {
        let size = view.size();
        let mut cells = view.cells();
        if coord.in_bounds(size) {
            cells[coord.row * size + coord.col] = state;
        }
        Self::from_cells(size, &cells)
    }

    /// Pack row-major `cells` of a `size`×`size` board.
    pub fn from_cells(size: usize, cells: &[CellState]) -> Self {
        let mut words = vec![0u64; (size * size).div_ceil(CELLS_PER_WORD)];
        for (i, state) in cells.iter().take(size * size).enumerate() {
            words[i / CELLS_PER_WORD] |= state.code() << ((i % CELLS_PER_WORD) * 2);
        }
        BoardSignature {
            size: size as u16,
            words,
        }
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Decode the state of `coord`, `None` when out of bounds.
    pub fn cell(&self, coord: Coordinate) -> Option<CellState> {
        let size = self.size();
        if !coord.in_bounds(size) {
            return None;
        }
        let i = coord.row * size + coord.col;
        let code = (self.words[i / CELLS_PER_WORD] >> ((i % CELLS_PER_WORD) * 2)) & 0b11;
        Some(match code {
            1 => CellState::Hit,
            2 => CellState::Miss,
            _ => CellState::Unknown,
        })
    }

    /// Cells left unknown in this board state.
    pub fn unknown_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let size = self.size();
        (0..size)
            .flat_map(move |r| (0..size).map(move |c| Coordinate::new(r, c)))
            .filter(|c| self.cell(*c) == Some(CellState::Unknown))
    }
}

impl fmt::Debug for BoardSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoardSignature<{}>[", self.size)?;
        for w in &self.words {
            write!(f, "{:016x}", w)?;
        }
        write!(f, "]")
    }
}
