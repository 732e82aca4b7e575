//! Read-only board access for the attacker and a plain attack-view grid.

use std::cell::RefCell;
use std::rc::Rc;

use crate::common::{BoardError, CellState, Coordinate};

/// Read-only view of the opponent grid as the attacker sees it.
///
/// Implementors expose unknown/hit/miss only; ship occupancy is never part
/// of this interface.
pub trait BoardView {
    /// Side length of the square grid.
    fn size(&self) -> usize;

    /// State of the cell at `coord`, `None` when out of bounds.
    fn cell(&self, coord: Coordinate) -> Option<CellState>;

    fn is_unknown(&self, coord: Coordinate) -> bool {
        self.cell(coord) == Some(CellState::Unknown)
    }

    /// All cells not yet attacked, in row-major order.
    fn unknown_cells(&self) -> Vec<Coordinate> {
        let size = self.size();
        (0..size)
            .flat_map(|r| (0..size).map(move |c| Coordinate::new(r, c)))
            .filter(|c| self.is_unknown(*c))
            .collect()
    }

    /// Snapshot of every cell in row-major order.
    fn cells(&self) -> Vec<CellState> {
        let size = self.size();
        (0..size)
            .flat_map(|r| (0..size).map(move |c| Coordinate::new(r, c)))
            .map(|c| self.cell(c).unwrap_or_default())
            .collect()
    }
}

impl<T: BoardView + ?Sized> BoardView for &T {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn cell(&self, coord: Coordinate) -> Option<CellState> {
        (**self).cell(coord)
    }

    fn unknown_cells(&self) -> Vec<Coordinate> {
        (**self).unknown_cells()
    }

    fn cells(&self) -> Vec<CellState> {
        (**self).cells()
    }
}

impl<T: BoardView + ?Sized> BoardView for Rc<T> {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn cell(&self, coord: Coordinate) -> Option<CellState> {
        (**self).cell(coord)
    }

    fn unknown_cells(&self) -> Vec<Coordinate> {
        (**self).unknown_cells()
    }

    fn cells(&self) -> Vec<CellState> {
        (**self).cells()
    }
}

impl<T: BoardView> BoardView for RefCell<T> {
    fn size(&self) -> usize {
        self.borrow().size()
    }

    fn cell(&self, coord: Coordinate) -> Option<CellState> {
        self.borrow().cell(coord)
    }

    fn unknown_cells(&self) -> Vec<Coordinate> {
        self.borrow().unknown_cells()
    }

    fn cells(&self) -> Vec<CellState> {
        self.borrow().cells()
    }
}

/// N×N matrix of attack outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create an all-unknown `size`×`size` grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![CellState::Unknown; size * size],
        }
    }

    /// Parse rows of `.` (unknown), `X` (hit) and `O` (miss).
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let parsed: Option<Vec<CellState>> = row
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .map(CellState::from_symbol)
                .collect();
            match parsed {
                Some(line) if line.len() == size => cells.extend(line),
                _ => return Err(BoardError::MalformedGrid),
            }
        }
        Ok(Self { size, cells })
    }

    fn index(&self, coord: Coordinate) -> Result<usize, BoardError> {
        if coord.in_bounds(self.size) {
            Ok(coord.row * self.size + coord.col)
        } else {
            Err(BoardError::OutOfBounds {
                row: coord.row,
                col: coord.col,
                size: self.size,
            })
        }
    }

    /// Overwrite the state at `coord`.
    pub fn set(&mut self, coord: Coordinate, state: CellState) -> Result<(), BoardError> {
        let idx = self.index(coord)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Record an attack outcome; attacked cells never revert.
    pub fn mark(&mut self, coord: Coordinate, hit: bool) -> Result<(), BoardError> {
        let idx = self.index(coord)?;
        if self.cells[idx] != CellState::Unknown {
            return Err(BoardError::AlreadyGuessed);
        }
        self.cells[idx] = if hit { CellState::Hit } else { CellState::Miss };
        Ok(())
    }

    /// Reset every cell to unknown.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Unknown);
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| **c == state).count()
    }
}

impl BoardView for Grid {
    fn size(&self) -> usize {
        self.size
    }

    fn cell(&self, coord: Coordinate) -> Option<CellState> {
        self.index(coord).ok().map(|i| self.cells[i])
    }

    fn cells(&self) -> Vec<CellState> {
        self.cells.clone()
    }
}
