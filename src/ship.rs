//! Ship definitions and placement geometry on an N×N board.

use core::fmt;

use crate::common::{BoardError, Coordinate};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship placed on a board, tracking which of its segments were hit.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    ship_type: ShipType,
    orientation: Orientation,
    origin: Coordinate,
    cells: Vec<Coordinate>,
    hit: Vec<bool>,
}

impl Ship {
    /// Place a ship at (`row`, `col`) with `orientation` on a `size`×`size` board.
    pub fn new(
        ship_type: ShipType,
        orientation: Orientation,
        row: usize,
        col: usize,
        size: usize,
    ) -> Result<Self, BoardError> {
        let len = ship_type.length();
        let fits = match orientation {
            Orientation::Horizontal => row < size && col + len <= size,
            Orientation::Vertical => col < size && row + len <= size,
        };
        if !fits {
            return Err(BoardError::ShipOutOfBounds);
        }

        let cells = (0..len)
            .map(|i| match orientation {
                Orientation::Horizontal => Coordinate::new(row, col + i),
                Orientation::Vertical => Coordinate::new(row + i, col),
            })
            .collect();
        Ok(Ship {
            ship_type,
            orientation,
            origin: Coordinate::new(row, col),
            cells,
            hit: vec![false; len],
        })
    }

    /// Returns `true` if the ship covers `coord`.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.cells.contains(&coord)
    }

    /// Returns `true` if the two ships share a cell.
    pub fn overlaps(&self, other: &Ship) -> bool {
        self.cells.iter().any(|c| other.contains(*c))
    }

    /// Register a hit at `coord`. Returns `true` if the ship covers it.
    pub fn guess(&mut self, coord: Coordinate) -> bool {
        match self.cells.iter().position(|c| *c == coord) {
            Some(i) => {
                self.hit[i] = true;
                true
            }
            None => false,
        }
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hit.iter().all(|h| *h)
    }

    /// Ship's type.
    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Cells covered by the ship, from the origin outward.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", origin: {}, orientation: {:?}, hits: {} }}",
            self.ship_type.name(),
            self.origin,
            self.orientation,
            self.hit.iter().filter(|h| **h).count(),
        )
    }
}
