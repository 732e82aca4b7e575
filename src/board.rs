//! Opponent board: hidden ship placements plus the public attack grid.

use core::fmt;
use rand::Rng;

use crate::common::{BoardError, CellState, Coordinate, GuessResult};
use crate::config::{BOARD_SIZE, SHIPS};
use crate::grid::{BoardView, Grid};
use crate::ship::{Orientation, Ship, ShipType};

/// Main board state: ship placements, hits, misses.
///
/// Only the public [`Grid`] is reachable through [`BoardView`]; the AI
/// never learns where unhit ships are.
pub struct Board {
    fleet: Vec<ShipType>,
    ships: Vec<Option<Ship>>,
    grid: Grid,
}

impl Board {
    /// Create an empty `size`×`size` board for `fleet` (no ships placed).
    pub fn new(size: usize, fleet: &[ShipType]) -> Self {
        Board {
            fleet: fleet.to_vec(),
            ships: vec![None; fleet.len()],
            grid: Grid::new(size),
        }
    }

    /// 10×10 board with the classic five-ship fleet.
    pub fn standard() -> Self {
        Self::new(BOARD_SIZE, &SHIPS)
    }

    pub fn fleet(&self) -> &[ShipType] {
        &self.fleet
    }

    /// Public attack grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns `true` when every ship is placed and sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships
            .iter()
            .all(|s| s.as_ref().is_some_and(Ship::is_sunk))
    }

    /// Number of ships not yet sunk.
    pub fn ships_afloat(&self) -> usize {
        self.ships
            .iter()
            .flatten()
            .filter(|s| !s.is_sunk())
            .count()
    }

    /// Placed ships, in fleet order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().flatten()
    }

    /// Place a single ship by index at (row, col) and orientation.
    pub fn place(
        &mut self,
        ship_index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let def = *self.fleet.get(ship_index).ok_or(BoardError::InvalidIndex)?;
        if self.ships[ship_index].is_some() {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        let ship = Ship::new(def, orientation, row, col, self.grid.size())?;
        if self.ships().any(|other| other.overlaps(&ship)) {
            return Err(BoardError::ShipOverlaps);
        }
        self.ships[ship_index] = Some(ship);
        Ok(())
    }

    /// Returns a random non-overlapping (row, col, Orientation) for `ship_index`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ship_index: usize,
    ) -> Result<(usize, usize, Orientation), BoardError> {
        let def = *self.fleet.get(ship_index).ok_or(BoardError::InvalidIndex)?;
        let size = self.grid.size();
        if def.length() > size {
            return Err(BoardError::UnableToPlaceShip);
        }
        for _ in 0..100 {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (size - 1, size - def.length()),
                Orientation::Vertical => (size - def.length(), size - 1),
            };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            let ship = Ship::new(def, orient, r, c, size)?;
            if !self.ships().any(|other| other.overlaps(&ship)) {
                return Ok((r, c, orient));
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Place every unplaced ship at a random position.
    pub fn place_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        for i in 0..self.fleet.len() {
            if self.ships[i].is_none() {
                let (r, c, o) = self.random_placement(rng, i)?;
                self.place(i, r, c, o)?;
            }
        }
        Ok(())
    }

    /// Process a guess at (row, col), marking hits/misses and reporting result.
    pub fn guess(&mut self, row: usize, col: usize) -> Result<GuessResult, BoardError> {
        let coord = Coordinate::new(row, col);
        match self.grid.cell(coord) {
            None => {
                return Err(BoardError::OutOfBounds {
                    row,
                    col,
                    size: self.grid.size(),
                })
            }
            Some(CellState::Unknown) => {}
            Some(_) => return Err(BoardError::AlreadyGuessed),
        }

        let struck = self.ships.iter_mut().flatten().find(|s| s.contains(coord));
        match struck {
            Some(ship) => {
                ship.guess(coord);
                let result = if ship.is_sunk() {
                    GuessResult::Sink(ship.ship_type().name())
                } else {
                    GuessResult::Hit
                };
                self.grid.mark(coord, true)?;
                Ok(result)
            }
            None => {
                self.grid.mark(coord, false)?;
                Ok(GuessResult::Miss)
            }
        }
    }

    /// Remove all ships and forget every attack.
    pub fn clear(&mut self) {
        self.ships.iter_mut().for_each(|s| *s = None);
        self.grid.clear();
    }
}

impl BoardView for Board {
    fn size(&self) -> usize {
        self.grid.size()
    }

    fn cell(&self, coord: Coordinate) -> Option<CellState> {
        self.grid.cell(coord)
    }

    fn unknown_cells(&self) -> Vec<Coordinate> {
        self.grid.unknown_cells()
    }

    fn cells(&self) -> Vec<CellState> {
        self.grid.cells()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  size: {},\n  ships: {:?},\n  hits: {},\n  misses: {}\n}}",
            self.grid.size(),
            self.ships,
            self.grid.count(CellState::Hit),
            self.grid.count(CellState::Miss),
        )
    }
}
