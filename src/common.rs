//! Common types for the targeting AI: coordinates, cell states, guess
//! results and board errors.

use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A (row, col) position on an N×N board, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns `true` if the coordinate lies on a `size`×`size` board.
    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// One step in `direction`, or `None` when the step leaves the board.
    pub fn step(&self, direction: Direction, size: usize) -> Option<Coordinate> {
        let (dr, dc) = direction.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Coordinate::new(row, col);
        next.in_bounds(size).then_some(next)
    }

    /// In-bounds orthogonal neighbours, in [`Direction::ALL`] order.
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = Coordinate> {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.step(d, size))
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Coordinate::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Unit step along a row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];

    /// (row, col) delta of one step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Right | Direction::Left)
    }
}

/// Public state of a cell as seen by the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Unknown,
    Hit,
    Miss,
}

impl CellState {
    /// Two-bit code used when packing board signatures.
    pub(crate) fn code(self) -> u64 {
        match self {
            CellState::Unknown => 0,
            CellState::Hit => 1,
            CellState::Miss => 2,
        }
    }

    /// Glyph used by fixtures and the text renderer.
    pub fn symbol(self) -> char {
        match self {
            CellState::Unknown => '.',
            CellState::Hit => 'X',
            CellState::Miss => 'O',
        }
    }

    pub fn from_symbol(ch: char) -> Option<CellState> {
        match ch {
            '.' => Some(CellState::Unknown),
            'X' | 'x' => Some(CellState::Hit),
            'O' | 'o' => Some(CellState::Miss),
            _ => None,
        }
    }
}

/// Result of a guess attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessResult {
    /// Guess hit an undepleted ship segment.
    Hit,
    /// Guess missed all ships.
    Miss,
    /// Guess sank a ship, carrying its name.
    Sink(&'static str),
}

impl GuessResult {
    pub fn is_hit(&self) -> bool {
        !matches!(self, GuessResult::Miss)
    }

    /// Cell state the guessed cell ends up in.
    pub fn cell_state(&self) -> CellState {
        if self.is_hit() {
            CellState::Hit
        } else {
            CellState::Miss
        }
    }
}

impl From<bool> for GuessResult {
    fn from(hit: bool) -> Self {
        if hit {
            GuessResult::Hit
        } else {
            GuessResult::Miss
        }
    }
}

/// Errors returned by board and grid operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("coordinate ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },
    #[error("index is out of range")]
    InvalidIndex,
    #[error("ship is already placed on the board")]
    ShipAlreadyPlaced,
    #[error("ship placement overlaps with another ship")]
    ShipOverlaps,
    #[error("guess was already made at this position")]
    AlreadyGuessed,
    #[error("unable to place ship")]
    UnableToPlaceShip,
    #[error("ship placement is out of bounds")]
    ShipOutOfBounds,
    #[error("grid rows do not form a square of known cell symbols")]
    MalformedGrid,
}
