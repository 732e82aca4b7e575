//! "Smart random" search: scores unknown cells by how likely they are to
//! hold an unfound ship and samples from the best few.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::common::{CellState, Coordinate, Direction};
use crate::grid::BoardView;

/// Score multiplier for cells whose every neighbour is already attacked.
pub const ISOLATION_PENALTY: f64 = 0.1;
/// Score multiplier for cells on the `(row + col) % 2 == 0` colour class.
pub const PARITY_BONUS: f64 = 1.5;

/// Returns `true` if `coord` is unknown and every in-bounds neighbour is a
/// hit or a miss.
pub fn is_isolated<V: BoardView + ?Sized>(view: &V, coord: Coordinate) -> bool {
    view.is_unknown(coord)
        && coord
            .neighbors(view.size())
            .all(|n| matches!(view.cell(n), Some(CellState::Hit | CellState::Miss)))
}

/// Length of the longest horizontal or vertical run of unknown cells
/// through `coord`, capped at `cap`.
pub fn unknown_run<V: BoardView + ?Sized>(view: &V, coord: Coordinate, cap: usize) -> usize {
    let size = view.size();
    let reach = |d: Direction| {
        let mut n = 0;
        let mut at = coord;
        while let Some(next) = at.step(d, size).filter(|c| view.is_unknown(*c)) {
            n += 1;
            at = next;
        }
        n
    };
    let horizontal = 1 + reach(Direction::Left) + reach(Direction::Right);
    let vertical = 1 + reach(Direction::Up) + reach(Direction::Down);
    horizontal.max(vertical).min(cap.max(1))
}

/// Room for a ship through `coord`, normalised to `[0, 1]`.
pub fn ship_potential<V: BoardView + ?Sized>(view: &V, coord: Coordinate, max_ship_length: usize) -> f64 {
    if max_ship_length < 2 {
        return 0.0;
    }
    let run = unknown_run(view, coord, max_ship_length);
    (run - 1) as f64 / (max_ship_length - 1) as f64
}

/// Heuristic desirability of attacking `coord`.
pub fn score_cell<V: BoardView + ?Sized>(view: &V, coord: Coordinate, max_ship_length: usize) -> f64 {
    let mut score = 1.0;
    if is_isolated(view, coord) {
        score *= ISOLATION_PENALTY;
    }
    if (coord.row + coord.col) % 2 == 0 {
        score *= PARITY_BONUS;
    }
    score * (1.0 + ship_potential(view, coord, max_ship_length))
}

/// Scores of every unknown cell, row-major.
pub fn heatmap<V: BoardView + ?Sized>(view: &V, max_ship_length: usize) -> Vec<(Coordinate, f64)> {
    view.unknown_cells()
        .into_iter()
        .map(|c| (c, score_cell(view, c, max_ship_length)))
        .collect()
}

/// Pick one of the `top_k` best-scoring unknown cells uniformly at random.
/// Returns `None` when no cell is unknown.
pub fn choose<V, R>(view: &V, max_ship_length: usize, top_k: usize, rng: &mut R) -> Option<Coordinate>
where
    V: BoardView + ?Sized,
    R: Rng + ?Sized,
{
    let mut scored = heatmap(view, max_ship_length);
    // shuffle first so the stable sort leaves equal scores in random order
    scored.shuffle(rng);
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(top_k.max(1));
    scored.choose(rng).map(|(c, _)| *c)
}
