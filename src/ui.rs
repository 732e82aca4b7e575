//! Text rendering of attack views and heuristic heatmaps.

use std::fmt::Write;

use crate::common::Coordinate;
use crate::grid::BoardView;

fn header(out: &mut String, size: usize, width: usize) {
    out.push_str("   ");
    for c in 0..size {
        let _ = write!(out, " {:>width$}", column_label(c), width = width);
    }
    out.push('\n');
}

/// Column label: `A`, `B`, ... wrapping to `AA` past `Z`.
pub fn column_label(col: usize) -> String {
    let mut label = String::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    label
}

/// Human-readable coordinate such as `C5`.
pub fn coord_to_string(coord: Coordinate) -> String {
    format!("{}{}", column_label(coord.col), coord.row + 1)
}

/// Render the attacker's view: `.` unknown, `X` hit, `O` miss. `highlight`
/// is drawn as `*` when still unknown.
pub fn render_view<V: BoardView + ?Sized>(view: &V, highlight: Option<Coordinate>) -> String {
    let size = view.size();
    let mut out = String::new();
    header(&mut out, size, 1);
    for r in 0..size {
        let _ = write!(out, "{:2} ", r + 1);
        for c in 0..size {
            let coord = Coordinate::new(r, c);
            let state = view.cell(coord).unwrap_or_default();
            let ch = if Some(coord) == highlight && view.is_unknown(coord) {
                '*'
            } else {
                state.symbol()
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

/// Render heuristic scores as integer percentages of the best cell.
pub fn render_heatmap(size: usize, scores: &[(Coordinate, f64)]) -> String {
    let best = scores.iter().map(|(_, s)| *s).fold(0.0, f64::max);
    let mut grid = vec![None; size * size];
    for (c, s) in scores {
        if c.in_bounds(size) {
            grid[c.row * size + c.col] = Some(*s);
        }
    }
    let mut out = String::new();
    header(&mut out, size, 3);
    for r in 0..size {
        let _ = write!(out, "{:2} ", r + 1);
        for c in 0..size {
            match grid[r * size + c] {
                Some(s) if best > 0.0 => {
                    let _ = write!(out, " {:>3}", (s / best * 100.0).round() as u32);
                }
                _ => out.push_str("   ."),
            }
        }
        out.push('\n');
    }
    out
}
