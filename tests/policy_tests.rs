use std::collections::HashSet;

use battleship_rl::{
    AiConfig, BoardSignature, Coordinate, DecisionSource, Grid, ReinforcementAi, ValueStore,
};

fn store_with(entries: &[(Coordinate, f64)]) -> ValueStore {
    let state = BoardSignature::capture(&Grid::new(10));
    let mut store = ValueStore::new();
    for (c, v) in entries {
        store.set(state.clone(), *c, *v);
    }
    store
}

fn decisions(grid: &Grid, exploration: f64, store: ValueStore, draws: usize) -> Vec<(Coordinate, DecisionSource)> {
    let config = AiConfig::new(0.1, 0.9, exploration).with_seed(17);
    let mut ai = ReinforcementAi::with_config(grid, config).with_value_store(store);
    (0..draws)
        .map(|_| {
            ai.get_attack_coordinates().unwrap();
            ai.last_decision().unwrap()
        })
        .collect()
}

#[test]
fn flat_zero_table_defers_to_the_heuristic() {
    let grid = Grid::new(10);
    let store = store_with(&[(Coordinate::new(0, 0), 0.0), (Coordinate::new(5, 5), 0.0)]);
    for (_, source) in decisions(&grid, 0.0, store, 50) {
        assert_eq!(source, DecisionSource::Heuristic);
    }
}

#[test]
fn equal_maxima_are_drawn_at_random() {
    let grid = Grid::new(10);
    let store = store_with(&[(Coordinate::new(1, 1), 0.5), (Coordinate::new(2, 2), 0.5)]);
    let picks = decisions(&grid, 0.0, store, 60);
    assert!(picks.iter().all(|(_, s)| *s == DecisionSource::ValueStore));
    let seen: HashSet<Coordinate> = picks.iter().map(|(c, _)| *c).collect();
    assert_eq!(seen, HashSet::from([Coordinate::new(1, 1), Coordinate::new(2, 2)]));
}

#[test]
fn a_single_bad_cell_is_still_a_signal() {
    // max is 0 but it does not cover every cell, so the table decides
    let grid = Grid::new(10);
    let bad = Coordinate::new(4, 4);
    let picks = decisions(&grid, 0.0, store_with(&[(bad, -1.0)]), 100);
    assert!(picks.iter().all(|(c, s)| *s == DecisionSource::ValueStore && *c != bad));
}

#[test]
fn full_exploration_ignores_a_strong_entry() {
    let grid = Grid::new(10);
    let store = store_with(&[(Coordinate::new(7, 7), 40.0)]);
    for (_, source) in decisions(&grid, 1.0, store, 50) {
        assert_eq!(source, DecisionSource::Heuristic);
    }
}

#[test]
fn partial_exploration_mixes_both_sources() {
    let grid = Grid::new(10);
    let strong = Coordinate::new(7, 7);
    let picks = decisions(&grid, 0.5, store_with(&[(strong, 40.0)]), 200);
    let learned = picks.iter().filter(|(_, s)| *s == DecisionSource::ValueStore).count();
    assert!(learned > 50 && learned < 150, "{learned} of 200 from the table");
    assert!(picks
        .iter()
        .filter(|(_, s)| *s == DecisionSource::ValueStore)
        .all(|(c, _)| *c == strong));
}

#[test]
fn unseen_board_state_uses_the_heuristic() {
    let grid = Grid::from_rows(&[
        "O.........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
    ])
    .unwrap();
    // entries exist, but only for the empty board
    let store = store_with(&[(Coordinate::new(3, 3), 9.0)]);
    for (_, source) in decisions(&grid, 0.0, store, 20) {
        assert_eq!(source, DecisionSource::Heuristic);
    }
}
