use std::cell::RefCell;
use std::rc::Rc;

use battleship_rl::{AiConfig, BoardView, CellState, Coordinate, Grid, ReinforcementAi, TrainingSession, SHIPS};
use proptest::prelude::*;

fn grid_from(size: usize, codes: &[u8]) -> Grid {
    let mut grid = Grid::new(size);
    for (i, code) in codes.iter().take(size * size).enumerate() {
        let state = match code {
            1 => CellState::Hit,
            2 => CellState::Miss,
            _ => CellState::Unknown,
        };
        grid.set(Coordinate::new(i / size, i % size), state).unwrap();
    }
    grid
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn decisions_are_always_unknown_cells(
        size in 2usize..12,
        codes in prop::collection::vec(0u8..3, 144),
        exploration in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let grid = grid_from(size, &codes);
        let mut ai = ReinforcementAi::with_config(&grid, AiConfig::new(0.1, 0.9, exploration).with_seed(seed));
        match ai.get_attack_coordinates() {
            Some(c) => {
                prop_assert!(c.in_bounds(size));
                prop_assert!(grid.is_unknown(c));
            }
            None => prop_assert!(grid.unknown_cells().is_empty()),
        }
    }

    #[test]
    fn reported_outcomes_keep_decisions_fresh(
        codes in prop::collection::vec(0u8..2, 100),
        seed in any::<u64>(),
    ) {
        // every decision is attacked, so the AI has to walk the whole grid
        let grid = Rc::new(RefCell::new(Grid::new(10)));
        let mut ai = ReinforcementAi::with_config(Rc::clone(&grid), AiConfig::default().with_seed(seed));
        let mut turns = 0;
        while let Some(c) = ai.get_attack_coordinates() {
            prop_assert!(grid.borrow().is_unknown(c));
            let hit = codes[c.row * 10 + c.col] == 1;
            grid.borrow_mut().mark(c, hit).unwrap();
            ai.register_result(c, hit);
            turns += 1;
            prop_assert!(turns <= 100);
        }
        prop_assert_eq!(turns, 100);
        prop_assert!(ai.value_store().len() <= 100);
    }

    #[test]
    fn whole_games_never_repeat_an_attack(fleet_seed in any::<u64>(), ai_seed in any::<u64>()) {
        let mut session = TrainingSession::new(10, &SHIPS, AiConfig::default().with_seed(ai_seed), fleet_seed);
        let report = session.play_game();
        prop_assert!(report.is_ok(), "{:?}", report);
        prop_assert!(report.unwrap().won);
    }
}

#[test]
fn full_grid_means_no_move() {
    let grid = grid_from(4, &[1, 2].repeat(8));
    let mut ai = ReinforcementAi::with_config(&grid, AiConfig::default().with_seed(0));
    assert_eq!(ai.get_attack_coordinates(), None);
    assert_eq!(ai.last_decision(), None);
}
