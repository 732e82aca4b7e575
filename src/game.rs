//! Self-play driver: the AI attacks a randomly placed fleet, game after game,
//! learning as it goes.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::ai::ReinforcementAi;
use crate::board::Board;
use crate::common::{BoardError, GuessResult};
use crate::config::AiConfig;
use crate::grid::BoardView;
use crate::ship::ShipType;

/// Board shared between the mutating game loop and the read-only AI.
pub type SharedBoard = Rc<RefCell<Board>>;

/// Outcome of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub won: bool,
    pub turns: usize,
    pub hits: usize,
    pub misses: usize,
}

/// Aggregate of a training run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TrainingSummary {
    pub games: usize,
    pub wins: usize,
    pub average_turns: f64,
    pub best_turns: Option<usize>,
    pub worst_turns: Option<usize>,
    pub value_entries: usize,
}

/// One AI playing repeated games against freshly placed fleets.
pub struct TrainingSession {
    board: SharedBoard,
    ai: ReinforcementAi<SharedBoard>,
    rng: SmallRng,
}

impl TrainingSession {
    /// Build a session on a `size`×`size` board. `seed` drives fleet
    /// placement; the AI's own RNG follows `config.seed`. The hunt cap
    /// follows `fleet` unless `config` sets one.
    pub fn new(size: usize, fleet: &[ShipType], config: AiConfig, seed: u64) -> Self {
        let board: SharedBoard = Rc::new(RefCell::new(Board::new(size, fleet)));
        let ai = ReinforcementAi::with_config(Rc::clone(&board), config.for_fleet(fleet));
        Self {
            board,
            ai,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn ai(&self) -> &ReinforcementAi<SharedBoard> {
        &self.ai
    }

    pub fn ai_mut(&mut self) -> &mut ReinforcementAi<SharedBoard> {
        &mut self.ai
    }

    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    /// Reset the board and place a new random fleet.
    pub fn setup(&mut self) -> Result<(), BoardError> {
        let mut board = self.board.borrow_mut();
        board.clear();
        board.place_randomly(&mut self.rng)
    }

    /// Play one attack. Returns the result, or `None` once the AI has no move.
    pub fn step(&mut self) -> Result<Option<GuessResult>, BoardError> {
        let Some(target) = self.ai.get_attack_coordinates() else {
            return Ok(None);
        };
        let result = self.board.borrow_mut().guess(target.row, target.col)?;
        self.ai.register_guess(target, result);
        Ok(Some(result))
    }

    /// Place a fleet and play until it is sunk or the AI runs out of moves.
    pub fn play_game(&mut self) -> Result<GameReport, BoardError> {
        self.setup()?;
        self.ai.reset_for_new_game();

        let limit = {
            let size = self.board.size();
            size * size
        };
        let mut report = GameReport {
            won: false,
            turns: 0,
            hits: 0,
            misses: 0,
        };
        while report.turns < limit {
            match self.step()? {
                Some(result) => {
                    report.turns += 1;
                    if result.is_hit() {
                        report.hits += 1;
                    } else {
                        report.misses += 1;
                    }
                }
                None => break,
            }
            if self.board.borrow().all_sunk() {
                report.won = true;
                break;
            }
        }
        self.ai.finish_game(report.won);
        debug!("game finished: {:?}", report);
        Ok(report)
    }

    /// Play `episodes` games and summarise them.
    pub fn train(&mut self, episodes: usize) -> Result<TrainingSummary, BoardError> {
        let mut summary = TrainingSummary::default();
        let mut total_turns = 0;
        for episode in 0..episodes {
            let report = self.play_game()?;
            summary.games += 1;
            summary.wins += usize::from(report.won);
            total_turns += report.turns;
            summary.best_turns = Some(summary.best_turns.map_or(report.turns, |b| b.min(report.turns)));
            summary.worst_turns = Some(summary.worst_turns.map_or(report.turns, |w| w.max(report.turns)));
            if (episode + 1) % 100 == 0 {
                info!("episode {}: {} turns", episode + 1, report.turns);
            }
        }
        if summary.games > 0 {
            summary.average_turns = total_turns as f64 / summary.games as f64;
        }
        summary.value_entries = self.ai.value_store().len();
        Ok(summary)
    }
}
