//! Attack AI: hunt pursuit first, then learned values, then the heuristic.
//!
//! One decision per [`ReinforcementAi::get_attack_coordinates`] call and one
//! learning step per reported outcome, strictly alternating on the thread
//! driving the game loop.

use std::collections::HashSet;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::common::{CellState, Coordinate, GuessResult};
use crate::config::AiConfig;
use crate::grid::BoardView;
use crate::heuristic;
use crate::learning::Learner;
use crate::signature::BoardSignature;
use crate::targeting::TargetingState;
use crate::value_store::{LoadOutcome, ValueStore};

/// Where a decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    Pursuit,
    ValueStore,
    Heuristic,
}

/// Reinforcement-learning attacker over a read-only view of the opponent grid.
pub struct ReinforcementAi<V: BoardView> {
    view: V,
    config: AiConfig,
    store: ValueStore,
    learner: Learner,
    targeting: TargetingState,
    rng: SmallRng,
    registered: HashSet<Coordinate>,
    last_decision: Option<(Coordinate, DecisionSource)>,
}

impl<V: BoardView> ReinforcementAi<V> {
    /// Create an AI with the given learning parameters and defaults elsewhere.
    pub fn new(view: V, learning_rate: f64, discount_factor: f64, exploration_rate: f64) -> Self {
        Self::with_config(view, AiConfig::new(learning_rate, discount_factor, exploration_rate))
    }

    pub fn with_config(view: V, config: AiConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let learner = Learner::new(config.learning_rate, config.discount_factor, config.rewards.clone());
        Self {
            view,
            config,
            store: ValueStore::new(),
            learner,
            targeting: TargetingState::Searching,
            rng,
            registered: HashSet::new(),
            last_decision: None,
        }
    }

    /// Replace the learned values, e.g. with a pre-trained table.
    pub fn with_value_store(mut self, store: ValueStore) -> Self {
        self.store = store;
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn targeting(&self) -> &TargetingState {
        &self.targeting
    }

    pub fn value_store(&self) -> &ValueStore {
        &self.store
    }

    pub fn value_store_mut(&mut self) -> &mut ValueStore {
        &mut self.store
    }

    pub fn learner(&self) -> &Learner {
        &self.learner
    }

    /// The coordinate returned by the latest decision and how it was chosen.
    pub fn last_decision(&self) -> Option<(Coordinate, DecisionSource)> {
        self.last_decision
    }

    /// Choose the next cell to attack, or `None` when every cell has been
    /// attacked. The grid itself is never modified.
    pub fn get_attack_coordinates(&mut self) -> Option<Coordinate> {
        let unknown = self.view.unknown_cells();
        if unknown.is_empty() {
            self.targeting.reset();
            self.last_decision = None;
            return None;
        }

        if self
            .targeting
            .anchor()
            .is_some_and(|a| self.view.cell(a) != Some(CellState::Hit))
        {
            // the grid was reset underneath; cells unknown again may be reported anew
            let view = &self.view;
            let before = self.registered.len();
            self.registered.retain(|c| !view.is_unknown(*c));
            debug!("forgot {} reports for cells no longer attacked", before - self.registered.len());
        }

        let decision = if let Some(c) = self.targeting.next_target(&self.view) {
            (c, DecisionSource::Pursuit)
        } else if let Some(c) = self.exploit(&unknown) {
            (c, DecisionSource::ValueStore)
        } else {
            let c = heuristic::choose(&self.view, self.config.hunt_length_cap(), self.config.top_k, &mut self.rng)
                .unwrap_or(unknown[0]);
            (c, DecisionSource::Heuristic)
        };
        debug!("attack {} via {:?}", decision.0, decision.1);
        self.last_decision = Some(decision);
        Some(decision.0)
    }

    /// Best learned cell for the current board, or `None` when exploring or
    /// when the table carries no discriminating signal.
    fn exploit(&mut self, unknown: &[Coordinate]) -> Option<Coordinate> {
        if self.rng.random::<f64>() < self.config.exploration_rate {
            return None;
        }
        let state = BoardSignature::capture(&self.view);
        let actions = self.store.actions(&state).filter(|a| !a.is_empty())?;

        let mut best_value = f64::NEG_INFINITY;
        let mut best = Vec::new();
        for c in unknown {
            let value = actions.get(c).copied().unwrap_or(0.0);
            if value > best_value {
                best_value = value;
                best.clear();
                best.push(*c);
            } else if value == best_value {
                best.push(*c);
            }
        }
        if best_value <= 0.0 && best.len() == unknown.len() {
            return None;
        }
        best.choose(&mut self.rng).copied()
    }

    /// Report whether the attack at `coord` hit.
    pub fn register_result(&mut self, coord: Coordinate, hit: bool) {
        self.register_guess(coord, GuessResult::from(hit));
    }

    /// Report the full outcome of the attack at `coord`; `Sink` concludes
    /// the current hunt.
    pub fn register_guess(&mut self, coord: Coordinate, result: GuessResult) {
        let size = self.view.size();
        if !coord.in_bounds(size) {
            warn!("ignoring result for out-of-bounds coordinate {}", coord);
            return;
        }
        if !self.registered.insert(coord) {
            warn!("ignoring repeated result for {}", coord);
            return;
        }
        if self.last_decision.map(|(c, _)| c) != Some(coord) {
            debug!("result for {} which was not the latest decision", coord);
        }

        let state = BoardSignature::capture_with(&self.view, coord, CellState::Unknown);
        let next_state = BoardSignature::capture_with(&self.view, coord, result.cell_state());
        let reward = self.learner.reward_for(result, self.targeting.hits_on_current_ship());
        self.learner.update(&mut self.store, state, coord, reward, next_state);

        self.targeting.record(&self.view, coord, result, self.config.hunt_length_cap(), &mut self.rng);
    }

    /// Forget the hunt in progress and this game's history. Learned values stay.
    pub fn reset_for_new_game(&mut self) {
        self.targeting.reset();
        self.learner.clear_history();
        self.registered.clear();
        self.last_decision = None;
    }

    /// End the current game, rewarding its moves when `won`, and prepare for
    /// the next one.
    pub fn finish_game(&mut self, won: bool) {
        if won {
            self.learner.reward_winning_sequence(&mut self.store);
        }
        self.reset_for_new_game();
    }

    /// Replace the value store with the persisted one. A missing or
    /// unreadable file leaves an empty store.
    pub fn load(&mut self) {
        let path = &self.config.model_path;
        self.store = match ValueStore::load_from(path) {
            LoadOutcome::Loaded(store) => store,
            LoadOutcome::Missing => {
                info!("no saved model at {}; starting fresh", path.display());
                ValueStore::new()
            }
            LoadOutcome::Corrupt(e) => {
                warn!("discarding unreadable model at {}: {}", path.display(), e);
                ValueStore::new()
            }
        };
    }

    /// Persist the value store. Failures are logged, never raised.
    pub fn save(&mut self) {
        let path = self.config.model_path.clone();
        if self.config.merge_on_save {
            if let LoadOutcome::Loaded(on_disk) = ValueStore::load_from(&path) {
                let added = self.store.merge_from(on_disk);
                debug!("merged {} entries from {}", added, path.display());
            }
        }
        if let Err(e) = self.store.save_to(&path, self.config.prune_on_save) {
            warn!("failed to save model to {}: {}", path.display(), e);
        }
    }
}
