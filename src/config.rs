use std::path::PathBuf;

use crate::ship::ShipType;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;
pub const SHIPS: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Where the value store is persisted unless [`AiConfig::model_path`] says otherwise.
pub const DEFAULT_MODEL_PATH: &str = "models/battleship_rl_model.bin";

/// Length of the longest ship in `fleet`, or 0 for an empty fleet.
pub fn max_ship_length(fleet: &[ShipType]) -> usize {
    fleet.iter().map(|s| s.length()).max().unwrap_or(0)
}

/// Reward shaping applied by the learning update.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardConfig {
    /// Reward for the first hit of a hunt.
    pub hit: f64,
    /// Reward for any further hit while a hunt already holds a hit.
    pub follow_up_hit: f64,
    pub miss: f64,
    /// Terminal bonus handed to the newest move of a won game.
    pub win_bonus: f64,
    /// Per-move decay of the bonus going backward through the history.
    pub win_decay: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            hit: 1.0,
            follow_up_hit: 2.0,
            miss: -0.1,
            win_bonus: 50.0,
            win_decay: 0.9,
        }
    }
}

/// Tunable parameters of the attack AI.
#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
    pub learning_rate: f64,
    pub discount_factor: f64,
    /// Probability of ignoring the value store while searching.
    pub exploration_rate: f64,
    pub rewards: RewardConfig,
    /// Number of best heuristic cells sampled from.
    pub top_k: usize,
    /// Hunts conclude once this many hits land on the current ship. `None`
    /// takes the longest ship of the fleet being attacked.
    pub max_ship_length: Option<usize>,
    pub model_path: PathBuf,
    /// Drop entries with non-positive value when saving.
    pub prune_on_save: bool,
    /// Fold the file's current contents into memory before saving.
    pub merge_on_save: bool,
    /// Fixed RNG seed; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            exploration_rate: 0.2,
            rewards: RewardConfig::default(),
            top_k: 3,
            max_ship_length: None,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            prune_on_save: false,
            merge_on_save: false,
            seed: None,
        }
    }
}

impl AiConfig {
    pub fn new(learning_rate: f64, discount_factor: f64, exploration_rate: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
            exploration_rate,
            ..Self::default()
        }
    }

    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn with_max_ship_length(mut self, len: usize) -> Self {
        self.max_ship_length = Some(len.max(1));
        self
    }

    /// Fill in the hunt cap from `fleet` unless one was set explicitly.
    pub fn for_fleet(mut self, fleet: &[ShipType]) -> Self {
        if self.max_ship_length.is_none() {
            self.max_ship_length = Some(max_ship_length(fleet).max(1));
        }
        self
    }

    /// Effective hunt cap, the standard fleet's longest ship when unset.
    pub fn hunt_length_cap(&self) -> usize {
        self.max_ship_length.unwrap_or_else(|| max_ship_length(&SHIPS))
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_prune_on_save(mut self, prune: bool) -> Self {
        self.prune_on_save = prune;
        self
    }

    pub fn with_merge_on_save(mut self, merge: bool) -> Self {
        self.merge_on_save = merge;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
