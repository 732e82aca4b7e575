//! Reward policy and temporal-difference update of the value store.

use log::debug;

use crate::common::{Coordinate, GuessResult};
use crate::config::RewardConfig;
use crate::signature::BoardSignature;
use crate::value_store::ValueStore;

/// One learned move of the current game.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: BoardSignature,
    pub action: Coordinate,
    pub reward: f64,
    pub next_state: BoardSignature,
}

/// Applies rewards to a [`ValueStore`] and remembers the moves of the game
/// in progress for the terminal bonus.
///
/// Every update uses the discounted future maximum:
///
/// `Q(s,a) ← Q(s,a) + α · (r + γ · max_a' Q(s',a') − Q(s,a))`
#[derive(Debug, Clone)]
pub struct Learner {
    learning_rate: f64,
    discount_factor: f64,
    rewards: RewardConfig,
    history: Vec<Transition>,
}

impl Learner {
    pub fn new(learning_rate: f64, discount_factor: f64, rewards: RewardConfig) -> Self {
        Self {
            learning_rate,
            discount_factor,
            rewards,
            history: Vec::new(),
        }
    }

    pub fn rewards(&self) -> &RewardConfig {
        &self.rewards
    }

    /// Reward for `result` given how many hits the current hunt held before it.
    pub fn reward_for(&self, result: GuessResult, hits_on_current_ship: usize) -> f64 {
        match result {
            GuessResult::Miss => self.rewards.miss,
            _ if hits_on_current_ship > 0 => self.rewards.follow_up_hit,
            _ => self.rewards.hit,
        }
    }

    /// Apply one TD update and record the transition. Returns the new value.
    pub fn update(
        &mut self,
        store: &mut ValueStore,
        state: BoardSignature,
        action: Coordinate,
        reward: f64,
        next_state: BoardSignature,
    ) -> f64 {
        let current = store.get(&state, action);
        let future = store.max_value(&next_state, next_state.unknown_cells());
        let target = reward + self.discount_factor * future;
        let value = current + self.learning_rate * (target - current);
        store.set(state.clone(), action, value);
        debug!(
            "q update at {}: {:.4} -> {:.4} (reward {:.2}, future {:.4})",
            action, current, value, reward, future
        );
        self.history.push(Transition {
            state,
            action,
            reward,
            next_state,
        });
        value
    }

    /// Moves learned since the last [`Learner::clear_history`].
    pub fn history(&self) -> &[Transition] {
        &self.history
    }

    /// Hand the terminal bonus to every recorded move, newest first, decaying
    /// by `win_decay` per step back.
    pub fn reward_winning_sequence(&self, store: &mut ValueStore) {
        let mut bonus = self.rewards.win_bonus;
        for t in self.history.iter().rev() {
            store.add(t.state.clone(), t.action, bonus);
            bonus *= self.rewards.win_decay;
        }
        debug!("winning bonus applied to {} moves", self.history.len());
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
