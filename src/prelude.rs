//! Commonly used types and utilities for ease of import.

pub use crate::{
    AiConfig, Board, BoardView, Coordinate, GuessResult, Grid, ReinforcementAi, TargetingState,
    TrainingSession, ValueStore,
};
