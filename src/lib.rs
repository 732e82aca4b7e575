mod ai;
mod board;
mod common;
mod config;
mod game;
mod grid;
pub mod heuristic;
mod learning;
mod logging;
pub mod prelude;
mod ship;
mod signature;
mod targeting;
pub mod ui;
mod value_store;

pub use ai::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use grid::*;
pub use learning::*;
pub use logging::{init_logging, LOG_ENV};
pub use ship::*;
pub use signature::*;
pub use targeting::*;
pub use value_store::*;
