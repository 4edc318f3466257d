//! Core Connect Four game logic: board representation, player identifiers,
//! win detection and the game state machine.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Direction, Position, Run, MIN_DIMENSION, WIN_LENGTH};
pub use player::Player;
pub use state::{GameState, GameStatus, PlacementResult};

pub use crate::error::GameError;
