//! Core Connect Four game logic: board representation, flat state codes,
//! outcome evaluation and the turn-taking game state.

mod board;
pub mod code;
pub mod outcome;
mod player;
mod state;

pub use board::{Board, Cell, CELLS, COLS, ROWS};
pub use code::StateCode;
pub use outcome::{is_draw, winner, winning_line, GameOutcome};
pub use player::Player;
pub use state::GameState;
