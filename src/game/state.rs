use crate::error::MoveError;

use super::board::{Board, COLS};
use super::outcome::{self, GameOutcome};
use super::player::Player;

/// Board plus turn bookkeeping. The outcome is derived from the board on
/// every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    turn: usize,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Red, // Red starts
            turn: 0,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of pieces placed since the last reset
    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn outcome(&self) -> GameOutcome {
        outcome::outcome(&self.board)
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_over()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = *self;
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply move in place. Returns the row the piece landed in.
    pub fn apply_move_mut(&mut self, column: usize) -> Result<usize, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let row = self
            .board
            .drop_piece(column, self.current_player.to_cell())?;
        self.current_player = self.current_player.other();
        self.turn += 1;
        Ok(row)
    }

    /// Back to an empty board with Red to move.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = Player::Red;
        self.turn = 0;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
