//! Flat per-cell state codes.
//!
//! A code is one ASCII byte per cell in row-major order, top row first:
//! `'0'` empty, `'1'` a piece of the side the code was encoded for, `'2'` a
//! piece of its opponent. The search copies and mutates these in place.

use std::fmt;
use std::str::FromStr;

use crate::error::StateCodeError;

use super::board::{Board, Cell, CELLS, COLS, ROWS};
use super::player::Player;

pub const EMPTY: u8 = b'0';
pub const OWN: u8 = b'1';
pub const OPPONENT: u8 = b'2';

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateCode {
    bytes: [u8; CELLS],
}

impl StateCode {
    /// Code of an empty board
    pub fn empty() -> Self {
        StateCode {
            bytes: [EMPTY; CELLS],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.bytes[row * COLS + col]
    }

    /// Store `code` at (row, col).
    ///
    /// # Panics
    ///
    /// If `code` is not one of [`EMPTY`], [`OWN`] or [`OPPONENT`].
    pub fn set(&mut self, row: usize, col: usize, code: u8) {
        assert!(
            matches!(code, EMPTY | OWN | OPPONENT),
            "invalid state code byte {code:#04x}"
        );
        self.bytes[row * COLS + col] = code;
    }

    pub fn lowest_open_row(&self, col: usize) -> Option<usize> {
        (0..ROWS).rev().find(|&row| self.get(row, col) == EMPTY)
    }

    pub fn is_full(&self) -> bool {
        !self.bytes.contains(&EMPTY)
    }
}

impl Default for StateCode {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromStr for StateCode {
    type Err = StateCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Length in chars, not bytes.
        let actual = s.chars().count();
        if actual != CELLS {
            return Err(StateCodeError::InvalidLength {
                expected: CELLS,
                actual,
            });
        }

        let mut bytes = [EMPTY; CELLS];
        for (index, ch) in s.chars().enumerate() {
            bytes[index] = match ch {
                '0' => EMPTY,
                '1' => OWN,
                '2' => OPPONENT,
                code => return Err(StateCodeError::InvalidCode { index, code }),
            };
        }
        Ok(StateCode { bytes })
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bytes {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateCode({self})")
    }
}

impl Board {
    /// Serialize the board with `own`'s pieces as `'1'`.
    pub fn to_code(&self, own: Player) -> StateCode {
        let own_cell = own.to_cell();
        let mut code = StateCode::empty();
        for row in 0..ROWS {
            for col in 0..COLS {
                let cell = self.get(row, col);
                if cell == Cell::Empty {
                    continue;
                }
                code.set(row, col, if cell == own_cell { OWN } else { OPPONENT });
            }
        }
        code
    }

    /// Rebuild a board from a code encoded for `own`.
    ///
    /// Codes with a piece resting above an empty cell are rejected.
    pub fn from_code(code: &StateCode, own: Player) -> Result<Board, StateCodeError> {
        let mut board = Board::new();
        for col in 0..COLS {
            let mut seen_empty_below = false;
            for row in (0..ROWS).rev() {
                let cell = match code.get(row, col) {
                    EMPTY => {
                        seen_empty_below = true;
                        continue;
                    }
                    OWN => own.to_cell(),
                    _ => own.other().to_cell(),
                };
                if seen_empty_below {
                    return Err(StateCodeError::FloatingPiece { row, col });
                }
                board.set(row, col, cell);
            }
        }
        Ok(board)
    }
}
