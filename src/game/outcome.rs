use super::board::{Board, Cell, COLS, ROWS};
use super::player::Player;

/// Result of scanning a board. Never stored on its own; always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    InProgress,
    Winner(Player),
    Draw,
}

impl GameOutcome {
    pub fn is_over(self) -> bool {
        self != GameOutcome::InProgress
    }
}

/// Scan directions as (dcol, drow): horizontal, vertical, diagonal
/// down-right, diagonal down-left. Runs only extend forward from their seed,
/// so each line of four is found from exactly one end.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

/// First run of four found in scan order, as (row, col) pairs.
pub fn winning_line(board: &Board) -> Option<[(usize, usize); 4]> {
    for row in 0..ROWS {
        for col in 0..COLS {
            let cell = board.get(row, col);
            if cell == Cell::Empty {
                continue;
            }
            for &(dc, dr) in &DIRECTIONS {
                let mut line = [(row, col); 4];
                let mut count = 1;
                for step in 1..4 {
                    let r = row as isize + dr * step;
                    let c = col as isize + dc * step;
                    match board.get_checked(r, c) {
                        Some(next) if next == cell => {
                            line[count] = (r as usize, c as usize);
                            count += 1;
                        }
                        _ => break,
                    }
                }
                if count == 4 {
                    return Some(line);
                }
            }
        }
    }
    None
}

/// Owner of a four-in-a-row, if any.
pub fn winner(board: &Board) -> Option<Player> {
    winning_line(board).and_then(|line| {
        let (row, col) = line[0];
        Player::from_cell(board.get(row, col))
    })
}

/// A full board with no winner.
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && winner(board).is_none()
}

pub fn outcome(board: &Board) -> GameOutcome {
    // Winner first: a full board that contains a four is a win, not a draw.
    if let Some(player) = winner(board) {
        GameOutcome::Winner(player)
    } else if board.is_full() {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}
