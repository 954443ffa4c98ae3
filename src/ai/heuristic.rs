use serde::{Deserialize, Serialize};

use crate::game::code::{OPPONENT, OWN};
use crate::game::{StateCode, COLS, ROWS};

/// Static evaluation of a position from the point of view of the `'1'` side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub score: i32,
    /// A complete line of four exists somewhere on the board.
    pub decided: bool,
}

/// Trait for evaluating a position encoded as a state code.
pub trait Heuristic: Send {
    fn evaluate(&self, code: &StateCode) -> Evaluation;
}

/// Score per uncontested line, by piece count. A lone piece scores nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineWeights {
    pub two: i32,
    pub three: i32,
    pub four: i32,
}

impl Default for LineWeights {
    fn default() -> Self {
        LineWeights {
            two: 10,
            three: 100,
            four: 1000,
        }
    }
}

impl LineWeights {
    /// Largest accepted weight. Every window on the board scoring `four` still
    /// fits in an `i32`.
    pub const MAX: i32 = i32::MAX / WINDOWS;

    fn for_count(&self, count: usize) -> i32 {
        match count {
            4 => self.four,
            3 => self.three,
            2 => self.two,
            _ => 0,
        }
    }
}

/// (dcol, drow) of the always-scored directions: horizontal, vertical and
/// diagonal down-right.
const SCORED_DIRECTIONS: [(isize, isize); 3] = [(1, 0), (0, 1), (1, 1)];

/// Diagonal down-left.
const ANTI_DIAGONAL: (isize, isize) = (-1, 1);

/// Four-cell windows on a 7x6 board over all four directions.
const WINDOWS: i32 = 69;

/// Sums weights over every four-cell window that holds pieces of only one side.
///
/// Partial lines on the anti-diagonal are only scored when
/// `score_anti_diagonal` is set. Completed fours are counted in every
/// direction regardless, so a won position is never scored as open.
#[derive(Debug, Clone, Default)]
pub struct LineHeuristic {
    weights: LineWeights,
    score_anti_diagonal: bool,
}

impl LineHeuristic {
    pub fn new(weights: LineWeights, score_anti_diagonal: bool) -> Self {
        LineHeuristic {
            weights,
            score_anti_diagonal,
        }
    }

    /// Piece counts (own, opponent) of the window starting at (row, col),
    /// or `None` if it runs off the board.
    fn window(
        code: &StateCode,
        row: usize,
        col: usize,
        dir: (isize, isize),
    ) -> Option<(usize, usize)> {
        let (dc, dr) = dir;
        let end_row = row as isize + 3 * dr;
        let end_col = col as isize + 3 * dc;
        if end_row < 0 || end_row >= ROWS as isize || end_col < 0 || end_col >= COLS as isize {
            return None;
        }

        let mut own = 0;
        let mut opp = 0;
        for step in 0..4 {
            let r = (row as isize + step * dr) as usize;
            let c = (col as isize + step * dc) as usize;
            match code.get(r, c) {
                OWN => own += 1,
                OPPONENT => opp += 1,
                _ => {}
            }
        }
        Some((own, opp))
    }

    fn score_window(&self, own: usize, opp: usize) -> i32 {
        match (own, opp) {
            (n, 0) if n > 0 => self.weights.for_count(n),
            (0, n) if n > 0 => -self.weights.for_count(n),
            _ => 0,
        }
    }
}

impl Heuristic for LineHeuristic {
    fn evaluate(&self, code: &StateCode) -> Evaluation {
        let mut score = 0;
        let mut decided = false;

        for row in 0..ROWS {
            for col in 0..COLS {
                for &dir in &SCORED_DIRECTIONS {
                    if let Some((own, opp)) = Self::window(code, row, col, dir) {
                        score += self.score_window(own, opp);
                        decided |= own == 4 || opp == 4;
                    }
                }

                if let Some((own, opp)) = Self::window(code, row, col, ANTI_DIAGONAL) {
                    if self.score_anti_diagonal || own == 4 || opp == 4 {
                        score += self.score_window(own, opp);
                    }
                    decided |= own == 4 || opp == 4;
                }
            }
        }

        Evaluation { score, decided }
    }
}
