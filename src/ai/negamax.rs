use serde::{Deserialize, Serialize};

use crate::game::code::{EMPTY, OPPONENT, OWN};
use crate::game::{GameState, StateCode, COLS};

use super::agent::Agent;
use super::heuristic::{Heuristic, LineHeuristic, LineWeights};

/// Bound used for the alpha-beta window. Negating it never overflows.
const INF: i32 = i32::MAX;

/// `[ai]` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Positions this many plies below a root move are scored statically.
    pub max_depth: usize,
    /// Prune with an alpha-beta window. Turning it off gives plain negamax,
    /// which picks the same column but visits every node.
    pub alpha_beta: bool,
    /// Score partial lines on the down-left diagonal too.
    pub score_anti_diagonal: bool,
    pub weights: LineWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: 6,
            alpha_beta: true,
            score_anti_diagonal: false,
            weights: LineWeights::default(),
        }
    }
}

/// Outcome of one move decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    /// Best column, `None` only when every column is full.
    pub column: Option<usize>,
    /// Value of `column` from the searching side's point of view.
    pub score: i32,
    /// Number of positions visited below the root.
    pub nodes: u64,
}

/// A simulated drop that is taken back when the guard goes out of scope,
/// including on early exits from a pruned loop.
struct Placement<'a> {
    code: &'a mut StateCode,
    row: usize,
    col: usize,
}

impl<'a> Placement<'a> {
    fn place(code: &'a mut StateCode, col: usize, piece: u8) -> Option<Self> {
        let row = code.lowest_open_row(col)?;
        code.set(row, col, piece);
        Some(Placement { code, row, col })
    }

    fn code(&mut self) -> &mut StateCode {
        &mut *self.code
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.code.set(self.row, self.col, EMPTY);
    }
}

/// Depth-limited negamax over state codes, columns tried left to right.
pub struct NegamaxAgent {
    config: SearchConfig,
    heuristic: Box<dyn Heuristic>,
}

impl NegamaxAgent {
    pub fn new(config: SearchConfig) -> Self {
        let heuristic = LineHeuristic::new(config.weights, config.score_anti_diagonal);
        NegamaxAgent {
            config,
            heuristic: Box::new(heuristic),
        }
    }

    pub fn with_heuristic(config: SearchConfig, heuristic: Box<dyn Heuristic>) -> Self {
        NegamaxAgent { config, heuristic }
    }

    /// Pick a column for the `'1'` side of `code`.
    pub fn choose_move(&self, code: &StateCode) -> Option<usize> {
        self.search(code).column
    }

    /// Full root search. Ties keep the leftmost column.
    pub fn search(&self, code: &StateCode) -> SearchReport {
        let mut work = *code;
        let mut nodes = 0;
        let mut best: Option<(usize, i32)> = None;

        for col in 0..COLS {
            let Some(mut placed) = Placement::place(&mut work, col, OWN) else {
                continue;
            };
            // Fail-soft values at or below `alpha` never replace the best.
            let alpha = best.map_or(-INF, |(_, score)| score);
            let score = -self.negamax(placed.code(), 0, -INF, -alpha, -1, &mut nodes);
            log::trace!("column {col}: {score}");

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((col, score));
            }
        }
        debug_assert_eq!(work, *code, "search must restore every placement");

        SearchReport {
            column: best.map(|(col, _)| col),
            score: best.map_or(0, |(_, score)| score),
            nodes,
        }
    }

    /// Value of `code` for the side whose pieces are `'1'` when `sign` is 1,
    /// `'2'` when it is -1.
    fn negamax(
        &self,
        code: &mut StateCode,
        depth: usize,
        mut alpha: i32,
        beta: i32,
        sign: i32,
        nodes: &mut u64,
    ) -> i32 {
        *nodes += 1;

        let eval = self.heuristic.evaluate(code);
        if depth >= self.config.max_depth || eval.decided || code.is_full() {
            return sign * eval.score;
        }

        let piece = if sign == 1 { OWN } else { OPPONENT };
        let mut best = -INF;
        for col in 0..COLS {
            let Some(mut placed) = Placement::place(code, col, piece) else {
                continue;
            };
            let value = -self.negamax(placed.code(), depth + 1, -beta, -alpha, -sign, nodes);
            best = best.max(value);

            if self.config.alpha_beta {
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
        }

        best
    }
}

impl Agent for NegamaxAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }

        let code = state.board().to_code(state.current_player());
        let report = self.search(&code);
        log::debug!(
            "negamax for {} chose {:?} (score {}, {} nodes)",
            state.current_player().name(),
            report.column,
            report.score,
            report.nodes
        );
        report.column
    }

    fn name(&self) -> &str {
        "Negamax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::{Board, Cell, GameOutcome, Player, ROWS};

    fn agent(depth: usize) -> NegamaxAgent {
        NegamaxAgent::new(SearchConfig {
            max_depth: depth,
            ..SearchConfig::default()
        })
    }

    fn unpruned(depth: usize) -> NegamaxAgent {
        NegamaxAgent::new(SearchConfig {
            max_depth: depth,
            alpha_beta: false,
            ..SearchConfig::default()
        })
    }

    fn code_with(pieces: &[(usize, usize, u8)]) -> StateCode {
        let mut code = StateCode::empty();
        for &(row, col, piece) in pieces {
            code.set(row, col, piece);
        }
        code
    }

    /// Play `moves` random plies from the start, stopping early on a result.
    fn random_position(seed: u64, moves: usize) -> GameState {
        let mut random = RandomAgent::with_seed(seed);
        let mut state = GameState::initial();
        for _ in 0..moves {
            let next = state.apply_move(random.select_action(&state).unwrap()).unwrap();
            if next.is_terminal() {
                break;
            }
            state = next;
        }
        state
    }

    // --- Guard tests ---

    #[test]
    fn placement_undoes_in_reverse_order() {
        let mut code = StateCode::empty();
        {
            let mut outer = Placement::place(&mut code, 3, OWN).unwrap();
            assert_eq!(outer.row, ROWS - 1);
            {
                let inner = Placement::place(outer.code(), 3, OPPONENT).unwrap();
                assert_eq!(inner.row, ROWS - 2);
                assert_eq!(inner.code.get(ROWS - 2, 3), OPPONENT);
            }
            assert_eq!(outer.code().get(ROWS - 2, 3), EMPTY);
            assert_eq!(outer.code().get(ROWS - 1, 3), OWN);
        }
        assert_eq!(code, StateCode::empty());
    }

    #[test]
    fn placement_refuses_full_column() {
        let mut code = StateCode::empty();
        for row in 0..ROWS {
            code.set(row, 0, OWN);
        }
        assert!(Placement::place(&mut code, 0, OPPONENT).is_none());
    }

    // --- Root search tests ---

    #[test]
    fn empty_board_move_is_in_range() {
        let report = NegamaxAgent::new(SearchConfig::default()).search(&StateCode::empty());
        let col = report.column.expect("empty board has moves");
        assert!(col < COLS);
        assert!(report.nodes > 0);
    }

    #[test]
    fn full_board_has_no_move() {
        let full: StateCode = "12".repeat(21).parse().unwrap();
        assert_eq!(agent(4).choose_move(&full), None);
    }

    #[test]
    fn takes_vertical_win() {
        // Own pieces at column 0 rows 5, 4, 3; row 2 completes the four.
        let code = code_with(&[
            (5, 0, OWN),
            (4, 0, OWN),
            (3, 0, OWN),
            (5, 1, OPPONENT),
            (5, 2, OPPONENT),
        ]);
        assert_eq!(agent(4).choose_move(&code), Some(0));
    }

    #[test]
    fn takes_winning_move() {
        let code = code_with(&[
            (5, 0, OWN),
            (5, 1, OWN),
            (5, 2, OWN),
            (4, 0, OPPONENT),
            (4, 1, OPPONENT),
            (4, 2, OPPONENT),
        ]);
        assert_eq!(agent(4).choose_move(&code), Some(3));
    }

    #[test]
    fn blocks_opponent_win() {
        let code = code_with(&[
            (5, 0, OPPONENT),
            (5, 1, OPPONENT),
            (5, 2, OPPONENT),
            (4, 0, OWN),
            (4, 1, OWN),
            (5, 6, OWN),
        ]);
        assert_eq!(agent(4).choose_move(&code), Some(3));
    }

    #[test]
    fn ties_keep_leftmost_column() {
        struct Flat;
        impl Heuristic for Flat {
            fn evaluate(&self, _code: &StateCode) -> crate::ai::Evaluation {
                crate::ai::Evaluation {
                    score: 0,
                    decided: false,
                }
            }
        }

        let mut code = StateCode::empty();
        for row in 0..ROWS {
            code.set(row, 0, if row % 2 == 0 { OWN } else { OPPONENT });
        }
        let config = SearchConfig {
            max_depth: 2,
            ..SearchConfig::default()
        };
        let agent = NegamaxAgent::with_heuristic(config, Box::new(Flat));
        assert_eq!(agent.choose_move(&code), Some(1));
    }

    // --- Pruning tests ---

    #[test]
    fn pruning_matches_plain_negamax() {
        for seed in 0..6 {
            for moves in [0, 5, 11] {
                let state = random_position(seed, moves);
                let code = state.board().to_code(state.current_player());

                let pruned = agent(2).search(&code);
                let plain = unpruned(2).search(&code);
                assert_eq!(
                    pruned.column, plain.column,
                    "seed {seed}, {moves} moves: {code}"
                );
                assert_eq!(pruned.score, plain.score, "seed {seed}, {moves} moves");
                assert!(pruned.nodes <= plain.nodes);
            }
        }
    }

    #[test]
    fn pruning_matches_plain_negamax_deeper() {
        for seed in [11, 12, 13] {
            let state = random_position(seed, 8);
            let code = state.board().to_code(state.current_player());
            let pruned = agent(3).search(&code);
            let plain = unpruned(3).search(&code);
            assert_eq!(pruned.column, plain.column, "seed {seed}: {code}");
            assert_eq!(pruned.score, plain.score);
            assert!(pruned.nodes < plain.nodes);
        }
    }

    // Slow in debug builds: `cargo test --release -- --ignored`
    #[test]
    #[ignore]
    fn pruning_matches_plain_negamax_at_default_depth() {
        let depth = SearchConfig::default().max_depth;
        for seed in [1, 2, 3] {
            let state = random_position(seed, 10);
            let code = state.board().to_code(state.current_player());
            let pruned = agent(depth).search(&code);
            let plain = unpruned(depth).search(&code);
            assert_eq!(pruned.column, plain.column, "seed {seed}: {code}");
            assert_eq!(pruned.score, plain.score, "seed {seed}");
            assert!(pruned.nodes <= plain.nodes);
        }
    }

    // --- Agent tests ---

    #[test]
    fn select_action_plays_for_current_player() {
        // Yellow to move with three in a row on the bottom.
        let mut board = Board::new();
        for (col, cell) in [
            (6, Cell::Red),
            (0, Cell::Yellow),
            (6, Cell::Red),
            (1, Cell::Yellow),
            (5, Cell::Red),
            (2, Cell::Yellow),
            (0, Cell::Red),
        ] {
            board.drop_piece(col, cell).unwrap();
        }
        let code = board.to_code(Player::Red);
        let state_board = Board::from_code(&code, Player::Red).unwrap();
        assert_eq!(state_board, board);

        let mut state = GameState::initial();
        for col in [6, 0, 6, 1, 5, 2, 0] {
            state.apply_move_mut(col).unwrap();
        }
        assert_eq!(state.current_player(), Player::Yellow);
        assert_eq!(*state.board(), board);

        let mut agent = agent(3);
        assert_eq!(agent.select_action(&state), Some(3));
    }

    #[test]
    fn full_game_vs_self_completes() {
        let mut red = agent(2);
        let mut yellow = agent(2);
        let mut state = GameState::initial();

        while !state.is_terminal() {
            let action = if state.current_player() == Player::Red {
                red.select_action(&state)
            } else {
                yellow.select_action(&state)
            };
            state = state.apply_move(action.unwrap()).unwrap();
        }

        assert!(state.outcome().is_over());
        assert_eq!(red.select_action(&state), None);
    }

    #[test]
    fn beats_random_agent() {
        let games_per_color = 6;
        let mut negamax_wins = 0;

        for (game, negamax_seat) in (0..games_per_color * 2)
            .map(|g| (g, if g % 2 == 0 { Player::Red } else { Player::Yellow }))
        {
            let mut negamax = agent(2);
            let mut random = RandomAgent::with_seed(game as u64);
            let mut state = GameState::initial();

            while !state.is_terminal() {
                let action = if state.current_player() == negamax_seat {
                    negamax.select_action(&state)
                } else {
                    random.select_action(&state)
                };
                state = state.apply_move(action.unwrap()).unwrap();
            }

            if state.outcome() == GameOutcome::Winner(negamax_seat) {
                negamax_wins += 1;
            }
        }

        let total = games_per_color * 2;
        assert!(
            negamax_wins * 10 >= total * 8,
            "Negamax should beat random most of the time, got {negamax_wins}/{total}"
        );
    }

    #[test]
    fn name_is_negamax() {
        assert_eq!(agent(1).name(), "Negamax");
    }
}
