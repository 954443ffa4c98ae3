//! A single game driven by a front end: human clicks come in as columns, AI
//! turns are stepped explicitly, and the outcome is rescanned after every
//! placement.

use serde::{Deserialize, Serialize};

use crate::ai::{Agent, NegamaxAgent, SearchConfig};
use crate::error::{MoveError, SessionError};
use crate::game::{GameOutcome, GameState, Player};

/// Who controls each seat.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Two humans share the board.
    TwoPlayer,
    /// The AI plays Red and moves first.
    AiFirst,
    /// The AI plays Yellow.
    #[default]
    AiSecond,
    /// The AI plays both seats.
    AiVsAi,
}

impl GameMode {
    pub fn ai_controls(self, player: Player) -> bool {
        match self {
            GameMode::TwoPlayer => false,
            GameMode::AiFirst => player == Player::Red,
            GameMode::AiSecond => player == Player::Yellow,
            GameMode::AiVsAi => true,
        }
    }
}

/// `[session]` section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: GameMode,
}

pub struct Session {
    state: GameState,
    mode: GameMode,
    agent: Box<dyn Agent>,
}

impl Session {
    pub fn new(mode: GameMode, agent: Box<dyn Agent>) -> Self {
        log::info!("game started ({mode:?}, AI: {})", agent.name());
        Session {
            state: GameState::initial(),
            mode,
            agent,
        }
    }

    /// Session with a negamax opponent.
    pub fn with_search(mode: GameMode, config: SearchConfig) -> Self {
        Self::new(mode, Box::new(NegamaxAgent::new(config)))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn outcome(&self) -> GameOutcome {
        self.state.outcome()
    }

    pub fn ai_to_move(&self) -> bool {
        !self.state.is_terminal() && self.mode.ai_controls(self.state.current_player())
    }

    /// Apply a human click. Illegal clicks leave the board untouched.
    pub fn play_column(&mut self, column: usize) -> Result<GameOutcome, SessionError> {
        if self.state.is_terminal() {
            return Err(MoveError::GameOver.into());
        }
        if self.ai_to_move() {
            return Err(SessionError::NotHumanTurn);
        }
        self.commit(column)
    }

    /// Let the AI pick and play a column. Returns the column and the outcome.
    pub fn step_ai(&mut self) -> Result<(usize, GameOutcome), SessionError> {
        if self.state.is_terminal() {
            return Err(MoveError::GameOver.into());
        }
        if !self.ai_to_move() {
            return Err(SessionError::NotAiTurn);
        }

        let column = self
            .agent
            .select_action(&self.state)
            .ok_or(SessionError::NoLegalMove)?;
        let outcome = self.commit(column)?;
        log::info!("AI made a move in column {column}");
        Ok((column, outcome))
    }

    /// Clear the board and start over in the same mode.
    pub fn reset(&mut self) {
        self.state.reset();
        log::info!("game reset");
    }

    fn commit(&mut self, column: usize) -> Result<GameOutcome, SessionError> {
        let player = self.state.current_player();
        let row = self.state.apply_move_mut(column)?;
        log::debug!("{} dropped into column {column}, row {row}", player.name());

        let outcome = self.state.outcome();
        match outcome {
            GameOutcome::Winner(p) => {
                log::info!("{} wins after {} moves", p.name(), self.state.turn())
            }
            GameOutcome::Draw => log::info!("draw"),
            GameOutcome::InProgress => {}
        }
        Ok(outcome)
    }
}
