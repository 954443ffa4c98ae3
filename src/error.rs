use std::path::PathBuf;

/// Errors raised when a piece cannot be placed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {0} is out of range")]
    InvalidColumn(usize),

    #[error("game is already over")]
    GameOver,
}

/// Errors raised while reading a flat state code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateCodeError {
    #[error("state code has length {actual}, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid cell code {code:?} at index {index}")]
    InvalidCode { index: usize, code: char },

    #[error("floating piece at row {row}, column {col}")]
    FloatingPiece { row: usize, col: usize },
}

/// Errors surfaced by a game session to its driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("illegal move: {0}")]
    Move(#[from] MoveError),

    #[error("it is not a human player's turn")]
    NotHumanTurn,

    #[error("it is not the AI's turn")]
    NotAiTurn,

    #[error("no legal move available")]
    NoLegalMove,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        assert_eq!(MoveError::ColumnFull(3).to_string(), "column 3 is full");
        assert_eq!(
            MoveError::InvalidColumn(9).to_string(),
            "column 9 is out of range"
        );
    }

    #[test]
    fn test_state_code_error_display() {
        let err = StateCodeError::InvalidLength {
            expected: 42,
            actual: 64,
        };
        assert_eq!(err.to_string(), "state code has length 64, expected 42");

        let err = StateCodeError::InvalidCode {
            index: 5,
            code: 'x',
        };
        assert_eq!(err.to_string(), "invalid cell code 'x' at index 5");
    }

    #[test]
    fn test_session_error_wraps_move_error() {
        let err: SessionError = MoveError::ColumnFull(0).into();
        assert_eq!(err.to_string(), "illegal move: column 0 is full");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("ai.max_depth must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: ai.max_depth must be >= 1"
        );
    }
}
