use crate::games::tictactoe::Position;

/// Errors raised by the board, the move engine and the game session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("position {0} is outside the 3x3 board")]
    PositionOutOfRange(usize),

    #[error("cell {} is already marked", .0.index())]
    CellOccupied(Position),

    #[error("no available moves left on the board")]
    NoAvailableMoves,

    #[error("the board already has a winner")]
    GameAlreadyOver,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("game is not in progress")]
    GameNotInProgress,

    #[error("it is not the human player's turn")]
    NotHumanTurn,

    #[error("it is not the bot's turn")]
    NotBotTurn,
}

/// Errors raised while loading or storing configuration files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("failed to deserialize config: {0}")]
    Deserialize(String),

    #[error("config validation error: {0}")]
    Validation(String),
}
