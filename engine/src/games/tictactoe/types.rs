use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const BOARD_SIDE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIDE * BOARD_SIDE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Mark {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Mark::X),
            "O" | "o" => Ok(Mark::O),
            other => Err(EngineError::InvalidConfiguration(format!(
                "unknown mark '{}', expected X or O",
                other
            ))),
        }
    }
}

/// Row-major cell index on the 3x3 board, always in `0..9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(u8);

impl Position {
    pub const ALL: [Position; CELL_COUNT] = [
        Position(0),
        Position(1),
        Position(2),
        Position(3),
        Position(4),
        Position(5),
        Position(6),
        Position(7),
        Position(8),
    ];

    pub fn new(index: usize) -> Result<Self, EngineError> {
        if index >= CELL_COUNT {
            return Err(EngineError::PositionOutOfRange(index));
        }
        Ok(Self(index as u8))
    }

    pub fn from_xy(x: usize, y: usize) -> Result<Self, EngineError> {
        if x >= BOARD_SIDE || y >= BOARD_SIDE {
            let index = y
                .checked_mul(BOARD_SIDE)
                .and_then(|row_start| row_start.checked_add(x))
                .unwrap_or(usize::MAX);
            return Err(EngineError::PositionOutOfRange(index));
        }
        Self::new(y * BOARD_SIDE + x)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn x(self) -> usize {
        self.index() % BOARD_SIDE
    }

    pub fn y(self) -> usize {
        self.index() / BOARD_SIDE
    }
}

impl TryFrom<usize> for Position {
    type Error = EngineError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Three positions that win the game when held by one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    cells: [Position; BOARD_SIDE],
}

impl WinningLine {
    /// Only for the fixed line table; the indices are not range-checked.
    pub(crate) const fn new(a: u8, b: u8, c: u8) -> Self {
        Self {
            cells: [Position(a), Position(b), Position(c)],
        }
    }

    pub fn cells(&self) -> [Position; BOARD_SIDE] {
        self.cells
    }

    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }
}

/// Result of evaluating a board. Derived on demand, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    Won(Mark),
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Won(Mark),
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Won(_) | GameStatus::Draw)
    }
}

impl From<GameOutcome> for GameStatus {
    fn from(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Ongoing => GameStatus::InProgress,
            GameOutcome::Won(mark) => GameStatus::Won(mark),
            GameOutcome::Draw => GameStatus::Draw,
        }
    }
}
