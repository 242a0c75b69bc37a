use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use super::types::Mark;

/// Which strategy the computer opponent plays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random empty cell.
    Easy,
    /// Win if possible, else block, else random.
    Medium,
    /// Exhaustive minimax; never loses.
    #[default]
    Hard,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Two humans alternate on the same board.
    Pvp,
    #[default]
    Bot,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstTurn {
    #[default]
    Player,
    Bot,
}

fn invalid(kind: &str, value: &str, expected: &str) -> EngineError {
    EngineError::InvalidConfiguration(format!(
        "unknown {} '{}', expected one of: {}",
        kind, value, expected
    ))
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(invalid("difficulty", s, "easy, medium, hard")),
        }
    }
}

impl FromStr for GameMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pvp" => Ok(GameMode::Pvp),
            "bot" => Ok(GameMode::Bot),
            _ => Err(invalid("mode", s, "pvp, bot")),
        }
    }
}

impl FromStr for FirstTurn {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "player" => Ok(FirstTurn::Player),
            "bot" => Ok(FirstTurn::Bot),
            _ => Err(invalid("first turn", s, "player, bot")),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameMode::Pvp => "pvp",
            GameMode::Bot => "bot",
        })
    }
}

/// Everything a session needs to know before the first move.
///
/// `player_mark` is the human's mark in bot mode; the bot plays the other
/// one. In pvp mode X always opens and `first_turn` is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub first_turn: FirstTurn,
    pub player_mark: Mark,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::Bot,
            difficulty: Difficulty::Hard,
            first_turn: FirstTurn::Player,
            player_mark: Mark::X,
        }
    }
}

impl GameSettings {
    pub fn bot_mark(&self) -> Mark {
        self.player_mark.opponent()
    }

    /// Mark that moves first in a fresh game.
    pub fn opening_mark(&self) -> Mark {
        match (self.mode, self.first_turn) {
            (GameMode::Pvp, _) => Mark::X,
            (GameMode::Bot, FirstTurn::Player) => self.player_mark,
            (GameMode::Bot, FirstTurn::Bot) => self.bot_mark(),
        }
    }
}
