mod board;
mod bot_controller;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::BoardState;
pub use bot_controller::{
    BotInput, MoveEngine, calculate_heuristic_move, calculate_minimax_move, calculate_move,
    calculate_random_move, minimax,
};
pub use session::GameSession;
pub use settings::{Difficulty, FirstTurn, GameMode, GameSettings};
pub use types::{BOARD_SIDE, CELL_COUNT, GameOutcome, GameStatus, Mark, Position, WinningLine};
pub use win_detector::{WINNING_LINES, check_win, check_win_with_line};
