use crate::error::EngineError;
use crate::games::SessionRng;
use crate::log;
use super::board::BoardState;
use super::bot_controller::MoveEngine;
use super::settings::{GameMode, GameSettings};
use super::types::{GameStatus, Mark, Position, WinningLine};

/// One game between two humans or a human and the bot.
///
/// Owns its board and engine outright, so any number of sessions can run
/// side by side.
#[derive(Debug, Clone)]
pub struct GameSession {
    settings: GameSettings,
    board: BoardState,
    current_mark: Mark,
    status: GameStatus,
    last_move: Option<Position>,
    engine: MoveEngine,
}

impl GameSession {
    pub fn new(settings: GameSettings, rng: SessionRng) -> Self {
        Self {
            settings,
            board: BoardState::new(),
            current_mark: settings.opening_mark(),
            status: GameStatus::NotStarted,
            last_move: None,
            engine: MoveEngine::new(rng),
        }
    }

    pub fn start(&mut self) {
        self.board.reset();
        self.current_mark = self.settings.opening_mark();
        self.status = GameStatus::InProgress;
        self.last_move = None;
        log!(
            "Game started: mode={}, difficulty={}, {} moves first",
            self.settings.mode,
            self.settings.difficulty,
            self.current_mark
        );
    }

    pub fn restart(&mut self) {
        self.start();
    }

    pub fn change_settings(&mut self, settings: GameSettings) {
        self.settings = settings;
        self.start();
    }

    /// Human move for whoever holds the current mark.
    pub fn place_mark(&mut self, position: Position) -> Result<GameStatus, EngineError> {
        if self.status != GameStatus::InProgress {
            return Err(EngineError::GameNotInProgress);
        }
        if self.is_bot_turn() {
            return Err(EngineError::NotHumanTurn);
        }
        self.apply_move(position)
    }

    pub fn play_bot_turn(&mut self) -> Result<Position, EngineError> {
        if self.status != GameStatus::InProgress {
            return Err(EngineError::GameNotInProgress);
        }
        if !self.is_bot_turn() {
            return Err(EngineError::NotBotTurn);
        }

        let bot_mark = self.current_mark;
        let position = self.engine.choose_move(
            &self.board,
            bot_mark,
            bot_mark.opponent(),
            self.settings.difficulty,
        )?;
        self.apply_move(position)?;
        Ok(position)
    }

    pub fn is_bot_turn(&self) -> bool {
        self.status == GameStatus::InProgress
            && self.settings.mode == GameMode::Bot
            && self.current_mark == self.settings.bot_mark()
    }

    fn apply_move(&mut self, position: Position) -> Result<GameStatus, EngineError> {
        self.board.place(position, self.current_mark)?;
        self.last_move = Some(position);
        log!("{} plays {}", self.current_mark, position);

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.current_mark = self.current_mark.opponent();
        }

        Ok(self.status)
    }

    // win is checked before draw: a full board may also hold a line
    fn check_game_over(&mut self) {
        self.status = self.board.outcome().into();
        match self.status {
            GameStatus::Won(mark) => log!("{} wins", mark),
            GameStatus::Draw => log!("Game ended in a draw"),
            _ => {}
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn player_mark(&self) -> Mark {
        self.settings.player_mark
    }

    pub fn bot_mark(&self) -> Mark {
        self.settings.bot_mark()
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        match self.status {
            GameStatus::Won(mark) => self.board.winning_line(mark),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Difficulty, FirstTurn};

    fn pos(index: usize) -> Position {
        Position::new(index).unwrap()
    }

    fn settings(mode: GameMode, first_turn: FirstTurn, difficulty: Difficulty) -> GameSettings {
        GameSettings {
            mode,
            difficulty,
            first_turn,
            player_mark: Mark::X,
        }
    }

    fn started(settings: GameSettings) -> GameSession {
        let mut session = GameSession::new(settings, SessionRng::new(3));
        session.start();
        session
    }

    #[test]
    fn test_moves_rejected_before_start() {
        let mut session = GameSession::new(GameSettings::default(), SessionRng::new(1));
        assert_eq!(session.status(), GameStatus::NotStarted);
        assert_eq!(session.place_mark(pos(0)), Err(EngineError::GameNotInProgress));
        assert_eq!(session.play_bot_turn(), Err(EngineError::GameNotInProgress));
    }

    #[test]
    fn test_pvp_alternates_marks_starting_with_x() {
        let mut session = started(settings(GameMode::Pvp, FirstTurn::Bot, Difficulty::Hard));
        assert_eq!(session.current_mark(), Mark::X);
        assert!(!session.is_bot_turn());

        session.place_mark(pos(0)).unwrap();
        assert_eq!(session.current_mark(), Mark::O);
        session.place_mark(pos(4)).unwrap();
        assert_eq!(session.board().get(pos(4)), Some(Mark::O));
        assert_eq!(session.last_move(), Some(pos(4)));
    }

    #[test]
    fn test_pvp_win_ends_game() {
        let mut session = started(settings(GameMode::Pvp, FirstTurn::Player, Difficulty::Hard));
        for index in [0, 3, 1, 4] {
            assert_eq!(session.place_mark(pos(index)).unwrap(), GameStatus::InProgress);
        }
        assert_eq!(session.place_mark(pos(2)).unwrap(), GameStatus::Won(Mark::X));
        assert_eq!(session.current_mark(), Mark::X);
        assert_eq!(session.winning_line().unwrap().cells(), [pos(0), pos(1), pos(2)]);
        assert_eq!(session.place_mark(pos(5)), Err(EngineError::GameNotInProgress));
    }

    #[test]
    fn test_pvp_draw() {
        let mut session = started(settings(GameMode::Pvp, FirstTurn::Player, Difficulty::Hard));
        // X O X / X O O / O X X
        let order = [0, 1, 2, 4, 3, 5, 7, 6, 8];
        let mut status = GameStatus::InProgress;
        for index in order {
            status = session.place_mark(pos(index)).unwrap();
        }
        assert_eq!(status, GameStatus::Draw);
        assert!(session.winning_line().is_none());
    }

    #[test]
    fn test_occupied_cell_keeps_turn() {
        let mut session = started(settings(GameMode::Pvp, FirstTurn::Player, Difficulty::Hard));
        session.place_mark(pos(0)).unwrap();
        assert_eq!(session.place_mark(pos(0)), Err(EngineError::CellOccupied(pos(0))));
        assert_eq!(session.current_mark(), Mark::O);
    }

    #[test]
    fn test_bot_first_turn() {
        let mut session = started(settings(GameMode::Bot, FirstTurn::Bot, Difficulty::Hard));
        assert!(session.is_bot_turn());
        assert_eq!(session.current_mark(), Mark::O);
        assert_eq!(session.place_mark(pos(0)), Err(EngineError::NotHumanTurn));

        let position = session.play_bot_turn().unwrap();
        assert_eq!(position, pos(0));
        assert_eq!(session.board().get(position), Some(Mark::O));
        assert!(!session.is_bot_turn());
        assert_eq!(session.play_bot_turn(), Err(EngineError::NotBotTurn));
    }

    #[test]
    fn test_bot_blocks_human_on_medium() {
        let mut session = started(settings(GameMode::Bot, FirstTurn::Player, Difficulty::Medium));
        session.place_mark(pos(0)).unwrap();
        let first_reply = session.play_bot_turn().unwrap();

        // threaten the top row unless the bot already sits there
        let threat = if first_reply == pos(1) || first_reply == pos(2) { [3, 6] } else { [1, 2] };
        session.place_mark(pos(threat[0])).unwrap();
        assert_eq!(session.play_bot_turn().unwrap(), pos(threat[1]));
    }

    #[test]
    fn test_hard_bot_never_loses_to_scripted_human() {
        let mut session = started(settings(GameMode::Bot, FirstTurn::Player, Difficulty::Hard));
        while !session.status().is_over() {
            if session.is_bot_turn() {
                session.play_bot_turn().unwrap();
            } else {
                let first_free = session.board().available_moves()[0];
                session.place_mark(first_free).unwrap();
            }
        }
        assert_ne!(session.status(), GameStatus::Won(Mark::X));
    }

    #[test]
    fn test_restart_clears_board() {
        let mut session = started(settings(GameMode::Pvp, FirstTurn::Player, Difficulty::Hard));
        session.place_mark(pos(4)).unwrap();
        session.restart();
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.board().available_moves().len(), 9);
        assert_eq!(session.current_mark(), Mark::X);
        assert!(session.last_move().is_none());
    }

    #[test]
    fn test_change_settings_restarts() {
        let mut session = started(settings(GameMode::Pvp, FirstTurn::Player, Difficulty::Hard));
        session.place_mark(pos(4)).unwrap();

        let mut new_settings = settings(GameMode::Bot, FirstTurn::Bot, Difficulty::Easy);
        new_settings.player_mark = Mark::O;
        session.change_settings(new_settings);

        assert_eq!(session.board().occupied_count(), 0);
        assert_eq!(session.bot_mark(), Mark::X);
        assert_eq!(session.player_mark(), Mark::O);
        assert_eq!(session.current_mark(), Mark::X);
        assert!(session.is_bot_turn());
        assert_eq!(session.settings().difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = started(settings(GameMode::Pvp, FirstTurn::Player, Difficulty::Hard));
        let b = started(settings(GameMode::Pvp, FirstTurn::Player, Difficulty::Hard));
        a.place_mark(pos(4)).unwrap();
        assert_eq!(b.board().occupied_count(), 0);
        assert_eq!(b.current_mark(), Mark::X);
    }
}
