use crate::error::EngineError;
use crate::games::SessionRng;
use super::board::BoardState;
use super::settings::Difficulty;
use super::types::{GameOutcome, Mark, Position};

const WIN_SCORE: i32 = 10;

/// Snapshot the engine decides on. The board is copied so the search
/// never touches the caller's state.
#[derive(Debug, Clone, Copy)]
pub struct BotInput {
    pub board: BoardState,
    pub bot_mark: Mark,
    pub opponent_mark: Mark,
}

impl BotInput {
    pub fn new(board: &BoardState, bot_mark: Mark, opponent_mark: Mark) -> Self {
        Self {
            board: *board,
            bot_mark,
            opponent_mark,
        }
    }

    fn check_preconditions(&self) -> Result<Vec<Position>, EngineError> {
        if self.bot_mark == self.opponent_mark {
            return Err(EngineError::InvalidConfiguration(format!(
                "bot and opponent cannot both play {}",
                self.bot_mark
            )));
        }
        if let GameOutcome::Won(_) = self.board.outcome() {
            return Err(EngineError::GameAlreadyOver);
        }
        let available_moves = self.board.available_moves();
        if available_moves.is_empty() {
            return Err(EngineError::NoAvailableMoves);
        }
        Ok(available_moves)
    }
}

pub fn calculate_move(
    difficulty: Difficulty,
    input: &BotInput,
    rng: &mut SessionRng,
) -> Result<Position, EngineError> {
    let available_moves = input.check_preconditions()?;
    let position = match difficulty {
        Difficulty::Easy => pick_random(&available_moves, rng),
        Difficulty::Medium => heuristic_move(input, &available_moves, rng),
        Difficulty::Hard => minimax_move(input, &available_moves),
    };
    Ok(position)
}

pub fn calculate_random_move(
    input: &BotInput,
    rng: &mut SessionRng,
) -> Result<Position, EngineError> {
    let available_moves = input.check_preconditions()?;
    Ok(pick_random(&available_moves, rng))
}

pub fn calculate_heuristic_move(
    input: &BotInput,
    rng: &mut SessionRng,
) -> Result<Position, EngineError> {
    let available_moves = input.check_preconditions()?;
    Ok(heuristic_move(input, &available_moves, rng))
}

pub fn calculate_minimax_move(input: &BotInput) -> Result<Position, EngineError> {
    let available_moves = input.check_preconditions()?;
    Ok(minimax_move(input, &available_moves))
}

fn pick_random(available_moves: &[Position], rng: &mut SessionRng) -> Position {
    available_moves[rng.random_range(0..available_moves.len())]
}

fn heuristic_move(
    input: &BotInput,
    available_moves: &[Position],
    rng: &mut SessionRng,
) -> Position {
    let mut board = input.board;

    if let Some(position) = find_winning_move(&mut board, input.bot_mark, available_moves) {
        return position;
    }

    if let Some(position) = find_winning_move(&mut board, input.opponent_mark, available_moves) {
        return position;
    }

    pick_random(available_moves, rng)
}

/// Lowest position where `mark` completes a line.
fn find_winning_move(board: &mut BoardState, mark: Mark, moves: &[Position]) -> Option<Position> {
    moves
        .iter()
        .copied()
        .find(|&position| board.tentative(position, mark).has_won(mark))
}

fn minimax_move(input: &BotInput, available_moves: &[Position]) -> Position {
    let mut board = input.board;
    let mut best_move = available_moves[0];
    let mut best_score = i32::MIN;

    for &position in available_moves {
        let score = {
            let mut child = board.tentative(position, input.bot_mark);
            minimax(&mut child, 0, false, input.bot_mark, input.opponent_mark)
        };

        // strict comparison keeps the lowest index among equal scores
        if score > best_score {
            best_score = score;
            best_move = position;
        }
    }

    best_move
}

/// Scores `board` from the bot's point of view by searching every
/// remaining line of play. Faster wins and slower losses score higher.
pub fn minimax(
    board: &mut BoardState,
    depth: i32,
    is_maximizing: bool,
    bot_mark: Mark,
    opponent_mark: Mark,
) -> i32 {
    if board.has_won(bot_mark) {
        return WIN_SCORE - depth;
    }
    if board.has_won(opponent_mark) {
        return depth - WIN_SCORE;
    }

    let moves = board.available_moves();
    if moves.is_empty() {
        return 0;
    }

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for position in moves {
            let mut child = board.tentative(position, bot_mark);
            let eval = minimax(&mut child, depth + 1, false, bot_mark, opponent_mark);
            max_eval = max_eval.max(eval);
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for position in moves {
            let mut child = board.tentative(position, opponent_mark);
            let eval = minimax(&mut child, depth + 1, true, bot_mark, opponent_mark);
            min_eval = min_eval.min(eval);
        }
        min_eval
    }
}

/// The computer opponent. Owns the random source used by the easy and
/// medium strategies; holds no reference to any board between calls.
#[derive(Debug, Clone)]
pub struct MoveEngine {
    rng: SessionRng,
}

impl MoveEngine {
    pub fn new(rng: SessionRng) -> Self {
        Self { rng }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn choose_move(
        &mut self,
        state: &BoardState,
        bot_mark: Mark,
        opponent_mark: Mark,
        difficulty: Difficulty,
    ) -> Result<Position, EngineError> {
        let input = BotInput::new(state, bot_mark, opponent_mark);
        calculate_move(difficulty, &input, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::board::board_from_str;

    fn pos(index: usize) -> Position {
        Position::new(index).unwrap()
    }

    fn input(layout: &str, bot_mark: Mark) -> BotInput {
        BotInput::new(&board_from_str(layout), bot_mark, bot_mark.opponent())
    }

    fn play_out(
        engine: &mut MoveEngine,
        x_difficulty: Difficulty,
        o_difficulty: Difficulty,
        first: Mark,
    ) -> GameOutcome {
        let mut board = BoardState::new();
        let mut mark = first;
        while board.outcome() == GameOutcome::Ongoing {
            let difficulty = match mark {
                Mark::X => x_difficulty,
                Mark::O => o_difficulty,
            };
            let position = engine
                .choose_move(&board, mark, mark.opponent(), difficulty)
                .unwrap();
            board.place(position, mark).unwrap();
            mark = mark.opponent();
        }
        board.outcome()
    }

    #[test]
    fn test_heuristic_blocks_opponent_line() {
        let mut rng = SessionRng::new(1);
        let input = input("XX_ O__ ___", Mark::O);
        assert_eq!(calculate_heuristic_move(&input, &mut rng).unwrap(), pos(2));
    }

    #[test]
    fn test_heuristic_prefers_win_over_block() {
        let mut rng = SessionRng::new(1);
        let input = input("OO_ XX_ ___", Mark::O);
        assert_eq!(calculate_heuristic_move(&input, &mut rng).unwrap(), pos(2));
    }

    #[test]
    fn test_heuristic_picks_lowest_winning_index() {
        let mut rng = SessionRng::new(1);
        // O wins at 2 (top row) and at 6 (left column)
        let input = input("OO_ O_X _XX", Mark::O);
        assert_eq!(calculate_heuristic_move(&input, &mut rng).unwrap(), pos(2));
    }

    #[test]
    fn test_heuristic_falls_back_to_available_move() {
        let mut rng = SessionRng::new(3);
        let input = input("X__ ___ ___", Mark::O);
        for _ in 0..50 {
            let position = calculate_heuristic_move(&input, &mut rng).unwrap();
            assert!(input.board.is_empty(position));
        }
    }

    #[test]
    fn test_random_only_returns_available_moves() {
        let mut rng = SessionRng::new(11);
        let input = input("X_O _X_ O__", Mark::X);
        for _ in 0..200 {
            let position = calculate_random_move(&input, &mut rng).unwrap();
            assert!(input.board.is_empty(position));
        }
    }

    #[test]
    fn test_random_is_roughly_uniform() {
        let mut rng = SessionRng::new(2024);
        let input = input("X_O _X_ O__", Mark::X);
        let available = input.board.available_moves();
        let trials = 10_000;
        let mut counts = [0usize; 9];
        for _ in 0..trials {
            counts[calculate_random_move(&input, &mut rng).unwrap().index()] += 1;
        }

        let expected = trials / available.len();
        for position in available {
            let count = counts[position.index()];
            assert!(
                count > expected * 8 / 10 && count < expected * 12 / 10,
                "position {} chosen {} times, expected about {}",
                position,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_minimax_takes_immediate_win() {
        // blocking X at 7 is also available; winning at 6 must come first
        let input = input("OX_ OXX ___", Mark::O);
        assert_eq!(calculate_minimax_move(&input).unwrap(), pos(6));
    }

    #[test]
    fn test_minimax_blocks_forced_loss() {
        let input = input("XX_ O__ ___", Mark::O);
        assert_eq!(calculate_minimax_move(&input).unwrap(), pos(2));
    }

    #[test]
    fn test_minimax_prefers_faster_win() {
        // X can win now at 2; other moves also win later
        let input = input("XX_ OO_ ___", Mark::X);
        assert_eq!(calculate_minimax_move(&input).unwrap(), pos(2));
    }

    #[test]
    fn test_minimax_first_move_takes_lowest_index_among_draws() {
        // every opening draws under perfect play, so the first cell wins the tie
        let input = input("___ ___ ___", Mark::X);
        assert_eq!(calculate_minimax_move(&input).unwrap(), pos(0));
    }

    #[test]
    fn test_minimax_score_of_decided_boards() {
        let mut won = board_from_str("OOO XX_ X__");
        assert_eq!(minimax(&mut won, 3, true, Mark::O, Mark::X), 7);
        assert_eq!(minimax(&mut won, 3, true, Mark::X, Mark::O), -7);

        let mut drawn = board_from_str("XOX XOO OXX");
        assert_eq!(minimax(&mut drawn, 9, true, Mark::X, Mark::O), 0);
    }

    #[test]
    fn test_minimax_against_itself_always_draws() {
        let mut engine = MoveEngine::new(SessionRng::new(0));
        for first in [Mark::X, Mark::O] {
            let outcome = play_out(&mut engine, Difficulty::Hard, Difficulty::Hard, first);
            assert_eq!(outcome, GameOutcome::Draw);
        }
    }

    #[test]
    fn test_minimax_never_loses_to_weaker_strategies() {
        let mut engine = MoveEngine::new(SessionRng::new(99));
        for game in 0..40 {
            let weaker = if game % 2 == 0 { Difficulty::Easy } else { Difficulty::Medium };
            let first = if game % 4 < 2 { Mark::X } else { Mark::O };
            let outcome = play_out(&mut engine, Difficulty::Hard, weaker, first);
            assert_ne!(outcome, GameOutcome::Won(Mark::O), "game {} lost", game);
        }
    }

    #[test]
    fn test_choose_move_leaves_board_unchanged() {
        let mut engine = MoveEngine::new(SessionRng::new(5));
        let board = board_from_str("X__ _O_ __X");
        let before = board;
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            engine.choose_move(&board, Mark::O, Mark::X, difficulty).unwrap();
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let mut engine = MoveEngine::new(SessionRng::new(5));
        let board = board_from_str("XOX XOO OXX");
        let result = engine.choose_move(&board, Mark::O, Mark::X, Difficulty::Hard);
        assert_eq!(result, Err(EngineError::NoAvailableMoves));
    }

    #[test]
    fn test_decided_board_is_rejected() {
        let mut engine = MoveEngine::new(SessionRng::new(5));
        let board = board_from_str("XXX OO_ ___");
        let result = engine.choose_move(&board, Mark::O, Mark::X, Difficulty::Medium);
        assert_eq!(result, Err(EngineError::GameAlreadyOver));
    }

    #[test]
    fn test_identical_marks_are_invalid_configuration() {
        let mut engine = MoveEngine::new(SessionRng::new(5));
        let result = engine.choose_move(&BoardState::new(), Mark::X, Mark::X, Difficulty::Easy);
        assert!(matches!(result, Err(EngineError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_seeded_engines_agree() {
        let board = board_from_str("X__ ___ ___");
        let mut a = MoveEngine::new(SessionRng::new(77));
        let mut b = MoveEngine::new(SessionRng::new(77));
        for _ in 0..20 {
            assert_eq!(
                a.choose_move(&board, Mark::O, Mark::X, Difficulty::Easy).unwrap(),
                b.choose_move(&board, Mark::O, Mark::X, Difficulty::Easy).unwrap()
            );
        }
        assert_eq!(a.seed(), 77);
    }
}
