use std::fmt;

use tictactoe_engine::EngineError;
use tictactoe_engine::games::SessionRng;
use tictactoe_engine::games::tictactoe::{BoardState, Difficulty, GameOutcome, Mark, MoveEngine};
use tictactoe_engine::log;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSummary {
    pub games: u32,
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: X won {}, O won {}, {} draws",
            self.games, self.x_wins, self.o_wins, self.draws
        )
    }
}

/// Plays `games` bot-vs-bot games. X opens the even-numbered games and O
/// the odd ones so neither side keeps the first-move advantage.
pub fn run_simulation(
    games: u32,
    x_difficulty: Difficulty,
    o_difficulty: Difficulty,
    rng: SessionRng,
) -> Result<SimulationSummary, EngineError> {
    let mut engine = MoveEngine::new(rng);
    let mut summary = SimulationSummary::default();

    for game in 0..games {
        let opening = if game % 2 == 0 { Mark::X } else { Mark::O };
        let outcome = play_game(&mut engine, x_difficulty, o_difficulty, opening)?;
        match outcome {
            GameOutcome::Won(Mark::X) => summary.x_wins += 1,
            GameOutcome::Won(Mark::O) => summary.o_wins += 1,
            GameOutcome::Draw => summary.draws += 1,
            GameOutcome::Ongoing => unreachable!("play_game returns finished games"),
        }
        summary.games += 1;
    }

    log!(
        "Simulation {} vs {} finished: {}",
        x_difficulty,
        o_difficulty,
        summary
    );
    Ok(summary)
}

fn play_game(
    engine: &mut MoveEngine,
    x_difficulty: Difficulty,
    o_difficulty: Difficulty,
    opening: Mark,
) -> Result<GameOutcome, EngineError> {
    let mut board = BoardState::new();
    let mut mark = opening;

    while board.outcome() == GameOutcome::Ongoing {
        let difficulty = match mark {
            Mark::X => x_difficulty,
            Mark::O => o_difficulty,
        };
        let position = engine.choose_move(&board, mark, mark.opponent(), difficulty)?;
        board.place(position, mark)?;
        mark = mark.opponent();
    }

    Ok(board.outcome())
}
