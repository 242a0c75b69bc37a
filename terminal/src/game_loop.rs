use std::io::Write;
use std::time::Duration;

use tictactoe_engine::EngineError;
use tictactoe_engine::games::tictactoe::{GameSession, GameStatus, Position};
use tictactoe_engine::log;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render::{render_board, render_outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Place(Position),
    Restart,
    Quit,
}

/// Parses one line typed by a player. Cells are numbered 1 to 9.
pub fn parse_command(line: &str) -> Result<PlayerCommand, String> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "q" | "quit" => return Ok(PlayerCommand::Quit),
        "r" | "restart" => return Ok(PlayerCommand::Restart),
        _ => {}
    }

    let number: usize = trimmed
        .parse()
        .map_err(|_| format!("'{}' is not a command; type 1-9, r or q", trimmed))?;
    number
        .checked_sub(1)
        .and_then(|index| Position::new(index).ok())
        .map(PlayerCommand::Place)
        .ok_or_else(|| format!("cell {} does not exist; type 1-9", number))
}

/// Drives one session from text commands until the player quits or the
/// input ends.
pub async fn run_game_loop<R, W>(
    session: &mut GameSession,
    input: R,
    output: &mut W,
    bot_delay: Duration,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    session.start();
    writeln!(output, "{}\n", render_board(session.board(), None))?;

    loop {
        match session.status() {
            GameStatus::NotStarted => session.start(),
            GameStatus::Won(_) | GameStatus::Draw => {
                if let Some(banner) = render_outcome(session.status()) {
                    writeln!(output, "{}", banner)?;
                }
                write!(output, "Type r to play again or q to quit: ")?;
                output.flush()?;

                let Some(line) = lines.next_line().await? else {
                    return Ok(());
                };
                match parse_command(&line) {
                    Ok(PlayerCommand::Restart) => {
                        session.restart();
                        writeln!(output, "\n{}\n", render_board(session.board(), None))?;
                    }
                    Ok(PlayerCommand::Quit) => return Ok(()),
                    Ok(PlayerCommand::Place(_)) => writeln!(output, "The game is over.")?,
                    Err(message) => writeln!(output, "{}", message)?,
                }
            }
            GameStatus::InProgress if session.is_bot_turn() => {
                tokio::time::sleep(bot_delay).await;
                let position = session.play_bot_turn()?;
                writeln!(
                    output,
                    "Bot ({}) plays {}\n{}\n",
                    session.bot_mark(),
                    position.index() + 1,
                    render_board(session.board(), session.winning_line())
                )?;
            }
            GameStatus::InProgress => {
                write!(output, "{} to move (1-9, r, q): ", session.current_mark())?;
                output.flush()?;

                let Some(line) = lines.next_line().await? else {
                    return Ok(());
                };
                match parse_command(&line) {
                    Ok(PlayerCommand::Place(position)) => match session.place_mark(position) {
                        Ok(_) => writeln!(
                            output,
                            "\n{}\n",
                            render_board(session.board(), session.winning_line())
                        )?,
                        Err(EngineError::CellOccupied(_)) => {
                            writeln!(output, "Cell {} is taken.", position.index() + 1)?
                        }
                        Err(err) => return Err(err.into()),
                    },
                    Ok(PlayerCommand::Restart) => {
                        log!("Player restarted the game");
                        session.restart();
                        writeln!(output, "\n{}\n", render_board(session.board(), None))?;
                    }
                    Ok(PlayerCommand::Quit) => return Ok(()),
                    Err(message) => writeln!(output, "{}", message)?,
                }
            }
        }
    }
}
