use tictactoe_engine::games::tictactoe::{BOARD_SIDE, BoardState, GameStatus, Position, WinningLine};

/// Draws the board as three rows. Empty cells show the number a player
/// types to claim them; cells of the winning line are bracketed.
pub fn render_board(board: &BoardState, highlight: Option<WinningLine>) -> String {
    let rows: Vec<String> = (0..BOARD_SIDE)
        .map(|y| {
            let cells: Vec<String> = (0..BOARD_SIDE)
                .filter_map(|x| Position::from_xy(x, y).ok())
                .map(|position| {
                    let symbol = match board.get(position) {
                        Some(mark) => mark.as_char(),
                        None => char::from_digit(position.index() as u32 + 1, 10).unwrap_or('?'),
                    };
                    if highlight.is_some_and(|line| line.contains(position)) {
                        format!("[{}]", symbol)
                    } else {
                        format!(" {} ", symbol)
                    }
                })
                .collect();
            cells.join("|")
        })
        .collect();
    rows.join("\n---+---+---\n")
}

pub fn render_outcome(status: GameStatus) -> Option<String> {
    match status {
        GameStatus::Won(mark) => Some(format!("{} Wins!", mark)),
        GameStatus::Draw => Some("It's a Draw!".to_string()),
        GameStatus::NotStarted | GameStatus::InProgress => None,
    }
}
