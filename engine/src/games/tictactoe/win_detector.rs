use super::types::{CELL_COUNT, Mark, WinningLine};

pub const WINNING_LINES: [WinningLine; 8] = [
    WinningLine::new(0, 1, 2),
    WinningLine::new(3, 4, 5),
    WinningLine::new(6, 7, 8),
    WinningLine::new(0, 3, 6),
    WinningLine::new(1, 4, 7),
    WinningLine::new(2, 5, 8),
    WinningLine::new(0, 4, 8),
    WinningLine::new(2, 4, 6),
];

/// First line fully held by `mark`, if any.
pub fn check_win_with_line(
    cells: &[Option<Mark>; CELL_COUNT],
    mark: Mark,
) -> Option<WinningLine> {
    WINNING_LINES.iter().copied().find(|line| {
        line.cells()
            .iter()
            .all(|position| cells[position.index()] == Some(mark))
    })
}

pub fn check_win(cells: &[Option<Mark>; CELL_COUNT], mark: Mark) -> bool {
    check_win_with_line(cells, mark).is_some()
}
