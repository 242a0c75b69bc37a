use std::ops::{Deref, DerefMut};

use crate::error::EngineError;
use super::types::{CELL_COUNT, GameOutcome, Mark, Position, WinningLine};
use super::win_detector::{check_win, check_win_with_line};

/// Mark placement across the nine cells. `None` is an empty cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoardState {
    cells: [Option<Mark>; CELL_COUNT],
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Option<Mark>; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Option<Mark>; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, position: Position) -> Option<Mark> {
        self.cells[position.index()]
    }

    pub fn is_empty(&self, position: Position) -> bool {
        self.get(position).is_none()
    }

    /// Marks an empty cell. An occupied cell is left untouched and reported.
    pub fn place(&mut self, position: Position, mark: Mark) -> Result<(), EngineError> {
        if !self.is_empty(position) {
            return Err(EngineError::CellOccupied(position));
        }
        self.cells[position.index()] = Some(mark);
        Ok(())
    }

    /// Places `mark` until the returned guard is dropped.
    ///
    /// Panics on an occupied cell: the guard would otherwise erase a real
    /// mark when it retracts. Search code only passes positions taken from
    /// [`BoardState::available_moves`].
    pub(crate) fn tentative(&mut self, position: Position, mark: Mark) -> TentativeMove<'_> {
        assert!(self.is_empty(position), "tentative move on occupied cell {}", position);
        self.cells[position.index()] = Some(mark);
        TentativeMove {
            board: self,
            position,
        }
    }

    pub fn has_won(&self, mark: Mark) -> bool {
        check_win(&self.cells, mark)
    }

    pub fn winning_line(&self, mark: Mark) -> Option<WinningLine> {
        check_win_with_line(&self.cells, mark)
    }

    /// True when every cell is taken, whether or not someone has won.
    pub fn is_draw(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn available_moves(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|&position| self.is_empty(position))
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn outcome(&self) -> GameOutcome {
        if self.has_won(Mark::X) {
            GameOutcome::Won(Mark::X)
        } else if self.has_won(Mark::O) {
            GameOutcome::Won(Mark::O)
        } else if self.is_draw() {
            GameOutcome::Draw
        } else {
            GameOutcome::Ongoing
        }
    }

    pub fn reset(&mut self) {
        self.cells = [None; CELL_COUNT];
    }
}

/// Guard returned by [`BoardState::tentative`]. Clears its cell on drop.
pub(crate) struct TentativeMove<'a> {
    board: &'a mut BoardState,
    position: Position,
}

impl Deref for TentativeMove<'_> {
    type Target = BoardState;

    fn deref(&self) -> &BoardState {
        self.board
    }
}

impl DerefMut for TentativeMove<'_> {
    fn deref_mut(&mut self) -> &mut BoardState {
        self.board
    }
}

impl Drop for TentativeMove<'_> {
    fn drop(&mut self) {
        self.board.cells[self.position.index()] = None;
    }
}

#[cfg(test)]
pub(crate) fn board_from_str(layout: &str) -> BoardState {
    let mut cells = [None; CELL_COUNT];
    let marks: Vec<char> = layout.chars().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(marks.len(), CELL_COUNT, "layout must describe 9 cells");
    for (cell, ch) in cells.iter_mut().zip(marks) {
        *cell = match ch {
            'X' => Some(Mark::X),
            'O' => Some(Mark::O),
            _ => None,
        };
    }
    BoardState::from_cells(cells)
}
