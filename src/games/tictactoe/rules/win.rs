//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Mark, Position};
use tracing::instrument;

/// Which kind of line produced a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Row 0-2.
    Row(usize),
    /// Column 0-2.
    Column(usize),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

/// Three cells forming a row, column, or diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WinningLine {
    kind: LineKind,
    cells: [Position; 3],
}

impl WinningLine {
    /// Returns the kind of line.
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// Returns the positions composing the line.
    pub fn cells(&self) -> [Position; 3] {
        self.cells
    }

    /// Returns the cell ids composing the line, in ascending order.
    pub fn ids(&self) -> [usize; 3] {
        self.cells.map(Position::to_index)
    }

    /// Checks whether the line passes through `pos`.
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }
}

/// All eight lines in scan order: rows, then columns, then diagonals.
///
/// The first complete line in this order is the one reported.
pub const LINES: [WinningLine; 8] = {
    use Position::*;
    [
        WinningLine { kind: LineKind::Row(0), cells: [TopLeft, TopCenter, TopRight] },
        WinningLine { kind: LineKind::Row(1), cells: [MiddleLeft, Center, MiddleRight] },
        WinningLine { kind: LineKind::Row(2), cells: [BottomLeft, BottomCenter, BottomRight] },
        WinningLine { kind: LineKind::Column(0), cells: [TopLeft, MiddleLeft, BottomLeft] },
        WinningLine { kind: LineKind::Column(1), cells: [TopCenter, Center, BottomCenter] },
        WinningLine { kind: LineKind::Column(2), cells: [TopRight, MiddleRight, BottomRight] },
        WinningLine { kind: LineKind::Diagonal, cells: [TopLeft, Center, BottomRight] },
        WinningLine { kind: LineKind::AntiDiagonal, cells: [TopRight, Center, BottomLeft] },
    ]
};

/// Checks if there is a winner on the board.
///
/// Returns the winning mark and its line, or `None`.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<(Mark, WinningLine)> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.cells;
        match board.get(a) {
            Cell::Occupied(mark) if board.get(b) == board.get(a) && board.get(c) == board.get(a) => {
                Some((mark, *line))
            }
            _ => None,
        }
    })
}
