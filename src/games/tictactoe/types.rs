//! Core domain types for tic-tac-toe.

use super::action::MoveError;
use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A player's mark.
///
/// Serializes as `"circle"` / `"cross"`, the spelling used on the wire.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mark {
    /// Circle (always opens a match).
    Circle,
    /// Cross.
    Cross,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::Circle => Mark::Cross,
            Mark::Cross => Mark::Circle,
        }
    }

    /// Single-character symbol for text rendering.
    pub fn symbol(self) -> char {
        match self {
            Mark::Circle => 'O',
            Mark::Cross => 'X',
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Cells are stored row-major: id = `row * 3 + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from raw cells.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Places `mark` at cell `id`, returning the resulting board.
    ///
    /// `self` is never modified. Fails if `id` is outside 0-8 or the
    /// cell is already occupied.
    #[instrument(skip(self))]
    pub fn apply_move(&self, id: usize, mark: Mark) -> Result<Board, MoveError> {
        let pos = Position::from_index(id).ok_or(MoveError::OutOfBounds(id))?;
        if !self.is_empty(pos) {
            return Err(MoveError::CellOccupied(pos));
        }
        let mut next = *self;
        next.cells[id] = Cell::Occupied(mark);
        Ok(next)
    }
}

/// Classification of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Match is ongoing.
    InProgress,
    /// Match ended with three in a row.
    Won(Mark),
    /// Board filled without a winner.
    Draw,
    /// The remote player abandoned the match.
    OpponentLeft,
}

impl Outcome {
    /// True for every outcome except `InProgress`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winning mark, if the match was won on the board.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Won(mark) => Some(*mark),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Won(mark) => write!(f, "{} wins", mark),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::OpponentLeft => write!(f, "Opponent left"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_move_places_mark() {
        let board = Board::new();
        let next = board.apply_move(4, Mark::Circle).expect("empty cell");
        assert_eq!(next.get(Position::Center), Cell::Occupied(Mark::Circle));
        assert_eq!(next.occupied(), 1);
        // The original board is untouched
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_apply_move_rejects_occupied() {
        let board = Board::new().apply_move(0, Mark::Cross).unwrap();
        let result = board.apply_move(0, Mark::Circle);
        assert_eq!(result, Err(MoveError::CellOccupied(Position::TopLeft)));
        assert_eq!(board.get(Position::TopLeft), Cell::Occupied(Mark::Cross));
    }

    #[test]
    fn test_apply_move_rejects_out_of_bounds() {
        let board = Board::new();
        assert_eq!(board.apply_move(9, Mark::Circle), Err(MoveError::OutOfBounds(9)));
    }

    #[test]
    fn test_mark_wire_spelling() {
        assert_eq!(serde_json::to_string(&Mark::Circle).unwrap(), "\"circle\"");
        assert_eq!(Mark::Cross.to_string(), "cross");
        assert_eq!(Mark::Circle.opponent(), Mark::Cross);
    }
}
