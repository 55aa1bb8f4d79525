//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They are validated before
//! they touch the board and announced to the opponent once accepted.

use super::{Mark, Position};

/// A move: a mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_new::new)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// Where the mark goes.
    pub position: Position,
}

impl Move {
    /// Returns the mark of this move.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the cell id (0-8) of this move.
    pub fn id(&self) -> usize {
        self.position.to_index()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Reason a move was not applied.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell id is outside 0-8.
    #[display("Cell id {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Position),

    /// It is not this mark's turn.
    #[display("It's not {}'s turn", _0)]
    OutOfTurn(Mark),

    /// A remote move carried the local player's mark.
    #[display("Remote move carried the local mark {}", _0)]
    WrongSide(Mark),

    /// No opponent has been matched yet.
    #[display("No match in progress")]
    NoMatch,

    /// The match is already over.
    #[display("Match is already over")]
    GameOver,

    /// The connection to the server is gone; the move could not be announced.
    #[display("Connection to the server is lost")]
    LinkLost,

    /// A postcondition failed after the move was applied.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
