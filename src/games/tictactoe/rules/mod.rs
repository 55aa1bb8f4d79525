//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating board state.
//! Rules are separated from board storage so the session can compose
//! them with turn tracking and contracts.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, LineKind, WinningLine, LINES};

use super::{Board, Mark, Outcome};
use tracing::{debug, instrument};

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// At least one empty cell and no complete line.
    InProgress,
    /// A complete line of one mark.
    Won {
        /// The winning mark.
        mark: Mark,
        /// The line that won, for highlighting.
        line: WinningLine,
    },
    /// Full board with no complete line.
    Draw,
}

impl Verdict {
    /// Projects the verdict onto a match outcome.
    pub fn outcome(&self) -> Outcome {
        match self {
            Verdict::InProgress => Outcome::InProgress,
            Verdict::Won { mark, .. } => Outcome::Won(*mark),
            Verdict::Draw => Outcome::Draw,
        }
    }

    /// Winning line, if any.
    pub fn line(&self) -> Option<WinningLine> {
        match self {
            Verdict::Won { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Evaluates a board for a winner, a draw, or a game still in progress.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Verdict {
    let verdict = if let Some((mark, line)) = check_winner(board) {
        Verdict::Won { mark, line }
    } else if is_full(board) {
        Verdict::Draw
    } else {
        Verdict::InProgress
    };
    debug!(?verdict, "Board evaluated");
    verdict
}
