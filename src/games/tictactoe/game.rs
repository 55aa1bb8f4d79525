//! Board-level match state: board, turn, and move history.

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::rules::{self, Verdict};
use super::{Board, Mark, Position, TurnController};
use tracing::{debug, instrument};

/// The board-level state of one match.
///
/// The board only changes through [`MatchState::play`], which checks
/// the move contract, applies the move, flips the turn, and re-evaluates.
/// Once the verdict is terminal no further move is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub(super) board: Board,
    pub(super) turn: TurnController,
    pub(super) history: Vec<Move>,
    verdict: Verdict,
}

impl MatchState {
    /// Creates a fresh match with circle to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: TurnController::new(),
            history: Vec::new(),
            verdict: Verdict::InProgress,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the turn controller.
    pub fn turn(&self) -> &TurnController {
        &self.turn
    }

    /// The mark whose turn it is.
    pub fn to_move(&self) -> Mark {
        self.turn.current()
    }

    /// Accepted moves, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Latest board evaluation.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Places `mark` at cell `id`.
    ///
    /// Returns the accepted move; read [`MatchState::verdict`] for the
    /// resulting evaluation. A move rejected by its preconditions leaves
    /// the state unchanged.
    #[instrument(skip(self), fields(to_move = %self.turn.current()))]
    pub fn play(&mut self, id: usize, mark: Mark) -> Result<Move, MoveError> {
        let position = Position::from_index(id).ok_or(MoveError::OutOfBounds(id))?;
        let action = Move::new(mark, position);

        MoveContract::pre(self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board = self.board.apply_move(id, mark)?;
        self.history.push(action);
        self.turn.advance();
        self.verdict = rules::evaluate(&self.board);

        #[cfg(debug_assertions)]
        MoveContract::post(&before, self)?;

        debug!(%action, verdict = ?self.verdict, "Move applied");
        Ok(action)
    }

    /// Replays moves from a fresh match.
    #[instrument]
    pub fn replay(moves: &[Move]) -> Result<Self, MoveError> {
        let mut state = Self::new();
        for action in moves {
            state.play(action.id(), action.mark)?;
        }
        Ok(state)
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}
