//! Write-once board invariant: cells never change once set.

use super::super::{Board, MatchState};
use super::Invariant;

/// Invariant: every cell is written at most once.
///
/// Replaying the history onto an empty board must never hit an occupied
/// cell and must reproduce the current board exactly.
pub struct MonotonicBoardInvariant;

impl Invariant<MatchState> for MonotonicBoardInvariant {
    fn holds(state: &MatchState) -> bool {
        let replayed = state
            .history()
            .iter()
            .try_fold(Board::new(), |board, mov| board.apply_move(mov.id(), mov.mark));

        matches!(replayed, Ok(board) if board == *state.board())
    }

    fn description() -> &'static str {
        "Board cells are written at most once"
    }
}
