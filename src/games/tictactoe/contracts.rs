//! Contract-based validation for tic-tac-toe.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError};
use super::game::MatchState;
use super::invariants::{InvariantSet, TicTacToeInvariants};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the match has not reached a terminal verdict.
pub struct MatchIsLive;

impl MatchIsLive {
    /// Fails with [`MoveError::GameOver`] once the board is decided.
    #[instrument(skip(state))]
    pub fn check(state: &MatchState) -> Result<(), MoveError> {
        if state.verdict().outcome().is_terminal() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: it must be the mover's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`MoveError::OutOfTurn`] when the mark does not hold the turn.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &MatchState) -> Result<(), MoveError> {
        if state.turn().may_submit(mov.mark, &state.verdict().outcome()) {
            Ok(())
        } else {
            Err(MoveError::OutOfTurn(mov.mark))
        }
    }
}

/// Composite precondition. Occupancy is checked by the board itself.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &MatchState) -> Result<(), MoveError> {
        MatchIsLive::check(state)?;
        PlayersTurn::check(mov, state)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Match is still live
/// - Mover holds the turn
///
/// Postconditions:
/// - Exactly one move was added
/// - All match invariants hold
pub struct MoveContract;

impl Contract<MatchState, Move> for MoveContract {
    fn pre(state: &MatchState, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, state)
    }

    fn post(before: &MatchState, after: &MatchState) -> Result<(), MoveError> {
        if after.history().len() != before.history().len() + 1 {
            warn!(
                before = before.history().len(),
                after = after.history().len(),
                "History did not grow by one move"
            );
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: history must grow by exactly one move".to_string(),
            ));
        }

        TicTacToeInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
