//! Tic-tac-toe board logic: cells, rules, turns, and contracts.

mod action;
mod contracts;
mod game;
mod invariants;
mod position;
mod rules;
mod turn;
mod types;

pub use action::{Move, MoveError};
pub use contracts::{Contract, LegalMove, MatchIsLive, MoveContract, PlayersTurn};
pub use game::MatchState;
pub use invariants::{
    AlternatingTurnInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, MonotonicBoardInvariant, TicTacToeInvariants,
};
pub use position::Position;
pub use rules::{check_winner, evaluate, is_draw, is_full, LineKind, Verdict, WinningLine, LINES};
pub use turn::TurnController;
pub use types::{Board, Cell, Mark, Outcome};
