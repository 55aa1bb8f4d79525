//! History consistency invariant: one occupied cell per accepted move.

use super::super::MatchState;
use super::Invariant;

/// Invariant: history length equals the number of occupied cells.
pub struct HistoryConsistentInvariant;

impl Invariant<MatchState> for HistoryConsistentInvariant {
    fn holds(state: &MatchState) -> bool {
        state.history().len() == state.board().occupied()
    }

    fn description() -> &'static str {
        "History length matches number of occupied cells"
    }
}
