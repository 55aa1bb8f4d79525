//! Turn tracking.

use super::{Mark, Outcome};
use tracing::{instrument, trace};

/// Tracks whose turn it is and gates move acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnController {
    current: Mark,
}

impl TurnController {
    /// Starts a match with circle to move.
    pub fn new() -> Self {
        Self {
            current: Mark::Circle,
        }
    }

    /// The mark whose turn it is.
    pub fn current(&self) -> Mark {
        self.current
    }

    /// True iff `acting` holds the turn and the match is still in progress.
    #[instrument(skip(self), fields(current = %self.current))]
    pub fn may_submit(&self, acting: Mark, outcome: &Outcome) -> bool {
        let allowed = acting == self.current && !outcome.is_terminal();
        trace!(allowed, "Checked turn");
        allowed
    }

    /// Hands the turn to the other mark.
    pub fn advance(&mut self) {
        self.current = self.current.opponent();
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_opens() {
        assert_eq!(TurnController::new().current(), Mark::Circle);
    }

    #[test]
    fn test_advance_alternates() {
        let mut turn = TurnController::new();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(turn.current());
            turn.advance();
        }
        assert_eq!(seen, vec![Mark::Circle, Mark::Cross, Mark::Circle, Mark::Cross]);
    }

    #[test]
    fn test_may_submit_requires_turn_and_live_match() {
        let turn = TurnController::new();
        assert!(turn.may_submit(Mark::Circle, &Outcome::InProgress));
        assert!(!turn.may_submit(Mark::Cross, &Outcome::InProgress));
        assert!(!turn.may_submit(Mark::Circle, &Outcome::Draw));
        assert!(!turn.may_submit(Mark::Circle, &Outcome::OpponentLeft));
    }
}
