//! Alternating turn invariant: circle, cross, circle, ...

use super::super::{Mark, MatchState};
use super::Invariant;

/// Invariant: marks alternate, circle first, and the turn points at the
/// mark that should move next.
pub struct AlternatingTurnInvariant;

impl Invariant<MatchState> for AlternatingTurnInvariant {
    fn holds(state: &MatchState) -> bool {
        let history = state.history();

        if history.first().is_some_and(|first| first.mark != Mark::Circle) {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].mark == pair[1].mark) {
            return false;
        }

        let expected_next = if history.len() % 2 == 0 {
            Mark::Circle
        } else {
            Mark::Cross
        };

        state.to_move() == expected_next
    }

    fn description() -> &'static str {
        "Marks alternate turns (circle, cross, circle, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Move, Position};

    #[test]
    fn test_fresh_match_holds() {
        assert!(AlternatingTurnInvariant::holds(&MatchState::new()));
    }

    #[test]
    fn test_alternating_sequence_holds() {
        let moves = [
            Move::new(Mark::Circle, Position::TopLeft),
            Move::new(Mark::Cross, Position::Center),
            Move::new(Mark::Circle, Position::TopRight),
            Move::new(Mark::Cross, Position::BottomLeft),
            Move::new(Mark::Circle, Position::BottomRight),
        ];
        let state = MatchState::replay(&moves).expect("legal sequence");
        assert!(AlternatingTurnInvariant::holds(&state));
        assert_eq!(state.to_move(), Mark::Cross);
    }

    #[test]
    fn test_same_mark_twice_violates() {
        let mut state = MatchState::new();
        state.play(0, Mark::Circle).unwrap();
        // Forge a second circle move and rewind the turn
        state.history.push(Move::new(Mark::Circle, Position::Center));
        state.turn.advance();

        assert!(!AlternatingTurnInvariant::holds(&state));
    }

    #[test]
    fn test_stale_turn_violates() {
        let mut state = MatchState::new();
        state.play(0, Mark::Circle).unwrap();
        state.turn.advance();

        assert!(!AlternatingTurnInvariant::holds(&state));
    }
}
