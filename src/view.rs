//! Pure projection of a session onto what the screen shows.
//!
//! Rendering code draws a [`Screen`] and nothing else, so every rule about
//! what is clickable, highlighted, or dimmed lives here and is testable
//! without a terminal.

use crate::games::tictactoe::{Mark, Outcome, Position};
use crate::session::{GameSession, Phase};

/// What to show for the current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Transport not yet established.
    Connecting,
    /// Connected, no opponent yet.
    Waiting {
        /// The server reported that nobody is available.
        opponent_not_found: bool,
        /// The connection went away while waiting.
        link_lost: bool,
    },
    /// A match is in progress or finished.
    Board(BoardView),
}

/// One cell as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellView {
    /// Mark in the cell, if any.
    pub mark: Option<Mark>,
    /// Whether clicking this cell would be accepted.
    pub clickable: bool,
    /// Part of the winning line.
    pub highlighted: bool,
    /// Greyed out because the match ended without a local win.
    pub dimmed: bool,
}

/// A player's name tag above the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTag {
    /// Display name.
    pub name: String,
    /// The mark whose turn it is, when it is this player's turn.
    pub to_move: Option<Mark>,
}

/// The board screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// Cells in id order.
    pub cells: [CellView; 9],
    /// Local player's tag (left).
    pub local: NameTag,
    /// Opponent's tag (right).
    pub opponent: NameTag,
    /// Line under the board.
    pub status: String,
    /// The connection went away.
    pub link_lost: bool,
}

impl BoardView {
    /// The cell at `pos`.
    pub fn cell(&self, pos: Position) -> CellView {
        self.cells[pos.to_index()]
    }
}

/// Projects the session onto a screen.
pub fn project(session: &GameSession, link_lost: bool) -> Screen {
    let (Some(local_mark), Some(opponent_name)) = (session.local_mark(), session.opponent_name())
    else {
        if !session.is_connected() {
            return Screen::Connecting;
        }
        return Screen::Waiting {
            opponent_not_found: session.opponent_not_found(),
            link_lost,
        };
    };

    let outcome = session.outcome();
    let finished = matches!(session.phase(), Phase::Finished(_));
    let local_turn = session.is_local_turn();
    let line = session.winning_line();
    let dim = finished && outcome.winner() != Some(local_mark);

    let cells = Position::ALL.map(|pos| {
        let mark = session.board().get(pos).mark();
        let highlighted = line.is_some_and(|l| l.contains(pos));
        CellView {
            mark,
            clickable: !link_lost && local_turn && mark.is_none(),
            highlighted,
            dimmed: dim && !highlighted,
        }
    });

    let turn = session.current_turn();
    let live = !finished;
    let local = NameTag {
        name: session.player_name().to_string(),
        to_move: (live && turn == local_mark).then_some(turn),
    };
    let opponent = NameTag {
        name: opponent_name.to_string(),
        to_move: (live && turn != local_mark).then_some(turn),
    };

    Screen::Board(BoardView {
        cells,
        local,
        opponent,
        status: status_line(outcome, local_mark, opponent_name),
        link_lost,
    })
}

fn status_line(outcome: Outcome, local_mark: Mark, opponent_name: &str) -> String {
    match outcome {
        Outcome::InProgress => format!("You are playing against {}", opponent_name),
        Outcome::Won(mark) if mark == local_mark => "You won the game!".to_string(),
        Outcome::Won(_) => format!("{} won the game", opponent_name),
        Outcome::Draw => "It's a Draw".to_string(),
        Outcome::OpponentLeft => "You won the match, Opponent has left".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{PlayerName, SessionEvent};

    fn session() -> GameSession {
        GameSession::new(PlayerName::parse("alice").unwrap())
    }

    fn board(screen: Screen) -> BoardView {
        match screen {
            Screen::Board(view) => view,
            other => panic!("expected board, got {:?}", other),
        }
    }

    #[test]
    fn test_connecting_then_waiting() {
        let mut s = session();
        assert_eq!(project(&s, false), Screen::Connecting);

        s.handle_event(SessionEvent::Connected).unwrap();
        s.handle_event(SessionEvent::OpponentNotFound).unwrap();
        assert_eq!(
            project(&s, false),
            Screen::Waiting { opponent_not_found: true, link_lost: false }
        );
    }

    #[test]
    fn test_cells_disabled_off_turn() {
        let mut s = session();
        s.handle_event(SessionEvent::OpponentFound {
            opponent_name: "bob".to_string(),
            playing_as: Mark::Cross,
        })
        .unwrap();

        let view = board(project(&s, false));
        assert!(view.cells.iter().all(|c| !c.clickable));
        assert_eq!(view.opponent.to_move, Some(Mark::Circle));
        assert_eq!(view.local.to_move, None);
        assert_eq!(view.status, "You are playing against bob");
    }

    #[test]
    fn test_occupied_cells_not_clickable() {
        let mut s = session();
        s.handle_event(SessionEvent::OpponentFound {
            opponent_name: "bob".to_string(),
            playing_as: Mark::Circle,
        })
        .unwrap();
        s.local_move(0).unwrap();
        s.handle_event(SessionEvent::RemoteMove { id: 4, mark: Mark::Cross }).unwrap();

        let view = board(project(&s, false));
        assert!(!view.cell(Position::TopLeft).clickable);
        assert!(!view.cell(Position::Center).clickable);
        assert!(view.cell(Position::BottomRight).clickable);
    }

    #[test]
    fn test_loss_highlights_line_and_dims_rest() {
        let mut s = session();
        s.handle_event(SessionEvent::OpponentFound {
            opponent_name: "bob".to_string(),
            playing_as: Mark::Cross,
        })
        .unwrap();
        // Circle (bob) takes the main diagonal
        for (id, mark) in [(0, Mark::Circle), (1, Mark::Cross), (4, Mark::Circle), (2, Mark::Cross), (8, Mark::Circle)] {
            if mark == Mark::Cross {
                s.local_move(id).unwrap();
            } else {
                s.handle_event(SessionEvent::RemoteMove { id, mark }).unwrap();
            }
        }

        let view = board(project(&s, false));
        assert_eq!(view.status, "bob won the game");
        for id in [0, 4, 8] {
            assert!(view.cells[id].highlighted);
            assert!(!view.cells[id].dimmed);
        }
        assert!(view.cells[1].dimmed);
        assert!(view.cells.iter().all(|c| !c.clickable));
        assert_eq!(view.local.to_move, None);
        assert_eq!(view.opponent.to_move, None);
    }

    #[test]
    fn test_local_win_highlights_without_dimming() {
        let mut s = session();
        s.handle_event(SessionEvent::OpponentFound {
            opponent_name: "bob".to_string(),
            playing_as: Mark::Circle,
        })
        .unwrap();
        for (id, mark) in [(0, Mark::Circle), (3, Mark::Cross), (1, Mark::Circle), (4, Mark::Cross), (2, Mark::Circle)] {
            if mark == Mark::Circle {
                s.local_move(id).unwrap();
            } else {
                s.handle_event(SessionEvent::RemoteMove { id, mark }).unwrap();
            }
        }

        let view = board(project(&s, false));
        assert_eq!(view.status, "You won the game!");
        assert!(view.cells.iter().all(|c| !c.dimmed));
        let lit: Vec<usize> = (0..9).filter(|&id| view.cells[id].highlighted).collect();
        assert_eq!(lit, vec![0, 1, 2]);
    }

    #[test]
    fn test_draw_dims_every_cell() {
        let mut s = session();
        s.handle_event(SessionEvent::OpponentFound {
            opponent_name: "bob".to_string(),
            playing_as: Mark::Circle,
        })
        .unwrap();
        // O X O / O X X / X O O
        for (id, mark) in [
            (0, Mark::Circle),
            (1, Mark::Cross),
            (2, Mark::Circle),
            (4, Mark::Cross),
            (3, Mark::Circle),
            (5, Mark::Cross),
            (7, Mark::Circle),
            (6, Mark::Cross),
            (8, Mark::Circle),
        ] {
            if mark == Mark::Circle {
                s.local_move(id).unwrap();
            } else {
                s.handle_event(SessionEvent::RemoteMove { id, mark }).unwrap();
            }
        }

        let view = board(project(&s, false));
        assert_eq!(view.status, "It's a Draw");
        assert!(view.cells.iter().all(|c| c.dimmed && !c.highlighted && !c.clickable));
    }

    #[test]
    fn test_link_lost_disables_board() {
        let mut s = session();
        s.handle_event(SessionEvent::OpponentFound {
            opponent_name: "bob".to_string(),
            playing_as: Mark::Circle,
        })
        .unwrap();

        assert!(board(project(&s, false)).cells.iter().all(|c| c.clickable));
        assert!(board(project(&s, true)).cells.iter().all(|c| !c.clickable));
    }

    #[test]
    fn test_opponent_left_message() {
        let mut s = session();
        s.handle_event(SessionEvent::OpponentFound {
            opponent_name: "bob".to_string(),
            playing_as: Mark::Circle,
        })
        .unwrap();
        s.handle_event(SessionEvent::OpponentLeft).unwrap();

        let view = board(project(&s, true));
        assert_eq!(view.status, "You won the match, Opponent has left");
        assert!(view.link_lost);
    }
}
