//! Local view of one online match.
//!
//! [`GameSession`] is the single mutation point for match state. Every
//! input, whether a local click or an inbound protocol event, arrives as a
//! [`SessionEvent`] through [`GameSession::handle_event`] and either yields
//! a [`Transition`] or is rejected with a [`SessionError`]. Rejections never
//! change state.

use crate::games::tictactoe::{
    Board, Mark, MatchState, Move, MoveError, Outcome, Verdict, WinningLine,
};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A validated, non-empty player display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

/// The entered name was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("You need to write something!")]
pub struct EmptyName;

impl PlayerName {
    /// Parses a name, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, EmptyName> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(EmptyName)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = EmptyName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

/// Phase of the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the server to pair us with an opponent.
    AwaitingOpponent,
    /// Both players assigned; moves are accepted.
    InProgress,
    /// Terminal. No moves are accepted.
    Finished(Outcome),
}

impl Phase {
    /// Short name for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingOpponent => "awaiting_opponent",
            Phase::InProgress => "in_progress",
            Phase::Finished(_) => "finished",
        }
    }
}

/// Where a move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Clicked by the local player.
    Local,
    /// Relayed by the server from the opponent.
    Remote,
}

/// An input to the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The transport is established.
    Connected,
    /// The server paired us with an opponent.
    OpponentFound {
        /// Opponent's display name.
        opponent_name: String,
        /// Mark assigned to the local player.
        playing_as: Mark,
    },
    /// The server has no opponent for us right now.
    OpponentNotFound,
    /// The local player clicked cell `id`.
    LocalMove {
        /// Cell id (0-8).
        id: usize,
    },
    /// The opponent placed `mark` at cell `id`.
    RemoteMove {
        /// Cell id (0-8).
        id: usize,
        /// Mark the opponent played.
        mark: Mark,
    },
    /// The opponent abandoned the match.
    OpponentLeft,
}

impl SessionEvent {
    /// Short name for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Connected => "connected",
            SessionEvent::OpponentFound { .. } => "opponent_found",
            SessionEvent::OpponentNotFound => "opponent_not_found",
            SessionEvent::LocalMove { .. } => "local_move",
            SessionEvent::RemoteMove { .. } => "remote_move",
            SessionEvent::OpponentLeft => "opponent_left",
        }
    }
}

/// What an accepted event changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Transport established.
    Connected,
    /// Entered `InProgress`.
    Matched {
        /// Opponent's display name.
        opponent_name: String,
        /// Local player's mark.
        playing_as: Mark,
    },
    /// Still awaiting; the "not found" indicator is set.
    NoOpponent,
    /// A move was applied to the board.
    MoveApplied {
        /// The accepted move.
        mv: Move,
        /// Who made it.
        origin: Origin,
        /// Outcome after the move.
        outcome: Outcome,
    },
    /// Entered `Finished(OpponentLeft)`.
    OpponentLeft,
}

/// Why an event was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SessionError {
    /// The move failed validation.
    #[display("Illegal move: {}", _0)]
    Move(MoveError),

    /// The event has no transition from the current phase.
    #[display("Unexpected {} event while {}", event, phase)]
    UnexpectedEvent {
        /// Event name.
        event: &'static str,
        /// Phase name.
        phase: &'static str,
    },
}

impl std::error::Error for SessionError {}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        SessionError::Move(err)
    }
}

/// The local view of one match.
#[derive(Debug, Clone)]
pub struct GameSession {
    player_name: PlayerName,
    opponent_name: Option<String>,
    local_mark: Option<Mark>,
    connected: bool,
    opponent_not_found: bool,
    phase: Phase,
    game: MatchState,
}

impl GameSession {
    /// Creates a session awaiting an opponent.
    #[instrument(fields(player = %player_name))]
    pub fn new(player_name: PlayerName) -> Self {
        info!("Creating new game session");
        Self {
            player_name,
            opponent_name: None,
            local_mark: None,
            connected: false,
            opponent_not_found: false,
            phase: Phase::AwaitingOpponent,
            game: MatchState::new(),
        }
    }

    /// Local player's name.
    pub fn player_name(&self) -> &PlayerName {
        &self.player_name
    }

    /// Opponent's name once matched.
    pub fn opponent_name(&self) -> Option<&str> {
        self.opponent_name.as_deref()
    }

    /// Local player's mark once matched.
    pub fn local_mark(&self) -> Option<Mark> {
        self.local_mark
    }

    /// Whether the transport reported itself established.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whether the server last reported no opponent available.
    pub fn opponent_not_found(&self) -> bool {
        self.opponent_not_found
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current outcome; `InProgress` until the session finishes.
    pub fn outcome(&self) -> Outcome {
        match self.phase {
            Phase::Finished(outcome) => outcome,
            _ => Outcome::InProgress,
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        self.game.board()
    }

    /// The mark whose turn it is.
    pub fn current_turn(&self) -> Mark {
        self.game.to_move()
    }

    /// Accepted moves, oldest first.
    pub fn history(&self) -> &[Move] {
        self.game.history()
    }

    /// The line that won the match, if it was won on the board.
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.game.verdict().line()
    }

    /// True iff `acting` holds the turn and the session is in progress.
    pub fn may_submit(&self, acting: Mark) -> bool {
        self.phase == Phase::InProgress && self.game.turn().may_submit(acting, &self.outcome())
    }

    /// True when the local player may click a cell.
    pub fn is_local_turn(&self) -> bool {
        self.local_mark.is_some_and(|mark| self.may_submit(mark))
    }

    /// Plays the local mark at cell `id`.
    ///
    /// On success the returned move must be announced to the opponent.
    pub fn local_move(&mut self, id: usize) -> Result<Move, SessionError> {
        let mark = self.local_mark.ok_or(MoveError::NoMatch)?;
        Ok(self.apply(id, mark, Origin::Local)?)
    }

    /// Feeds one event through the state machine.
    #[instrument(skip(self), fields(phase = self.phase.name(), kind = event.name()))]
    pub fn handle_event(&mut self, event: SessionEvent) -> Result<Transition, SessionError> {
        let phase = self.phase;
        let unexpected = SessionError::UnexpectedEvent {
            event: event.name(),
            phase: phase.name(),
        };

        match event {
            SessionEvent::Connected => {
                self.connected = true;
                Ok(Transition::Connected)
            }
            SessionEvent::OpponentFound {
                opponent_name,
                playing_as,
            } => {
                if phase != Phase::AwaitingOpponent {
                    return Err(unexpected);
                }
                info!(opponent = %opponent_name, %playing_as, "Opponent found");
                self.opponent_name = Some(opponent_name.clone());
                self.local_mark = Some(playing_as);
                self.opponent_not_found = false;
                self.phase = Phase::InProgress;
                Ok(Transition::Matched {
                    opponent_name,
                    playing_as,
                })
            }
            SessionEvent::OpponentNotFound => {
                if phase != Phase::AwaitingOpponent {
                    return Err(unexpected);
                }
                debug!("No opponent available yet");
                self.opponent_not_found = true;
                Ok(Transition::NoOpponent)
            }
            SessionEvent::LocalMove { id } => {
                let mv = self.local_move(id)?;
                Ok(self.move_applied(mv, Origin::Local))
            }
            SessionEvent::RemoteMove { id, mark } => {
                let mv = self.apply(id, mark, Origin::Remote)?;
                Ok(self.move_applied(mv, Origin::Remote))
            }
            SessionEvent::OpponentLeft => {
                if phase != Phase::InProgress {
                    return Err(unexpected);
                }
                info!("Opponent left the match");
                self.phase = Phase::Finished(Outcome::OpponentLeft);
                Ok(Transition::OpponentLeft)
            }
        }
    }

    fn move_applied(&self, mv: Move, origin: Origin) -> Transition {
        Transition::MoveApplied {
            mv,
            origin,
            outcome: self.outcome(),
        }
    }

    fn apply(&mut self, id: usize, mark: Mark, origin: Origin) -> Result<Move, MoveError> {
        match self.phase {
            Phase::AwaitingOpponent => return Err(MoveError::NoMatch),
            Phase::Finished(_) => return Err(MoveError::GameOver),
            Phase::InProgress => {}
        }

        if origin == Origin::Remote && Some(mark) == self.local_mark {
            warn!(id, %mark, "Remote move carried the local mark");
            return Err(MoveError::WrongSide(mark));
        }

        let mv = self.game.play(id, mark)?;
        let verdict = self.game.verdict();
        if let Verdict::Won { line, .. } = verdict {
            info!(%mark, ids = ?line.ids(), "Match won");
        }
        let outcome = verdict.outcome();
        if outcome.is_terminal() {
            self.phase = Phase::Finished(outcome);
        }

        debug!(%mv, ?origin, %outcome, "Move accepted");
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Position;

    fn matched(playing_as: Mark) -> GameSession {
        let mut session = GameSession::new(PlayerName::parse("alice").unwrap());
        session
            .handle_event(SessionEvent::OpponentFound {
                opponent_name: "bob".to_string(),
                playing_as,
            })
            .unwrap();
        session
    }

    #[test]
    fn test_player_name_rejects_blank() {
        assert_eq!(PlayerName::parse("   "), Err(EmptyName));
        assert_eq!(PlayerName::parse("  ann ").unwrap().as_str(), "ann");
    }

    #[test]
    fn test_new_session_awaits_opponent() {
        let session = GameSession::new(PlayerName::parse("alice").unwrap());
        assert_eq!(session.phase(), Phase::AwaitingOpponent);
        assert_eq!(session.outcome(), Outcome::InProgress);
        assert!(!session.is_local_turn());
    }

    #[test]
    fn test_not_found_keeps_awaiting() {
        let mut session = GameSession::new(PlayerName::parse("alice").unwrap());
        assert_eq!(
            session.handle_event(SessionEvent::OpponentNotFound),
            Ok(Transition::NoOpponent)
        );
        assert_eq!(session.phase(), Phase::AwaitingOpponent);
        assert!(session.opponent_not_found());
    }

    #[test]
    fn test_move_before_match_rejected() {
        let mut session = GameSession::new(PlayerName::parse("alice").unwrap());
        assert_eq!(
            session.local_move(4),
            Err(SessionError::Move(MoveError::NoMatch))
        );
        assert_eq!(session.board().occupied(), 0);
    }

    #[test]
    fn test_local_then_remote_move() {
        let mut session = matched(Mark::Circle);
        let mv = session.local_move(4).unwrap();
        assert_eq!(mv, Move::new(Mark::Circle, Position::Center));
        assert!(!session.is_local_turn());

        let transition = session
            .handle_event(SessionEvent::RemoteMove { id: 0, mark: Mark::Cross })
            .unwrap();
        assert!(matches!(
            transition,
            Transition::MoveApplied { origin: Origin::Remote, outcome: Outcome::InProgress, .. }
        ));
        assert!(session.is_local_turn());
    }

    #[test]
    fn test_remote_move_with_local_mark_rejected() {
        let mut session = matched(Mark::Circle);
        assert_eq!(
            session.handle_event(SessionEvent::RemoteMove { id: 0, mark: Mark::Circle }),
            Err(SessionError::Move(MoveError::WrongSide(Mark::Circle)))
        );
        assert_eq!(session.board().occupied(), 0);
    }

    #[test]
    fn test_opponent_left_after_finish_rejected() {
        let mut session = matched(Mark::Circle);
        session.handle_event(SessionEvent::OpponentLeft).unwrap();
        assert_eq!(session.phase(), Phase::Finished(Outcome::OpponentLeft));
        assert!(matches!(
            session.handle_event(SessionEvent::OpponentLeft),
            Err(SessionError::UnexpectedEvent { event: "opponent_left", phase: "finished" })
        ));
    }

    #[test]
    fn test_second_match_offer_rejected() {
        let mut session = matched(Mark::Cross);
        let result = session.handle_event(SessionEvent::OpponentFound {
            opponent_name: "carol".to_string(),
            playing_as: Mark::Circle,
        });
        assert!(matches!(result, Err(SessionError::UnexpectedEvent { .. })));
        assert_eq!(session.opponent_name(), Some("bob"));
        assert_eq!(session.local_mark(), Some(Mark::Cross));
    }
}
