//! Named events exchanged with the matchmaking server.
//!
//! Each event travels as one JSON text frame of the form
//! `{"event": <name>, "data": <payload>}`. Events without a payload omit
//! `data`.

use crate::games::tictactoe::{Mark, Move};
use crate::session::{PlayerName, SessionEvent};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Cell and mark of a move, as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveState {
    /// Cell id (0-8).
    pub id: u8,
    /// Mark placed.
    pub sign: Mark,
}

/// Payload of both move events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePayload {
    /// The move.
    pub state: MoveState,
}

impl From<Move> for MovePayload {
    fn from(mv: Move) -> Self {
        Self {
            state: MoveState {
                id: mv.id() as u8,
                sign: mv.mark,
            },
        }
    }
}

/// Payload of `request_to_play`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    /// Name shown to the opponent.
    pub player_name: String,
}

/// Payload of `OpponentFound`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentFound {
    /// Opponent's display name.
    pub opponent_name: String,
    /// Mark assigned to the receiving player.
    pub playing_as: Mark,
}

/// Events sent by this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Asks the server to pair us with an opponent.
    #[serde(rename = "request_to_play")]
    RequestToPlay(PlayRequest),
    /// Announces a locally accepted move.
    #[serde(rename = "playerMoveFromClient")]
    PlayerMove(MovePayload),
}

impl ClientEvent {
    /// Builds a matchmaking request.
    pub fn request_to_play(name: &PlayerName) -> Self {
        ClientEvent::RequestToPlay(PlayRequest {
            player_name: name.as_str().to_string(),
        })
    }

    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::RequestToPlay(_) => "request_to_play",
            ClientEvent::PlayerMove(_) => "playerMoveFromClient",
        }
    }
}

impl From<Move> for ClientEvent {
    fn from(mv: Move) -> Self {
        ClientEvent::PlayerMove(mv.into())
    }
}

/// Events received from the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Transport established. Synthesized locally by the transport.
    #[serde(rename = "connect")]
    Connect,
    /// Matched with an opponent.
    #[serde(rename = "OpponentFound")]
    OpponentFound(OpponentFound),
    /// No opponent available.
    #[serde(rename = "OpponentNotFound")]
    OpponentNotFound,
    /// The opponent moved.
    #[serde(rename = "playerMoveFromServer")]
    PlayerMove(MovePayload),
    /// The opponent left the match.
    #[serde(rename = "opponentLeftMatch")]
    OpponentLeft,
}

impl ServerEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Connect => "connect",
            ServerEvent::OpponentFound(_) => "OpponentFound",
            ServerEvent::OpponentNotFound => "OpponentNotFound",
            ServerEvent::PlayerMove(_) => "playerMoveFromServer",
            ServerEvent::OpponentLeft => "opponentLeftMatch",
        }
    }
}

impl From<ServerEvent> for SessionEvent {
    fn from(event: ServerEvent) -> Self {
        match event {
            ServerEvent::Connect => SessionEvent::Connected,
            ServerEvent::OpponentFound(found) => SessionEvent::OpponentFound {
                opponent_name: found.opponent_name,
                playing_as: found.playing_as,
            },
            ServerEvent::OpponentNotFound => SessionEvent::OpponentNotFound,
            ServerEvent::PlayerMove(payload) => SessionEvent::RemoteMove {
                id: usize::from(payload.state.id),
                mark: payload.state.sign,
            },
            ServerEvent::OpponentLeft => SessionEvent::OpponentLeft,
        }
    }
}

/// A frame could not be encoded or decoded.
#[derive(Debug, Display, Error, From)]
#[display("Protocol error: {}", _0)]
pub struct ProtocolError(serde_json::Error);

/// Encodes an outbound event as a text frame.
#[instrument(skip(event), fields(event = event.name()))]
pub fn encode(event: &ClientEvent) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(event)?)
}

/// Decodes an inbound text frame.
#[instrument(skip(frame))]
pub fn decode(frame: &str) -> Result<ServerEvent, ProtocolError> {
    Ok(serde_json::from_str(frame)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Position;
    use serde_json::json;

    #[test]
    fn test_request_to_play_shape() {
        let name = PlayerName::parse("alice").unwrap();
        let value = serde_json::to_value(ClientEvent::request_to_play(&name)).unwrap();
        assert_eq!(
            value,
            json!({"event": "request_to_play", "data": {"playerName": "alice"}})
        );
    }

    #[test]
    fn test_outbound_move_shape() {
        let event = ClientEvent::from(Move::new(Mark::Cross, Position::MiddleRight));
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({"event": "playerMoveFromClient", "data": {"state": {"id": 5, "sign": "cross"}}})
        );
    }

    #[test]
    fn test_decode_opponent_found() {
        let frame = r#"{"event":"OpponentFound","data":{"opponentName":"bob","playingAs":"circle"}}"#;
        assert_eq!(
            decode(frame).unwrap(),
            ServerEvent::OpponentFound(OpponentFound {
                opponent_name: "bob".to_string(),
                playing_as: Mark::Circle,
            })
        );
    }

    #[test]
    fn test_decode_payloadless_events() {
        assert_eq!(decode(r#"{"event":"opponentLeftMatch"}"#).unwrap(), ServerEvent::OpponentLeft);
        assert_eq!(
            decode(r#"{"event":"OpponentNotFound"}"#).unwrap(),
            ServerEvent::OpponentNotFound
        );
    }

    #[test]
    fn test_decode_remote_move_into_session_event() {
        let frame = r#"{"event":"playerMoveFromServer","data":{"state":{"id":8,"sign":"cross"}}}"#;
        let event = SessionEvent::from(decode(frame).unwrap());
        assert_eq!(event, SessionEvent::RemoteMove { id: 8, mark: Mark::Cross });
    }

    #[test]
    fn test_decode_rejects_unknown_event() {
        assert!(decode(r#"{"event":"chat","data":"hi"}"#).is_err());
        assert!(decode("not json").is_err());
    }
}
