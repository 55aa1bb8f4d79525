//! Client side of the matchmaking protocol.
//!
//! [`MatchmakingClient`] is a thin handle over a background task that owns
//! the transport. Outbound events go through an unbounded channel to the
//! task; inbound frames are decoded and queued, in arrival order, on the
//! receiver returned by [`MatchmakingClient::start`]. The first queued
//! event is always [`ServerEvent::Connect`].
//!
//! There is no retry or reconnection. When the transport fails or the
//! server closes the connection the task ends and the inbound queue
//! closes.

mod transport;
mod websocket;

pub use transport::{ChannelPeer, ChannelTransport, Transport, TransportError};
pub use websocket::WebSocketTransport;

use crate::games::tictactoe::Move;
use crate::protocol::{self, ClientEvent, ServerEvent};
use crate::session::PlayerName;
use derive_more::{Display, Error};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Matchmaking client error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Matchmaking error: {} at {}:{}", message, file, line)]
pub struct ClientError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ClientError {
    /// Creates a new client error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<TransportError> for ClientError {
    #[track_caller]
    fn from(err: TransportError) -> Self {
        Self::new(err.message)
    }
}

/// Queue of decoded inbound events.
pub type Inbound = mpsc::UnboundedReceiver<ServerEvent>;

/// Handle to a running matchmaking connection.
#[derive(Debug)]
pub struct MatchmakingClient {
    outbound: mpsc::UnboundedSender<ClientEvent>,
    task: JoinHandle<()>,
}

impl MatchmakingClient {
    /// Starts the transport loop over an established transport.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(transport))]
    pub fn start<T: Transport>(transport: T) -> (Self, Inbound) {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

        // The transport is already established when handed to us.
        let _ = inbound_tx.send(ServerEvent::Connect);

        let task = tokio::spawn(run_transport(transport, outbound_rx, inbound_tx));
        debug!("Transport loop spawned");

        (
            Self {
                outbound: outbound_tx,
                task,
            },
            inbound_rx,
        )
    }

    /// Asks the server to find an opponent.
    #[instrument(skip(self), fields(player = %name))]
    pub fn request_to_play(&self, name: &PlayerName) -> Result<(), ClientError> {
        info!("Requesting a match");
        self.send(ClientEvent::request_to_play(name))
    }

    /// Announces a locally accepted move to the opponent.
    #[instrument(skip(self, mv), fields(mv = %mv))]
    pub fn announce_move(&self, mv: Move) -> Result<(), ClientError> {
        self.send(ClientEvent::from(mv))
    }

    /// Queues an outbound event.
    pub fn send(&self, event: ClientEvent) -> Result<(), ClientError> {
        self.outbound
            .send(event)
            .map_err(|e| ClientError::new(format!("Connection closed; dropped {}", e.0.name())))
    }

    /// True once the transport loop has ended.
    pub fn is_closed(&self) -> bool {
        self.task.is_finished()
    }

    /// Closes the outbound queue and waits for the transport loop to end.
    #[instrument(skip(self))]
    pub async fn shutdown(self) {
        drop(self.outbound);
        if let Err(e) = self.task.await {
            warn!(error = %e, "Transport loop ended abnormally");
        }
        debug!("Transport loop stopped");
    }
}

/// Opens a websocket to `url` and starts a client over it.
#[instrument]
pub async fn connect(url: &str) -> Result<(MatchmakingClient, Inbound), ClientError> {
    let transport = WebSocketTransport::connect(url).await?;
    Ok(MatchmakingClient::start(transport))
}

#[instrument(skip_all)]
async fn run_transport<T: Transport>(
    mut transport: T,
    mut outbound: mpsc::UnboundedReceiver<ClientEvent>,
    inbound: mpsc::UnboundedSender<ServerEvent>,
) {
    loop {
        tokio::select! {
            command = outbound.recv() => {
                let Some(event) = command else {
                    debug!("Client handle dropped, closing transport");
                    if let Err(e) = transport.close().await {
                        debug!(error = %e, "Close failed");
                    }
                    break;
                };
                let frame = match protocol::encode(&event) {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!(error = %e, event = event.name(), "Failed to encode event");
                        continue;
                    }
                };
                if let Err(e) = transport.send(frame).await {
                    warn!(error = %e, event = event.name(), "Send failed, ending transport loop");
                    break;
                }
                debug!(event = event.name(), "Event sent");
            }
            frame = transport.recv() => {
                match frame {
                    Some(Ok(text)) => match protocol::decode(&text) {
                        Ok(event) => {
                            debug!(event = event.name(), "Event received");
                            if inbound.send(event).is_err() {
                                debug!("Inbound queue dropped, ending transport loop");
                                break;
                            }
                        }
                        Err(e) => warn!(error = %e, %text, "Dropping undecodable frame"),
                    },
                    Some(Err(e)) => {
                        warn!(error = %e, "Receive failed, ending transport loop");
                        break;
                    }
                    None => {
                        info!("Server closed the connection");
                        break;
                    }
                }
            }
        }
    }
}
